//! Element registry for mapping tag names to handlers.

use std::collections::HashMap;

use super::handler::ElementHandler;

/// Registry mapping submodel element names to handlers.
///
/// Tag names are registered without namespace prefix, so one registry serves
/// both document generations.
pub struct ElementRegistry {
    handlers: HashMap<String, Box<dyn ElementHandler>>,
}

impl ElementRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for a specific tag name.
    pub fn register(
        &mut self,
        tag_name: impl Into<String>,
        handler: impl ElementHandler + 'static,
    ) {
        self.handlers.insert(tag_name.into(), Box::new(handler));
    }

    /// Get the handler for a tag name, if one is registered.
    #[must_use]
    pub fn get_handler(&self, tag_name: &str) -> Option<&dyn ElementHandler> {
        self.handlers.get(tag_name).map(|h| h.as_ref())
    }
}

#[cfg(test)]
impl ElementRegistry {
    pub(crate) fn has_handler(&self, tag_name: &str) -> bool {
        self.handlers.contains_key(tag_name)
    }

    pub(crate) fn registered_tags(&self) -> std::collections::HashSet<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}
