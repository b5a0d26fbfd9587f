//! Element registry system for submodel parsing.
//!
//! Submodel elements are dispatched by tag name to registered handlers.
//! Handlers record types and fields in the per-run [`ParseContext`] and hand
//! nested elements back to the [`ParseEngine`].

mod config;
mod core;
mod engine;
mod handler;
pub mod handlers;
mod types;

pub use config::create_submodel_registry;
pub use core::ElementRegistry;
pub use engine::ParseEngine;
pub use handler::{ElementHandler, RecurseFn};
pub use types::{ElementType, EnumRef, FieldRef, ParseContext, ParseOutput, TypeRef};
