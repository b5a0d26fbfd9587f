//! Types for the element registry system.

use std::collections::HashMap;

use crate::error::Diagnostics;
use crate::types::{AasElement, AasEnum, AasField, AasType};

/// Classification of element kinds for processing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// Transparent wrappers around one element (`submodelElement`).
    Wrapper,
    /// Nested structures promoted to their own type (collection, list, entity).
    Structural,
    /// Elements read into one field (property, file, range, ...).
    Leaf,
}

/// Handle to a type created during an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef(usize);

/// Handle to a field of a type created during an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRef {
    owner: TypeRef,
    index: usize,
}

/// Handle to an enumeration created during an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumRef(usize);

#[derive(Debug)]
struct TypeSlot {
    ty: AasType,
    /// False if a type with the same short name was created earlier.
    retained: bool,
}

/// Accumulator threaded through one extraction run.
///
/// Owns every entity created while walking the document together with the
/// semantic-id indices used for linking. Entities are addressed by handles,
/// so the indices stay valid while types gain fields.
#[derive(Debug, Default)]
pub struct ParseContext {
    types: Vec<TypeSlot>,
    enums: Vec<AasEnum>,
    type_index: HashMap<String, Vec<TypeRef>>,
    field_index: HashMap<String, Vec<FieldRef>>,
    enum_index: HashMap<String, Vec<EnumRef>>,
    version: Option<String>,
    diagnostics: Diagnostics,
}

/// Entities and metadata left after an extraction run.
#[derive(Debug)]
pub struct ParseOutput {
    pub types: Vec<AasType>,
    pub enums: Vec<AasEnum>,
    pub version: Option<String>,
    pub warnings: Vec<String>,
}

fn index<R>(map: &mut HashMap<String, Vec<R>>, semantic_id: Option<&str>, handle: R) {
    if let Some(id) = semantic_id.filter(|id| !id.is_empty()) {
        map.entry(id.to_string()).or_default().push(handle);
    }
}

impl ParseContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type and index it by semantic id.
    ///
    /// A type whose short name is already taken is indexed but not retained
    /// in the output.
    pub fn add_type(&mut self, ty: AasType) -> TypeRef {
        let handle = TypeRef(self.types.len());
        let retained = !self
            .types
            .iter()
            .any(|slot| slot.retained && slot.ty.short_name() == ty.short_name());
        if !retained {
            tracing::debug!(short_name = %ty.short_name(), "Discarding duplicate type");
        }
        index(&mut self.type_index, ty.semantic_id(), handle);
        self.types.push(TypeSlot { ty, retained });
        handle
    }

    /// Append a field to a type and index it by semantic id.
    pub fn add_field(&mut self, owner: TypeRef, field: AasField) -> Option<FieldRef> {
        let semantic_id = field.semantic_id().map(str::to_string);
        let slot = self.types.get_mut(owner.0)?;
        let handle = FieldRef {
            owner,
            index: slot.ty.push_field(field),
        };
        index(&mut self.field_index, semantic_id.as_deref(), handle);
        Some(handle)
    }

    /// Add an enumeration and index it by semantic id.
    pub fn add_enum(&mut self, en: AasEnum) -> EnumRef {
        let handle = EnumRef(self.enums.len());
        index(&mut self.enum_index, en.semantic_id(), handle);
        self.enums.push(en);
        handle
    }

    /// Whether an enumeration with this short name exists.
    #[must_use]
    pub fn has_enum(&self, short_name: &str) -> bool {
        self.enums.iter().any(|e| e.short_name() == short_name)
    }

    #[must_use]
    pub fn get_type(&self, handle: TypeRef) -> Option<&AasType> {
        self.types.get(handle.0).map(|slot| &slot.ty)
    }

    pub fn type_mut(&mut self, handle: TypeRef) -> Option<&mut AasType> {
        self.types.get_mut(handle.0).map(|slot| &mut slot.ty)
    }

    #[must_use]
    pub fn get_field(&self, handle: FieldRef) -> Option<&AasField> {
        self.get_type(handle.owner)?.fields().get(handle.index)
    }

    pub fn field_mut(&mut self, handle: FieldRef) -> Option<&mut AasField> {
        self.type_mut(handle.owner)?.field_at_mut(handle.index)
    }

    pub fn enum_mut(&mut self, handle: EnumRef) -> Option<&mut AasEnum> {
        self.enums.get_mut(handle.0)
    }

    /// Types carrying `semantic_id`.
    #[must_use]
    pub fn types_for(&self, semantic_id: &str) -> &[TypeRef] {
        self.type_index.get(semantic_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Fields carrying `semantic_id`.
    #[must_use]
    pub fn fields_for(&self, semantic_id: &str) -> &[FieldRef] {
        self.field_index.get(semantic_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Enumerations carrying `semantic_id`.
    #[must_use]
    pub fn enums_for(&self, semantic_id: &str) -> &[EnumRef] {
        self.enum_index.get(semantic_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Record a specification version; the first one wins.
    pub fn record_version(&mut self, version: Option<String>) {
        if self.version.is_none() {
            self.version = version.filter(|v| !v.is_empty());
        }
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Record a recoverable problem.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.diagnostics.warn(message);
    }

    /// Number of types created so far, including discarded duplicates.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Consume the context, keeping retained types in creation order.
    #[must_use]
    pub fn into_output(self) -> ParseOutput {
        ParseOutput {
            types: self
                .types
                .into_iter()
                .filter(|slot| slot.retained)
                .map(|slot| slot.ty)
                .collect(),
            enums: self.enums,
            version: self.version,
            warnings: self.diagnostics.into_messages(),
        }
    }
}
