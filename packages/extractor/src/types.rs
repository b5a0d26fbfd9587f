//! Core data types for the extracted schema.
//!
//! Entities are created by the parsers and refined by the linker. Outside the
//! crate they are read-only: every mutator is crate-private, and the
//! description setter enforces the trailing full stop.

use std::fmt;

use serde::Serialize;

use crate::text::normalize_description;

/// Attributes shared by types, fields and enumerations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementBase {
    short_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    semantic_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_case_of: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    multi_semantic_id: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    generic: bool,
}

impl ElementBase {
    #[must_use]
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn set_short_name(&mut self, short_name: impl Into<String>) {
        self.short_name = short_name.into();
    }

    /// Set the semantic id; empty identifiers clear it.
    pub(crate) fn set_semantic_id(&mut self, semantic_id: Option<String>) {
        self.semantic_id = semantic_id.filter(|id| !id.is_empty());
    }

    pub(crate) fn set_is_case_of(&mut self, is_case_of: impl Into<String>) {
        self.is_case_of = Some(is_case_of.into());
    }

    /// Set the description, normalized to end with a full stop.
    pub(crate) fn set_description(&mut self, description: &str) {
        self.description = normalize_description(description);
    }

    pub(crate) fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name.filter(|name| !name.is_empty());
    }

    pub(crate) fn set_multi_semantic_id(&mut self, multi: bool) {
        self.multi_semantic_id = multi;
    }

    pub(crate) fn set_generic(&mut self, generic: bool) {
        self.generic = generic;
    }
}

/// Read access to the attributes shared by all schema elements.
pub trait AasElement {
    fn base(&self) -> &ElementBase;

    /// Local name, without multiplicity marker.
    fn short_name(&self) -> &str {
        &self.base().short_name
    }

    /// Canonical semantic id.
    fn semantic_id(&self) -> Option<&str> {
        self.base().semantic_id.as_deref()
    }

    /// Identifier of the concept description linked to this element.
    fn is_case_of(&self) -> Option<&str> {
        self.base().is_case_of.as_deref()
    }

    /// Description, always ending with a full stop.
    fn description(&self) -> Option<&str> {
        self.base().description.as_deref()
    }

    /// Display name, falling back to the short name.
    fn display_name(&self) -> &str {
        self.base()
            .display_name
            .as_deref()
            .unwrap_or_else(|| self.short_name())
    }

    /// Whether more than one semantic id was applied.
    fn has_multi_semantic_id(&self) -> bool {
        self.base().multi_semantic_id
    }

    /// Whether the short name is a reserved wildcard.
    fn is_generic(&self) -> bool {
        self.base().generic
    }
}

/// Mutable access for the parsers and the linker.
pub(crate) trait AasElementMut: AasElement {
    fn base_mut(&mut self) -> &mut ElementBase;
}

macro_rules! impl_element {
    ($($ty:ty),*) => {
        $(
            impl AasElement for $ty {
                fn base(&self) -> &ElementBase {
                    &self.base
                }
            }

            impl AasElementMut for $ty {
                fn base_mut(&mut self) -> &mut ElementBase {
                    &mut self.base
                }
            }
        )*
    };
}

impl_element!(AasType, AasField, AasEnum);

/// Structural kind of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Submodel,
    Collection,
    List,
    Entity,
}

impl TypeKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Submodel => "submodel",
            TypeKind::Collection => "collection",
            TypeKind::List => "list",
            TypeKind::Entity => "entity",
        }
    }
}

/// Structural kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Property,
    File,
    MultiLanguageText,
    Blob,
    Operation,
    Range,
    Relation,
    Reference,
}

impl FieldKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Property => "property",
            FieldKind::File => "file",
            FieldKind::MultiLanguageText => "multi_language_text",
            FieldKind::Blob => "blob",
            FieldKind::Operation => "operation",
            FieldKind::Range => "range",
            FieldKind::Relation => "relation",
            FieldKind::Reference => "reference",
        }
    }
}

/// Entity subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityType {
    CoManagedEntity,
    SelfManagedEntity,
}

impl EntityType {
    /// Parse an `entityType` value, ignoring case.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("CoManagedEntity") {
            Some(EntityType::CoManagedEntity)
        } else if text.eq_ignore_ascii_case("SelfManagedEntity") {
            Some(EntityType::SelfManagedEntity)
        } else {
            None
        }
    }
}

/// Inclusive occurrence bounds of a field; `max == -1` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cardinality {
    pub min: i32,
    pub max: i32,
}

impl Cardinality {
    pub const ONE: Cardinality = Cardinality { min: 1, max: 1 };
    pub const ZERO_TO_ONE: Cardinality = Cardinality { min: 0, max: 1 };
    pub const ZERO_TO_MANY: Cardinality = Cardinality { min: 0, max: -1 };
    pub const ONE_TO_MANY: Cardinality = Cardinality { min: 1, max: -1 };

    /// Map a `Cardinality`/`Multiplicity` qualifier value.
    ///
    /// # Examples
    /// ```
    /// use aasx_extractor::types::Cardinality;
    ///
    /// assert_eq!(Cardinality::from_qualifier("ZeroToMany"), Some(Cardinality { min: 0, max: -1 }));
    /// assert_eq!(Cardinality::from_qualifier("Many"), None);
    /// ```
    #[must_use]
    pub fn from_qualifier(value: &str) -> Option<Self> {
        match value {
            "OneToMany" => Some(Self::ONE_TO_MANY),
            "ZeroToMany" => Some(Self::ZERO_TO_MANY),
            "ZeroToOne" => Some(Self::ZERO_TO_ONE),
            "One" => Some(Self::ONE),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.max < 0
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.min == 0
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            write!(f, "[{}..*]", self.min)
        } else {
            write!(f, "[{}..{}]", self.min, self.max)
        }
    }
}

/// A schema type derived from a submodel, collection, list or entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AasType {
    #[serde(flatten)]
    base: ElementBase,
    kind: TypeKind,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    multi_valued: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    ordered: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    allow_duplicates: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    fixed_short_name: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_type: Option<EntityType>,
    fields: Vec<AasField>,
}

impl AasType {
    #[must_use]
    pub fn new(short_name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            base: ElementBase::new(short_name),
            kind,
            multi_valued: false,
            ordered: false,
            allow_duplicates: false,
            fixed_short_name: false,
            entity_type: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    #[must_use]
    pub fn fields(&self) -> &[AasField] {
        &self.fields
    }

    /// Find a field by short name.
    #[must_use]
    pub fn field(&self, short_name: &str) -> Option<&AasField> {
        self.fields.iter().find(|f| f.short_name() == short_name)
    }

    #[must_use]
    pub fn is_multi_valued(&self) -> bool {
        self.multi_valued
    }

    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    #[must_use]
    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Whether the document demands that the short name is kept as stated.
    #[must_use]
    pub fn has_fixed_short_name(&self) -> bool {
        self.fixed_short_name
    }

    #[must_use]
    pub fn entity_type(&self) -> Option<EntityType> {
        self.entity_type
    }

    pub(crate) fn set_multi_valued(&mut self, multi_valued: bool) {
        self.multi_valued = multi_valued;
    }

    pub(crate) fn set_ordered(&mut self, ordered: bool) {
        self.ordered = ordered;
    }

    pub(crate) fn set_allow_duplicates(&mut self, allow_duplicates: bool) {
        self.allow_duplicates = allow_duplicates;
    }

    pub(crate) fn set_fixed_short_name(&mut self, fixed: bool) {
        self.fixed_short_name = fixed;
    }

    pub(crate) fn set_entity_type(&mut self, entity_type: Option<EntityType>) {
        self.entity_type = entity_type;
    }

    pub(crate) fn push_field(&mut self, field: AasField) -> usize {
        self.fields.push(field);
        self.fields.len() - 1
    }

    pub(crate) fn field_at_mut(&mut self, index: usize) -> Option<&mut AasField> {
        self.fields.get_mut(index)
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = &mut AasField> {
        self.fields.iter_mut()
    }
}

/// A field of a type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AasField {
    #[serde(flatten)]
    base: ElementBase,
    kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_type: Option<String>,
    cardinality: Cardinality,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    multi_valued: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    example_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    example_explanation: Option<String>,
}

impl AasField {
    #[must_use]
    pub fn new(short_name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            base: ElementBase::new(short_name),
            kind,
            value_type: None,
            cardinality: Cardinality::default(),
            multi_valued: false,
            example_values: Vec::new(),
            example_explanation: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Primitive type name, or the short name of a type or enumeration.
    #[must_use]
    pub fn value_type(&self) -> Option<&str> {
        self.value_type.as_deref()
    }

    /// Whether the value type is unset or a plain string type.
    ///
    /// Only such fields are candidates for enumeration inference.
    #[must_use]
    pub fn has_generic_value_type(&self) -> bool {
        match self.value_type.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(value_type) => matches!(
                value_type,
                "string" | "xs:string" | "String" | "STRING" | "langString"
            ),
        }
    }

    #[must_use]
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    #[must_use]
    pub fn is_multi_valued(&self) -> bool {
        self.multi_valued
    }

    #[must_use]
    pub fn example_values(&self) -> &[String] {
        &self.example_values
    }

    /// Extra explanatory text, e.g. the MIME type of a file field.
    #[must_use]
    pub fn example_explanation(&self) -> Option<&str> {
        self.example_explanation.as_deref()
    }

    pub(crate) fn set_value_type(&mut self, value_type: Option<String>) {
        self.value_type = value_type.filter(|v| !v.is_empty());
    }

    pub(crate) fn set_cardinality(&mut self, cardinality: Cardinality) {
        self.cardinality = cardinality;
    }

    pub(crate) fn set_multi_valued(&mut self, multi_valued: bool) {
        self.multi_valued = multi_valued;
    }

    pub(crate) fn set_example_values(&mut self, values: Vec<String>) {
        self.example_values = values;
    }

    pub(crate) fn set_example_explanation(&mut self, explanation: impl Into<String>) {
        self.example_explanation = Some(explanation.into()).filter(|e: &String| !e.is_empty());
    }
}

/// Shape of the description text an enumeration was inferred from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumKind {
    /// `IRDI (Name)` tokens, or `Name (IRDI)` / `Name (value, IRDI)`.
    Enum,
    /// Numbered quoted literals: `1. "A", 2. "B" and 3. "C".`
    EnumEntries,
    /// Bulleted items, or `Name [..] IRDI` entries.
    ValueList,
    /// `Name - IRDI` pairs.
    Irdis,
}

impl EnumKind {
    /// All kinds in the order inference tries them.
    pub const ALL: [EnumKind; 4] = [
        EnumKind::Enum,
        EnumKind::EnumEntries,
        EnumKind::ValueList,
        EnumKind::Irdis,
    ];
}

/// An inferred enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AasEnum {
    #[serde(flatten)]
    base: ElementBase,
    kind: EnumKind,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    open: bool,
    literals: Vec<AasEnumLiteral>,
}

impl AasEnum {
    #[must_use]
    pub fn new(short_name: impl Into<String>, kind: EnumKind) -> Self {
        Self {
            base: ElementBase::new(short_name),
            kind,
            open: false,
            literals: Vec::new(),
        }
    }

    /// Shape the enumeration was inferred from.
    #[must_use]
    pub fn kind(&self) -> EnumKind {
        self.kind
    }

    /// Whether literals beyond the listed ones may legally occur.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn literals(&self) -> &[AasEnumLiteral] {
        &self.literals
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub(crate) fn push_literal(&mut self, literal: AasEnumLiteral) {
        self.literals.push(literal);
    }

    pub(crate) fn literals_mut(&mut self) -> impl Iterator<Item = &mut AasEnumLiteral> {
        self.literals.iter_mut()
    }
}

/// A literal of an inferred enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AasEnumLiteral {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl AasEnumLiteral {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_semantic_id(mut self, semantic_id: impl Into<String>) -> Self {
        self.semantic_id = Some(semantic_id.into());
        self
    }
}
