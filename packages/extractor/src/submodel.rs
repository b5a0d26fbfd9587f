//! First pass: the submodel section.
//!
//! Every submodel becomes a root type. Collections, lists and entities are
//! promoted to types of their own and referenced from their parent through a
//! property field; leaf elements become one field each. Dispatch over element
//! kinds goes through the [`ParseEngine`](crate::registry::ParseEngine), which
//! calls back into the readers below.

use roxmltree::Node;

use crate::config::FIXED_SHORT_NAME_NOTE;
use crate::enums::infer_enum;
use crate::error::Diagnostics;
use crate::registry::handlers::FieldHook;
use crate::registry::{ParseContext, ParseEngine, RecurseFn, TypeRef};
use crate::semantic_id::{read_identifier, read_reference};
use crate::text::{is_generic_short_name, normalize_description, split_example_values, split_multiplicity};
use crate::types::{
    AasElement, AasElementMut, AasField, AasType, Cardinality, EntityType, FieldKind, TypeKind,
};
use crate::xml::{
    element_children, get_bool, get_tag_name, has_element_children, pick_language, read_display_name,
    read_lang_strings, text_content,
};

/// Children of a type that hold its submodel elements.
const ELEMENT_CONTAINERS: [&str; 3] = ["submodelElements", "value", "statements"];

/// Children of a type that carry nothing for the schema.
const IGNORED_TYPE_CHILDREN: [&str; 12] = [
    "supplementalSemanticIds",
    "category",
    "kind",
    "embeddedDataSpecification",
    "embeddedDataSpecifications",
    "typeValueListElement",
    "semanticIdListElement",
    "valueTypeListElement",
    "checksum",
    "globalAssetId",
    "specificAssetIds",
    "assetRef",
];

/// Children of a field that carry nothing for the schema.
const IGNORED_FIELD_CHILDREN: [&str; 10] = [
    "inputVariable",
    "outputVariable",
    "inoutputVariable",
    "supplementalSemanticIds",
    "embeddedDataSpecification",
    "embeddedDataSpecifications",
    "valueId",
    "kind",
    "category",
    "displayName",
];

/// Cardinality and example values read from a qualifier list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualifierInfo {
    pub cardinality: Option<Cardinality>,
    pub example_values: Vec<String>,
}

/// Result of reading an element as a type.
#[derive(Debug)]
pub struct TypeReadout {
    pub type_ref: TypeRef,
    /// Qualifiers of the element; they apply to the field referencing the type.
    pub qualifiers: QualifierInfo,
    /// `version[.revision]` from the administration block.
    pub version: Option<String>,
}

/// Read all submodels of the `submodels` section as root types.
pub fn read_submodels(section: Node<'_, '_>, context: &mut ParseContext, engine: &ParseEngine) {
    let recurse = |child: Node<'_, '_>, ctx: &mut ParseContext, owner: TypeRef| {
        engine.parse_lenient(child, ctx, owner);
    };

    for submodel in element_children(section) {
        let name = get_tag_name(submodel);
        if name != "submodel" {
            context.warn(format!("Unconsidered submodels entry <{name}>"));
            continue;
        }
        let readout = read_type(submodel, context, TypeKind::Submodel, &recurse);
        context.record_version(readout.version);
    }
}

/// Read an element as a type, register it and walk its submodel elements.
pub fn read_type<'a, 'input>(
    node: Node<'a, 'input>,
    context: &mut ParseContext,
    kind: TypeKind,
    recurse: &RecurseFn<'a, 'input>,
) -> TypeReadout {
    let mut short_name = String::new();
    let mut multi_valued = false;
    let mut reference = None;
    let mut identification = None;
    let mut description = None;
    let mut form_info = None;
    let mut display_name = None;
    let mut ordered = false;
    let mut allow_duplicates = false;
    let mut entity_type = None;
    let mut qualifiers = QualifierInfo::default();
    let mut version = None;

    for child in element_children(node) {
        let diagnostics = context.diagnostics_mut();
        match get_tag_name(child) {
            "idShort" => {
                (short_name, multi_valued) = split_multiplicity(&text_content(child));
                tracing::info!("Reading type {short_name}");
            }
            "semanticId" => reference = read_reference(child, diagnostics),
            "description" => description = read_description(child, diagnostics),
            "ordered" | "orderRelevant" => ordered = get_bool(child),
            "allowDuplicates" => allow_duplicates = get_bool(child),
            "qualifier" | "qualifiers" => {
                let mut capture_form_info = |qualifier_type: &str, value: &str| {
                    if qualifier_type == "FormInfo" {
                        form_info = Some(value.to_string());
                    }
                };
                qualifiers = read_qualifiers(child, diagnostics, Some(&mut capture_form_info));
            }
            "administration" => version = read_administration(child, diagnostics),
            "id" | "identification" => identification = Some(read_identifier(child, diagnostics)),
            "entityType" => entity_type = EntityType::from_text(&text_content(child)),
            "displayName" => display_name = read_display_name(child, diagnostics),
            name if ELEMENT_CONTAINERS.contains(&name) || IGNORED_TYPE_CHILDREN.contains(&name) => {}
            other => diagnostics.warn(format!(
                "Unconsidered submodel element property <{other}> in {short_name}"
            )),
        }
    }

    let mut ty = AasType::new(short_name, kind);
    ty.set_multi_valued(multi_valued);
    ty.set_ordered(ordered);
    ty.set_allow_duplicates(allow_duplicates);
    ty.set_entity_type(entity_type);

    let multi_semantic_id = reference.as_ref().is_some_and(|r| r.is_multi());
    let semantic_id = reference
        .map(|r| r.id)
        .filter(|id| !id.is_empty())
        .or(identification);
    let base = ty.base_mut();
    base.set_semantic_id(semantic_id);
    base.set_multi_semantic_id(multi_semantic_id);

    ty.set_fixed_short_name(description.as_deref().is_some_and(has_fixed_short_name));
    let fallback_description = [description, form_info, display_name.clone()]
        .into_iter()
        .flatten()
        .find(|text| !text.trim().is_empty());
    if let Some(text) = fallback_description {
        ty.base_mut().set_description(&text);
    }
    let generic = is_generic_short_name(ty.short_name());
    let base = ty.base_mut();
    base.set_display_name(display_name);
    base.set_generic(generic);

    let type_ref = context.add_type(ty);

    // Nested elements are read only after the type is registered
    for container in element_children(node) {
        if ELEMENT_CONTAINERS.contains(&get_tag_name(container)) {
            for element in element_children(container) {
                recurse(element, context, type_ref);
            }
        }
    }

    TypeReadout {
        type_ref,
        qualifiers,
        version,
    }
}

/// Read a collection, list or entity as its own type and add a property
/// field referencing it to `parent`.
pub fn read_promoted<'a, 'input>(
    node: Node<'a, 'input>,
    context: &mut ParseContext,
    parent: TypeRef,
    kind: TypeKind,
    recurse: &RecurseFn<'a, 'input>,
) {
    let readout = read_type(node, context, kind, recurse);
    let Some(child) = context.get_type(readout.type_ref) else {
        return;
    };

    let mut field = AasField::new(child.short_name(), FieldKind::Property);
    field.set_value_type(Some(child.short_name().to_string()));
    field.set_multi_valued(child.is_multi_valued());
    let base = field.base_mut();
    base.set_semantic_id(child.semantic_id().map(str::to_string));
    base.set_multi_semantic_id(child.has_multi_semantic_id());
    base.set_generic(child.is_generic());
    if let Some(description) = child.description() {
        base.set_description(description);
    }
    if let Some(cardinality) = readout.qualifiers.cardinality {
        field.set_cardinality(cardinality);
    }
    field.set_example_values(readout.qualifiers.example_values);

    context.add_field(parent, field);
}

/// Read a leaf element into one field.
///
/// `default_value_type` takes precedence over a `valueType` child. Children
/// not known to the reader are offered to `hook` before being reported.
pub fn read_field(
    node: Node<'_, '_>,
    context: &mut ParseContext,
    kind: FieldKind,
    default_value_type: Option<&str>,
    hook: Option<FieldHook>,
) -> AasField {
    let mut field = AasField::new("", kind);
    field.set_value_type(default_value_type.map(str::to_string));
    let mut description_node = None;

    for child in element_children(node) {
        let diagnostics = context.diagnostics_mut();
        match get_tag_name(child) {
            "idShort" => {
                let (short_name, multi_valued) = split_multiplicity(&text_content(child));
                tracing::info!("Reading field {short_name}");
                field.base_mut().set_short_name(short_name);
                field.set_multi_valued(multi_valued);
            }
            "semanticId" => {
                if let Some(reference) = read_reference(child, diagnostics) {
                    let base = field.base_mut();
                    base.set_multi_semantic_id(reference.is_multi());
                    base.set_semantic_id(Some(reference.id));
                }
            }
            // Deferred: enum inference may redirect the value type
            "description" => description_node = Some(child),
            "qualifier" | "qualifiers" => {
                let qualifiers = read_qualifiers(child, diagnostics, None);
                if let Some(cardinality) = qualifiers.cardinality {
                    field.set_cardinality(cardinality);
                }
                if !qualifiers.example_values.is_empty() {
                    field.set_example_values(qualifiers.example_values);
                }
            }
            "valueType" => {
                if default_value_type.is_none() {
                    field.set_value_type(Some(text_content(child)));
                }
            }
            "value" => read_example_value(child, &mut field, diagnostics),
            name if IGNORED_FIELD_CHILDREN.contains(&name) => {}
            other => {
                let handled = hook.is_some_and(|hook| hook(&mut field, child, other));
                if !handled {
                    diagnostics.warn(format!(
                        "Unconsidered property entry <{other}> in {}",
                        field.short_name()
                    ));
                }
            }
        }
    }

    if let Some(node) = description_node {
        let text = read_description(node, context.diagnostics_mut()).unwrap_or_default();
        let text = if field.has_generic_value_type() {
            infer_enum(&mut field, &text, context)
        } else {
            text
        };
        field.base_mut().set_description(&text);
    }
    let generic = is_generic_short_name(field.short_name());
    field.base_mut().set_generic(generic);
    field
}

/// Read a `value` child as example values.
///
/// Language strings of a multi-language property are tagged `text@lang`.
fn read_example_value(node: Node<'_, '_>, field: &mut AasField, diagnostics: &mut Diagnostics) {
    let value = if has_element_children(node) {
        let Some(selected) = pick_language(&read_lang_strings(node, diagnostics)) else {
            return;
        };
        let text = selected.text.trim().to_string();
        let suffix = format!("@{}", selected.language);
        if field.kind() == FieldKind::MultiLanguageText
            && !text.is_empty()
            && !selected.language.is_empty()
            && !text.to_uppercase().ends_with(&suffix.to_uppercase())
        {
            format!("{text}{suffix}")
        } else {
            text
        }
    } else {
        text_content(node)
    };
    if !value.is_empty() {
        field.set_example_values(split_example_values(&value));
    }
}

/// Read a description, preferring English text.
pub fn read_description(node: Node<'_, '_>, diagnostics: &mut Diagnostics) -> Option<String> {
    pick_language(&read_lang_strings(node, diagnostics))
        .map(|selected| selected.text)
        .filter(|text| !text.is_empty())
}

/// Read a qualifier list.
///
/// Qualifier types other than cardinality and example values are passed to
/// `fallback` as `(type, value)`.
pub fn read_qualifiers(
    node: Node<'_, '_>,
    diagnostics: &mut Diagnostics,
    mut fallback: Option<&mut dyn FnMut(&str, &str)>,
) -> QualifierInfo {
    let mut info = QualifierInfo::default();
    for qualifier in element_children(node) {
        let name = get_tag_name(qualifier);
        if name != "qualifier" {
            diagnostics.warn(format!("Unconsidered qualifier entry <{name}>"));
            continue;
        }

        let mut qualifier_type = String::new();
        let mut value = String::new();
        for entry in element_children(qualifier) {
            match get_tag_name(entry) {
                "type" => qualifier_type = text_content(entry),
                "value" => value = text_content(entry),
                "valueId" | "valueType" | "semanticId" | "kind" => {}
                other => diagnostics.warn(format!("Unconsidered qualifier element <{other}>")),
            }
        }

        match qualifier_type.as_str() {
            "Cardinality" | "Multiplicity" => match Cardinality::from_qualifier(&value) {
                Some(cardinality) => info.cardinality = Some(cardinality),
                None => diagnostics.warn(format!("Unconsidered cardinality: {value}")),
            },
            "ExampleValue" => info.example_values = split_example_values(&value),
            _ => {
                if let Some(fallback) = fallback.as_mut() {
                    fallback(&qualifier_type, &value);
                }
            }
        }
    }
    info
}

/// Read `version[.revision]` from an administration block.
fn read_administration(node: Node<'_, '_>, diagnostics: &mut Diagnostics) -> Option<String> {
    let mut version = None;
    let mut revision = None;
    for child in element_children(node) {
        match get_tag_name(child) {
            "version" => version = Some(text_content(child)),
            "revision" => revision = Some(text_content(child)),
            "templateId" | "creator" => {}
            other => diagnostics.warn(format!("Unknown administration element <{other}>")),
        }
    }
    match (version, revision) {
        (Some(version), Some(revision)) => Some(format!("{version}.{revision}")),
        (version, _) => version,
    }
}

fn has_fixed_short_name(description: &str) -> bool {
    normalize_description(description)
        .is_some_and(|text| text.to_lowercase().ends_with(FIXED_SHORT_NAME_NOTE))
}
