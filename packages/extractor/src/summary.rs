//! The result of an extraction run.

use std::collections::HashSet;
use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::config::UNKNOWN_SPEC_NUMBER;
use crate::imports::{lookup, KnownImport};
use crate::registry::ParseOutput;
use crate::types::{AasElement, AasElementMut, AasEnum, AasType, FieldKind, TypeKind};

/// All types and enumerations of one specification document.
///
/// Immutable once returned, apart from [`SpecSummary::with_name_prefix`]
/// which consumes the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecSummary {
    spec_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    types: Vec<AasType>,
    enums: Vec<AasEnum>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    imports: Vec<KnownImport>,
    #[serde(skip)]
    warnings: Vec<String>,
}

/// Counts describing a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub types: usize,
    pub fields: usize,
    pub operations: usize,
    pub enums: usize,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Types:      {}", self.types)?;
        writeln!(f, "Fields:     {}", self.fields)?;
        writeln!(f, "Operations: {}", self.operations)?;
        write!(f, "Enums:      {}", self.enums)
    }
}

impl SpecSummary {
    /// Seal the output of a parse run.
    ///
    /// Enum literals without a usable name are named and fields referring to
    /// known imports are resolved.
    pub(crate) fn new(output: ParseOutput, spec_number: impl Into<String>) -> Self {
        let ParseOutput {
            mut types,
            mut enums,
            version,
            warnings,
        } = output;

        enums.iter_mut().for_each(name_literals);
        let imports = resolve_imports(&mut types);

        let spec_number = spec_number.into();
        Self {
            spec_number: if spec_number.is_empty() {
                UNKNOWN_SPEC_NUMBER.to_string()
            } else {
                spec_number
            },
            version,
            types,
            enums,
            imports,
            warnings,
        }
    }

    /// Types in document order; short names are unique.
    #[must_use]
    pub fn types(&self) -> &[AasType] {
        &self.types
    }

    #[must_use]
    pub fn enums(&self) -> &[AasEnum] {
        &self.enums
    }

    /// `version[.revision]` of the first submodel declaring one.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[must_use]
    pub fn spec_number(&self) -> &str {
        &self.spec_number
    }

    /// Types from other specifications referenced by this one.
    #[must_use]
    pub fn imports(&self) -> &[KnownImport] {
        &self.imports
    }

    /// Diagnostics recorded while reading the document.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    #[must_use]
    pub fn find_type(&self, short_name: &str) -> Option<&AasType> {
        self.types.iter().find(|ty| ty.short_name() == short_name)
    }

    #[must_use]
    pub fn find_enum(&self, short_name: &str) -> Option<&AasEnum> {
        self.enums.iter().find(|en| en.short_name() == short_name)
    }

    /// The first submodel type.
    #[must_use]
    pub fn main_submodel(&self) -> Option<&AasType> {
        self.types.iter().find(|ty| ty.kind() == TypeKind::Submodel)
    }

    #[must_use]
    pub fn statistics(&self) -> Statistics {
        let fields = self.types.iter().flat_map(|ty| ty.fields());
        Statistics {
            types: self.types.len(),
            fields: fields.clone().count(),
            operations: fields
                .filter(|field| field.kind() == FieldKind::Operation)
                .count(),
            enums: self.enums.len(),
        }
    }

    /// `Specification <number> (version <version>)`.
    #[must_use]
    pub fn headline(&self) -> String {
        match &self.version {
            Some(version) => format!("Specification {} (version {version})", self.spec_number),
            None => format!("Specification {}", self.spec_number),
        }
    }

    /// Write a human-readable statistics report.
    ///
    /// # Errors
    /// Returns any error of the underlying writer.
    pub fn print_statistics(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.headline())?;
        writeln!(out, "{}", self.statistics())?;
        if !self.warnings.is_empty() {
            writeln!(out, "Warnings:   {}", self.warnings.len())?;
        }
        Ok(())
    }

    /// Prefix the short names of all types and enumerations.
    ///
    /// Field value types referring to a renamed type or enumeration follow
    /// the rename.
    #[must_use]
    pub fn with_name_prefix(mut self, prefix: &str) -> Self {
        if prefix.is_empty() {
            return self;
        }
        let renamed: HashSet<String> = self
            .types
            .iter()
            .map(|ty| ty.short_name().to_string())
            .chain(self.enums.iter().map(|en| en.short_name().to_string()))
            .collect();

        for ty in &mut self.types {
            let name = format!("{prefix}{}", ty.short_name());
            ty.base_mut().set_short_name(name);
            for field in ty.fields_mut() {
                let target = field
                    .value_type()
                    .filter(|value_type| renamed.contains(*value_type))
                    .map(|value_type| format!("{prefix}{value_type}"));
                if target.is_some() {
                    field.set_value_type(target);
                }
            }
        }
        for en in &mut self.enums {
            let name = format!("{prefix}{}", en.short_name());
            en.base_mut().set_short_name(name);
        }
        self
    }
}

/// Name literals that lack a usable name after their identifier, else `VALUE_<n>`.
fn name_literals(en: &mut AasEnum) {
    for (position, literal) in en.literals_mut().enumerate() {
        if literal.name.trim().is_empty() {
            literal.name = literal
                .identifier
                .clone()
                .filter(|identifier| !identifier.trim().is_empty())
                .unwrap_or_else(|| format!("VALUE_{}", position + 1));
        }
    }
}

/// Point untyped fields with a known semantic id to the imported type.
///
/// Returns the imports in order of first use.
fn resolve_imports(types: &mut [AasType]) -> Vec<KnownImport> {
    let mut used = Vec::new();
    for ty in types {
        if let Some(import) = ty.semantic_id().and_then(lookup) {
            if !used.contains(&import) {
                used.push(import);
            }
        }
        for field in ty.fields_mut() {
            let Some(import) = field.semantic_id().and_then(lookup) else {
                continue;
            };
            if field.has_generic_value_type() {
                field.set_value_type(Some(import.type_name.to_string()));
            }
            if !used.contains(&import) {
                used.push(import);
            }
        }
    }
    used
}
