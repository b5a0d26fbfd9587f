//! Plain-text report accompanying the YAML schema.

use textwrap::{fill, Options};

use crate::config::TEXT_WRAP_WIDTH;
use crate::summary::SpecSummary;
use crate::types::{AasElement, AasEnum, AasField, AasType};

const DESCRIPTION_INDENT: &str = "      ";

/// Render statistics, type overview, enumerations, imports and warnings.
#[must_use]
pub fn render_report(summary: &SpecSummary) -> String {
    let mut lines = vec![summary.headline(), summary.statistics().to_string()];
    if !summary.warnings().is_empty() {
        lines.push(format!("Warnings:   {}", summary.warnings().len()));
    }

    for ty in summary.types() {
        lines.push(String::new());
        lines.extend(type_lines(ty));
    }

    if !summary.enums().is_empty() {
        lines.push(String::new());
        lines.push("Enumerations".to_string());
        for en in summary.enums() {
            lines.extend(enum_lines(en));
        }
    }

    if !summary.imports().is_empty() {
        lines.push(String::new());
        lines.push("Imports".to_string());
        for import in summary.imports() {
            lines.push(format!("  {}: {}", import.project, import.type_name));
        }
    }

    if !summary.warnings().is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        let options = Options::new(TEXT_WRAP_WIDTH)
            .initial_indent("  - ")
            .subsequent_indent("    ");
        for warning in summary.warnings() {
            lines.push(fill(warning, &options));
        }
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn type_lines(ty: &AasType) -> Vec<String> {
    let mut flags = vec![ty.kind().as_str()];
    if ty.is_multi_valued() {
        flags.push("multi-valued");
    }
    if ty.has_fixed_short_name() {
        flags.push("fixed name");
    }

    let mut lines = vec![format!("{} ({})", ty.short_name(), flags.join(", "))];
    if let Some(semantic_id) = ty.semantic_id() {
        lines.push(format!("    {semantic_id}"));
    }
    if let Some(description) = ty.description() {
        lines.push(wrap_description(description, "    "));
    }
    for field in ty.fields() {
        lines.extend(field_lines(field));
    }
    lines
}

fn field_lines(field: &AasField) -> Vec<String> {
    let value_type = field.value_type().unwrap_or(field.kind().as_str());
    let mut lines = vec![format!(
        "  - {}: {value_type} {}",
        field.short_name(),
        field.cardinality()
    )];
    if let Some(description) = field.description() {
        lines.push(wrap_description(description, DESCRIPTION_INDENT));
    }
    lines
}

fn enum_lines(en: &AasEnum) -> Vec<String> {
    let open = if en.is_open() { ", open" } else { "" };
    let mut lines = vec![format!("  {} ({} literals{open})", en.short_name(), en.literals().len())];
    for literal in en.literals() {
        match &literal.value {
            Some(value) => lines.push(format!("    - {} = {value}", literal.name)),
            None => lines.push(format!("    - {}", literal.name)),
        }
    }
    lines
}

fn wrap_description(description: &str, indent: &str) -> String {
    let options = Options::new(TEXT_WRAP_WIDTH)
        .initial_indent(indent)
        .subsequent_indent(indent);
    fill(description, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_from_xml;

    #[test]
    fn test_report_lists_types_and_enums() {
        let summary = extract_from_xml(
            r#"<environment>
  <submodels>
    <submodel>
      <idShort>Sensor</idShort>
      <submodelElements>
        <property>
          <idShort>Mode</idShort>
          <valueType>xs:string</valueType>
          <description><langStringTextType><language>en</language><text>Operating mode. Possible values: 1. "Idle", 2. "Busy".</text></langStringTextType></description>
        </property>
      </submodelElements>
    </submodel>
  </submodels>
</environment>"#,
            "7",
        )
        .unwrap();

        let report = render_report(&summary);

        assert!(report.starts_with("Specification 7\nTypes:      1"));
        assert!(report.contains("Sensor (submodel)"));
        assert!(report.contains("  - Mode: Mode [1..1]"));
        assert!(report.contains("Enumerations\n  Mode (2 literals)\n    - Idle\n    - Busy"));
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn test_long_descriptions_are_wrapped() {
        let wrapped = wrap_description(&"word ".repeat(60), "    ");
        assert!(wrapped.lines().count() > 1);
        assert!(wrapped.lines().all(|line| line.starts_with("    ") && line.len() <= TEXT_WRAP_WIDTH));
    }
}
