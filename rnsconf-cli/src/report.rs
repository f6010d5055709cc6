//! Plain-text renderings of core results for terminal output.

use rnsconf_core::{
    ValidationResult,
    schema::{
        FieldDefinition, FieldKind, InterfaceCapabilities, TypeGroup, is_autoconnectable,
        is_discoverable,
    },
};

/// One line per issue, errors first, followed by a summary line.
pub fn render_validation(result: &ValidationResult) -> String {
    let mut out = String::new();
    for issue in result.issues() {
        out.push_str(&issue.to_string());
        out.push('\n');
    }
    out.push_str(&format!(
        "{}: {} error(s), {} warning(s)\n",
        if result.valid { "valid" } else { "invalid" },
        result.errors.len(),
        result.warnings.len()
    ));
    out
}

pub fn render_type_groups(
    groups: &[TypeGroup],
    capabilities: Option<&InterfaceCapabilities>,
) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(group.label);
        out.push('\n');
        for interface_type in &group.types {
            let name = interface_type.name();
            out.push_str(&format!("  {:<22} {}", name, interface_type.label()));
            if is_discoverable(name, capabilities) {
                out.push_str(" [discoverable]");
            }
            if is_autoconnectable(name, capabilities) {
                out.push_str(" [autoconnect]");
            }
            out.push('\n');
        }
    }
    out
}

fn describe_kind(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Number { min, max, .. } => match (min, max) {
            (Some(min), Some(max)) => format!("number {min}..{max}"),
            (Some(min), None) => format!("number >= {min}"),
            (None, Some(max)) => format!("number <= {max}"),
            (None, None) => "number".to_string(),
        },
        FieldKind::Select { options } => format!(
            "one of {}",
            options
                .iter()
                .map(|option| option.value)
                .collect::<Vec<_>>()
                .join("|")
        ),
        other => other.to_string(),
    }
}

pub fn render_fields(fields: &[FieldDefinition]) -> String {
    let mut out = String::new();
    for field in fields {
        out.push_str(&format!(
            "{:<34} {:<24} {}",
            field.key,
            field.label,
            describe_kind(&field.kind)
        ));
        if !field.aliases.is_empty() {
            out.push_str(&format!(" (aliases: {})", field.aliases.join(", ")));
        }
        out.push('\n');
    }
    out
}
