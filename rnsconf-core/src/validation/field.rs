use crate::model::{is_boolean_token, parse_config_list};
use crate::schema::{FieldDefinition, FieldKind};

use super::ValidationIssue;
use super::network::{is_integer, parse_number};

/// Checks one raw value against its field definition.
///
/// Blank values only fail when the field is required; every other failure
/// is reported against `{prefix}.{key}`.
pub(crate) fn validate_field(
    field: &FieldDefinition,
    value: Option<&str>,
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let path = format!("{prefix}.{}", field.key);
    let value = match value.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => {
            if field.required {
                issues.push(ValidationIssue::error(
                    &path,
                    format!("{} is required", field.label),
                ));
            }
            return;
        }
    };

    match field.kind {
        FieldKind::Number { min, max, step } => {
            let Some(number) = parse_number(value) else {
                issues.push(ValidationIssue::error(
                    &path,
                    format!("{} must be a number", field.label),
                ));
                return;
            };
            if let Some(min) = min.filter(|min| number < *min) {
                issues.push(ValidationIssue::error(
                    &path,
                    format!("{} must be >= {min}", field.label),
                ));
            }
            if let Some(max) = max.filter(|max| number > *max) {
                issues.push(ValidationIssue::error(
                    &path,
                    format!("{} must be <= {max}", field.label),
                ));
            }
            if step == Some(1.0) && !is_integer(number) {
                issues.push(ValidationIssue::error(
                    &path,
                    format!("{} must be an integer", field.label),
                ));
            }
        }
        FieldKind::Boolean => {
            if !is_boolean_token(value) {
                issues.push(ValidationIssue::error(
                    &path,
                    format!("{} must be yes/no", field.label),
                ));
            }
        }
        FieldKind::Select { options } => {
            debug_assert!(!options.is_empty(), "select field {} has no options", field.key);
            if !options.is_empty() && !options.iter().any(|option| option.value == value) {
                let allowed = options
                    .iter()
                    .map(|option| option.value)
                    .collect::<Vec<_>>()
                    .join(", ");
                issues.push(ValidationIssue::error(
                    &path,
                    format!("{} must be one of: {allowed}", field.label),
                ));
            }
        }
        FieldKind::List => {
            if field.required && parse_config_list(value).is_empty() {
                issues.push(ValidationIssue::error(
                    &path,
                    format!("{} must contain at least one value", field.label),
                ));
            }
        }
        FieldKind::Text => {}
    }
}
