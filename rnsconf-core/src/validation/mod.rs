//! # Validator
//!
//! Checks a [`ConfigState`] against the schema catalog and the gateway's
//! domain rules.
//!
//! ## Passes
//!
//! 1. Global discovery fields of `[reticulum]`, including the identity
//!    allow-list (errors)
//! 2. Every interface: name, type, typed fields, per-type requirements and
//!    raw address/port shaped settings (errors)
//! 3. Discovery consistency between interfaces and global settings
//!    (warnings)
//!
//! Validation never fails. Every finding is a [`ValidationIssue`] with a
//! dotted path such as `interfaces[2].target_port` or
//! `reticulum.interface_discovery_sources[0]`. Warnings never affect
//! [`ValidationResult::valid`].

mod field;
mod network;
mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{
    ConfigState, InterfaceRecord, ROOT_SECTION, get_entry_value, parse_bool, parse_config_list,
};
use crate::schema::{all_fields_for_type, global_discovery_fields};

use field::validate_field;
use network::{is_address_key, is_hex_identity, is_likely_host, is_valid_port, parse_number};
use rules::{port_is_network_port, requirements_for};

/// Longest accepted interface name, in characters.
pub const INTERFACE_NAME_MAX: usize = 96;

const DISCOVERY_SOURCES_KEY: &str = "interface_discovery_sources";
const SERVING_MODES: [&str; 3] = ["gateway", "access_point", "ap"];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub level: IssueLevel,
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.level, self.path, self.message)
    }
}

/// Outcome of [`validate`]; `valid` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn new(errors: Vec<ValidationIssue>, warnings: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Errors followed by warnings.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(&self.warnings)
    }
}

/// Validates a configuration.
///
/// ```
/// use rnsconf_core::parser::parse;
/// use rnsconf_core::validation::validate;
///
/// let state = parse("[interfaces]\n[[serial]]\ntype = SerialInterface\nport = COM4\n");
/// assert!(validate(&state).valid);
/// ```
#[tracing::instrument(level = "debug", skip(state), fields(interfaces = state.interfaces.len()))]
pub fn validate(state: &ConfigState) -> ValidationResult {
    let mut errors = Vec::new();
    validate_global_discovery(state, &mut errors);
    for (index, iface) in state.interfaces.iter().enumerate() {
        validate_interface(iface, index, &mut errors);
    }

    let mut warnings = Vec::new();
    validate_discovery_consistency(state, &mut warnings);

    let result = ValidationResult::new(errors, warnings);
    debug!(
        valid = result.valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated config"
    );
    result
}

fn validate_global_discovery(state: &ConfigState, errors: &mut Vec<ValidationIssue>) {
    let root = state.section(ROOT_SECTION);
    for field in global_discovery_fields() {
        validate_field(field, get_entry_value(root, field.key), ROOT_SECTION, errors);
    }

    let sources = get_entry_value(root, DISCOVERY_SOURCES_KEY)
        .map(parse_config_list)
        .unwrap_or_default();
    for (index, source) in sources.iter().enumerate() {
        if !is_hex_identity(source) {
            errors.push(ValidationIssue::error(
                format!("{ROOT_SECTION}.{DISCOVERY_SOURCES_KEY}[{index}]"),
                "Discovery source identity must be an even-length hex string",
            ));
        }
    }
}

fn validate_interface(iface: &InterfaceRecord, index: usize, errors: &mut Vec<ValidationIssue>) {
    let prefix = format!("interfaces[{index}]");

    let name = iface.name.trim();
    if name.is_empty() {
        errors.push(ValidationIssue::error(
            format!("{prefix}.name"),
            "Interface name is required",
        ));
    } else if name.chars().count() > INTERFACE_NAME_MAX {
        errors.push(ValidationIssue::error(
            format!("{prefix}.name"),
            format!("Interface name must be {INTERFACE_NAME_MAX} characters or fewer"),
        ));
    }

    let interface_type = iface.interface_type.as_str();
    if interface_type.trim().is_empty() {
        errors.push(ValidationIssue::error(
            format!("{prefix}.type"),
            "Interface type is required",
        ));
    }

    for field in all_fields_for_type(interface_type) {
        validate_field(&field, iface.field_value(&field), &prefix, errors);
    }

    for requirement in requirements_for(interface_type) {
        if !iface.has_any_value(requirement.keys) {
            errors.push(ValidationIssue::error(
                format!("{prefix}.{}", requirement.path_key),
                requirement.message_for(interface_type),
            ));
        }
    }

    for entry in &iface.settings {
        let key = entry.key.trim().to_ascii_lowercase();
        let value = entry.value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        if is_address_key(&key) && !is_likely_host(value) {
            errors.push(ValidationIssue::error(
                format!("{prefix}.{}", entry.key),
                format!("{} must be a valid host or IP", entry.key),
            ));
        }
        let network_port = key == "port" && port_is_network_port(interface_type);
        if (key.ends_with("_port") || network_port) && !is_valid_port(value) {
            errors.push(ValidationIssue::error(
                format!("{prefix}.{}", entry.key),
                format!("{} must be an integer between 1 and 65535", entry.key),
            ));
        }
    }
}

fn validate_discovery_consistency(state: &ConfigState, warnings: &mut Vec<ValidationIssue>) {
    let root = state.section(ROOT_SECTION);
    let discovery_enabled = parse_bool(get_entry_value(root, "discover_interfaces"), false);
    let autoconnect_limit =
        get_entry_value(root, "autoconnect_discovered_interfaces").and_then(parse_number);

    let mut discoverable_count = 0;
    for (index, iface) in state.interfaces.iter().enumerate() {
        if !parse_bool(iface.setting("discoverable"), false) {
            continue;
        }
        discoverable_count += 1;
        let mode = iface
            .setting("interface_mode")
            .or_else(|| iface.setting("mode"))
            .map(|mode| mode.trim().to_ascii_lowercase())
            .unwrap_or_default();
        if !mode.is_empty() && !SERVING_MODES.contains(&mode.as_str()) {
            warnings.push(ValidationIssue::warning(
                format!("interfaces[{index}].discoverable"),
                "Discoverable is usually paired with gateway/access_point mode",
            ));
        }
    }

    if !discovery_enabled && discoverable_count > 0 {
        warnings.push(ValidationIssue::warning(
            format!("{ROOT_SECTION}.discover_interfaces"),
            "Global discover_interfaces is disabled while one or more interfaces are discoverable",
        ));
    }
    if !discovery_enabled && autoconnect_limit.is_some_and(|limit| limit > 0.0) {
        warnings.push(ValidationIssue::warning(
            format!("{ROOT_SECTION}.autoconnect_discovered_interfaces"),
            "Auto-connect is configured but global discovery is disabled",
        ));
    }
}
