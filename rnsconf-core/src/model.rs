//! # Config Model
//!
//! In-memory representation of a gateway configuration file.
//!
//! A [`ConfigState`] holds every ordinary `[section]` as an ordered list of
//! [`KeyValue`] pairs and, separately, the `[[name]]` interface blocks nested
//! under the reserved `[interfaces]` section as [`InterfaceRecord`]s. Values are
//! always kept as text; typed interpretation happens only when a value is read
//! through the helpers in this module or checked by [`crate::validation`].
//!
//! ## Ordering
//!
//! Section order, key order inside sections and interface order are all
//! preserved so that [`crate::serializer::serialize`] produces stable,
//! diff-friendly output.
//!
//! ## Editing
//!
//! Callers edit a state in place between parse and serialize/validate:
//!
//! ```
//! use rnsconf_core::model::ConfigState;
//!
//! let mut state = ConfigState::new();
//! state.set_global_value("discover_interfaces", "yes");
//! let id = state.add_interface("Uplink", "TCPClientInterface");
//! let iface = state.interface_mut(id).unwrap();
//! iface.set_setting("target_host", "10.0.0.8");
//! iface.set_setting("target_port", "4242");
//! assert_eq!(state.interfaces.len(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::FieldDefinition;

/// Section holding global runtime settings, including discovery toggles.
pub const ROOT_SECTION: &str = "reticulum";
/// Section holding logging settings; always emitted by the serializer.
pub const LOGGING_SECTION: &str = "logging";
/// Section containing the `[[name]]` interface blocks.
pub const INTERFACES_SECTION: &str = "interfaces";
/// Sections guaranteed to exist in every [`ConfigState`], in emission order.
pub const RESERVED_SECTIONS: [&str; 3] = [ROOT_SECTION, LOGGING_SECTION, INTERFACES_SECTION];

/// Key that carries an interface's declared type.
pub const TYPE_KEY: &str = "type";

const TRUE_VALUES: [&str; 5] = ["1", "true", "yes", "on", "y"];
const FALSE_VALUES: [&str; 5] = ["0", "false", "no", "off", "n"];

/// Every token accepted as a boolean, true-ish first.
pub const BOOLEAN_TOKENS: [&str; 10] = [
    "yes", "no", "true", "false", "1", "0", "on", "off", "y", "n",
];

/// A single `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The spelling used for an interface's enable flag.
///
/// Both spellings are accepted by the runtime; a record remembers which one
/// it was declared with so that re-serialization writes it back unchanged.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InterfaceEnableKeyStyle {
    #[default]
    Enabled,
    InterfaceEnabled,
}

/// Opaque identifier of an interface record, unique per record.
///
/// Identifiers are not part of the text format; every parse mints new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterfaceId(Uuid);

impl InterfaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InterfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iface-{}", self.0)
    }
}

/// One `[[name]]` block inside `[interfaces]`.
///
/// The `type` and enable-flag lines are hoisted into [`InterfaceRecord::interface_type`]
/// and [`InterfaceRecord::enabled`]; `settings` holds every other line and never
/// contains two entries with the same key (compared case-insensitively).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub id: InterfaceId,
    pub name: String,
    #[serde(rename = "type")]
    pub interface_type: String,
    pub enabled: bool,
    pub enable_key_style: InterfaceEnableKeyStyle,
    pub settings: Vec<KeyValue>,
}

impl InterfaceRecord {
    pub fn new(name: impl Into<String>, interface_type: impl Into<String>) -> Self {
        Self {
            id: InterfaceId::new(),
            name: name.into(),
            interface_type: interface_type.into(),
            enabled: true,
            enable_key_style: InterfaceEnableKeyStyle::Enabled,
            settings: Vec::new(),
        }
    }

    /// Raw value of a setting, looked up case-insensitively.
    pub fn setting(&self, key: &str) -> Option<&str> {
        get_entry_value(&self.settings, key)
    }

    /// Writes a setting, keeping the first position of an existing key.
    ///
    /// `type` and the two enable-key spellings update the hoisted fields
    /// instead of the settings list.
    pub fn set_setting(&mut self, key: &str, value: &str) {
        let normalized = key.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return;
        }
        if normalized == TYPE_KEY {
            self.interface_type = value.trim().to_string();
            return;
        }
        if let Ok(style) = normalized.parse::<InterfaceEnableKeyStyle>() {
            self.enabled = parse_bool(Some(value), true);
            self.enable_key_style = style;
            return;
        }
        set_entry_value(&mut self.settings, key.trim(), value);
    }

    pub fn remove_setting(&mut self, key: &str) {
        remove_entry(&mut self.settings, key);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Reads a schema field, trying the canonical key first and then each
    /// alias in order. The first non-blank value wins.
    pub fn field_value(&self, field: &FieldDefinition) -> Option<&str> {
        field
            .candidate_keys()
            .filter_map(|key| self.setting(key))
            .find(|value| !value.trim().is_empty())
    }

    /// True if any of `keys` carries a non-blank value.
    pub fn has_any_value(&self, keys: &[&str]) -> bool {
        keys.iter()
            .filter_map(|key| self.setting(key))
            .any(|value| !value.trim().is_empty())
    }

    /// Equality on everything but the identifier.
    pub fn content_eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.interface_type == other.interface_type
            && self.enabled == other.enabled
            && self.enable_key_style == other.enable_key_style
            && self.settings == other.settings
    }
}

/// A whole configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigState {
    pub sections: HashMap<String, Vec<KeyValue>>,
    pub section_order: Vec<String>,
    pub interfaces: Vec<InterfaceRecord>,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigState {
    /// An empty configuration with the reserved sections in place.
    pub fn new() -> Self {
        let mut state = Self {
            sections: HashMap::new(),
            section_order: Vec::new(),
            interfaces: Vec::new(),
        };
        state.ensure_reserved_sections();
        state
    }

    /// Registers `name` if it has not been seen yet.
    pub fn push_section(&mut self, name: &str) {
        if !self.sections.contains_key(name) {
            self.sections.insert(name.to_string(), Vec::new());
        }
        if !self.section_order.iter().any(|s| s == name) {
            self.section_order.push(name.to_string());
        }
    }

    pub(crate) fn ensure_reserved_sections(&mut self) {
        for name in RESERVED_SECTIONS {
            self.push_section(name);
        }
    }

    /// Entries of a section; empty for sections that do not exist.
    pub fn section(&self, name: &str) -> &[KeyValue] {
        self.sections.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable entries of a section, creating and registering it if needed.
    pub fn section_mut(&mut self, name: &str) -> &mut Vec<KeyValue> {
        self.push_section(name);
        self.sections.entry(name.to_string()).or_default()
    }

    /// Value of a key in the root section.
    pub fn global_value(&self, key: &str) -> Option<&str> {
        get_entry_value(self.section(ROOT_SECTION), key)
    }

    pub fn set_global_value(&mut self, key: &str, value: &str) {
        set_entry_value(self.section_mut(ROOT_SECTION), key, value);
    }

    /// Appends a new enabled interface and returns its identifier.
    pub fn add_interface(&mut self, name: &str, interface_type: &str) -> InterfaceId {
        let record = InterfaceRecord::new(name, interface_type);
        let id = record.id;
        self.interfaces.push(record);
        id
    }

    pub fn remove_interface(&mut self, id: InterfaceId) -> Option<InterfaceRecord> {
        let index = self.interface_index(id)?;
        Some(self.interfaces.remove(index))
    }

    /// Moves the interface at `from` so that it ends up at `to`.
    ///
    /// Returns `false` and leaves the list untouched if either index is out
    /// of range.
    pub fn move_interface(&mut self, from: usize, to: usize) -> bool {
        let len = self.interfaces.len();
        if from >= len || to >= len {
            return false;
        }
        let record = self.interfaces.remove(from);
        self.interfaces.insert(to, record);
        true
    }

    pub fn interface_index(&self, id: InterfaceId) -> Option<usize> {
        self.interfaces.iter().position(|iface| iface.id == id)
    }

    pub fn interface(&self, id: InterfaceId) -> Option<&InterfaceRecord> {
        self.interfaces.iter().find(|iface| iface.id == id)
    }

    pub fn interface_mut(&mut self, id: InterfaceId) -> Option<&mut InterfaceRecord> {
        self.interfaces.iter_mut().find(|iface| iface.id == id)
    }

    /// Equality as observed through the text format.
    ///
    /// Interface identifiers are ignored, and so are empty sections other
    /// than the reserved ones, since neither survives serialization.
    pub fn content_eq(&self, other: &Self) -> bool {
        let left = self.significant_sections();
        let right = other.significant_sections();
        left == right
            && self.interfaces.len() == other.interfaces.len()
            && self
                .interfaces
                .iter()
                .zip(&other.interfaces)
                .all(|(a, b)| a.content_eq(b))
    }

    fn significant_sections(&self) -> Vec<(&str, &[KeyValue])> {
        self.section_order
            .iter()
            .map(|name| (name.as_str(), self.section(name)))
            .filter(|(name, entries)| !entries.is_empty() || RESERVED_SECTIONS.contains(name))
            .collect()
    }
}

/// Interprets a config boolean, falling back to `default` for anything that
/// is not a recognised token (including blank or missing values).
pub fn parse_bool(value: Option<&str>, default: bool) -> bool {
    let Some(value) = value else {
        return default;
    };
    let normalized = value.trim().to_ascii_lowercase();
    if TRUE_VALUES.contains(&normalized.as_str()) {
        true
    } else if FALSE_VALUES.contains(&normalized.as_str()) {
        false
    } else {
        default
    }
}

/// True if `value` is one of [`BOOLEAN_TOKENS`].
pub fn is_boolean_token(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    BOOLEAN_TOKENS.contains(&normalized.as_str())
}

pub(crate) fn bool_to_config(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Splits a list value on runs of commas, semicolons and line breaks.
///
/// ```
/// use rnsconf_core::model::parse_config_list;
/// assert_eq!(
///     parse_config_list("aa11, bb22\ncc33; dd44"),
///     vec!["aa11", "bb22", "cc33", "dd44"]
/// );
/// ```
pub fn parse_config_list(value: &str) -> Vec<String> {
    value
        .split([',', ';', '\r', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn serialize_config_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn find_entry_index(entries: &[KeyValue], key: &str) -> Option<usize> {
    let key = key.trim();
    entries
        .iter()
        .position(|entry| entry.key.trim().eq_ignore_ascii_case(key))
}

pub fn get_entry_value<'a>(entries: &'a [KeyValue], key: &str) -> Option<&'a str> {
    find_entry_index(entries, key).map(|index| entries[index].value.as_str())
}

pub fn set_entry_value(entries: &mut Vec<KeyValue>, key: &str, value: &str) {
    match find_entry_index(entries, key) {
        Some(index) => entries[index].value = value.to_string(),
        None => entries.push(KeyValue::new(key, value)),
    }
}

pub fn remove_entry(entries: &mut Vec<KeyValue>, key: &str) {
    if let Some(index) = find_entry_index(entries, key) {
        entries.remove(index);
    }
}

pub fn get_entry_list(entries: &[KeyValue], key: &str) -> Vec<String> {
    get_entry_value(entries, key)
        .map(parse_config_list)
        .unwrap_or_default()
}

/// Writes a list value; an empty list removes the key.
pub fn set_entry_list<S: AsRef<str>>(entries: &mut Vec<KeyValue>, key: &str, items: &[S]) {
    let value = serialize_config_list(items);
    if value.is_empty() {
        remove_entry(entries, key);
    } else {
        set_entry_value(entries, key, &value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_bool_tokens() {
        for token in ["1", "true", "YES", " on ", "y"] {
            assert!(parse_bool(Some(token), false), "{token} should be true");
        }
        for token in ["0", "False", "no", "OFF", "n"] {
            assert!(!parse_bool(Some(token), true), "{token} should be false");
        }
        assert!(parse_bool(Some("maybe"), true));
        assert!(!parse_bool(Some(""), false));
        assert!(parse_bool(None, true));
    }

    #[test]
    fn test_parse_config_list_separators() {
        assert_eq!(
            parse_config_list("aa11, bb22\ncc33; dd44"),
            vec!["aa11", "bb22", "cc33", "dd44"]
        );
        assert_eq!(parse_config_list(",,;\r\n , "), Vec::<String>::new());
        assert_eq!(serialize_config_list(&[" a ", "", "b"]), "a, b");
    }

    #[test]
    fn test_entry_helpers_are_case_insensitive() {
        let mut entries = vec![KeyValue::new("Target_Host", "a")];
        assert_eq!(get_entry_value(&entries, "target_host"), Some("a"));

        set_entry_value(&mut entries, "TARGET_HOST", "b");
        assert_eq!(entries, vec![KeyValue::new("Target_Host", "b")]);

        set_entry_value(&mut entries, "target_port", "4242");
        assert_eq!(entries.len(), 2);

        remove_entry(&mut entries, "target_host");
        assert_eq!(entries, vec![KeyValue::new("target_port", "4242")]);
    }

    #[test]
    fn test_entry_list_round_trip_and_removal() {
        let mut entries = Vec::new();
        set_entry_list(&mut entries, "peers", &["a.i2p", "b.i2p"]);
        assert_eq!(get_entry_value(&entries, "peers"), Some("a.i2p, b.i2p"));
        assert_eq!(get_entry_list(&entries, "peers"), vec!["a.i2p", "b.i2p"]);

        set_entry_list::<&str>(&mut entries, "peers", &[]);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_new_state_has_reserved_sections() {
        let state = ConfigState::new();
        assert_eq!(state.section_order, RESERVED_SECTIONS.to_vec());
        for name in RESERVED_SECTIONS {
            assert!(state.sections.contains_key(name));
        }
        assert!(state.section("missing").is_empty());
    }

    #[test]
    fn test_set_setting_hoists_type_and_enable_key() {
        let mut iface = InterfaceRecord::new("alpha", "");
        iface.set_setting("Type", "UDPInterface");
        iface.set_setting("interface_enabled", "no");
        iface.set_setting("listen_port", "4242");
        iface.set_setting("LISTEN_PORT", "4343");

        assert_eq!(iface.interface_type, "UDPInterface");
        assert!(!iface.enabled);
        assert_eq!(
            iface.enable_key_style,
            InterfaceEnableKeyStyle::InterfaceEnabled
        );
        assert_eq!(iface.settings, vec![KeyValue::new("listen_port", "4343")]);
    }

    #[test]
    fn test_interface_edit_operations() {
        let mut state = ConfigState::new();
        let a = state.add_interface("a", "TCPClientInterface");
        let b = state.add_interface("b", "UDPInterface");
        let c = state.add_interface("c", "PipeInterface");

        assert!(state.move_interface(2, 0));
        let names: Vec<_> = state.interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert!(!state.move_interface(0, 3));

        let removed = state.remove_interface(a).expect("interface a exists");
        assert_eq!(removed.name, "a");
        assert_eq!(state.interface_index(b), Some(1));
        assert_eq!(state.interface(c).map(|i| i.name.as_str()), Some("c"));
        assert!(state.remove_interface(a).is_none());
    }

    #[test]
    fn test_content_eq_ignores_ids_and_empty_sections() {
        let mut left = ConfigState::new();
        left.add_interface("a", "TCPClientInterface");
        let mut right = ConfigState::new();
        right.add_interface("a", "TCPClientInterface");
        right.push_section("scratch");

        assert_ne!(left, right);
        assert!(left.content_eq(&right));

        right.interfaces[0].set_enabled(false);
        assert!(!left.content_eq(&right));
    }

    #[test]
    fn test_interface_id_display() {
        let id = InterfaceId::new();
        assert!(id.to_string().starts_with("iface-"));
        assert_ne!(id, InterfaceId::new());
    }
}
