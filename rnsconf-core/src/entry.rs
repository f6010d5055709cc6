//! # Discovered Interface Entries
//!
//! The runtime reports interfaces it has discovered either as a config text
//! snippet or as a JSON object of settings. [`parse_interface_entry`] turns
//! both shapes into an [`InterfaceRecord`] ready to be added to a
//! [`crate::model::ConfigState`].

use serde_json::Value;
use tracing::debug;

use crate::model::{
    INTERFACES_SECTION, InterfaceEnableKeyStyle, InterfaceRecord, KeyValue, TYPE_KEY,
    bool_to_config, parse_bool, serialize_config_list,
};
use crate::parser::parse;

/// Name given to discovered interfaces that do not carry one.
pub const DEFAULT_DISCOVERED_NAME: &str = "Discovered Interface";

const NAME_KEY: &str = "name";

/// Converts a discovered interface entry into a record.
///
/// Returns `None` for blank snippets, snippets without an interface block and
/// JSON values that are neither strings nor objects.
///
/// ```
/// use rnsconf_core::entry::parse_interface_entry;
/// use serde_json::json;
///
/// let entry = json!({"type": "TCPClientInterface", "target_port": 4242});
/// let record = parse_interface_entry(&entry, "Peer").unwrap();
/// assert_eq!(record.name, "Peer");
/// assert_eq!(record.setting("target_port"), Some("4242"));
/// ```
#[tracing::instrument(level = "debug", skip(entry))]
pub fn parse_interface_entry(entry: &Value, fallback_name: &str) -> Option<InterfaceRecord> {
    let record = match entry {
        Value::String(text) => from_snippet(text, fallback_name),
        Value::Object(map) => Some(from_object(map, fallback_name)),
        _ => None,
    };
    debug!(found = record.is_some(), "converted discovered entry");
    record
}

fn from_snippet(text: &str, fallback_name: &str) -> Option<InterfaceRecord> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let section_header = format!("[{INTERFACES_SECTION}]");
    let snippet = if trimmed.contains(&section_header) {
        trimmed.to_string()
    } else if trimmed.starts_with("[[") {
        format!("{section_header}\n{trimmed}\n")
    } else {
        format!("{section_header}\n[[{fallback_name}]]\n{trimmed}\n")
    };
    parse(&snippet).interfaces.into_iter().next()
}

fn from_object(map: &serde_json::Map<String, Value>, fallback_name: &str) -> InterfaceRecord {
    let name = map.get(NAME_KEY).map(value_to_config_string).unwrap_or_default();
    let interface_type = map.get(TYPE_KEY).map(value_to_config_string).unwrap_or_default();

    let interface_enabled = map.get(<&str>::from(InterfaceEnableKeyStyle::InterfaceEnabled));
    let enabled = map.get(<&str>::from(InterfaceEnableKeyStyle::Enabled));
    let enabled_raw = interface_enabled
        .map(value_to_config_string)
        .filter(|value| !value.is_empty())
        .or_else(|| enabled.map(value_to_config_string))
        .unwrap_or_default();
    let enable_key_style = if interface_enabled.is_some() {
        InterfaceEnableKeyStyle::InterfaceEnabled
    } else {
        InterfaceEnableKeyStyle::Enabled
    };

    let settings = map
        .iter()
        .filter(|(key, _)| {
            let normalized = key.trim().to_ascii_lowercase();
            !normalized.is_empty()
                && normalized != NAME_KEY
                && normalized != TYPE_KEY
                && normalized.parse::<InterfaceEnableKeyStyle>().is_err()
        })
        .map(|(key, value)| KeyValue::new(key.as_str(), value_to_config_string(value)))
        .collect();

    let name = match name.trim() {
        "" => fallback_name.to_string(),
        name => name.to_string(),
    };
    InterfaceRecord {
        enabled: parse_bool(Some(&enabled_raw), true),
        enable_key_style,
        settings,
        ..InterfaceRecord::new(name, interface_type.trim())
    }
}

/// Renders a JSON value the way it would be written in config text.
pub fn value_to_config_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => bool_to_config(*flag).to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(value_to_config_string).collect();
            serialize_config_list(&items)
        }
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_snippet_without_header_uses_fallback_name() {
        let entry = json!("type = TCPClientInterface\ntarget_host = peer.example.org\n");
        let record = parse_interface_entry(&entry, DEFAULT_DISCOVERED_NAME).unwrap();
        assert_eq!(record.name, "Discovered Interface");
        assert_eq!(record.interface_type, "TCPClientInterface");
        assert_eq!(record.setting("target_host"), Some("peer.example.org"));
    }

    #[test]
    fn test_snippet_with_block_or_section() {
        let block = json!("  [[Relay]]\ntype = BackboneInterface\n");
        assert_eq!(
            parse_interface_entry(&block, "x").map(|r| r.name),
            Some("Relay".to_string())
        );

        let full = json!("[interfaces]\n[[A]]\ntype = UDPInterface\n[[B]]\n");
        assert_eq!(
            parse_interface_entry(&full, "x").map(|r| r.name),
            Some("A".to_string())
        );
    }

    #[test]
    fn test_blank_or_empty_snippets() {
        assert!(parse_interface_entry(&json!("  \n"), "x").is_none());
        assert!(parse_interface_entry(&json!("[interfaces]\nkey = v"), "x").is_none());
        assert!(parse_interface_entry(&json!(42), "x").is_none());
        assert!(parse_interface_entry(&Value::Null, "x").is_none());
    }

    #[test]
    fn test_object_entry() {
        let entry = json!({
            "name": "  ",
            "type": " RNodeInterface ",
            "interface_enabled": false,
            "frequency": 868000000,
            "flow_control": true,
            "peers": ["a", " ", "b"],
            "extra": {"k": 1},
            "blank": null
        });
        let record = parse_interface_entry(&entry, "Radio").unwrap();
        assert_eq!(record.name, "Radio");
        assert_eq!(record.interface_type, "RNodeInterface");
        assert!(!record.enabled);
        assert_eq!(
            record.enable_key_style,
            InterfaceEnableKeyStyle::InterfaceEnabled
        );
        assert_eq!(record.setting("frequency"), Some("868000000"));
        assert_eq!(record.setting("flow_control"), Some("yes"));
        assert_eq!(record.setting("peers"), Some("a, b"));
        assert_eq!(record.setting("extra"), Some(r#"{"k":1}"#));
        assert_eq!(record.setting("blank"), Some(""));
        assert!(record.setting("name").is_none());
        assert!(record.setting("interface_enabled").is_none());
    }

    #[test]
    fn test_object_enable_defaults() {
        let record = parse_interface_entry(&json!({"type": "PipeInterface"}), "p").unwrap();
        assert!(record.enabled);
        assert_eq!(record.enable_key_style, InterfaceEnableKeyStyle::Enabled);

        let record =
            parse_interface_entry(&json!({"enabled": "no", "ENABLED_NOTE": "x"}), "p").unwrap();
        assert!(!record.enabled);
        assert_eq!(record.settings, vec![KeyValue::new("ENABLED_NOTE", "x")]);
    }
}
