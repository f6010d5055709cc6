//! # Schema Catalog
//!
//! Static description of every interface type the gateway knows about: which
//! fields each type accepts, how their values are typed and constrained, and
//! which fields are shown by default.
//!
//! ## Field Surfaces
//!
//! * [`type_specific_fields`] - fields declared by one type only
//! * [`all_fields_for_type`] - common + discovery + type-specific fields,
//!   de-duplicated by key (later definitions win)
//! * [`visible_fields_for_type`] - the curated default-display subset
//!
//! ## Capability Gating
//!
//! The runtime reports which types it can currently create, discover and
//! auto-connect through an [`InterfaceCapabilities`] descriptor.
//! [`supported_types`] and [`creatable_type_groups`] narrow the catalog to
//! that set, falling back to the full catalog (minus [`ALWAYS_EXCLUDED_TYPE`])
//! when no descriptor is available yet.
//!
//! Lookups never fail: unknown type strings simply have no type-specific
//! fields, since the runtime may ship types this catalog has not learned.

mod capabilities;
mod catalog;

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use capabilities::InterfaceCapabilities;
pub use catalog::{
    ALWAYS_EXCLUDED_TYPE, DEFAULT_INTERFACE_TYPE, YES_NO_OPTIONS, common_fields, discovery_fields,
    global_discovery_fields, type_groups,
};

/// Known interface types.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
pub enum InterfaceType {
    AutoInterface,
    BackboneInterface,
    #[serde(rename = "TCPServerInterface")]
    #[strum(serialize = "TCPServerInterface")]
    TcpServerInterface,
    #[serde(rename = "TCPClientInterface")]
    #[strum(serialize = "TCPClientInterface")]
    TcpClientInterface,
    #[serde(rename = "UDPInterface")]
    #[strum(serialize = "UDPInterface")]
    UdpInterface,
    #[serde(rename = "I2PInterface")]
    #[strum(serialize = "I2PInterface")]
    I2pInterface,
    SerialInterface,
    #[serde(rename = "KISSInterface")]
    #[strum(serialize = "KISSInterface")]
    KissInterface,
    #[serde(rename = "AX25KISSInterface")]
    #[strum(serialize = "AX25KISSInterface")]
    Ax25KissInterface,
    PipeInterface,
    RNodeInterface,
    RNodeMultiInterface,
    #[serde(rename = "RNodeIPInterface")]
    #[strum(serialize = "RNodeIPInterface")]
    RNodeIpInterface,
}

impl InterfaceType {
    /// Resolves a type string exactly as written in the config.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    /// Type string as written in the config.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Human-readable name used in type pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AutoInterface => "Auto Interface",
            Self::BackboneInterface => "Backbone Interface",
            Self::TcpServerInterface => "TCP Server Interface",
            Self::TcpClientInterface => "TCP Client Interface",
            Self::UdpInterface => "UDP Interface",
            Self::I2pInterface => "I2P Interface",
            Self::SerialInterface => "Serial Interface",
            Self::KissInterface => "KISS Interface",
            Self::Ax25KissInterface => "AX.25 KISS Interface",
            Self::PipeInterface => "Pipe Interface",
            Self::RNodeInterface => "RNode Interface",
            Self::RNodeMultiInterface => "RNode Multi Interface",
            Self::RNodeIpInterface => "RNode IP Interface",
        }
    }
}

/// One selectable value of a `select` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub label: &'static str,
    pub value: &'static str,
}

impl FieldOption {
    pub const fn new(label: &'static str, value: &'static str) -> Self {
        Self { label, value }
    }
}

/// How a field's text value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, strum::Display, strum::AsRefStr)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    Boolean,
    Select {
        options: &'static [FieldOption],
    },
    List,
}

/// Schema entry for one configurable setting.
///
/// `key` is the canonical spelling and the one validation paths refer to;
/// `aliases` are legacy spellings that are read when the canonical key is
/// absent or blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "no_aliases")]
    pub aliases: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

fn no_aliases(aliases: &&'static [&'static str]) -> bool {
    aliases.is_empty()
}

impl FieldDefinition {
    fn with_kind(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            aliases: &[],
            description: None,
            placeholder: None,
        }
    }

    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self::with_kind(key, label, FieldKind::Text)
    }

    pub fn number(key: &'static str, label: &'static str) -> Self {
        Self::with_kind(
            key,
            label,
            FieldKind::Number {
                min: None,
                max: None,
                step: None,
            },
        )
    }

    pub fn boolean(key: &'static str, label: &'static str) -> Self {
        Self::with_kind(key, label, FieldKind::Boolean)
    }

    pub fn select(
        key: &'static str,
        label: &'static str,
        options: &'static [FieldOption],
    ) -> Self {
        Self::with_kind(key, label, FieldKind::Select { options })
    }

    pub fn list(key: &'static str, label: &'static str) -> Self {
        Self::with_kind(key, label, FieldKind::List)
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn min(mut self, value: f64) -> Self {
        if let FieldKind::Number { min, .. } = &mut self.kind {
            *min = Some(value);
        }
        self
    }

    pub fn max(mut self, value: f64) -> Self {
        if let FieldKind::Number { max, .. } = &mut self.kind {
            *max = Some(value);
        }
        self
    }

    pub fn step(mut self, value: f64) -> Self {
        if let FieldKind::Number { step, .. } = &mut self.kind {
            *step = Some(value);
        }
        self
    }

    /// Canonical key followed by aliases, in lookup order.
    pub fn candidate_keys(&self) -> impl Iterator<Item = &'static str> + use<> {
        let aliases: &'static [&'static str] = self.aliases;
        std::iter::once(self.key).chain(aliases.iter().copied())
    }
}

/// A labelled group of types for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeGroup {
    pub label: &'static str,
    pub types: Vec<InterfaceType>,
}

/// Fields declared by `interface_type` itself; empty for unknown types.
pub fn type_specific_fields(interface_type: &str) -> &'static [FieldDefinition] {
    InterfaceType::lookup(interface_type)
        .map(catalog::fields_for)
        .unwrap_or(&[])
}

/// Every field an interface of this type may carry.
///
/// Common fields, then discovery fields, then type-specific ones; when keys
/// collide the later definition replaces the earlier one in place.
pub fn all_fields_for_type(interface_type: &str) -> Vec<FieldDefinition> {
    let mut fields: Vec<FieldDefinition> = Vec::new();
    let sources = common_fields()
        .iter()
        .chain(discovery_fields())
        .chain(type_specific_fields(interface_type));
    for field in sources {
        match fields.iter_mut().find(|existing| existing.key == field.key) {
            Some(existing) => *existing = field.clone(),
            None => fields.push(field.clone()),
        }
    }
    fields
}

/// The fields shown by default for a type.
///
/// A curated subset of [`type_specific_fields`], never including the
/// internal `subinterfaces` placeholder.
pub fn visible_fields_for_type(interface_type: &str) -> Vec<FieldDefinition> {
    let type_fields = type_specific_fields(interface_type)
        .iter()
        .filter(|field| field.key != catalog::SUBINTERFACES_KEY);
    let primary = InterfaceType::lookup(interface_type).and_then(catalog::primary_keys_for);
    type_fields
        .filter(|field| match primary {
            Some(keys) => keys.iter().any(|key| key.eq_ignore_ascii_case(field.key)),
            None => true,
        })
        .cloned()
        .collect()
}

/// Types the runtime can currently create.
///
/// With a descriptor listing supported types, exactly those that are also
/// known to the catalog. Without one, every known type except
/// [`ALWAYS_EXCLUDED_TYPE`].
pub fn supported_types(capabilities: Option<&InterfaceCapabilities>) -> BTreeSet<InterfaceType> {
    let from_runtime: BTreeSet<InterfaceType> = capabilities
        .map(|caps| {
            caps.supported_interface_types
                .iter()
                .filter_map(|name| InterfaceType::lookup(name))
                .collect()
        })
        .unwrap_or_default();

    if !from_runtime.is_empty() {
        return from_runtime;
    }

    use strum::IntoEnumIterator;
    InterfaceType::iter()
        .filter(|t| *t != ALWAYS_EXCLUDED_TYPE)
        .collect()
}

/// Display groups narrowed to the supported types, empty groups dropped.
pub fn creatable_type_groups(capabilities: Option<&InterfaceCapabilities>) -> Vec<TypeGroup> {
    let supported = supported_types(capabilities);
    type_groups()
        .iter()
        .map(|group| TypeGroup {
            label: group.label,
            types: group
                .types
                .iter()
                .copied()
                .filter(|t| supported.contains(t))
                .collect(),
        })
        .filter(|group| !group.types.is_empty())
        .collect()
}

pub fn is_creatable(interface_type: &str, capabilities: Option<&InterfaceCapabilities>) -> bool {
    creatable_type_groups(capabilities)
        .iter()
        .any(|group| group.types.iter().any(|t| t.name() == interface_type))
}

/// True if the runtime can announce interfaces of this type.
pub fn is_discoverable(interface_type: &str, capabilities: Option<&InterfaceCapabilities>) -> bool {
    capabilities.is_some_and(|caps| {
        caps.discoverable_interface_types
            .iter()
            .any(|t| t == interface_type)
    })
}

pub fn is_autoconnectable(
    interface_type: &str,
    capabilities: Option<&InterfaceCapabilities>,
) -> bool {
    capabilities.is_some_and(|caps| {
        caps.autoconnect_interface_types
            .iter()
            .any(|t| t == interface_type)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn keys(fields: &[FieldDefinition]) -> Vec<&'static str> {
        fields.iter().map(|f| f.key).collect()
    }

    fn caps_supporting(types: &[&str]) -> InterfaceCapabilities {
        InterfaceCapabilities {
            supported_interface_types: types.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_interface_type_names_round_trip() {
        for t in InterfaceType::iter() {
            assert_eq!(InterfaceType::lookup(&t.to_string()), Some(t));
        }
        assert_eq!(
            InterfaceType::lookup("TCPClientInterface"),
            Some(InterfaceType::TcpClientInterface)
        );
        assert_eq!(InterfaceType::lookup("tcpclientinterface"), None);
        assert_eq!(InterfaceType::iter().count(), 13);
    }

    #[test]
    fn test_every_type_has_fields() {
        for t in InterfaceType::iter() {
            assert!(!type_specific_fields(t.name()).is_empty(), "{t}");
            assert!(!visible_fields_for_type(t.name()).is_empty(), "{t}");
        }
    }

    #[test]
    fn test_unknown_type_has_no_specific_fields() {
        assert!(type_specific_fields("WarpDriveInterface").is_empty());
        assert!(visible_fields_for_type("WarpDriveInterface").is_empty());
        assert_eq!(
            all_fields_for_type("WarpDriveInterface").len(),
            common_fields().len() + discovery_fields().len()
        );
    }

    #[test]
    fn test_visible_fields_are_type_exact() {
        assert_eq!(
            keys(&visible_fields_for_type("TCPClientInterface")),
            vec!["target_host", "target_port"]
        );
        assert_eq!(
            keys(&visible_fields_for_type("TCPServerInterface")),
            vec!["listen_ip", "listen_port"]
        );
        assert_eq!(
            keys(&visible_fields_for_type("RNodeInterface")),
            vec!["port", "frequency", "bandwidth", "txpower", "spreadingfactor", "codingrate"]
        );
        assert_eq!(
            keys(&visible_fields_for_type("RNodeMultiInterface")),
            vec!["port", "id_interval", "id_callsign"]
        );
    }

    #[test]
    fn test_all_fields_dedupe_last_wins_in_first_position() {
        let fields = all_fields_for_type("TCPClientInterface");
        let all_keys = keys(&fields);
        let mut unique = all_keys.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), all_keys.len());
        assert_eq!(all_keys.first(), Some(&"mode"));
        assert!(all_keys.contains(&"target_host"));
        assert!(all_keys.contains(&"discoverable"));

        let mode = fields.iter().find(|f| f.key == "mode").expect("mode field");
        assert_eq!(mode.aliases, &["interface_mode"]);
    }

    #[test]
    fn test_default_type_is_creatable_without_runtime() {
        assert!(is_creatable(DEFAULT_INTERFACE_TYPE.name(), None));
        assert_eq!(DEFAULT_INTERFACE_TYPE.label(), "TCP Client Interface");
        let values: Vec<_> = YES_NO_OPTIONS.iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["yes", "no"]);
    }

    #[test]
    fn test_supported_types_fallback_excludes_legacy_type() {
        let fallback = supported_types(None);
        assert_eq!(fallback.len(), 12);
        assert!(!fallback.contains(&ALWAYS_EXCLUDED_TYPE));

        let empty = caps_supporting(&[]);
        assert_eq!(supported_types(Some(&empty)), fallback);
    }

    #[test]
    fn test_supported_types_from_runtime_are_intersected() {
        let caps = caps_supporting(&["TCPServerInterface", "RNodeIPInterface", "QuantumInterface"]);
        let supported = supported_types(Some(&caps));
        assert_eq!(
            supported.into_iter().collect::<Vec<_>>(),
            vec![
                InterfaceType::TcpServerInterface,
                InterfaceType::RNodeIpInterface
            ]
        );
    }

    #[test]
    fn test_creatable_groups_drop_empty_groups() {
        let caps = caps_supporting(&["TCPServerInterface", "PipeInterface"]);
        let groups = creatable_type_groups(Some(&caps));
        assert_eq!(
            groups,
            vec![
                TypeGroup {
                    label: "IP Networks",
                    types: vec![InterfaceType::TcpServerInterface],
                },
                TypeGroup {
                    label: "Pipelines",
                    types: vec![InterfaceType::PipeInterface],
                },
            ]
        );
        assert!(is_creatable("PipeInterface", Some(&caps)));
        assert!(!is_creatable("SerialInterface", Some(&caps)));
        assert!(!is_creatable("RNodeIPInterface", None));
    }

    #[test]
    fn test_discoverable_and_autoconnect_membership() {
        let caps = InterfaceCapabilities {
            discoverable_interface_types: vec!["TCPServerInterface".into()],
            autoconnect_interface_types: vec!["TCPClientInterface".into()],
            ..Default::default()
        };
        assert!(is_discoverable("TCPServerInterface", Some(&caps)));
        assert!(!is_discoverable("TCPClientInterface", Some(&caps)));
        assert!(!is_discoverable("TCPServerInterface", None));
        assert!(is_autoconnectable("TCPClientInterface", Some(&caps)));
        assert!(!is_autoconnectable("TCPClientInterface", None));
    }

    #[test]
    fn test_field_definition_serializes_kind_tag() {
        let field = FieldDefinition::number("ssid", "SSID").min(0.0).max(15.0).step(1.0);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "key": "ssid",
                "label": "SSID",
                "kind": "number",
                "min": 0.0,
                "max": 15.0,
                "step": 1.0
            })
        );
        assert_eq!(field.kind.to_string(), "number");
    }
}
