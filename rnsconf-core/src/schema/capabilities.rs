use serde::{Deserialize, Serialize};

/// What the running gateway reports it can do with interfaces.
///
/// Every field is optional on the wire; missing fields take the values of an
/// unavailable runtime so that a partial descriptor still deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceCapabilities {
    pub runtime_active: bool,
    pub os: String,
    pub identity_hash_hex_length: usize,
    pub supported_interface_types: Vec<String>,
    pub unsupported_interface_types: Vec<String>,
    pub discoverable_interface_types: Vec<String>,
    pub autoconnect_interface_types: Vec<String>,
    pub rns_version: String,
}

impl Default for InterfaceCapabilities {
    fn default() -> Self {
        Self {
            runtime_active: false,
            os: "other".to_string(),
            identity_hash_hex_length: 0,
            supported_interface_types: Vec::new(),
            unsupported_interface_types: Vec::new(),
            discoverable_interface_types: Vec::new(),
            autoconnect_interface_types: Vec::new(),
            rns_version: "unavailable".to_string(),
        }
    }
}
