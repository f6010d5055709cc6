use crate::schema::InterfaceType;

/// "At least one of `keys` must carry a non-blank value."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Requirement {
    /// Key the issue path points at.
    pub path_key: &'static str,
    pub keys: &'static [&'static str],
    /// Replaces the default `{path_key} is required for {type}` message.
    pub message: Option<&'static str>,
}

impl Requirement {
    const fn key(path_key: &'static str, keys: &'static [&'static str]) -> Self {
        Self {
            path_key,
            keys,
            message: None,
        }
    }

    const fn group(
        path_key: &'static str,
        keys: &'static [&'static str],
        message: &'static str,
    ) -> Self {
        Self {
            path_key,
            keys,
            message: Some(message),
        }
    }

    pub fn message_for(&self, interface_type: &str) -> String {
        match self.message {
            Some(message) => message.to_string(),
            None => format!("{} is required for {interface_type}", self.path_key),
        }
    }
}

const PORT_ONLY: &[Requirement] = &[Requirement::key("port", &["port"])];

const TARGET: &[Requirement] = &[
    Requirement::key("target_host", &["target_host"]),
    Requirement::key("target_port", &["target_port"]),
];

const TCP_SERVER: &[Requirement] = &[Requirement::key("listen_port", &["listen_port", "port"])];

const UDP: &[Requirement] = &[
    Requirement::key("listen_ip", &["listen_ip", "device"]),
    Requirement::key("listen_port", &["listen_port", "port"]),
];

const AX25: &[Requirement] = &[
    Requirement::key("port", &["port"]),
    Requirement::key("callsign", &["callsign"]),
];

const PIPE: &[Requirement] = &[Requirement::key("command", &["command"])];

const BACKBONE: &[Requirement] = &[
    Requirement::group(
        "listen_on",
        &["listen_on", "listen_ip", "device", "target_host", "remote"],
        "BackboneInterface requires listen_on/listen_ip/device or target_host/remote",
    ),
    Requirement::group(
        "port",
        &["port", "listen_port", "target_port"],
        "BackboneInterface requires port/listen_port or target_port",
    ),
];

/// Per-type presence requirements; unknown or unlisted types have none.
pub(crate) fn requirements_for(interface_type: &str) -> &'static [Requirement] {
    use InterfaceType::*;

    match InterfaceType::lookup(interface_type) {
        Some(TcpClientInterface | RNodeIpInterface) => TARGET,
        Some(TcpServerInterface) => TCP_SERVER,
        Some(UdpInterface) => UDP,
        Some(SerialInterface | KissInterface | RNodeInterface | RNodeMultiInterface) => PORT_ONLY,
        Some(Ax25KissInterface) => AX25,
        Some(PipeInterface) => PIPE,
        Some(BackboneInterface) => BACKBONE,
        Some(AutoInterface | I2pInterface) | None => &[],
    }
}

/// Types whose bare `port` key is a network port rather than a device path.
pub(crate) fn port_is_network_port(interface_type: &str) -> bool {
    matches!(
        InterfaceType::lookup(interface_type),
        Some(
            InterfaceType::BackboneInterface
                | InterfaceType::TcpServerInterface
                | InterfaceType::UdpInterface
        )
    )
}
