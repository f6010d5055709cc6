use std::collections::HashMap;

use lazy_static::lazy_static;

use super::{FieldDefinition, FieldOption, InterfaceType, TypeGroup};

/// Type offered first when creating a new interface.
pub const DEFAULT_INTERFACE_TYPE: InterfaceType = InterfaceType::TcpClientInterface;
/// Known type that is only creatable when the runtime explicitly lists it.
pub const ALWAYS_EXCLUDED_TYPE: InterfaceType = InterfaceType::RNodeIpInterface;

pub(super) const SUBINTERFACES_KEY: &str = "subinterfaces";

const MODE_OPTIONS: &[FieldOption] = &[
    FieldOption::new("Full", "full"),
    FieldOption::new("Gateway", "gateway"),
    FieldOption::new("Gateway (gw)", "gw"),
    FieldOption::new("Access Point", "access_point"),
    FieldOption::new("Access Point (ap)", "ap"),
    FieldOption::new("Roaming", "roaming"),
    FieldOption::new("Boundary", "boundary"),
];

const DISCOVERY_MODULATION_OPTIONS: &[FieldOption] = &[
    FieldOption::new("LoRa", "lora"),
    FieldOption::new("FSK", "fsk"),
    FieldOption::new("OFDM", "ofdm"),
];

const PARITY_OPTIONS: &[FieldOption] = &[
    FieldOption::new("None", "none"),
    FieldOption::new("Even", "even"),
    FieldOption::new("Odd", "odd"),
    FieldOption::new("N", "N"),
    FieldOption::new("E", "E"),
    FieldOption::new("O", "O"),
];

const STOP_BITS_OPTIONS: &[FieldOption] = &[
    FieldOption::new("1", "1"),
    FieldOption::new("1.5", "1.5"),
    FieldOption::new("2", "2"),
];

const DATA_BITS_OPTIONS: &[FieldOption] =
    &[FieldOption::new("7", "7"), FieldOption::new("8", "8")];

pub const YES_NO_OPTIONS: &[FieldOption] =
    &[FieldOption::new("Yes", "yes"), FieldOption::new("No", "no")];

const AUTO_DISCOVERY_SCOPE_OPTIONS: &[FieldOption] = &[
    FieldOption::new("Link", "link"),
    FieldOption::new("Admin", "admin"),
    FieldOption::new("Site", "site"),
    FieldOption::new("Organisation", "organisation"),
    FieldOption::new("Global", "global"),
];

const MULTICAST_ADDRESS_TYPE_OPTIONS: &[FieldOption] = &[
    FieldOption::new("Temporary", "temporary"),
    FieldOption::new("Permanent", "permanent"),
];

fn port_field(key: &'static str, label: &'static str) -> FieldDefinition {
    FieldDefinition::number(key, label)
        .min(1.0)
        .max(65535.0)
        .step(1.0)
}

fn counter_field(key: &'static str, label: &'static str) -> FieldDefinition {
    FieldDefinition::number(key, label).min(0.0).step(1.0)
}

fn serial_line_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::text("port", "Port"),
        FieldDefinition::number("speed", "Speed").min(1.0).step(1.0),
        FieldDefinition::select("databits", "Data bits", DATA_BITS_OPTIONS),
        FieldDefinition::select("parity", "Parity", PARITY_OPTIONS),
        FieldDefinition::select("stopbits", "Stop bits", STOP_BITS_OPTIONS),
    ]
}

fn station_id_fields() -> Vec<FieldDefinition> {
    vec![
        counter_field("id_interval", "ID interval"),
        FieldDefinition::text("id_callsign", "ID callsign"),
    ]
}

fn kiss_fields() -> Vec<FieldDefinition> {
    let mut fields = serial_line_fields();
    fields.extend([
        counter_field("preamble", "Preamble"),
        counter_field("txtail", "TX tail"),
        counter_field("persistence", "Persistence"),
        counter_field("slottime", "Slot time"),
        FieldDefinition::boolean("flow_control", "Flow control"),
    ]);
    fields.extend(station_id_fields());
    fields
}

fn type_field_table() -> HashMap<InterfaceType, Vec<FieldDefinition>> {
    use InterfaceType::*;

    let mut table = HashMap::new();
    table.insert(
        AutoInterface,
        vec![
            FieldDefinition::text("group_id", "Group ID"),
            FieldDefinition::select(
                "multicast_address_type",
                "Multicast address type",
                MULTICAST_ADDRESS_TYPE_OPTIONS,
            ),
            FieldDefinition::select(
                "discovery_scope",
                "Discovery scope",
                AUTO_DISCOVERY_SCOPE_OPTIONS,
            ),
            port_field("discovery_port", "Discovery port"),
            port_field("data_port", "Data port"),
            FieldDefinition::list("devices", "Devices"),
            FieldDefinition::list("ignored_devices", "Ignored devices"),
        ],
    );
    table.insert(
        BackboneInterface,
        vec![
            FieldDefinition::text("listen_on", "Listen on host").aliases(&["listen_ip"]),
            port_field("port", "Port").aliases(&["listen_port"]),
            FieldDefinition::text("target_host", "Target host").aliases(&["remote"]),
            port_field("target_port", "Target port"),
            FieldDefinition::boolean("prefer_ipv6", "Prefer IPv6"),
            FieldDefinition::text("device", "Device"),
        ],
    );
    table.insert(
        TcpServerInterface,
        vec![
            FieldDefinition::text("listen_ip", "Listen IP"),
            port_field("listen_port", "Listen port").aliases(&["port"]),
            FieldDefinition::boolean("prefer_ipv6", "Prefer IPv6"),
            FieldDefinition::text("device", "Device"),
            FieldDefinition::boolean("i2p_tunneled", "I2P tunneled"),
        ],
    );
    table.insert(
        TcpClientInterface,
        vec![
            FieldDefinition::text("target_host", "Target host"),
            port_field("target_port", "Target port"),
            FieldDefinition::number("fixed_mtu", "Fixed MTU").min(1.0).step(1.0),
            FieldDefinition::boolean("kiss_framing", "KISS framing"),
            FieldDefinition::boolean("i2p_tunneled", "I2P tunneled"),
        ],
    );
    table.insert(
        UdpInterface,
        vec![
            FieldDefinition::text("listen_ip", "Listen IP"),
            port_field("listen_port", "Listen port").aliases(&["port"]),
            FieldDefinition::text("forward_ip", "Forward IP"),
            port_field("forward_port", "Forward port"),
            FieldDefinition::text("device", "Device"),
        ],
    );
    table.insert(
        I2pInterface,
        vec![
            FieldDefinition::list("peers", "Peers"),
            FieldDefinition::boolean("connectable", "Connectable"),
        ],
    );
    table.insert(SerialInterface, serial_line_fields());
    table.insert(KissInterface, kiss_fields());
    table.insert(Ax25KissInterface, {
        let mut fields = kiss_fields();
        fields.push(FieldDefinition::text("callsign", "Callsign"));
        fields.push(
            FieldDefinition::number("ssid", "SSID")
                .min(0.0)
                .max(15.0)
                .step(1.0),
        );
        fields
    });
    table.insert(
        PipeInterface,
        vec![
            FieldDefinition::text("command", "Command"),
            FieldDefinition::number("respawn_delay", "Respawn delay")
                .aliases(&["respawn_interval"])
                .min(0.0)
                .step(0.1),
        ],
    );
    table.insert(RNodeInterface, {
        let mut fields = vec![
            FieldDefinition::text("port", "Port"),
            counter_field("frequency", "Frequency"),
            counter_field("bandwidth", "Bandwidth"),
            FieldDefinition::number("txpower", "TX power").step(1.0),
            FieldDefinition::number("spreadingfactor", "Spreading factor")
                .min(7.0)
                .max(12.0)
                .step(1.0),
            FieldDefinition::number("codingrate", "Coding rate")
                .min(5.0)
                .max(8.0)
                .step(1.0),
            FieldDefinition::boolean("flow_control", "Flow control"),
        ];
        fields.extend(station_id_fields());
        fields.extend([
            FieldDefinition::number("airtime_limit_short", "Airtime short limit")
                .min(0.0)
                .max(100.0)
                .step(0.1),
            FieldDefinition::number("airtime_limit_long", "Airtime long limit")
                .min(0.0)
                .max(100.0)
                .step(0.1),
        ]);
        fields
    });
    table.insert(RNodeMultiInterface, {
        let mut fields = vec![FieldDefinition::text("port", "Port")];
        fields.extend(station_id_fields());
        fields.push(
            FieldDefinition::text(SUBINTERFACES_KEY, "Subinterfaces")
                .placeholder("Use advanced settings for nested subinterface blocks")
                .description(
                    "RNodeMulti subinterface blocks remain editable from advanced settings.",
                ),
        );
        fields
    });
    table.insert(
        RNodeIpInterface,
        vec![
            FieldDefinition::text("target_host", "Target host"),
            port_field("target_port", "Target port"),
            FieldDefinition::text("password", "Password"),
        ],
    );
    table
}

lazy_static! {
    static ref GLOBAL_DISCOVERY_FIELDS: Vec<FieldDefinition> = vec![
        FieldDefinition::boolean("discover_interfaces", "Discover interfaces")
            .description("Enable Reticulum announce-and-listen discovery globally."),
        FieldDefinition::number("required_discovery_value", "Required discovery value")
            .min(0.0)
            .max(64.0)
            .step(1.0)
            .description("Minimum stamp value required for accepted discovery announces."),
        counter_field("autoconnect_discovered_interfaces", "Auto-connect limit")
            .description("Maximum number of discovered interfaces Reticulum may auto-connect."),
        FieldDefinition::list("interface_discovery_sources", "Discovery source identities")
            .placeholder("Comma-separated identity hashes")
            .description("Optional allow-list of identity hashes trusted as discovery sources."),
    ];
    static ref COMMON_FIELDS: Vec<FieldDefinition> = vec![
        FieldDefinition::select("mode", "Mode", MODE_OPTIONS).aliases(&["interface_mode"]),
        FieldDefinition::boolean("outgoing", "Outgoing"),
        FieldDefinition::number("bitrate", "Bitrate").min(1.0).step(1.0),
        counter_field("announce_cap", "Announce cap"),
        FieldDefinition::number("ifac_size", "IFAC size").min(1.0).step(1.0),
        FieldDefinition::text("network_name", "Network name"),
        FieldDefinition::text("passphrase", "Passphrase").aliases(&["pass_phrase"]),
        FieldDefinition::boolean("ingress_control", "Ingress control"),
        counter_field("announce_rate_target", "Announce target"),
        counter_field("announce_rate_grace", "Announce grace"),
        counter_field("announce_rate_penalty", "Announce penalty"),
        FieldDefinition::boolean("bootstrap_only", "Bootstrap only"),
        FieldDefinition::boolean("ignore_config_warnings", "Ignore warnings"),
    ];
    static ref DISCOVERY_FIELDS: Vec<FieldDefinition> = vec![
        FieldDefinition::boolean("discoverable", "Discoverable"),
        FieldDefinition::text("discovery_name", "Discovery name"),
        FieldDefinition::number("announce_interval", "Announce interval (s)")
            .min(5.0)
            .step(1.0),
        FieldDefinition::number("discovery_stamp_value", "Discovery stamp value")
            .min(0.0)
            .max(64.0)
            .step(1.0),
        FieldDefinition::boolean("discovery_encrypt", "Encrypt discovery payload"),
        FieldDefinition::text("reachable_on", "Reachable on host"),
        FieldDefinition::boolean("publish_ifac", "Publish IFAC credentials"),
        FieldDefinition::number("latitude", "Latitude")
            .min(-90.0)
            .max(90.0)
            .step(0.000001),
        FieldDefinition::number("longitude", "Longitude")
            .min(-180.0)
            .max(180.0)
            .step(0.000001),
        FieldDefinition::number("height", "Height").step(0.1),
        counter_field("discovery_frequency", "Discovery frequency"),
        counter_field("discovery_bandwidth", "Discovery bandwidth"),
        FieldDefinition::select(
            "discovery_modulation",
            "Discovery modulation",
            DISCOVERY_MODULATION_OPTIONS,
        ),
    ];
    static ref TYPE_FIELDS: HashMap<InterfaceType, Vec<FieldDefinition>> = type_field_table();
    static ref PRIMARY_KEYS: HashMap<InterfaceType, &'static [&'static str]> = {
        use InterfaceType::*;
        let entries: [(InterfaceType, &'static [&'static str]); 13] = [
            (
                AutoInterface,
                &["group_id", "discovery_scope", "discovery_port", "data_port", "devices", "ignored_devices"],
            ),
            (BackboneInterface, &["listen_on", "port", "target_host", "target_port"]),
            (TcpServerInterface, &["listen_ip", "listen_port"]),
            (TcpClientInterface, &["target_host", "target_port"]),
            (UdpInterface, &["listen_ip", "listen_port", "forward_ip", "forward_port"]),
            (I2pInterface, &["peers"]),
            (SerialInterface, &["port", "speed"]),
            (KissInterface, &["port", "speed"]),
            (Ax25KissInterface, &["port", "callsign", "ssid"]),
            (PipeInterface, &["command"]),
            (
                RNodeInterface,
                &["port", "frequency", "bandwidth", "txpower", "spreadingfactor", "codingrate"],
            ),
            (RNodeMultiInterface, &["port", "id_interval", "id_callsign"]),
            (RNodeIpInterface, &["target_host", "target_port"]),
        ];
        entries.into_iter().collect()
    };
    static ref TYPE_GROUPS: Vec<TypeGroup> = {
        use InterfaceType::*;
        vec![
            TypeGroup {
                label: "Automatic",
                types: vec![AutoInterface],
            },
            TypeGroup {
                label: "IP Networks",
                types: vec![
                    BackboneInterface,
                    TcpServerInterface,
                    TcpClientInterface,
                    UdpInterface,
                    I2pInterface,
                ],
            },
            TypeGroup {
                label: "Hardware",
                types: vec![
                    SerialInterface,
                    KissInterface,
                    Ax25KissInterface,
                    RNodeInterface,
                    RNodeMultiInterface,
                    RNodeIpInterface,
                ],
            },
            TypeGroup {
                label: "Pipelines",
                types: vec![PipeInterface],
            },
        ]
    };
}

/// Fields of the `[reticulum]` section that drive interface discovery.
pub fn global_discovery_fields() -> &'static [FieldDefinition] {
    &GLOBAL_DISCOVERY_FIELDS
}

/// Fields every interface type accepts.
pub fn common_fields() -> &'static [FieldDefinition] {
    &COMMON_FIELDS
}

/// Per-interface discovery announce fields.
pub fn discovery_fields() -> &'static [FieldDefinition] {
    &DISCOVERY_FIELDS
}

/// Fixed display grouping of every known type.
pub fn type_groups() -> &'static [TypeGroup] {
    &TYPE_GROUPS
}

pub(super) fn fields_for(interface_type: InterfaceType) -> &'static [FieldDefinition] {
    TYPE_FIELDS
        .get(&interface_type)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub(super) fn primary_keys_for(interface_type: InterfaceType) -> Option<&'static [&'static str]> {
    PRIMARY_KEYS.get(&interface_type).copied()
}
