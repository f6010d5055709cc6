//! # Config Text Serializer
//!
//! Renders a [`ConfigState`] back into configuration text.
//!
//! ## Layout
//!
//! * Sections are written in `section_order`; the reserved sections are
//!   appended when missing from it.
//! * `[reticulum]` and `[logging]` are always written, other sections only
//!   when they have entries.
//! * `[interfaces]` writes its own entries and then one `[[name]]` block per
//!   interface, with `type` and the enable flag first.
//! * Sections are separated by exactly one blank line and the output ends
//!   with a single newline.
//!
//! Entries with a blank key are skipped and trailing whitespace is trimmed
//! from every line, so `serialize(parse(serialize(s)))` equals `serialize(s)`.
//!
//! Comments and blank lines of the parsed text are not kept in the model, so
//! they are lost when text is parsed and written back.

use tracing::debug;

use crate::model::{
    ConfigState, INTERFACES_SECTION, InterfaceRecord, KeyValue, LOGGING_SECTION,
    RESERVED_SECTIONS, ROOT_SECTION, bool_to_config,
};

/// Output under construction; a thin wrapper to keep the blank-line rules in
/// one place.
struct Lines(Vec<String>);

impl Lines {
    fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    fn push_entries(&mut self, entries: &[KeyValue]) {
        for entry in entries.iter().filter(|e| !e.key.trim().is_empty()) {
            self.push(format!("{} = {}", entry.key, entry.value).trim_end());
        }
    }

    fn ends_blank(&self) -> bool {
        self.0.last().is_some_and(String::is_empty)
    }

    /// Pushes a separator unless the output is empty or already ends in one.
    fn separate(&mut self) {
        if !self.0.is_empty() && !self.ends_blank() {
            self.0.push(String::new());
        }
    }

    fn trim_trailing_blank(&mut self) {
        if self.ends_blank() {
            self.0.pop();
        }
    }

    fn finish(mut self) -> String {
        self.trim_trailing_blank();
        let mut text = self.0.join("\n");
        text.push('\n');
        text
    }
}

/// Serializes a configuration into text.
///
/// ```
/// use rnsconf_core::model::ConfigState;
/// use rnsconf_core::serializer::serialize;
///
/// assert_eq!(
///     serialize(&ConfigState::new()),
///     "[reticulum]\n\n[logging]\n\n[interfaces]\n"
/// );
/// ```
#[tracing::instrument(level = "debug", skip(state), fields(interfaces = state.interfaces.len()))]
pub fn serialize(state: &ConfigState) -> String {
    let mut order: Vec<&str> = state.section_order.iter().map(String::as_str).collect();
    for name in RESERVED_SECTIONS {
        if !order.contains(&name) {
            order.push(name);
        }
    }

    let mut lines = Lines(Vec::new());
    for section in order {
        if section == INTERFACES_SECTION {
            write_interfaces(&mut lines, state);
            continue;
        }
        let entries = state.section(section);
        if entries.is_empty() && section != ROOT_SECTION && section != LOGGING_SECTION {
            continue;
        }
        lines.push(format!("[{section}]"));
        lines.push_entries(entries);
        lines.separate();
    }

    let text = lines.finish();
    debug!(bytes = text.len(), "serialized config");
    text
}

fn write_interfaces(lines: &mut Lines, state: &ConfigState) {
    let globals = state.section(INTERFACES_SECTION);
    lines.push(format!("[{INTERFACES_SECTION}]"));
    lines.push_entries(globals);
    if !globals.is_empty() || !state.interfaces.is_empty() {
        lines.push("");
    }
    for (index, iface) in state.interfaces.iter().enumerate() {
        write_interface(lines, index, iface);
        lines.push("");
    }
    lines.trim_trailing_blank();
    lines.separate();
}

fn write_interface(lines: &mut Lines, index: usize, iface: &InterfaceRecord) {
    let name = match iface.name.trim() {
        "" => format!("Interface {}", index + 1),
        name => name.to_string(),
    };
    lines.push(format!("[[{name}]]"));
    if !iface.interface_type.trim().is_empty() {
        lines.push(format!("type = {}", iface.interface_type).trim_end());
    }
    lines.push(format!(
        "{} = {}",
        iface.enable_key_style,
        bool_to_config(iface.enabled)
    ));
    lines.push_entries(&iface.settings);
}
