//! # Config Text Parser
//!
//! Turns configuration text into a [`ConfigState`].
//!
//! ## Line Shapes
//!
//! Each trimmed line is classified with `nom` combinators, in this order:
//!
//! 1. `[[label]]` opens an interface block (only inside `[interfaces]`)
//! 2. `[section]` switches the current section
//! 3. `key = value` attaches an entry to the current interface or section
//!
//! Blank lines and lines starting with `#` or `;` are skipped.
//!
//! ## Permissiveness
//!
//! The parser never fails. Lines it cannot place (entries before the first
//! section header, `[[label]]` outside `[interfaces]`, lines without `=`) are
//! dropped so that hand-edited text always loads into an editable state and
//! the validator can report on it.
//!
//! A section header whose name is blank or itself bracketed (`[  ]`,
//! `[ [gw] ]`) cannot be written back as a section, so it is dropped and
//! closes the current section: entries below it are dropped too.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, one_of},
    combinator::{map, map_opt, rest, value},
    sequence::{preceded, separated_pair},
};
use tracing::{debug, trace};

use crate::model::{
    ConfigState, INTERFACES_SECTION, InterfaceEnableKeyStyle, InterfaceRecord, KeyValue, TYPE_KEY,
    parse_bool, set_entry_value,
};

/// Classification of a single trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    InterfaceHeader(&'a str),
    SectionHeader(&'a str),
    MalformedHeader,
    Entry { key: &'a str, value: &'a str },
    Unrecognized,
}

fn comment(input: &str) -> IResult<&str, Line<'_>> {
    value(Line::Comment, one_of("#;"))(input)
}

fn interface_header(input: &str) -> IResult<&str, Line<'_>> {
    map_opt(preceded(tag("[["), rest), |inner: &str| {
        inner
            .strip_suffix("]]")
            .filter(|label| !label.is_empty())
            .map(Line::InterfaceHeader)
    })(input)
}

fn is_writable_section_name(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && !(name.starts_with('[') && name.ends_with(']'))
}

fn section_header(input: &str) -> IResult<&str, Line<'_>> {
    map_opt(preceded(char('['), rest), |inner: &str| {
        inner.strip_suffix(']').map(|name| {
            if is_writable_section_name(name) {
                Line::SectionHeader(name)
            } else {
                Line::MalformedHeader
            }
        })
    })(input)
}

fn entry(input: &str) -> IResult<&str, Line<'_>> {
    map(
        separated_pair(take_until("="), char('='), rest),
        |(key, value): (&str, &str)| Line::Entry {
            key: key.trim(),
            value: value.trim(),
        },
    )(input)
}

/// Classifies one raw line of configuration text.
pub fn classify_line(raw: &str) -> Line<'_> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    alt((comment, interface_header, section_header, entry))(trimmed)
        .map(|(_, line)| line)
        .unwrap_or(Line::Unrecognized)
}

fn normalize_section_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Parses configuration text into a [`ConfigState`].
///
/// The reserved sections are always present in the result, appended after
/// the sections found in the text when missing.
///
/// ```
/// use rnsconf_core::parser::parse;
///
/// let state = parse("[interfaces]\n[[alpha]]\ntype = TCPClientInterface\ninterface_enabled = no\n");
/// assert_eq!(state.interfaces[0].name, "alpha");
/// assert!(!state.interfaces[0].enabled);
/// ```
#[tracing::instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn parse(text: &str) -> ConfigState {
    let mut state = ConfigState {
        sections: Default::default(),
        section_order: Vec::new(),
        interfaces: Vec::new(),
    };
    let mut current_section: Option<String> = None;
    let mut current_interface: Option<usize> = None;

    for (number, raw) in text.lines().enumerate() {
        let in_interfaces = current_section.as_deref() == Some(INTERFACES_SECTION);
        match classify_line(raw) {
            Line::Blank | Line::Comment => {}
            Line::InterfaceHeader(label) => {
                if !in_interfaces {
                    trace!(line = number + 1, "interface header outside [interfaces] ignored");
                    continue;
                }
                state
                    .interfaces
                    .push(InterfaceRecord::new(label.trim(), ""));
                current_interface = Some(state.interfaces.len() - 1);
            }
            Line::SectionHeader(name) => {
                let name = normalize_section_name(name);
                state.push_section(&name);
                current_section = Some(name);
                current_interface = None;
            }
            Line::MalformedHeader => {
                trace!(line = number + 1, "malformed section header closes the section");
                current_section = None;
                current_interface = None;
            }
            Line::Entry { key, value } => {
                if key.is_empty() {
                    trace!(line = number + 1, "entry without key dropped");
                    continue;
                }
                if let Some(index) = current_interface {
                    apply_interface_entry(&mut state.interfaces[index], key, value);
                } else if let Some(section) = &current_section {
                    state
                        .sections
                        .entry(section.clone())
                        .or_default()
                        .push(KeyValue::new(key, value));
                } else {
                    trace!(line = number + 1, "entry before first section dropped");
                }
            }
            Line::Unrecognized => {
                trace!(line = number + 1, "unrecognized line dropped");
            }
        }
    }

    state.ensure_reserved_sections();
    debug!(
        sections = state.section_order.len(),
        interfaces = state.interfaces.len(),
        "parsed config"
    );
    state
}

fn apply_interface_entry(iface: &mut InterfaceRecord, key: &str, value: &str) {
    let lower = key.to_ascii_lowercase();
    if lower == TYPE_KEY {
        iface.interface_type = value.to_string();
    } else if let Ok(style) = lower.parse::<InterfaceEnableKeyStyle>() {
        iface.enabled = parse_bool(Some(value), true);
        iface.enable_key_style = style;
    } else {
        set_entry_value(&mut iface.settings, key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LOGGING_SECTION, ROOT_SECTION};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_line_shapes() {
        let cases = [
            ("", Line::Blank),
            ("   ", Line::Blank),
            ("# note", Line::Comment),
            ("  ; note", Line::Comment),
            ("[[ Alpha ]]", Line::InterfaceHeader(" Alpha ")),
            ("[Reticulum]", Line::SectionHeader("Reticulum")),
            (
                "target_host = 10.0.0.1",
                Line::Entry {
                    key: "target_host",
                    value: "10.0.0.1",
                },
            ),
            (
                "command = cat /dev/x = y",
                Line::Entry {
                    key: "command",
                    value: "cat /dev/x = y",
                },
            ),
            ("[]", Line::MalformedHeader),
            ("[  ]", Line::MalformedHeader),
            ("[ [gw] ]", Line::MalformedHeader),
            ("[[gw]", Line::SectionHeader("[gw")),
            ("just words", Line::Unrecognized),
        ];
        for (input, expected) in cases {
            assert_eq!(classify_line(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_sections_and_order() {
        let state = parse(
            "[Logging]\nloglevel = 4\n\n[reticulum]\nshare_instance = Yes\n[logging]\nextra = 1\n",
        );
        assert_eq!(
            state.section_order,
            vec![LOGGING_SECTION, ROOT_SECTION, INTERFACES_SECTION]
        );
        assert_eq!(
            state.section(LOGGING_SECTION),
            &[KeyValue::new("loglevel", "4"), KeyValue::new("extra", "1")]
        );
        assert_eq!(state.global_value("share_instance"), Some("Yes"));
    }

    #[test]
    fn test_parse_interface_blocks() {
        let state = parse(
            "[interfaces]\nglobal_flag = on\n[[alpha]]\nTYPE = TCPClientInterface\nenabled = no\ntarget_host = a\n\n[[bravo]]\ninterface_enabled = yes\n",
        );
        assert_eq!(
            state.section(INTERFACES_SECTION),
            &[KeyValue::new("global_flag", "on")]
        );
        assert_eq!(state.interfaces.len(), 2);

        let alpha = &state.interfaces[0];
        assert_eq!(alpha.name, "alpha");
        assert_eq!(alpha.interface_type, "TCPClientInterface");
        assert!(!alpha.enabled);
        assert_eq!(alpha.enable_key_style, InterfaceEnableKeyStyle::Enabled);
        assert_eq!(alpha.settings, vec![KeyValue::new("target_host", "a")]);

        let bravo = &state.interfaces[1];
        assert_eq!(bravo.interface_type, "");
        assert!(bravo.enabled);
        assert_eq!(
            bravo.enable_key_style,
            InterfaceEnableKeyStyle::InterfaceEnabled
        );
    }

    #[test]
    fn test_duplicate_interface_keys_keep_first_position() {
        let state = parse("[interfaces]\n[[a]]\nport = 1\nspeed = 9600\nPORT = 2\n");
        assert_eq!(
            state.interfaces[0].settings,
            vec![KeyValue::new("port", "2"), KeyValue::new("speed", "9600")]
        );
    }

    #[test]
    fn test_section_header_leaves_interface_block() {
        let state = parse("[interfaces]\n[[a]]\nport = 1\n[reticulum]\nport = 2\n");
        assert_eq!(state.interfaces[0].settings.len(), 1);
        assert_eq!(state.global_value("port"), Some("2"));
    }

    #[test]
    fn test_out_of_context_lines_are_dropped() {
        let state = parse("orphan = 1\n[[stray]]\n[reticulum]\n[[also_stray]]\nkey = v\nnoise\n");
        assert!(state.interfaces.is_empty());
        assert_eq!(state.section(ROOT_SECTION), &[KeyValue::new("key", "v")]);
        assert_eq!(state.section_order.len(), 3);

        let state = parse("[ [gw] ]\nkey = v\n[logging]\nloglevel = 4\n");
        assert_eq!(
            state.section_order,
            vec![LOGGING_SECTION, ROOT_SECTION, INTERFACES_SECTION]
        );
        assert!(state.section(ROOT_SECTION).is_empty());
        assert_eq!(state.section(LOGGING_SECTION), &[KeyValue::new("loglevel", "4")]);
    }

    #[test]
    fn test_malformed_header_closes_section() {
        let state = parse("[reticulum]\nshare_instance = yes\n[  ]\nbogus = 1\n");
        assert_eq!(
            state.section(ROOT_SECTION),
            &[KeyValue::new("share_instance", "yes")]
        );

        let state = parse("[interfaces]\n[[a]]\nport = 1\n[ [b] ]\nspeed = 2\n[[c]]\n");
        assert_eq!(state.interfaces.len(), 1);
        assert_eq!(state.interfaces[0].settings, vec![KeyValue::new("port", "1")]);
    }

    #[test]
    fn test_bracketed_section_name_round_trips() {
        let state = parse("[ [gw] ]\nkey = v\n[gw]]\nother = w\n");
        let text = crate::serializer::serialize(&state);
        let reparsed = parse(&text);
        assert!(reparsed.content_eq(&state));
        assert_eq!(crate::serializer::serialize(&reparsed), text);
    }

    #[test]
    fn test_permissive_inputs_never_fail() {
        for input in ["", "# only\n; comments\n", "[[label]]", "=\n[\n]]\n"] {
            let state = parse(input);
            assert!(state.interfaces.is_empty());
            assert_eq!(state.section_order.len(), 3);
        }
    }

    #[test]
    fn test_crlf_input() {
        let state = parse("[interfaces]\r\n[[a]]\r\ntype = UDPInterface\r\n");
        assert_eq!(state.interfaces[0].interface_type, "UDPInterface");
    }
}
