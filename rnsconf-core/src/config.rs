//! # File Helpers
//!
//! Thin I/O wrappers around the pure parse/serialize operations, plus JSON
//! loading for documents such as the runtime capability descriptor.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, InternalResult};
use crate::model::ConfigState;
use crate::parser::parse;
use crate::schema::InterfaceCapabilities;
use crate::serializer::serialize;

/// Reads and parses a configuration file.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_config_file<P: AsRef<Path>>(path: P) -> InternalResult<ConfigState> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        Error::internal(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    Ok(parse(&text))
}

/// Serializes `state` and writes it to `path`, replacing any existing file.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn write_config_file<P: AsRef<Path>>(path: P, state: &ConfigState) -> InternalResult<()> {
    let text = serialize(state);
    fs::write(path.as_ref(), &text)?;
    debug!(bytes = text.len(), "wrote config file");
    Ok(())
}

pub fn from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::internal(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader)
        .map_err(|e| Error::internal(format!("Failed to parse {}: {}", path.display(), e)))?;
    Ok(value)
}

pub fn from_str<T: DeserializeOwned>(s: &str) -> InternalResult<T> {
    Ok(serde_json::from_str(s)?)
}

/// Loads a runtime capability descriptor from a JSON file.
pub fn load_capabilities<P: AsRef<Path>>(path: P) -> InternalResult<InterfaceCapabilities> {
    from_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::INTERFACES_SECTION;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_write_then_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");

        let mut state = ConfigState::new();
        let id = state.add_interface("Uplink", "TCPClientInterface");
        state
            .interface_mut(id)
            .unwrap()
            .set_setting("target_host", "10.0.0.8");
        write_config_file(&path, &state).unwrap();

        let loaded = load_config_file(&path).unwrap();
        assert!(loaded.content_eq(&state));
        assert!(
            fs::read_to_string(&path)
                .unwrap()
                .contains(&format!("[{INTERFACES_SECTION}]"))
        );
    }

    #[test]
    fn test_load_missing_file_is_internal_error() {
        let dir = tempdir().unwrap();
        let err = load_config_file(dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_write_into_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("config");
        let err = write_config_file(path, &ConfigState::new()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_capabilities() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"runtime_active": true, "supported_interface_types": ["UDPInterface"]}}"#
        )
        .unwrap();
        let caps = load_capabilities(file.path()).unwrap();
        assert!(caps.runtime_active);
        assert_eq!(caps.supported_interface_types, vec!["UDPInterface"]);
    }

    #[test]
    fn test_from_str_reports_json_errors() {
        let err = from_str::<InterfaceCapabilities>("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
