//! # rnsconf: Reticulum Gateway Configuration
//!
//! Parses, edits, re-serializes and validates the INI-style configuration of
//! a Reticulum mesh-network gateway: a transport runtime plus a list of named
//! network interfaces declared as `[[name]]` blocks inside `[interfaces]`.
//!
//! ## Pipeline
//!
//! ```text
//! Config Text → Parser → ConfigState ⇄ edits → Serializer → Config Text
//!                              ↓
//!                  Schema Catalog → Validator → ValidationResult
//! ```
//!
//! ### Parser
//!
//! The [`parser`] module turns text into a [`model::ConfigState`]. It never
//! fails: lines it cannot place are dropped.
//!
//! ### Serializer
//!
//! The [`serializer`] module writes a state back with canonical spacing, so
//! serializing a parsed serialization reproduces the same text.
//!
//! ### Schema Catalog
//!
//! The [`schema`] module describes every known interface type's fields and
//! narrows the catalog to what the running gateway reports it supports.
//!
//! ### Validator
//!
//! The [`validation`] module checks a state against the catalog and domain
//! rules, separating errors from non-fatal warnings.
//!
//! ## Supporting Modules
//!
//! - Discovered interface entries ([`entry`])
//! - File and JSON helpers ([`config`])
//! - I/O errors ([`error`])

pub mod config;
pub mod entry;
pub mod error;
pub mod model;
pub mod parser;
pub mod schema;
pub mod serializer;
pub mod validation;

// Re-exports
pub use error::*;
pub use model::{ConfigState, InterfaceEnableKeyStyle, InterfaceId, InterfaceRecord, KeyValue};
pub use parser::parse;
pub use serializer::serialize;
pub use validation::{IssueLevel, ValidationIssue, ValidationResult, validate};
