//! Versioned JSON interchange for device netlists.
//!
//! The on-disk format exists in two dialects selected by the top-level
//! `version` field: 1.0/1.1 ([`v1`]) and 1.2 ([`v1_2`]). Both map to the
//! same in-memory [`Device`]; each dialect is a pure `document ↔ Device`
//! translation with no state of its own.
//!
//! Missing optional sections (`sinks`, `paths`, `features`, valve maps) are
//! tolerated with a warning and an empty default; missing required fields
//! are fatal parse errors.

pub mod v1;
pub mod v1_2;

use std::fmt::Display;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::device::Device;
use crate::error::NetlistError;

/// Interchange dialect selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// Version 1.0, with valve info as `valveMap`/`valveTypeMap` dictionaries.
    V1,
    /// Version 1.1, structurally identical to 1.0.
    V1_1,
    /// Version 1.2, which adds `features[]`, `valves[]` and connection `entity`.
    V1_2,
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Version::V1 => write!(f, "1.0"),
            Version::V1_1 => write!(f, "1.1"),
            Version::V1_2 => write!(f, "1.2"),
        }
    }
}

impl FromStr for Version {
    type Err = InterchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "1.0" => Ok(Version::V1),
            "1.1" => Ok(Version::V1_1),
            "1.2" => Ok(Version::V1_2),
            other => Err(InterchangeError::UnsupportedVersion(other.to_string())),
        }
    }
}

/// Errors raised while reading or writing interchange documents.
#[derive(Error, Debug)]
pub enum InterchangeError {
    /// The text is not valid JSON, or required fields are missing/mistyped.
    #[error("malformed interchange document: {0}")]
    Json(#[from] serde_json::Error),

    /// The `version` field names a dialect this crate does not speak.
    #[error("unsupported interchange version {0:?}")]
    UnsupportedVersion(String),

    /// The document structure is invalid beyond what serde reports.
    #[error("malformed interchange document: {0}")]
    Malformed(String),

    /// The document parsed but violates device referential integrity.
    #[error(transparent)]
    Netlist(#[from] NetlistError),
}

/// Reads the `version` field, which historically appears both as a JSON
/// number (`1`, `1.2`) and as a string (`"1.0"`, `"1.2"`).
pub fn detect_version(doc: &Value) -> Result<Version, InterchangeError> {
    let version = doc
        .get("version")
        .ok_or_else(|| InterchangeError::Malformed("missing top-level \"version\"".to_string()))?;
    match version {
        Value::String(s) => s.parse(),
        Value::Number(n) => {
            if n.as_i64() == Some(1) {
                Ok(Version::V1)
            } else if n.as_f64() == Some(1.1) {
                Ok(Version::V1_1)
            } else if n.as_f64() == Some(1.2) {
                Ok(Version::V1_2)
            } else {
                Err(InterchangeError::UnsupportedVersion(n.to_string()))
            }
        }
        other => Err(InterchangeError::UnsupportedVersion(other.to_string())),
    }
}

/// Parses an interchange document from JSON text, dispatching on `version`.
///
/// # Errors
/// [`InterchangeError`] on invalid JSON, unsupported versions, missing
/// required fields, or referential-integrity violations.
pub fn from_str(text: &str) -> Result<Device, InterchangeError> {
    let doc: Value = serde_json::from_str(text)?;
    from_value(&doc)
}

/// Parses an already-decoded interchange document.
///
/// # Errors
/// See [`from_str`].
pub fn from_value(doc: &Value) -> Result<Device, InterchangeError> {
    match detect_version(doc)? {
        Version::V1 | Version::V1_1 => v1::device_from_value(doc),
        Version::V1_2 => v1_2::device_from_value(doc),
    }
}

/// Serializes a device into the requested dialect.
///
/// # Errors
/// [`InterchangeError::Json`] if value conversion fails.
pub fn to_value(device: &Device, version: Version) -> Result<Value, InterchangeError> {
    match version {
        Version::V1 | Version::V1_1 => v1::device_to_value(device),
        Version::V1_2 => v1_2::device_to_value(device),
    }
}

/// Serializes a device into pretty-printed JSON text.
///
/// # Errors
/// See [`to_value`].
pub fn to_string_pretty(device: &Device, version: Version) -> Result<String, InterchangeError> {
    let value = to_value(device, version)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
