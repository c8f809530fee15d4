//! Validated identifiers for tables, columns, and indexes.
//!
//! SQL placeholders can bind values but never table or column names, so any
//! dynamically supplied name has to be interpolated into statement text. The
//! [`Identifier`] type is the sole gate for that interpolation: a name that
//! does not match `[A-Za-z_][A-Za-z0-9_]*` (or exceeds the length bound) is
//! rejected at construction, before any SQL exists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SondeError};

/// Maximum accepted identifier length in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 128;

/// A table, column, or index name that is safe to interpolate into SQL text.
///
/// Invariants: non-empty, at most [`MAX_IDENTIFIER_LEN`] bytes, first
/// character in `[A-Za-z_]`, remaining characters in `[A-Za-z0-9_]`. Invalid
/// names are rejected, never silently altered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validates a name and wraps it as an identifier.
    ///
    /// # Errors
    ///
    /// Returns `SondeError::InvalidIdentifier` when the name is empty, too
    /// long, begins with a digit, or contains a character outside
    /// `[A-Za-z0-9_]`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        match Self::check(&name) {
            None => Ok(Self(name)),
            Some(reason) => Err(SondeError::invalid_identifier(name, reason)),
        }
    }

    /// Returns the rejection reason for an invalid name, or `None` if valid.
    fn check(name: &str) -> Option<String> {
        if name.is_empty() {
            return Some("identifier must not be empty".to_string());
        }
        if name.len() > MAX_IDENTIFIER_LEN {
            return Some(format!(
                "identifier exceeds {MAX_IDENTIFIER_LEN} bytes ({} bytes)",
                name.len()
            ));
        }
        let first = name.as_bytes()[0];
        if first.is_ascii_digit() {
            return Some("identifier must not begin with a digit".to_string());
        }
        for (position, byte) in name.bytes().enumerate() {
            if !(byte.is_ascii_alphanumeric() || byte == b'_') {
                return Some(format!(
                    "invalid character {:?} at byte {position}",
                    char::from(byte)
                ));
            }
        }
        None
    }

    /// Returns the validated name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the double-quoted SQL form of the identifier.
    ///
    /// Validated names contain no quote characters, so quoting needs no
    /// escaping; it exists so that names colliding with SQL keywords still
    /// parse as identifiers.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identifier {
    type Err = SondeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = SondeError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = SondeError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
