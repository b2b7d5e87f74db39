//! Error types for the composition engine.
//!
//! Composition-level failures (a rejected push, an invalid jamo) are not
//! errors at all: they surface as `false`/`0` and the engine keeps going.
//! `HangulError` covers the cases a caller may want to act on.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HangulError {
    /// Code point outside every conjoinable range.
    InvalidJamo(u32),
    /// Buffer reached its configured depth.
    BufferOverflow { max: usize },
    /// An internal invariant no longer holds.
    InconsistentState(String),
    /// No keyboard registered under this identifier.
    KeyboardNotFound(String),
    /// A configuration value is out of range.
    InvalidConfiguration(String),
    /// A keyboard layout file could not be parsed.
    Layout(String),
}

impl fmt::Display for HangulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HangulError::InvalidJamo(c) => write!(f, "invalid jamo code point U+{:04X}", c),
            HangulError::BufferOverflow { max } => {
                write!(f, "composition buffer exceeded {} jamo", max)
            }
            HangulError::InconsistentState(msg) => write!(f, "inconsistent state: {}", msg),
            HangulError::KeyboardNotFound(id) => write!(f, "keyboard '{}' not found", id),
            HangulError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {}", msg),
            HangulError::Layout(msg) => write!(f, "invalid keyboard layout: {}", msg),
        }
    }
}

impl std::error::Error for HangulError {}
