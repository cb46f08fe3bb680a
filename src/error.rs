//! Error types for rxscan.
//!
//! Mirrors the error kinds of the scanning model one-to-one: a pattern that
//! failed to compile, a stream that failed mid-read, an engine-internal
//! failure distinct from "no match", and a capture that couldn't be
//! converted into its destination's type. `no-match` and `callout-abort`
//! are not errors — they're encoded in `ScanOutcome` instead. `Config` is
//! an ambient addition (SPEC_FULL.md's config surface, not spec.md's error
//! kinds) for a `ScanConfig` file that fails to parse.

use std::fmt;

/// Everything that can go wrong while compiling a pattern or running a scan.
#[derive(Debug)]
pub enum ScanError {
    /// Pattern compilation failed.
    Pattern {
        message: String,
        position: Option<usize>,
    },

    /// The underlying stream reported an I/O failure.
    Stream(std::io::Error),

    /// The regex engine reported an internal error distinct from
    /// `NoMatch`/`Partial`.
    Engine(String),

    /// A capture could not be parsed into its destination's type.
    Conversion { index: usize, message: String },

    /// A `ScanConfig` file failed to parse as YAML.
    Config(String),
}

impl ScanError {
    pub fn pattern(message: impl Into<String>) -> Self {
        ScanError::Pattern {
            message: message.into(),
            position: None,
        }
    }

    pub fn pattern_at(message: impl Into<String>, position: usize) -> Self {
        ScanError::Pattern {
            message: message.into(),
            position: Some(position),
        }
    }

    pub fn conversion(index: usize, message: impl Into<String>) -> Self {
        ScanError::Conversion {
            index,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ScanError::Config(message.into())
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Pattern { message, position } => match position {
                Some(pos) => write!(f, "pattern error at byte {}: {}", pos, message),
                None => write!(f, "pattern error: {}", message),
            },
            ScanError::Stream(e) => write!(f, "stream error: {}", e),
            ScanError::Engine(message) => write!(f, "engine error: {}", message),
            ScanError::Conversion { index, message } => {
                write!(f, "conversion error at capture {}: {}", index, message)
            }
            ScanError::Config(message) => write!(f, "config error: {}", message),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Stream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScanError {
    fn from(e: std::io::Error) -> Self {
        ScanError::Stream(e)
    }
}

impl From<regex::Error> for ScanError {
    fn from(e: regex::Error) -> Self {
        ScanError::pattern(e.to_string())
    }
}

/// A single failed conversion, reported without abandoning the whole crate's
/// error type — `CaptureBinder` needs to know *which* destination failed and
/// with what message so it can wrap it as `ScanError::Conversion`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError(pub String);

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ConversionError {
    pub fn empty() -> Self {
        ConversionError("empty digit sequence".to_string())
    }

    pub fn overflow() -> Self {
        ConversionError("value out of range".to_string())
    }

    pub fn invalid(what: &str) -> Self {
        ConversionError(format!("invalid {}", what))
    }
}
