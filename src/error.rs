//! Crate-level error types.

use std::fmt;

use crate::molecule::ParseError;

/// Errors produced by the stereomol crate.
#[derive(Debug)]
pub enum StereomolError {
    /// Failed to parse a molecule file.
    Parse(ParseError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options or element table parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for StereomolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "molecule parse error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for StereomolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<ParseError> for StereomolError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<std::io::Error> for StereomolError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
