//! Error types for INI parsing, lookup and value conversion
//!
//! Lookups and typed reads fail loudly with a typed error. Malformed lines are
//! only surfaced as errors when the parser is configured to abort on them.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for INI operations
#[derive(Debug, Error)]
pub enum IniError {
    /// Requested section does not exist
    #[error("Section '{name}' does not exist")]
    SectionNotFound { name: String },

    /// Requested key does not exist in the section
    #[error("Section does not have a value with the key '{key}'")]
    KeyNotFound { key: String },

    /// Parse target is missing or is not a regular file
    #[error("Invalid file '{}': {reason}", path.display())]
    InvalidFile {
        path: PathBuf,
        reason: InvalidFileReason,
    },

    /// Typed read on a value that cannot represent the requested type
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Malformed line under the abort policy
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom serde deserialization error message
    #[error("{0}")]
    Custom(String),
}

impl IniError {
    /// Returns true for missing sections and missing keys
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            IniError::SectionNotFound { .. } | IniError::KeyNotFound { .. }
        )
    }
}

/// Why a path was rejected before parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidFileReason {
    #[error("file not found")]
    NotFound,
    #[error("not a regular file")]
    NotRegularFile,
}

/// A string that could not be converted to the requested type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' cannot be converted to {target}")]
pub struct ConversionError {
    /// The canonical string that failed to convert
    pub value: String,
    /// Name of the requested type
    pub target: &'static str,
}

impl ConversionError {
    pub fn new(value: &str, target: &'static str) -> Self {
        Self {
            value: value.to_string(),
            target,
        }
    }
}

/// Parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A non-blank line that is neither an entry nor a section header
    #[error("Malformed line {line} ({reason}): '{content}'")]
    MalformedLine {
        line: usize,
        content: String,
        reason: MalformedReason,
    },
}

/// Classification of a malformed line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MalformedReason {
    /// `= value` with nothing before the separator
    EmptyKey,
    /// `key =` with nothing after the separator
    EmptyValue,
    /// `[name` without a closing bracket
    UnterminatedSection,
    /// `[]`
    EmptySectionName,
    /// Neither an entry nor a section header
    Unrecognized,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MalformedReason::EmptyKey => "empty key",
            MalformedReason::EmptyValue => "empty value",
            MalformedReason::UnterminatedSection => "unterminated section header",
            MalformedReason::EmptySectionName => "empty section name",
            MalformedReason::Unrecognized => "unrecognized line",
        };
        f.write_str(text)
    }
}

/// A malformed line recorded under the collect-diagnostic policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Line number (1-based, counting `\r` and `\n` as separate breaks)
    pub line: usize,
    /// The line after comment stripping
    pub content: String,
    /// Why the line was rejected
    pub reason: MalformedReason,
}

impl Diagnostic {
    /// Converts the diagnostic into the error the abort policy returns
    pub fn into_error(self) -> ParseError {
        ParseError::MalformedLine {
            line: self.line,
            content: self.content,
            reason: self.reason,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} '{}'", self.line, self.reason, self.content)
    }
}

impl serde::de::Error for IniError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        IniError::Custom(msg.to_string())
    }
}
