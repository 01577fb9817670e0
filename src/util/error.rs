// LogMerge - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// The sorter itself is error-free by construction; every error here
// belongs to the collaborator boundary (parsing, input, config, output).

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogMerge operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum MergeError {
    /// A raw token or count could not be parsed.
    Parse(ParseError),

    /// Reading the interactive input failed.
    Input(InputError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Writing results failed.
    Export(ExportError),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Input(e) => write!(f, "Input error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Export(e) => write!(f, "Output error: {e}"),
        }
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Input(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors raised while turning raw text into typed entries or counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A timestamp token is not a valid 64-bit integer.
    InvalidToken {
        source_index: usize,
        /// 1-based position of the token within the source's line.
        position: usize,
        token: String,
    },

    /// A count answer is not a valid number, or is out of its allowed range.
    InvalidCount {
        what: &'static str,
        raw: String,
        reason: String,
    },

    /// Fewer tokens were supplied than the declared entry count.
    CountMismatch {
        source_index: usize,
        declared: usize,
        supplied: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken {
                source_index,
                position,
                token,
            } => write!(
                f,
                "server {source_index}, token {position}: '{token}' is not a valid integer timestamp"
            ),
            Self::InvalidCount { what, raw, reason } => {
                write!(f, "invalid {what} '{raw}': {reason}")
            }
            Self::CountMismatch {
                source_index,
                declared,
                supplied,
            } => write!(
                f,
                "server {source_index}: declared {declared} entries but only {supplied} supplied"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for MergeError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors related to reading the interactive dialogue.
#[derive(Debug)]
pub enum InputError {
    /// Input ended before a required answer was given.
    UnexpectedEof { expected: String },

    /// I/O error on the input or prompt stream.
    Io {
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof { expected } => {
                write!(f, "input ended while waiting for {expected}")
            }
            Self::Io { operation, source } => {
                write!(f, "I/O error during {operation}: {source}")
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<InputError> for MergeError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for MergeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing merged output.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing output.
    Io(io::Error),

    /// CSV serialisation error.
    Csv(csv::Error),

    /// JSON serialisation error.
    Json(serde_json::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(source) => write!(f, "write failed: {source}"),
            Self::Csv(source) => write!(f, "CSV output failed: {source}"),
            Self::Json(source) => write!(f, "JSON output failed: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(source) => Some(source),
            Self::Csv(source) => Some(source),
            Self::Json(source) => Some(source),
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ExportError> for MergeError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for LogMerge results.
pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_wraps_with_context() {
        let err: MergeError = ParseError::InvalidToken {
            source_index: 2,
            position: 3,
            token: "abc".to_string(),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Parse error:"), "got: {msg}");
        assert!(msg.contains("server 2"));
        assert!(msg.contains("'abc'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_input_io_error_preserves_source() {
        let err = InputError::Io {
            operation: "reading answer",
            source: io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("reading answer"));
    }

    #[test]
    fn test_count_mismatch_message() {
        let err = ParseError::CountMismatch {
            source_index: 1,
            declared: 5,
            supplied: 3,
        };
        assert_eq!(
            err.to_string(),
            "server 1: declared 5 entries but only 3 supplied"
        );
    }
}
