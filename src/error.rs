//! Error types for city layout generation

use std::fmt;

/// Errors that can occur during configuration or grammar construction
///
/// Nothing inside the generation pipeline itself is fatal: degenerate
/// blocks become parks, exhausted merge pools stop early, and unknown
/// grammar symbols pass through as terminals. Errors only arise from
/// invalid configuration values and malformed production rules.
#[derive(Debug, Clone)]
pub enum CityError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// A production rule line could not be parsed
    InvalidProduction {
        /// The offending line, whitespace already stripped
        line: String,
        /// Why the line was rejected
        reason: String,
    },
}

impl fmt::Display for CityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            CityError::InvalidProduction { line, reason } => {
                write!(f, "invalid production {:?}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for CityError {}

/// Result type alias for city generation operations
pub type Result<T> = std::result::Result<T, CityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CityError::InvalidConfig("street width must be >= 0".to_string());
        assert!(err.to_string().contains("invalid configuration"));

        let err = CityError::InvalidProduction {
            line: "ABBC".to_string(),
            reason: "missing '->'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ABBC"));
        assert!(msg.contains("missing '->'"));
    }
}
