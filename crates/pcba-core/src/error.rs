//! Error types for pcba-core.

use thiserror::Error;

/// Result type alias using pcba-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for sequence operations.
///
/// Every variant is an input-validation failure: deterministic given the
/// same input and state, recoverable, and raised before any mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Position {0} is out of range. Valid positions: 0-4")]
    SlotOutOfRange(usize),

    #[error("Unknown block type '{0}'")]
    UnknownBlockType(String),

    #[error("Invalid sub-parameter '{value}' for block type '{block}'. Valid options: {allowed:?}")]
    InvalidSubParam {
        value: String,
        block: &'static str,
        allowed: &'static [&'static str],
    },

    #[error("Invalid pattern number {0}. Must be between 1 and {1}")]
    InvalidRecipeNumber(usize, usize),

    #[error("Cannot execute invalid sequence")]
    InvalidSequence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = Error::SlotOutOfRange(7);
        assert!(err.to_string().contains('7'));

        let err = Error::UnknownBlockType("Reflow".to_string());
        assert!(err.to_string().contains("Reflow"));

        let err = Error::InvalidSubParam {
            value: "300C".to_string(),
            block: "Soldering",
            allowed: &["235C", "245C", "260C"],
        };
        let msg = err.to_string();
        assert!(msg.contains("300C"));
        assert!(msg.contains("Soldering"));
        assert!(msg.contains("245C"));

        let err = Error::InvalidRecipeNumber(10, 9);
        assert!(err.to_string().contains("between 1 and 9"));
    }
}
