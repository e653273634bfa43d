//! # Input Errors
//!
//! Every way a user action can be rejected. The `Display` text of each
//! variant is exactly what the status panel shows, so rejections never need
//! a separate formatting step.

use thiserror::Error;

/// A rejected user action. None of these are fatal: the action is aborted and
/// the previous dataset, tokens and animation are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Comma-separated array text contained an empty or non-integer token.
    #[error("Invalid array data. Please enter integers separated by commas.")]
    InvalidArray { token: String },

    /// Random generation size was not a non-negative integer within bounds.
    #[error("Invalid size value. Please enter a valid integer.")]
    InvalidSize { raw: String },

    /// Search target did not parse as an integer.
    #[error("Invalid target value. Please enter a valid integer.")]
    InvalidTarget { raw: String },

    /// Search requested while no data (or zero elements) is loaded.
    #[error("Array is empty. Please input array data.")]
    EmptyDataset,

    /// A previous search has not been applied yet.
    #[error("A search is already in progress.")]
    SearchInProgress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_status_text() {
        assert!(InputError::EmptyDataset
            .to_string()
            .starts_with("Array is empty."));
        assert!(InputError::InvalidTarget { raw: "abc".into() }
            .to_string()
            .starts_with("Invalid target value."));
        assert!(InputError::InvalidSize { raw: "-1".into() }
            .to_string()
            .starts_with("Invalid size value."));
    }

    #[test]
    fn test_offending_input_not_leaked_into_message() {
        let err = InputError::InvalidArray {
            token: "x".to_string(),
        };
        assert!(!err.to_string().contains('x'));
    }
}
