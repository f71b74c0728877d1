use thiserror::Error;

// -----------------------------------------------------------------------------
// ValueError

/// A [`Value`](crate::value::Value) could not be converted into a Rust type.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValueError {
    #[error("expected {expected} value, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("integer {value} is out of range for `{target}`")]
    OutOfRange { value: i64, target: &'static str },

    #[error("expected resource `{expected}`, found `{found}`")]
    ResourceMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
