//! Error types for reactive bindings

use thiserror::Error;

/// Errors surfaced by binding and by writes to bound fields.
///
/// Every failure is all-or-nothing: a failed bind installs nothing, and a
/// rejected reassignment leaves the previous value, sequence, and wrapper
/// untouched.
#[derive(Error, Debug)]
pub enum BindError {
    /// The field did not exist on the store at bind time.
    #[error("the field [{field}] doesn't exist on [{store}]; couldn't make it reactive")]
    MissingField { field: String, store: String },

    /// The field is already under an active binding.
    #[error("the field [{field}] is already bound")]
    AlreadyBound { field: String },

    /// A bound sequence field was reassigned to a non-sequence value.
    #[error("value of [{field}] should be a sequence")]
    NotASequence { field: String },
}

/// Result type for binding operations
pub type Result<T> = std::result::Result<T, BindError>;
