use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The buffered row cap cannot be zero.
    #[error("`max_buffered_rows` cannot be zero, omit it to buffer without a cap")]
    MaxBufferedRowsZero,
}
