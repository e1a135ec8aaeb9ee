//! Macros for row loading error handling.
//!
//! Provides convenience macros for creating and returning [`crate::error::RowMapError`]
//! instances with reduced boilerplate.

/// Creates a [`crate::error::RowMapError`] from error kind, description and optional detail.
#[macro_export]
macro_rules! rowmap_error {
    ($kind:expr, $desc:expr) => {
        $crate::error::RowMapError::from(($kind, $desc))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        $crate::error::RowMapError::from(($kind, $desc, $detail.to_string()))
    };
}

/// Creates and returns a [`crate::error::RowMapError`] from the current function.
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return Err($crate::rowmap_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return Err($crate::rowmap_error!($kind, $desc, $detail))
    };
}
