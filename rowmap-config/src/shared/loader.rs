use serde::{Deserialize, Serialize};

use crate::Config;
use crate::shared::ValidationError;

/// How a page whose value count does not end on a row boundary is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialRowPolicy {
    /// Keep the trailing values and complete the row with the next page.
    #[default]
    Carry,
    /// Reject the page as malformed.
    Reject,
}

/// Configuration for accumulating query result pages into rows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Handling of pages that end in the middle of a row.
    #[serde(default)]
    pub partial_rows: PartialRowPolicy,
    /// Maximum number of rows a single accumulator may buffer.
    ///
    /// When unset, every row of the result set is kept in memory.
    #[serde(default)]
    pub max_buffered_rows: Option<usize>,
}

impl LoaderConfig {
    /// Validates loader configuration settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_buffered_rows == Some(0) {
            return Err(ValidationError::MaxBufferedRowsZero);
        }

        Ok(())
    }
}

/// Top level settings file for applications embedding the loader.
///
/// The loader settings live under the `loader` key, so
/// `APP_LOADER__MAX_BUFFERED_ROWS=1000` overrides the row cap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderSettings {
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl Config for LoaderSettings {
    const LIST_PARSE_KEYS: &'static [&'static str] = &[];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_carries_partial_rows_without_cap() {
        let config = LoaderConfig::default();

        assert_eq!(config.partial_rows, PartialRowPolicy::Carry);
        assert_eq!(config.max_buffered_rows, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_row_cap_is_rejected() {
        let config = LoaderConfig {
            max_buffered_rows: Some(0),
            ..LoaderConfig::default()
        };

        assert_eq!(config.validate(), Err(ValidationError::MaxBufferedRowsZero));
    }

    #[test]
    fn positive_row_cap_is_accepted() {
        let config = LoaderConfig {
            max_buffered_rows: Some(1),
            ..LoaderConfig::default()
        };

        assert!(config.validate().is_ok());
    }
}
