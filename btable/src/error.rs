//! Error types for the configuration boundary.
//!
//! Table operations themselves never fail; these errors only surface when
//! parsing configuration values from strings or JSON.

/// Error type for parsing table configuration.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The string does not name a selection mode.
    #[error("Invalid selection mode '{value}': expected none, single, multi or range")]
    InvalidSelectionMode { value: String },

    /// The string does not name a sort direction.
    #[error("Invalid sort direction '{value}': expected asc or desc")]
    InvalidSortDirection { value: String },

    /// The JSON configuration could not be decoded.
    #[error("Invalid table configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl TableError {
    /// Creates a new invalid selection mode error.
    pub fn invalid_selection_mode(value: impl Into<String>) -> Self {
        Self::InvalidSelectionMode {
            value: value.into(),
        }
    }

    /// Creates a new invalid sort direction error.
    pub fn invalid_sort_direction(value: impl Into<String>) -> Self {
        Self::InvalidSortDirection {
            value: value.into(),
        }
    }
}
