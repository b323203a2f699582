//! Error types for labeled volume operations.

use thiserror::Error;

/// Result type alias for labeled volume operations.
pub type LabelResult<T> = Result<T, LabelError>;

/// Errors that can occur while building or querying a labeled volume.
///
/// Every variant is an input validation failure. None of them are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LabelError {
    /// The input array does not have exactly three axes.
    #[error("expected 3D volume, got {ndim}D")]
    InvalidShape {
        /// Number of axes of the rejected array.
        ndim: usize,
    },

    /// At least one spatial axis has length zero.
    #[error("volume cannot be empty (shape {shape:?})")]
    EmptyVolume {
        /// Shape of the rejected array.
        shape: [usize; 3],
    },

    /// The category list is empty or contains duplicate names.
    #[error("invalid categories: {0}")]
    InvalidCategories(String),

    /// The encoded data contains a negative value.
    #[error("data contains negative value {0}")]
    NegativeValue(i64),

    /// The encoded data contains a code with no matching category.
    #[error(
        "data contains value {value} but only {categories} categories provided \
         (valid range: 0-{max})",
        max = .categories.saturating_sub(1)
    )]
    ValueOutOfRange {
        /// The offending value.
        value: i64,
        /// Number of categories in the vocabulary.
        categories: usize,
    },

    /// The requested category name is not part of the vocabulary.
    #[error("category '{name}' not found (available: {available})")]
    UnknownCategory {
        /// The requested name.
        name: String,
        /// Comma-separated list of known names.
        available: String,
    },

    /// A raw volume was passed without the code-to-name mapping it requires.
    #[error("a code-to-category mapping is required for raw volumes")]
    MissingMapping,
}

impl LabelError {
    /// Create an invalid categories error.
    #[must_use]
    pub fn invalid_categories(details: impl Into<String>) -> Self {
        Self::InvalidCategories(details.into())
    }

    /// Create an unknown category error listing the known names.
    #[must_use]
    pub fn unknown_category<S: AsRef<str>>(name: &str, available: &[S]) -> Self {
        let available = available
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ");
        Self::UnknownCategory {
            name: name.to_owned(),
            available,
        }
    }
}
