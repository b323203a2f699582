//! Parameters for category adjacency checks.

use crate::connectivity::Connectivity;

/// Parameters for category adjacency checks.
///
/// # Example
///
/// ```
/// use cf_labels::{AdjacencyParams, Connectivity};
///
/// // Default: any face, edge or corner contact counts
/// let params = AdjacencyParams::default();
/// assert_eq!(params.connectivity, Connectivity::Vertex);
///
/// // Only shared faces count
/// let strict = AdjacencyParams::face_contact();
/// assert_eq!(strict.connectivity, Connectivity::Face);
///
/// // Builder style
/// let custom = AdjacencyParams::default()
///     .connectivity(Connectivity::Edge)
///     .bounds_check(false);
/// assert!(!custom.bounds_check);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdjacencyParams {
    /// Neighborhood used to dilate the first category.
    pub connectivity: Connectivity,

    /// Reject early when the two categories' bounding boxes are too far apart.
    /// Never changes the answer, only skips the dilation.
    pub bounds_check: bool,
}

impl Default for AdjacencyParams {
    fn default() -> Self {
        Self::touching()
    }
}

impl AdjacencyParams {
    /// Any face, edge or corner contact (26-connectivity).
    #[must_use]
    pub const fn touching() -> Self {
        Self {
            connectivity: Connectivity::Vertex,
            bounds_check: true,
        }
    }

    /// Only shared faces count as contact (6-connectivity).
    #[must_use]
    pub const fn face_contact() -> Self {
        Self {
            connectivity: Connectivity::Face,
            bounds_check: true,
        }
    }

    /// Set the neighborhood rule.
    #[must_use]
    pub const fn connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Enable or disable the bounding-box rejection.
    #[must_use]
    pub const fn bounds_check(mut self, enabled: bool) -> Self {
        self.bounds_check = enabled;
        self
    }
}
