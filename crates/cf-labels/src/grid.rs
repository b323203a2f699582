//! Axis-aligned bounds in voxel index space.

use crate::voxel::VoxelCoord;

/// Inclusive axis-aligned box of voxel indices.
///
/// # Example
///
/// ```
/// use cf_labels::{GridBounds, VoxelCoord};
///
/// let mut bounds = GridBounds::from_point(VoxelCoord::new(0, 0, 0));
/// bounds.expand_to_include(VoxelCoord::new(2, 2, 2));
///
/// let far = GridBounds::from_point(VoxelCoord::new(3, 1, 1));
/// assert!(!bounds.overlaps(&far));
/// assert!(bounds.grown(1, [4, 4, 4]).overlaps(&far));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    /// Minimum corner (inclusive).
    pub min: VoxelCoord,
    /// Maximum corner (inclusive).
    pub max: VoxelCoord,
}

impl GridBounds {
    /// Creates bounds containing a single voxel.
    #[must_use]
    pub const fn from_point(coord: VoxelCoord) -> Self {
        Self {
            min: coord,
            max: coord,
        }
    }

    /// Expands the bounds to include a coordinate.
    pub fn expand_to_include(&mut self, coord: VoxelCoord) {
        self.min = VoxelCoord::new(
            self.min.x.min(coord.x),
            self.min.y.min(coord.y),
            self.min.z.min(coord.z),
        );
        self.max = VoxelCoord::new(
            self.max.x.max(coord.x),
            self.max.y.max(coord.y),
            self.max.z.max(coord.z),
        );
    }

    /// Grows the bounds by `margin` voxels on every side, clamped to a volume of `shape`.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_labels::{GridBounds, VoxelCoord};
    ///
    /// let bounds = GridBounds::from_point(VoxelCoord::new(0, 4, 9));
    /// let grown = bounds.grown(1, [10, 10, 10]);
    /// assert_eq!(grown.min, VoxelCoord::new(0, 3, 8));
    /// assert_eq!(grown.max, VoxelCoord::new(1, 5, 9));
    /// ```
    #[must_use]
    pub fn grown(&self, margin: usize, shape: [usize; 3]) -> Self {
        let hi = |v: usize, len: usize| v.saturating_add(margin).min(len.saturating_sub(1));
        Self {
            min: VoxelCoord::new(
                self.min.x.saturating_sub(margin),
                self.min.y.saturating_sub(margin),
                self.min.z.saturating_sub(margin),
            ),
            max: VoxelCoord::new(
                hi(self.max.x, shape[0]),
                hi(self.max.y, shape[1]),
                hi(self.max.z, shape[2]),
            ),
        }
    }

    /// Returns the intersection of two bounds, or `None` if they don't overlap.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = VoxelCoord::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = VoxelCoord::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );

        if min.x <= max.x && min.y <= max.y && min.z <= max.z {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Returns whether this bounds overlaps with another.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }
}
