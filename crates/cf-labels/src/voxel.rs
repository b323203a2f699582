//! Voxel coordinate types.

use crate::connectivity::Connectivity;

/// A voxel position inside a volume, as indices along axes 0, 1 and 2.
///
/// Coordinates are unsigned: a volume has no voxels at negative indices.
/// Neighbor queries take the volume shape so they never leave it and never
/// wrap around.
///
/// # Example
///
/// ```
/// use cf_labels::VoxelCoord;
///
/// let coord = VoxelCoord::new(1, 2, 3);
/// assert_eq!(coord.x, 1);
/// assert_eq!(coord.as_array(), [1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    /// Index along axis 0.
    pub x: usize,
    /// Index along axis 1.
    pub y: usize,
    /// Index along axis 2.
    pub z: usize,
}

impl VoxelCoord {
    /// Creates a new voxel coordinate.
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate as an array, usable as an `ndarray` index.
    #[must_use]
    pub const fn as_array(self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    /// Computes the Chebyshev distance to another coordinate.
    ///
    /// Two distinct voxels are 26-neighbors exactly when this distance is 1.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_labels::VoxelCoord;
    ///
    /// let a = VoxelCoord::new(0, 0, 0);
    /// let b = VoxelCoord::new(1, 0, 1);
    /// assert_eq!(a.chebyshev_distance(b), 1);
    /// ```
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> usize {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        let m = if dx > dy { dx } else { dy };
        if m > dz { m } else { dz }
    }

    /// Returns `true` if `other` is a neighbor of this voxel under `connectivity`.
    ///
    /// A voxel is never its own neighbor.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_labels::{Connectivity, VoxelCoord};
    ///
    /// let a = VoxelCoord::new(0, 0, 0);
    /// assert!(a.is_adjacent(VoxelCoord::new(1, 0, 1), Connectivity::Vertex));
    /// assert!(!a.is_adjacent(VoxelCoord::new(1, 0, 1), Connectivity::Face));
    /// assert!(!a.is_adjacent(VoxelCoord::new(2, 0, 0), Connectivity::Vertex));
    /// ```
    #[must_use]
    pub fn is_adjacent(self, other: Self, connectivity: Connectivity) -> bool {
        if self.chebyshev_distance(other) != 1 {
            return false;
        }
        let delta = |a: usize, b: usize| -> isize {
            match b.cmp(&a) {
                std::cmp::Ordering::Less => -1,
                std::cmp::Ordering::Equal => 0,
                std::cmp::Ordering::Greater => 1,
            }
        };
        connectivity.admits([
            delta(self.x, other.x),
            delta(self.y, other.y),
            delta(self.z, other.z),
        ])
    }

    /// Moves by `offset`, returning `None` if the result leaves a volume of `shape`.
    fn offset(self, offset: [isize; 3], shape: [usize; 3]) -> Option<Self> {
        let step = |v: usize, d: isize, len: usize| v.checked_add_signed(d).filter(|&n| n < len);
        Some(Self::new(
            step(self.x, offset[0], shape[0])?,
            step(self.y, offset[1], shape[1])?,
            step(self.z, offset[2], shape[2])?,
        ))
    }

    /// Iterates over the in-bounds neighbors of this voxel in a volume of `shape`.
    ///
    /// Edge and corner voxels have fewer neighbors; positions outside the
    /// volume are skipped rather than wrapped.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_labels::{Connectivity, VoxelCoord};
    ///
    /// let shape = [3, 3, 3];
    /// assert_eq!(VoxelCoord::new(1, 1, 1).neighbors(Connectivity::Vertex, shape).count(), 26);
    /// assert_eq!(VoxelCoord::new(0, 0, 0).neighbors(Connectivity::Vertex, shape).count(), 7);
    /// ```
    pub fn neighbors(
        self,
        connectivity: Connectivity,
        shape: [usize; 3],
    ) -> impl Iterator<Item = Self> {
        connectivity
            .offsets()
            .filter_map(move |offset| self.offset(offset, shape))
    }
}

impl From<(usize, usize, usize)> for VoxelCoord {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[usize; 3]> for VoxelCoord {
    fn from([x, y, z]: [usize; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<VoxelCoord> for [usize; 3] {
    fn from(coord: VoxelCoord) -> Self {
        coord.as_array()
    }
}
