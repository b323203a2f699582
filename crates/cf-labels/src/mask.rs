//! Boolean occupancy masks over a volume.
//!
//! A [`VoxelMask`] marks which voxels of a volume belong to one category.
//! Masks are transient: they are derived from a volume on demand and never
//! stored alongside it.
//!
//! # Example
//!
//! ```
//! use cf_labels::{Connectivity, VoxelCoord, VoxelMask};
//! use ndarray::Array3;
//!
//! let mut data = Array3::from_elem((3, 3, 3), false);
//! data[[1, 1, 1]] = true;
//! let mask = VoxelMask::from_array(data);
//!
//! let grown = mask.dilate(Connectivity::Vertex);
//! assert_eq!(grown.count(), 27);
//!
//! let grown = mask.dilate(Connectivity::Face);
//! assert_eq!(grown.count(), 7);
//! assert!(!grown.get(VoxelCoord::new(0, 0, 0)));
//! ```

use std::ops::Range;

use ndarray::{Array3, ArrayView3, Zip, s};

use crate::connectivity::Connectivity;
use crate::grid::GridBounds;
use crate::voxel::VoxelCoord;

/// A boolean volume marking the voxels of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelMask {
    data: Array3<bool>,
}

impl VoxelMask {
    /// Wraps a boolean array as a mask.
    #[must_use]
    pub const fn from_array(data: Array3<bool>) -> Self {
        Self { data }
    }

    /// Builds the mask of every position in `codes` equal to `code`.
    pub(crate) fn of_code<T, C>(codes: ArrayView3<'_, T>, code: C) -> Self
    where
        T: Copy + Into<C>,
        C: Copy + PartialEq,
    {
        Self {
            data: codes.mapv(|c| c.into() == code),
        }
    }

    /// Returns the mask shape.
    #[must_use]
    pub fn shape(&self) -> [usize; 3] {
        let (x, y, z) = self.data.dim();
        [x, y, z]
    }

    /// Returns a read-only view of the mask.
    #[must_use]
    pub fn as_array(&self) -> ArrayView3<'_, bool> {
        self.data.view()
    }

    /// Consumes the mask, returning the boolean array.
    #[must_use]
    pub fn into_array(self) -> Array3<bool> {
        self.data
    }

    /// Returns whether the voxel at `coord` is set. Out-of-bounds voxels are unset.
    #[must_use]
    pub fn get(&self, coord: VoxelCoord) -> bool {
        self.data.get(coord.as_array()).copied().unwrap_or(false)
    }

    /// Number of set voxels.
    #[must_use]
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&set| set).count()
    }

    /// Returns `true` if at least one voxel is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.data.iter().any(|&set| set)
    }

    /// Iterates over the coordinates of set voxels in memory order.
    pub fn coords(&self) -> impl Iterator<Item = VoxelCoord> + '_ {
        self.data
            .indexed_iter()
            .filter(|&(_, &set)| set)
            .map(|((x, y, z), _)| VoxelCoord::new(x, y, z))
    }

    /// Tight bounding box of the set voxels, or `None` for an empty mask.
    #[must_use]
    pub fn bounds(&self) -> Option<GridBounds> {
        self.coords().fold(None, |bounds, coord| match bounds {
            None => Some(GridBounds::from_point(coord)),
            Some(mut b) => {
                b.expand_to_include(coord);
                Some(b)
            }
        })
    }

    /// Dilates the mask by one step.
    ///
    /// A voxel is set in the result if it, or any of its neighbors under
    /// `connectivity`, is set in `self`. Voxels outside the volume are never
    /// consulted and nothing wraps around the edges.
    #[must_use]
    pub fn dilate(&self, connectivity: Connectivity) -> Self {
        let shape = self.shape();
        let mut dilated = self.data.clone();

        for offset in connectivity.offsets() {
            let (Some(x), Some(y), Some(z)) = (
                shifted(shape[0], offset[0]),
                shifted(shape[1], offset[1]),
                shifted(shape[2], offset[2]),
            ) else {
                continue;
            };

            Zip::from(dilated.slice_mut(s![x.dst(), y.dst(), z.dst()]))
                .and(self.data.slice(s![x.src(), y.src(), z.src()]))
                .for_each(|out, &set| *out |= set);
        }

        Self { data: dilated }
    }

    /// Returns `true` if some voxel is set in both masks.
    ///
    /// Masks of different shapes never intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.data.dim() == other.data.dim()
            && !Zip::from(&self.data)
                .and(&other.data)
                .all(|&a, &b| !(a && b))
    }
}

/// Source and destination ranges along one axis for a shift by one step.
#[derive(Debug, Clone, Copy)]
struct Shift {
    src: usize,
    dst: usize,
    span: usize,
}

impl Shift {
    const fn src(self) -> Range<usize> {
        self.src..self.src + self.span
    }

    const fn dst(self) -> Range<usize> {
        self.dst..self.dst + self.span
    }
}

/// Ranges that move voxel `i` to `i + delta` along an axis of `len` voxels.
///
/// Returns `None` when nothing survives the shift.
fn shifted(len: usize, delta: isize) -> Option<Shift> {
    let span = len.checked_sub(delta.unsigned_abs()).filter(|&s| s > 0)?;
    let (src, dst) = match delta {
        d if d > 0 => (0, len - span),
        d if d < 0 => (len - span, 0),
        _ => (0, 0),
    };
    Some(Shift { src, dst, span })
}
