//! Neighborhood rules for 3D voxel lattices.

/// Which voxels count as neighbors of a voxel in a 3D lattice.
///
/// Each rule is the set of non-zero offsets in `{-1, 0, 1}^3` whose number of
/// non-zero components does not exceed a limit: 1 for faces, 2 for faces and
/// edges, 3 for faces, edges and corners.
///
/// # Example
///
/// ```
/// use cf_labels::Connectivity;
///
/// assert_eq!(Connectivity::Face.offsets().count(), 6);
/// assert_eq!(Connectivity::Edge.offsets().count(), 18);
/// assert_eq!(Connectivity::Vertex.offsets().count(), 26);
/// assert_eq!(Connectivity::default(), Connectivity::Vertex);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// 6-connectivity: voxels sharing a face.
    Face,
    /// 18-connectivity: voxels sharing a face or an edge.
    Edge,
    /// 26-connectivity: voxels sharing a face, an edge or a corner.
    #[default]
    Vertex,
}

impl Connectivity {
    /// Number of neighbors an interior voxel has under this rule.
    #[must_use]
    pub const fn neighbor_count(self) -> usize {
        match self {
            Self::Face => 6,
            Self::Edge => 18,
            Self::Vertex => 26,
        }
    }

    /// Maximum number of axes along which a neighbor may differ.
    const fn max_axes(self) -> usize {
        match self {
            Self::Face => 1,
            Self::Edge => 2,
            Self::Vertex => 3,
        }
    }

    /// Returns `true` if `offset` is a neighbor offset under this rule.
    ///
    /// The zero offset is never a neighbor.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_labels::Connectivity;
    ///
    /// assert!(Connectivity::Vertex.admits([1, -1, 1]));
    /// assert!(!Connectivity::Face.admits([1, 0, 1]));
    /// assert!(!Connectivity::Vertex.admits([2, 0, 0]));
    /// assert!(!Connectivity::Vertex.admits([0, 0, 0]));
    /// ```
    #[must_use]
    pub fn admits(self, offset: [isize; 3]) -> bool {
        if offset.iter().any(|d| d.abs() > 1) {
            return false;
        }
        let moved = offset.iter().filter(|&&d| d != 0).count();
        moved > 0 && moved <= self.max_axes()
    }

    /// Iterates over the neighbor offsets of this rule.
    ///
    /// Offsets are produced in lexicographic order of `(dx, dy, dz)`.
    pub fn offsets(self) -> impl Iterator<Item = [isize; 3]> {
        (-1isize..=1)
            .flat_map(|dx| {
                (-1isize..=1).flat_map(move |dy| (-1isize..=1).map(move |dz| [dx, dy, dz]))
            })
            .filter(move |&offset| self.admits(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_counts_match_neighbor_count() {
        for rule in [Connectivity::Face, Connectivity::Edge, Connectivity::Vertex] {
            assert_eq!(rule.offsets().count(), rule.neighbor_count());
        }
    }

    #[test]
    fn test_offsets_exclude_origin() {
        assert!(!Connectivity::Vertex.offsets().any(|o| o == [0, 0, 0]));
    }

    #[test]
    fn test_offsets_are_symmetric() {
        for rule in [Connectivity::Face, Connectivity::Edge, Connectivity::Vertex] {
            let offsets: Vec<_> = rule.offsets().collect();
            for o in &offsets {
                assert!(offsets.contains(&[-o[0], -o[1], -o[2]]));
            }
        }
    }

    #[test]
    fn test_face_offsets() {
        let offsets: Vec<_> = Connectivity::Face.offsets().collect();
        assert!(offsets.contains(&[1, 0, 0]));
        assert!(offsets.contains(&[0, -1, 0]));
        assert!(!offsets.contains(&[1, 1, 0]));
    }

    #[test]
    fn test_edge_excludes_corners() {
        assert!(Connectivity::Edge.admits([1, 1, 0]));
        assert!(!Connectivity::Edge.admits([1, 1, 1]));
    }

    #[test]
    fn test_default_is_vertex() {
        assert_eq!(Connectivity::default(), Connectivity::Vertex);
    }
}
