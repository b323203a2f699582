//! Category adjacency checks.
//!
//! Two categories are adjacent when some voxel of the first is a neighbor of
//! some voxel of the second. The check dilates the first category's mask by
//! one step and tests it for overlap with the second category's mask.
//! Dilating one side only is enough: a dilated voxel overlaps the other mask
//! exactly when the pair are neighbors, and the neighbor relation is
//! symmetric.
//!
//! # Example
//!
//! ```
//! use cf_labels::{LabeledVolume, check_category_adjacency, check_green_touches_red};
//! use ndarray::array;
//!
//! let labels = array![[["green", "red", "blue"]]];
//! let volume = LabeledVolume::from_labels(&labels).unwrap();
//!
//! assert!(check_green_touches_red(&volume).unwrap());
//! assert!(!check_category_adjacency(&volume, "green", "blue").unwrap());
//! ```

use std::collections::BTreeMap;

use hashbrown::HashMap;
use ndarray::{ArrayBase, ArrayViewD, Data, Dimension};
use tracing::{debug, warn};

use crate::error::{LabelError, LabelResult};
use crate::mask::VoxelMask;
use crate::params::AdjacencyParams;
use crate::volume::{LabeledVolume, as_volume};

/// Mapping from raw integer codes to category names.
pub type CodeMap = BTreeMap<i64, String>;

const GREEN: &str = "green";
const RED: &str = "red";

/// Checks whether any voxel of `first` touches any voxel of `second`.
///
/// Uses 26-connectivity: voxels touch through a face, an edge or a corner.
/// If either category has no voxels the answer is `false`.
///
/// # Errors
///
/// Returns [`LabelError::UnknownCategory`] if either name is not in the
/// volume's vocabulary.
pub fn check_category_adjacency(
    volume: &LabeledVolume,
    first: &str,
    second: &str,
) -> LabelResult<bool> {
    check_category_adjacency_with(volume, first, second, &AdjacencyParams::default())
}

/// Like [`check_category_adjacency`], with explicit parameters.
///
/// # Errors
///
/// Returns [`LabelError::UnknownCategory`] if either name is not in the
/// volume's vocabulary.
///
/// # Example
///
/// ```
/// use cf_labels::{AdjacencyParams, LabeledVolume, check_category_adjacency_with};
/// use ndarray::array;
///
/// // green and red only share an edge
/// let labels = array![[["green", "blue"], ["blue", "red"]]];
/// let volume = LabeledVolume::from_labels(&labels).unwrap();
///
/// let touching = AdjacencyParams::touching();
/// let faces = AdjacencyParams::face_contact();
/// assert!(check_category_adjacency_with(&volume, "green", "red", &touching).unwrap());
/// assert!(!check_category_adjacency_with(&volume, "green", "red", &faces).unwrap());
/// ```
pub fn check_category_adjacency_with(
    volume: &LabeledVolume,
    first: &str,
    second: &str,
    params: &AdjacencyParams,
) -> LabelResult<bool> {
    let first_mask = volume.mask(first)?;
    let second_mask = volume.mask(second)?;
    Ok(masks_touch(first, &first_mask, second, &second_mask, params))
}

/// Checks whether the `green` category touches the `red` category.
///
/// # Errors
///
/// Returns [`LabelError::UnknownCategory`] if the volume has no `green` or
/// no `red` category.
pub fn check_green_touches_red(volume: &LabeledVolume) -> LabelResult<bool> {
    check_category_adjacency(volume, GREEN, RED)
}

/// Checks adjacency on a raw integer array with an explicit code mapping.
///
/// The array must have three non-empty axes. Values are not range-checked:
/// voxels whose value has no entry in `mapping` belong to no category. If a
/// name appears under several codes, the highest code wins.
///
/// # Errors
///
/// - [`LabelError::MissingMapping`] if `mapping` is `None`.
/// - [`LabelError::InvalidShape`] if `data` does not have three axes.
/// - [`LabelError::EmptyVolume`] if any axis has length zero.
/// - [`LabelError::UnknownCategory`] if either name is not a mapping value.
///
/// # Example
///
/// ```
/// use cf_labels::{CodeMap, check_raw_adjacency};
/// use ndarray::array;
///
/// let image = array![[[1, 1, 2], [1, 3, 2], [3, 3, 2]]];
/// let mapping = CodeMap::from([
///     (1, "green".to_owned()),
///     (2, "red".to_owned()),
///     (3, "blue".to_owned()),
/// ]);
/// assert!(check_raw_adjacency(&image, Some(&mapping), "green", "red").unwrap());
/// assert!(check_raw_adjacency(&image, None, "green", "red").is_err());
/// ```
pub fn check_raw_adjacency<S, D, T>(
    data: &ArrayBase<S, D>,
    mapping: Option<&CodeMap>,
    first: &str,
    second: &str,
) -> LabelResult<bool>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Copy + Into<i64>,
{
    check_raw_adjacency_with(data, mapping, first, second, &AdjacencyParams::default())
}

/// Like [`check_raw_adjacency`], with explicit parameters.
///
/// # Errors
///
/// Same as [`check_raw_adjacency`].
pub fn check_raw_adjacency_with<S, D, T>(
    data: &ArrayBase<S, D>,
    mapping: Option<&CodeMap>,
    first: &str,
    second: &str,
    params: &AdjacencyParams,
) -> LabelResult<bool>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Copy + Into<i64>,
{
    let mapping = mapping.ok_or(LabelError::MissingMapping)?;
    let data = as_volume(data)?;

    let reverse = reverse_mapping(mapping);
    let code = |name: &str| {
        reverse.get(name).copied().ok_or_else(|| {
            let names: Vec<&str> = mapping.values().map(String::as_str).collect();
            LabelError::unknown_category(name, &names)
        })
    };
    let first_code = code(first)?;
    let second_code = code(second)?;

    let first_mask = VoxelMask::of_code(data, first_code);
    let second_mask = VoxelMask::of_code(data, second_code);
    Ok(masks_touch(first, &first_mask, second, &second_mask, params))
}

/// Checks whether `green` touches `red` in a raw integer array.
///
/// # Errors
///
/// Same as [`check_raw_adjacency`].
pub fn check_raw_green_touches_red<S, D, T>(
    data: &ArrayBase<S, D>,
    mapping: Option<&CodeMap>,
) -> LabelResult<bool>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Copy + Into<i64>,
{
    check_raw_adjacency(data, mapping, GREEN, RED)
}

/// Either input accepted by the adjacency checks.
///
/// # Example
///
/// ```
/// use cf_labels::{AdjacencyInput, AdjacencyParams, CodeMap, LabeledVolume};
/// use ndarray::array;
///
/// let volume = LabeledVolume::from_labels(&array![[["green", "red"]]]).unwrap();
/// let raw = array![[[1i64, 0]]].into_dyn();
/// let mapping = CodeMap::from([(0, "red".to_owned()), (1, "green".to_owned())]);
///
/// let params = AdjacencyParams::default();
/// for input in [
///     AdjacencyInput::Volume(&volume),
///     AdjacencyInput::Raw { data: raw.view(), mapping: Some(&mapping) },
/// ] {
///     assert!(input.check("green", "red", &params).unwrap());
/// }
/// ```
#[derive(Debug, Clone)]
pub enum AdjacencyInput<'a> {
    /// A validated labeled volume.
    Volume(&'a LabeledVolume),
    /// A raw integer array with its code mapping.
    Raw {
        /// Encoded voxels, expected to have three axes.
        data: ArrayViewD<'a, i64>,
        /// Code-to-name mapping; `None` is rejected.
        mapping: Option<&'a CodeMap>,
    },
}

impl AdjacencyInput<'_> {
    /// Checks whether `first` touches `second` in this input.
    ///
    /// # Errors
    ///
    /// Same as [`check_category_adjacency_with`] or [`check_raw_adjacency_with`].
    pub fn check(&self, first: &str, second: &str, params: &AdjacencyParams) -> LabelResult<bool> {
        match self {
            Self::Volume(volume) => check_category_adjacency_with(volume, first, second, params),
            Self::Raw { data, mapping } => {
                check_raw_adjacency_with(data, *mapping, first, second, params)
            }
        }
    }
}

/// Name-to-code lookup for a raw mapping. Later codes replace earlier ones.
fn reverse_mapping(mapping: &CodeMap) -> HashMap<&str, i64> {
    let mut reverse = HashMap::with_capacity(mapping.len());
    for (&code, name) in mapping {
        if let Some(previous) = reverse.insert(name.as_str(), code) {
            warn!(
                category = name.as_str(),
                previous,
                code,
                "Category mapped from several codes, keeping the last"
            );
        }
    }
    reverse
}

fn masks_touch(
    first: &str,
    first_mask: &VoxelMask,
    second: &str,
    second_mask: &VoxelMask,
    params: &AdjacencyParams,
) -> bool {
    if !first_mask.any() || !second_mask.any() {
        debug!(first, second, "Category has no voxels, not adjacent");
        return false;
    }

    if params.bounds_check {
        if let (Some(a), Some(b)) = (first_mask.bounds(), second_mask.bounds()) {
            if !a.grown(1, first_mask.shape()).overlaps(&b) {
                debug!(first, second, "Bounding boxes too far apart, not adjacent");
                return false;
            }
        }
    }

    let touching = first_mask
        .dilate(params.connectivity)
        .intersects(second_mask);
    debug!(
        first,
        second,
        connectivity = ?params.connectivity,
        touching,
        "Checked category adjacency"
    );
    touching
}
