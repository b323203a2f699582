//! Labeled 3D volumes.

use std::collections::BTreeSet;

use hashbrown::HashMap;
use ndarray::{Array3, ArrayBase, ArrayView3, Data, Dimension, Ix3, Zip};
use tracing::info;

use crate::categories::{Categories, CategoryCode};
use crate::error::{LabelError, LabelResult};
use crate::mask::VoxelMask;
use crate::voxel::VoxelCoord;

/// An immutable 3D volume whose voxels carry category codes.
///
/// Every voxel holds a code in `0..categories.len()`, and code `i` stands for
/// the category named `categories()[i]`. All invariants are checked by the
/// constructors; once built, neither voxels nor names can change.
///
/// The volume owns its voxel data. Constructors copy the caller's array, so
/// later changes to that array are not visible through the volume.
///
/// # Example
///
/// ```
/// use cf_labels::LabeledVolume;
/// use ndarray::array;
///
/// // From string labels: categories are discovered and sorted
/// let labels = array![[["background", "liver", "kidney"]]];
/// let volume = LabeledVolume::from_labels(&labels).unwrap();
/// assert_eq!(volume.categories(), ["background", "kidney", "liver"]);
///
/// // From encoded data with an explicit category list
/// let data = array![[[0, 1, 2]]];
/// let volume = LabeledVolume::new(&data, ["background", "liver", "kidney"]).unwrap();
/// assert_eq!(volume.shape(), (1, 1, 3));
/// assert!(volume.has_category("kidney"));
/// assert_eq!(volume.count_voxels("liver").unwrap(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawVolume", into = "RawVolume")
)]
pub struct LabeledVolume {
    data: Array3<CategoryCode>,
    categories: Categories,
}

impl LabeledVolume {
    /// Builds a volume from integer codes and the category names they refer to.
    ///
    /// Checks run in this order: rank, emptiness, category list, negative
    /// values, values past the last category.
    ///
    /// # Errors
    ///
    /// - [`LabelError::InvalidShape`] if `data` does not have three axes.
    /// - [`LabelError::EmptyVolume`] if any axis has length zero.
    /// - [`LabelError::InvalidCategories`] if `categories` is empty or has duplicates.
    /// - [`LabelError::NegativeValue`] if any code is below zero.
    /// - [`LabelError::ValueOutOfRange`] if any code is `>= categories.len()`.
    pub fn new<S, D, T, I, N>(data: &ArrayBase<S, D>, categories: I) -> LabelResult<Self>
    where
        S: Data<Elem = T>,
        D: Dimension,
        T: Copy + Into<i64>,
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let data = as_volume(data)?;
        let categories = Categories::new(categories)?;

        let (min, max) = data.fold((i64::MAX, i64::MIN), |(lo, hi), &v| {
            let v: i64 = v.into();
            (lo.min(v), hi.max(v))
        });
        if min < 0 {
            return Err(LabelError::NegativeValue(min));
        }
        if !usize::try_from(max).is_ok_and(|max| max < categories.len()) {
            return Err(LabelError::ValueOutOfRange {
                value: max,
                categories: categories.len(),
            });
        }

        // Range checked above, so every value fits a code.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let data = data.mapv(|v| {
            let v: i64 = v.into();
            v as CategoryCode
        });

        Ok(Self::from_parts(data, categories))
    }

    /// Builds a volume from string labels.
    ///
    /// The distinct labels are sorted lexicographically and numbered in that
    /// order, so the same labels always get the same codes regardless of where
    /// they appear in the array.
    ///
    /// # Errors
    ///
    /// - [`LabelError::InvalidShape`] if `labels` does not have three axes.
    /// - [`LabelError::EmptyVolume`] if any axis has length zero.
    ///
    /// # Example
    ///
    /// ```
    /// use cf_labels::LabeledVolume;
    /// use ndarray::array;
    ///
    /// let labels = array![[["liver", "kidney"], ["kidney", "liver"]]];
    /// let volume = LabeledVolume::from_labels(&labels).unwrap();
    /// assert_eq!(volume.code_of("kidney"), Some(0));
    /// assert_eq!(volume.code_of("liver"), Some(1));
    /// ```
    pub fn from_labels<S, D, L>(labels: &ArrayBase<S, D>) -> LabelResult<Self>
    where
        S: Data<Elem = L>,
        D: Dimension,
        L: AsRef<str>,
    {
        let labels = as_volume(labels)?;

        let distinct: BTreeSet<&str> = labels.iter().map(|label| label.as_ref()).collect();
        let categories = Categories::new(distinct)?;

        let mut data = Array3::<CategoryCode>::zeros(labels.raw_dim());
        Zip::from(&mut data).and(&labels).for_each(|code, label| {
            if let Some(c) = categories.code_of(label.as_ref()) {
                *code = c;
            }
        });

        Ok(Self::from_parts(data, categories))
    }

    fn from_parts(data: Array3<CategoryCode>, categories: Categories) -> Self {
        info!(
            shape = ?data.dim(),
            categories = categories.len(),
            "Built labeled volume"
        );
        Self { data, categories }
    }

    /// Returns the dimension sizes.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Total number of voxels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; a volume cannot be built without voxels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Category names in code order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        self.categories.names()
    }

    /// The category vocabulary.
    #[must_use]
    pub const fn vocabulary(&self) -> &Categories {
        &self.categories
    }

    /// Number of categories in the vocabulary.
    #[must_use]
    pub fn num_categories(&self) -> usize {
        self.categories.len()
    }

    /// Read-only view of the encoded voxels.
    #[must_use]
    pub fn data(&self) -> ArrayView3<'_, CategoryCode> {
        self.data.view()
    }

    /// Code of a category, or `None` if the name is not in the vocabulary.
    #[must_use]
    pub fn code_of(&self, name: &str) -> Option<CategoryCode> {
        self.categories.code_of(name)
    }

    /// Category name at a voxel, or `None` if `coord` is outside the volume.
    #[must_use]
    pub fn get(&self, coord: VoxelCoord) -> Option<&str> {
        let code = *self.data.get(coord.as_array())?;
        self.categories.name_of(code)
    }

    /// Returns `true` if the category is known and at least one voxel carries it.
    ///
    /// Unknown names and known-but-absent categories both give `false`.
    /// [`mask`](Self::mask) and [`count_voxels`](Self::count_voxels) differ:
    /// they fail for unknown names and succeed for absent ones.
    #[must_use]
    pub fn has_category(&self, name: &str) -> bool {
        self.code_of(name)
            .is_some_and(|code| self.data.iter().any(|&c| c == code))
    }

    /// Occupancy mask of a category.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::UnknownCategory`] if the name is not in the vocabulary.
    pub fn mask(&self, name: &str) -> LabelResult<VoxelMask> {
        let code = self.categories.require(name)?;
        Ok(VoxelMask::of_code(self.data.view(), code))
    }

    /// Number of voxels carrying a category.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::UnknownCategory`] if the name is not in the vocabulary.
    pub fn count_voxels(&self, name: &str) -> LabelResult<usize> {
        let code = self.categories.require(name)?;
        Ok(self.data.iter().filter(|&&c| c == code).count())
    }

    /// Coordinates of every voxel carrying a category, in memory order.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::UnknownCategory`] if the name is not in the vocabulary.
    pub fn voxels(&self, name: &str) -> LabelResult<impl Iterator<Item = VoxelCoord> + '_> {
        let code = self.categories.require(name)?;
        Ok(self
            .data
            .indexed_iter()
            .filter(move |&(_, &c)| c == code)
            .map(|((x, y, z), _)| VoxelCoord::new(x, y, z)))
    }

    /// Voxel counts for every category, including those with no voxels.
    #[must_use]
    pub fn category_stats(&self) -> HashMap<String, usize> {
        let mut counts = vec![0usize; self.categories.len()];
        for &code in &self.data {
            if let Some(slot) = counts.get_mut(code as usize) {
                *slot += 1;
            }
        }
        self.categories
            .names()
            .iter()
            .cloned()
            .zip(counts)
            .collect()
    }

    /// Decodes the volume back into category names.
    ///
    /// Returns a new array; the volume itself is unchanged.
    #[must_use]
    pub fn to_labels(&self) -> Array3<String> {
        self.data
            .map(|&code| self.categories.name_of(code).unwrap_or_default().to_owned())
    }
}

/// Checks rank and emptiness, returning the array as a 3D view.
pub(crate) fn as_volume<S, D, T>(data: &ArrayBase<S, D>) -> LabelResult<ArrayView3<'_, T>>
where
    S: Data<Elem = T>,
    D: Dimension,
{
    let ndim = data.ndim();
    let view = data
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|_| LabelError::InvalidShape { ndim })?;
    if view.is_empty() {
        let (x, y, z) = view.dim();
        return Err(LabelError::EmptyVolume { shape: [x, y, z] });
    }
    Ok(view)
}

/// Unvalidated serialized form of a [`LabeledVolume`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawVolume {
    data: Array3<CategoryCode>,
    categories: Vec<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawVolume> for LabeledVolume {
    type Error = LabelError;

    fn try_from(raw: RawVolume) -> Result<Self, Self::Error> {
        Self::new(&raw.data, raw.categories)
    }
}

#[cfg(feature = "serde")]
impl From<LabeledVolume> for RawVolume {
    fn from(volume: LabeledVolume) -> Self {
        Self {
            data: volume.data,
            categories: volume.categories.names().to_vec(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ndarray::{Array2, ArrayD, IxDyn, array};

    fn sample() -> LabeledVolume {
        let data = array![[[0, 1, 1], [1, 2, 0], [2, 0, 1]]];
        LabeledVolume::new(&data, ["background", "liver", "kidney"]).unwrap()
    }

    #[test]
    fn test_create_from_encoded_data() {
        let data = array![[[0, 1, 2], [1, 2, 0], [2, 0, 1]]];
        let volume = LabeledVolume::new(&data, ["background", "liver", "kidney"]).unwrap();
        assert_eq!(volume.shape(), (1, 3, 3));
        assert_eq!(volume.categories(), ["background", "liver", "kidney"]);
        assert_eq!(volume.len(), 9);
    }

    #[test]
    fn test_accepts_dynamic_rank_input() {
        let data = ArrayD::<u8>::zeros(IxDyn(&[2, 2, 2]));
        let volume = LabeledVolume::new(&data, ["background"]).unwrap();
        assert_eq!(volume.shape(), (2, 2, 2));
    }

    #[test]
    fn test_invalid_2d_data() {
        let data = Array2::<i32>::zeros((2, 2));
        let err = LabeledVolume::new(&data, ["a", "b", "c", "d"]).unwrap_err();
        assert_eq!(err, LabelError::InvalidShape { ndim: 2 });
        assert_eq!(format!("{err}"), "expected 3D volume, got 2D");
    }

    #[test]
    fn test_invalid_4d_data() {
        let data = ArrayD::<i32>::zeros(IxDyn(&[1, 1, 1, 1]));
        let err = LabeledVolume::new(&data, ["a"]).unwrap_err();
        assert_eq!(err, LabelError::InvalidShape { ndim: 4 });
    }

    #[test]
    fn test_empty_volume() {
        let data = Array3::<i32>::zeros((0, 3, 3));
        let err = LabeledVolume::new(&data, ["a"]).unwrap_err();
        assert_eq!(err, LabelError::EmptyVolume { shape: [0, 3, 3] });
    }

    #[test]
    fn test_empty_categories() {
        let data = array![[[0]]];
        let err = LabeledVolume::new(&data, Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, LabelError::InvalidCategories(_)));
    }

    #[test]
    fn test_duplicate_categories() {
        let data = array![[[0, 1]]];
        let err = LabeledVolume::new(&data, ["liver", "liver"]).unwrap_err();
        assert!(matches!(err, LabelError::InvalidCategories(_)));
    }

    #[test]
    fn test_negative_value() {
        let data = array![[[0, -1, 1]]];
        let err = LabeledVolume::new(&data, ["a", "b"]).unwrap_err();
        assert_eq!(err, LabelError::NegativeValue(-1));
    }

    #[test]
    fn test_value_out_of_range() {
        let data = array![[[0, 1, 3]]];
        let err = LabeledVolume::new(&data, ["a", "b", "c"]).unwrap_err();
        assert_eq!(
            err,
            LabelError::ValueOutOfRange {
                value: 3,
                categories: 3
            }
        );
    }

    #[test]
    fn test_last_code_accepted() {
        let data = array![[[0, 1, 2]]];
        assert!(LabeledVolume::new(&data, ["a", "b", "c"]).is_ok());
    }

    #[test]
    fn test_shape_checked_before_categories() {
        let data = Array2::<i32>::zeros((2, 2));
        let err = LabeledVolume::new(&data, Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, LabelError::InvalidShape { .. }));
    }

    #[test]
    fn test_create_from_labels() {
        let labels = array![[["liver", "kidney", "liver"], ["kidney", "liver", "kidney"]]];
        let volume = LabeledVolume::from_labels(&labels).unwrap();
        assert_eq!(volume.shape(), (1, 2, 3));
        assert_eq!(volume.categories(), ["kidney", "liver"]);
    }

    #[test]
    fn test_from_labels_codes_independent_of_order() {
        let a = LabeledVolume::from_labels(&array![[["red", "green"]]]).unwrap();
        let b = LabeledVolume::from_labels(&array![[["green", "red"]]]).unwrap();
        assert_eq!(a.categories(), b.categories());
        assert_eq!(a.code_of("green"), Some(0));
        assert_eq!(b.code_of("green"), Some(0));
    }

    #[test]
    fn test_from_labels_invalid_shape() {
        let labels = array![["a", "b"]];
        let err = LabeledVolume::from_labels(&labels).unwrap_err();
        assert_eq!(err, LabelError::InvalidShape { ndim: 2 });
    }

    #[test]
    fn test_from_labels_empty() {
        let labels = Array3::<String>::from_elem((2, 0, 2), String::new());
        let err = LabeledVolume::from_labels(&labels).unwrap_err();
        assert!(matches!(err, LabelError::EmptyVolume { .. }));
    }

    #[test]
    fn test_mask() {
        let data = array![[[0, 1, 2], [1, 2, 0], [2, 0, 1]]];
        let volume = LabeledVolume::new(&data, ["background", "liver", "kidney"]).unwrap();
        let mask = volume.mask("liver").unwrap();
        let expected = array![[
            [false, true, false],
            [true, false, false],
            [false, false, true]
        ]];
        assert_eq!(mask.as_array(), expected);
    }

    #[test]
    fn test_mask_unknown_category() {
        let err = sample().mask("unknown").unwrap_err();
        assert!(matches!(err, LabelError::UnknownCategory { ref name, .. } if name == "unknown"));
        assert!(format!("{err}").contains("background, liver, kidney"));
    }

    #[test]
    fn test_has_category() {
        let data = array![[[0, 1, 0], [0, 1, 0]]];
        let volume = LabeledVolume::new(&data, ["background", "liver", "kidney"]).unwrap();
        assert!(volume.has_category("liver"));
        assert!(volume.has_category("background"));
        assert!(!volume.has_category("kidney"));
        assert!(!volume.has_category("spleen"));
    }

    #[test]
    fn test_absent_category_counts_zero() {
        let data = array![[[0, 1, 0]]];
        let volume = LabeledVolume::new(&data, ["background", "liver", "kidney"]).unwrap();
        assert_eq!(volume.count_voxels("kidney").unwrap(), 0);
        assert!(!volume.mask("kidney").unwrap().any());
    }

    #[test]
    fn test_count_voxels() {
        let volume = sample();
        assert_eq!(volume.count_voxels("background").unwrap(), 3);
        assert_eq!(volume.count_voxels("liver").unwrap(), 4);
        assert_eq!(volume.count_voxels("kidney").unwrap(), 2);
        assert!(volume.count_voxels("spleen").is_err());
    }

    #[test]
    fn test_category_stats() {
        let stats = sample().category_stats();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats["background"], 3);
        assert_eq!(stats["liver"], 4);
        assert_eq!(stats["kidney"], 2);
    }

    #[test]
    fn test_category_stats_includes_absent() {
        let data = array![[[0, 0]]];
        let volume = LabeledVolume::new(&data, ["background", "liver"]).unwrap();
        let stats = volume.category_stats();
        assert_eq!(stats["liver"], 0);
    }

    #[test]
    fn test_to_labels() {
        let data = array![[[0, 1, 2]]];
        let volume = LabeledVolume::new(&data, ["background", "liver", "kidney"]).unwrap();
        let expected = array![[["background", "liver", "kidney"]]].mapv(str::to_owned);
        assert_eq!(volume.to_labels(), expected);
    }

    #[test]
    fn test_to_labels_roundtrip() {
        let labels = array![[["liver", "kidney", "liver"], ["kidney", "liver", "kidney"]]]
            .mapv(str::to_owned);
        let volume = LabeledVolume::from_labels(&labels).unwrap();
        assert_eq!(volume.to_labels(), labels);
    }

    #[test]
    fn test_data_is_copied() {
        let mut data = array![[[0, 1, 2]]];
        let volume = LabeledVolume::new(&data, ["background", "liver", "kidney"]).unwrap();
        data[[0, 0, 0]] = 99;
        assert_eq!(volume.data()[[0, 0, 0]], 0);
        assert_eq!(volume.get(VoxelCoord::new(0, 0, 0)), Some("background"));
    }

    #[test]
    fn test_categories_are_copied() {
        let data = array![[[0, 1, 2]]];
        let mut categories = vec![
            "background".to_owned(),
            "liver".to_owned(),
            "kidney".to_owned(),
        ];
        let volume = LabeledVolume::new(&data, categories.clone()).unwrap();
        categories[0] = "modified".to_owned();
        assert_eq!(volume.categories()[0], "background");
    }

    #[test]
    fn test_get_and_voxels() {
        let volume = sample();
        assert_eq!(volume.get(VoxelCoord::new(0, 1, 2)), Some("background"));
        assert_eq!(volume.get(VoxelCoord::new(1, 0, 0)), None);

        let kidney: Vec<_> = volume.voxels("kidney").unwrap().collect();
        assert_eq!(kidney, vec![VoxelCoord::new(0, 1, 1), VoxelCoord::new(0, 2, 0)]);
        assert!(volume.voxels("spleen").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip_revalidates() {
        let volume = sample();
        let json = serde_json::to_string(&volume).unwrap();
        let back: LabeledVolume = serde_json::from_str(&json).unwrap();
        assert_eq!(back, volume);

        let tampered = json.replace("\"kidney\"", "\"liver\"");
        assert!(serde_json::from_str::<LabeledVolume>(&tampered).is_err());
    }
}
