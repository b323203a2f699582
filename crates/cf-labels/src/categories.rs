//! Ordered category vocabulary.

use hashbrown::HashMap;

use crate::error::{LabelError, LabelResult};

/// Integer code of a category inside a volume.
pub type CategoryCode = u32;

/// An ordered, duplicate-free list of category names.
///
/// The name at position `i` is the category for code `i`. The reverse
/// name-to-code index is built once, during construction.
///
/// # Example
///
/// ```
/// use cf_labels::Categories;
///
/// let categories = Categories::new(["background", "liver", "kidney"]).unwrap();
/// assert_eq!(categories.len(), 3);
/// assert_eq!(categories.code_of("liver"), Some(1));
/// assert_eq!(categories.name_of(2), Some("kidney"));
/// assert!(Categories::new(["a", "a"]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Categories {
    names: Vec<String>,
    index: HashMap<String, CategoryCode>,
}

impl Categories {
    /// Builds a vocabulary from names in code order.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::InvalidCategories`] if `names` is empty or has duplicates.
    pub fn new<I, S>(names: I) -> LabelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(LabelError::invalid_categories(
                "categories list cannot be empty",
            ));
        }

        let mut index = HashMap::with_capacity(names.len());
        for (code, name) in names.iter().enumerate() {
            let code = CategoryCode::try_from(code)
                .map_err(|_| LabelError::invalid_categories("too many categories"))?;
            if index.insert(name.clone(), code).is_some() {
                return Err(LabelError::invalid_categories(format!(
                    "category names must be unique ('{name}' repeated)"
                )));
            }
        }

        Ok(Self { names, index })
    }

    /// Number of categories. Always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false`; a vocabulary cannot be built empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in code order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Code of a category, or `None` if the name is unknown.
    #[must_use]
    pub fn code_of(&self, name: &str) -> Option<CategoryCode> {
        self.index.get(name).copied()
    }

    /// Name for a code, or `None` if the code is out of range.
    #[must_use]
    pub fn name_of(&self, code: CategoryCode) -> Option<&str> {
        self.names.get(code as usize).map(String::as_str)
    }

    /// Returns `true` if the name is part of the vocabulary.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates over `(code, name)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryCode, &str)> {
        (0..).zip(self.names.iter().map(String::as_str))
    }

    /// Code of a category.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::UnknownCategory`] if the name is not in the vocabulary.
    pub fn require(&self, name: &str) -> LabelResult<CategoryCode> {
        self.code_of(name)
            .ok_or_else(|| LabelError::unknown_category(name, &self.names))
    }
}

impl PartialEq for Categories {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for Categories {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_order() {
        let categories = Categories::new(["background", "liver", "kidney"]).unwrap();
        let pairs: Vec<_> = categories.iter().collect();
        assert_eq!(pairs, vec![(0, "background"), (1, "liver"), (2, "kidney")]);
    }

    #[test]
    fn test_empty_rejected() {
        let err = Categories::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, LabelError::InvalidCategories(_)));
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = Categories::new(["liver", "kidney", "liver"]).unwrap_err();
        assert!(matches!(err, LabelError::InvalidCategories(ref m) if m.contains("unique")));
    }

    #[test]
    fn test_require_unknown() {
        let categories = Categories::new(["background", "red"]).unwrap();
        assert_eq!(categories.require("red"), Ok(1));
        let err = categories.require("green").unwrap_err();
        assert!(matches!(err, LabelError::UnknownCategory { ref name, .. } if name == "green"));
    }

    #[test]
    fn test_name_of_out_of_range() {
        let categories = Categories::new(["a"]).unwrap();
        assert_eq!(categories.name_of(0), Some("a"));
        assert_eq!(categories.name_of(1), None);
    }

    #[test]
    fn test_source_list_is_copied() {
        let mut source = vec!["background".to_owned(), "liver".to_owned()];
        let categories = Categories::new(source.clone()).unwrap();
        source[0] = "modified".to_owned();
        assert_eq!(categories.names()[0], "background");
    }
}
