use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Series grouping key for lessons.
///
/// All lessons sharing a category form one series, ordered by lesson id.
/// The key is stored trimmed and must not be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Category(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("category must not be empty")]
    Empty,
}

impl Category {
    /// Creates a category from a raw key, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::Empty` if the trimmed key is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, CategoryError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CategoryError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let category = Category::new("  writing-basics ").unwrap();
        assert_eq!(category.as_str(), "writing-basics");
    }

    #[test]
    fn rejects_empty_key() {
        assert_eq!(Category::new("   "), Err(CategoryError::Empty));
    }

    #[test]
    fn equal_keys_compare_equal() {
        let a = Category::new("editing").unwrap();
        let b = Category::new(" editing").unwrap();
        assert_eq!(a, b);
    }
}
