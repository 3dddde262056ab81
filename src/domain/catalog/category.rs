use serde::Serialize;

use super::errors::CatalogError;
use crate::domain::foundation::{CategoryId, Timestamp, ValidationError};

/// Longest category name accepted.
pub const MAX_CATEGORY_NAME_LEN: usize = 64;

/// A product category such as "Agbada" or "Suit". Names are unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: Timestamp,
}

impl Category {
    pub fn new(name: &str) -> Result<Self, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if name.chars().count() > MAX_CATEGORY_NAME_LEN {
            return Err(CatalogError::validation(
                "name",
                format!("must be at most {} characters", MAX_CATEGORY_NAME_LEN),
            ));
        }
        Ok(Self {
            id: CategoryId::new(),
            name: name.to_string(),
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_name() {
        let category = Category::new("  Senator ").unwrap();
        assert_eq!(category.name, "Senator");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(Category::new("   ").is_err());
    }
}
