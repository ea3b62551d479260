//! Event category field rules.

use crate::error::CoreError;

/// Maximum length for a category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Validate a category name: non-blank and bounded.
pub fn validate_category_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Category name is required.".to_string(),
        ));
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category name must not exceed {MAX_CATEGORY_NAME_LENGTH} characters."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_name_rules() {
        assert!(validate_category_name("Music").is_ok());
        assert!(validate_category_name(" ").is_err());
        assert!(validate_category_name(&"c".repeat(101)).is_err());
    }
}
