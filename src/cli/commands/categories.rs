//! Categories command implementation.

use serde_json::json;

use crate::feedback::Category;

/// Result type for categories command operations.
pub type CategoriesCommandResult = Result<(), CategoriesCommandError>;

/// Error type for categories command operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoriesCommandError {
    /// JSON encoding failed.
    #[error("Failed to encode categories: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Render the category list as aligned text rows.
pub fn category_rows() -> Vec<String> {
    Category::ALL
        .iter()
        .map(|c| format!("{:<12} {:<18} {}", c.value(), c.label(), c.description()))
        .collect()
}

/// Print every feedback category.
pub fn categories(as_json: bool) -> CategoriesCommandResult {
    if as_json {
        let list: Vec<_> = Category::ALL
            .iter()
            .map(|c| {
                json!({
                    "value": c.value(),
                    "label": c.label(),
                    "description": c.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    for row in category_rows() {
        println!("{row}");
    }
    Ok(())
}
