//! Category display formatting

use crate::models::Category;

/// Format the category list for display
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Categories ({})\n", categories.len()));
    output.push_str(&"-".repeat(40));
    output.push('\n');

    for category in categories {
        output.push_str(&format!("  {:30} {}\n", category.name, category.id));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_category_list(&[]), "No categories found.\n");
    }

    #[test]
    fn test_list_shows_names() {
        let categories = vec![Category::new("Comida"), Category::new("Otros")];
        let output = format_category_list(&categories);
        assert!(output.contains("Categories (2)"));
        assert!(output.contains("Comida"));
        assert!(output.contains("Otros"));
    }
}
