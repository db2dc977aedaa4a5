//! Storage initialization
//!
//! Handles first-run setup and default data creation

use crate::config::paths::QuincenaPaths;
use crate::error::QuincenaError;
use crate::models::DefaultCategory;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the directory layout and the default category set
pub fn initialize_storage(paths: &QuincenaPaths) -> Result<(), QuincenaError> {
    // Ensure all directories exist
    paths.ensure_directories()?;

    // Create default categories if categories.json doesn't exist
    if !paths.categories_file().exists() {
        create_default_categories(paths)?;
    }

    Ok(())
}

/// Create the default category set
fn create_default_categories(paths: &QuincenaPaths) -> Result<(), QuincenaError> {
    let categories = DefaultCategory::all()
        .iter()
        .map(|d| d.to_category())
        .collect();

    write_json_atomic(paths.categories_file(), &CategoryData { categories })?;
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &QuincenaPaths) -> bool {
    !paths.categories_file().exists()
}
