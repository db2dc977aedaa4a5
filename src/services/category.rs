//! Category service
//!
//! Category CRUD with a uniqueness check on names and an in-use guard on
//! deletion: a category referenced by any expense or active fixed payment
//! cannot be removed.

use tracing::info;

use crate::error::{QuincenaError, QuincenaResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new category
    pub fn add(&self, name: impl Into<String>) -> QuincenaResult<Category> {
        let category = Category::new(name);
        category.validate()?;

        if self.storage.categories.get_by_name(&category.name)?.is_some() {
            return Err(QuincenaError::Duplicate {
                entity_type: "Category",
                identifier: category.name.clone(),
            });
        }

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;
        info!(id = %category.id, name = %category.name, "category added");

        Ok(category)
    }

    /// Rename a category
    pub fn rename(&self, id: CategoryId, name: impl Into<String>) -> QuincenaResult<Category> {
        let mut category = self.get(id)?;
        let name = name.into();

        if let Some(existing) = self.storage.categories.get_by_name(&name)? {
            if existing.id != id {
                return Err(QuincenaError::Duplicate {
                    entity_type: "Category",
                    identifier: name,
                });
            }
        }

        category.rename(name);
        category.validate()?;
        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;
        info!(id = %category.id, name = %category.name, "category renamed");

        Ok(category)
    }

    /// Delete a category; declined while expenses or active fixed payments
    /// still reference it
    pub fn delete(&self, id: CategoryId) -> QuincenaResult<()> {
        let category = self.get(id)?;

        if self.storage.expenses.uses_category(id)? {
            return Err(QuincenaError::validation(
                "category",
                format!("'{}' is still used by expenses", category.name),
            ));
        }
        if self.storage.fixed_payments.uses_category(id)? {
            return Err(QuincenaError::validation(
                "category",
                format!("'{}' is still used by fixed payments", category.name),
            ));
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;
        info!(%id, name = %category.name, "category deleted");
        Ok(())
    }

    /// Get a category by id
    pub fn get(&self, id: CategoryId) -> QuincenaResult<Category> {
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| QuincenaError::category_not_found(id.to_string()))
    }

    /// Look a category up by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> QuincenaResult<Category> {
        self.storage
            .categories
            .get_by_name(name)?
            .ok_or_else(|| QuincenaError::category_not_found(name.to_string()))
    }

    /// All categories, sorted by name
    pub fn list(&self) -> QuincenaResult<Vec<Category>> {
        self.storage.categories.get_all()
    }
}
