//! Expense category model
//!
//! Categories are a flat list, unique by name. A default set is created when
//! the data store is initialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use crate::error::{QuincenaError, QuincenaResult};

/// An expense category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name, unique within the ledger
    pub name: String,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the category
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Validate the category
    pub fn validate(&self) -> QuincenaResult<()> {
        if self.name.trim().is_empty() {
            return Err(QuincenaError::validation("name", "cannot be empty"));
        }
        if self.name.len() > 50 {
            return Err(QuincenaError::validation(
                "name",
                format!("too long ({} chars, max 50)", self.name.len()),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Default categories for new ledgers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    Comida,
    Combustible,
    UberTaxi,
    Subscripciones,
    VariosSnacks,
    Otros,
}

impl DefaultCategory {
    /// Get all defaults in display order
    pub fn all() -> &'static [Self] {
        &[
            Self::Comida,
            Self::Combustible,
            Self::UberTaxi,
            Self::Subscripciones,
            Self::VariosSnacks,
            Self::Otros,
        ]
    }

    /// Get the name for this default category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Comida => "Comida",
            Self::Combustible => "Combustible",
            Self::UberTaxi => "Uber/Taxi",
            Self::Subscripciones => "Subscripciones",
            Self::VariosSnacks => "Varios/Snacks",
            Self::Otros => "Otros",
        }
    }

    /// Create a Category from this default
    pub fn to_category(&self) -> Category {
        Category::new(self.name())
    }
}
