//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::QuincenaResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Add a new category
    Add {
        /// Category name
        name: String,
    },

    /// Rename a category
    Rename {
        /// Current name
        name: String,
        /// New name
        new_name: String,
    },

    /// Delete a category (rejected while expenses or fixed payments use it)
    Delete {
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> QuincenaResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Add { name } => {
            let category = service.add(&name)?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Rename { name, new_name } => {
            let category = service.get_by_name(&name)?;
            let renamed = service.rename(category.id, &new_name)?;
            println!("Renamed '{}' to '{}'", name, renamed.name);
        }

        CategoryCommands::Delete { name } => {
            let category = service.get_by_name(&name)?;
            service.delete(category.id)?;
            println!("Deleted category: {}", category.name);
        }
    }

    Ok(())
}
