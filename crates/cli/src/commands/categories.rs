//! Category management commands.
//!
//! # Usage
//!
//! ```bash
//! armoire categories list --search steel --page 2
//! armoire categories create -n "Wardrobes" -d "Steel wardrobes"
//! armoire categories update <ID> -n "Wardrobes"
//! armoire categories delete <ID> --yes
//! ```

use clap::Subcommand;
use tracing::info;

use armoire_client::list::ListState;
use armoire_core::CategoryId;

use super::{CliError, log_pagination, require_yes, store};

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories
    List {
        /// Filter by name
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Rows per page
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },
    /// Create a new category
    Create {
        /// Category name
        #[arg(short, long)]
        name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Update an existing category
    Update {
        /// Category id
        id: String,

        /// Category name
        #[arg(short, long)]
        name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a category
    Delete {
        /// Category id
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(action: CategoryAction) -> Result<(), CliError> {
    let store = store().await?;

    match action {
        CategoryAction::List {
            search,
            page,
            limit,
        } => {
            let mut state = ListState::default();
            if let Some(search) = search {
                state.set_search(search);
            }
            state.set_page_size(limit);
            state.set_page(page);

            let result = store.categories(&state.params()).await?;
            for category in &result.items {
                info!("{}  {}  {}", category.id, category.name, category.description);
            }
            log_pagination(&result.pagination);
        }
        CategoryAction::Create { name, description } => {
            let category = store.create_category(&name, description.as_deref()).await?;
            info!("Created category {} ({})", category.name, category.id);
        }
        CategoryAction::Update {
            id,
            name,
            description,
        } => {
            let id = CategoryId::new(id);
            let category = store
                .update_category(&id, &name, description.as_deref())
                .await?;
            info!("Updated category {} ({})", category.name, category.id);
        }
        CategoryAction::Delete { id, yes } => {
            require_yes(yes, &format!("category {id}"))?;
            let id = CategoryId::new(id);
            store.delete_category(&id).await?;
            info!("Deleted category {id}");
        }
    }
    Ok(())
}
