//! Model verity management commands.
//!
//! # Usage
//!
//! ```bash
//! armoire models list --search slimline
//! armoire models options --category <CATEGORY_ID>
//! armoire models create -n "Slimline" -c <CATEGORY_ID>
//! armoire models delete <ID> --yes
//! ```

use clap::Subcommand;
use tracing::info;

use armoire_client::list::ListState;
use armoire_core::{CategoryId, ModelId};

use super::{CliError, log_pagination, require_yes, store};

#[derive(Subcommand)]
pub enum ModelAction {
    /// List model verities
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
    /// List the model options for one category
    Options {
        /// Category id to filter by
        #[arg(short, long)]
        category: String,
    },
    /// Create a new model verity
    Create {
        /// Model name
        #[arg(short, long)]
        name: String,

        /// Category the model belongs to
        #[arg(short, long)]
        category: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Update an existing model verity
    Update {
        /// Model id
        id: String,

        /// Model name
        #[arg(short, long)]
        name: String,

        /// Category the model belongs to
        #[arg(short, long)]
        category: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a model verity
    Delete {
        /// Model id
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(action: ModelAction) -> Result<(), CliError> {
    let store = store().await?;

    match action {
        ModelAction::List {
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

            let result = store.models(&state.params()).await?;
            for model in &result.items {
                info!("{}  {}  [{}]", model.id, model.name, model.category.name);
            }
            log_pagination(&result.pagination);
        }
        ModelAction::Options { category } => {
            let options = store.model_options(&CategoryId::new(category)).await?;
            for option in &options {
                info!("{}  {}", option.id, option.name);
            }
        }
        ModelAction::Create {
            name,
            category,
            description,
        } => {
            let category = CategoryId::new(category);
            let model = store
                .create_model(&name, description.as_deref(), &category)
                .await?;
            info!("Created model {} ({})", model.name, model.id);
        }
        ModelAction::Update {
            id,
            name,
            category,
            description,
        } => {
            let id = ModelId::new(id);
            let category = CategoryId::new(category);
            let model = store
                .update_model(&id, &name, description.as_deref(), &category)
                .await?;
            info!("Updated model {} ({})", model.name, model.id);
        }
        ModelAction::Delete { id, yes } => {
            require_yes(yes, &format!("model {id}"))?;
            let id = ModelId::new(id);
            store.delete_model(&id).await?;
            info!("Deleted model {id}");
        }
    }
    Ok(())
}
