//! Product management commands.
//!
//! Creation and update run through the product form controller, so a
//! manifest is validated exactly like an interactive form before anything
//! is sent. Relative image paths resolve against the manifest's directory.
//!
//! # Usage
//!
//! ```bash
//! armoire products list --search wardrobe --category <CATEGORY_ID>
//! armoire products show <ID>
//! armoire products create -m wardrobe.yaml
//! armoire products update <ID> -m wardrobe.yaml
//! armoire products delete <ID> --yes
//! ```
//!
//! # Manifest Format
//!
//! ```yaml
//! name: Slimline 2-Door Wardrobe
//! category: 66c7f3a9d2e8b1f4c5a6d7e8
//! model: 66d901b2c3d4e5f6a7b8c9d0
//! description: Compact steel wardrobe
//! number_of_doors: 2
//! price: 8999.5
//! mrp: 10999
//! card_image: images/card.jpg
//! colors:
//!   - name: Graphite
//!     body: Grey
//!     door: Charcoal
//!     price: 8999.5
//!     mrp: 10999
//!     images: [images/graphite-1.jpg, images/graphite-2.jpg]
//! ```

use std::path::{Path, PathBuf};

use clap::Subcommand;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use armoire_client::form::{ImageSource, ProductFormController};
use armoire_client::list::ListState;
use armoire_core::{CategoryId, ModelId, ProductId};

use super::{CliError, expect_saved, load_image, log_pagination, require_yes, store};

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products
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

        /// Filter by category id
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by model id
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Show one product in full
    Show {
        /// Product id
        id: String,
    },
    /// Create a product from a manifest file
    Create {
        /// Path to the YAML manifest
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Update a product from a manifest file
    Update {
        /// Product id
        id: String,

        /// Path to the YAML manifest
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Product description file for create and update.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProductManifest {
    name: String,
    category: String,
    model: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    number_of_doors: Option<u32>,
    #[serde(default)]
    color_options_count: Option<u32>,
    price: Decimal,
    mrp: Decimal,
    #[serde(default)]
    material: Option<String>,
    #[serde(default)]
    warranty: Option<String>,
    #[serde(default)]
    paint_type: Option<String>,
    #[serde(default)]
    card_image: Option<PathBuf>,
    #[serde(default)]
    colors: Vec<ColorManifest>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColorManifest {
    name: String,
    body: String,
    #[serde(default)]
    door: Option<String>,
    #[serde(default)]
    price: Option<Decimal>,
    #[serde(default)]
    mrp: Option<Decimal>,
    #[serde(default)]
    available: Option<bool>,
    #[serde(default)]
    images: Vec<PathBuf>,
}

pub async fn run(action: ProductAction) -> Result<(), CliError> {
    let store = store().await?;

    match action {
        ProductAction::List {
            search,
            page,
            limit,
            category,
            model,
        } => {
            let mut state = ListState::default();
            if let Some(search) = search {
                state.set_search(search);
            }
            state.set_page_size(limit);
            state.set_page(page);

            let query = state.product_params(
                category.map(CategoryId::new),
                model.map(ModelId::new),
            );
            let result = store.products(&query).await?;
            for product in &result.items {
                info!(
                    "{}  {}  [{} / {}]  {} / {}  ({} colors)",
                    product.id,
                    product.name,
                    product.category.name,
                    product.model.name,
                    product.price,
                    product.mrp,
                    product.colors.len()
                );
            }
            log_pagination(&result.pagination);
        }
        ProductAction::Show { id } => {
            let product = store.product(&ProductId::new(id)).await?;

            info!("{} ({})", product.name, product.id);
            info!("  Category: {} ({})", product.category.name, product.category.id);
            info!("  Model: {} ({})", product.model.name, product.model.id);
            if !product.description.is_empty() {
                info!("  Description: {}", product.description);
            }
            info!("  Price / MRP: {} / {}", product.price, product.mrp);
            info!("  Doors: {}", product.number_of_doors);
            info!(
                "  Material: {}, Warranty: {}, Paint: {}",
                product.material, product.warranty, product.paint_type
            );
            if let Some(created_by) = &product.created_by {
                match created_by.name() {
                    Some(name) => info!("  Created by: {name}"),
                    None => info!("  Created by: {}", created_by.id()),
                }
            }
            if !product.card_image.is_empty() {
                info!("  Card image: {}", product.card_image);
            }
            info!("  Colors:");
            for color in &product.colors {
                info!(
                    "    {}  body {}  {} / {}  {}  ({} images)",
                    color.name,
                    color.body,
                    color.price,
                    color.mrp,
                    if color.available { "available" } else { "unavailable" },
                    color.images.len()
                );
                for image in &color.images {
                    info!("      {image}");
                }
            }
        }
        ProductAction::Create { manifest } => {
            let parsed = load_manifest(&manifest).await?;
            let base_dir = manifest_dir(&manifest);

            let mut controller = ProductFormController::create(store);
            apply_manifest(&mut controller, parsed, base_dir).await?;
            expect_saved(controller.submit().await?)?;
            info!("Product created");
        }
        ProductAction::Update { id, manifest } => {
            let parsed = load_manifest(&manifest).await?;
            let base_dir = manifest_dir(&manifest);

            let id = ProductId::new(id);
            let product = store.product(&id).await?;
            let mut controller = ProductFormController::edit(store, &product);
            apply_manifest(&mut controller, parsed, base_dir).await?;
            expect_saved(controller.submit().await?)?;
            info!("Product {id} updated");
        }
        ProductAction::Delete { id, yes } => {
            require_yes(yes, &format!("product {id}"))?;
            let id = ProductId::new(id);
            store.delete_product(&id).await?;
            info!("Deleted product {id}");
        }
    }
    Ok(())
}

async fn load_manifest(path: &Path) -> Result<ProductManifest, CliError> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_yaml::from_str(&content)?)
}

fn manifest_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

/// Replay a manifest onto the form controller, loading referenced images.
async fn apply_manifest(
    controller: &mut ProductFormController,
    manifest: ProductManifest,
    base_dir: &Path,
) -> Result<(), CliError> {
    controller.set_name(manifest.name);
    controller.set_category(Some(CategoryId::new(manifest.category)));
    controller.set_model(Some(ModelId::new(manifest.model)));
    if let Some(description) = manifest.description {
        controller.set_description(description);
    }
    if let Some(doors) = manifest.number_of_doors {
        controller.set_number_of_doors(doors);
    }
    if let Some(count) = manifest.color_options_count {
        controller.set_color_options_count(count);
    }
    controller.set_price(manifest.price);
    controller.set_mrp(manifest.mrp);
    if let Some(material) = manifest.material {
        controller.set_material(material);
    }
    if let Some(warranty) = manifest.warranty {
        controller.set_warranty(warranty);
    }
    if let Some(paint_type) = manifest.paint_type {
        controller.set_paint_type(paint_type);
    }
    if let Some(card_image) = manifest.card_image {
        let upload = load_image(&base_dir.join(card_image)).await?;
        controller.set_card_image(ImageSource::Upload(upload));
    }

    if !manifest.colors.is_empty() {
        // Manifest variants replace whatever the draft carried
        while !controller.draft().colors.is_empty() {
            controller.remove_color_variant(0);
        }
        for (index, color) in manifest.colors.into_iter().enumerate() {
            controller.add_color_variant();
            controller.set_color_name(index, color.name);
            controller.set_color_body(index, color.body);
            if let Some(door) = color.door {
                controller.set_color_door(index, door);
            }
            controller.set_color_price(index, color.price);
            controller.set_color_mrp(index, color.mrp);
            if let Some(available) = color.available {
                controller.set_color_available(index, available);
            }
            let mut uploads = Vec::with_capacity(color.images.len());
            for image in &color.images {
                uploads.push(load_image(&base_dir.join(image)).await?);
            }
            controller.add_color_images(index, uploads);
        }
    }
    Ok(())
}
