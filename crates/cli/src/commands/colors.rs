//! Color variant commands for persisted products.
//!
//! # Usage
//!
//! ```bash
//! armoire colors add <PRODUCT_ID> -n Graphite -b Grey -i graphite.jpg
//! armoire colors update <PRODUCT_ID> <COLOR_ID> --price 8499 \
//!     --remove-image https://cdn.example.com/old.jpg -i new.jpg
//! armoire colors delete <PRODUCT_ID> <COLOR_ID> --yes
//! armoire colors reorder <PRODUCT_ID> <COLOR_ID> --from 0 --to 2
//! ```

use std::path::PathBuf;

use clap::Subcommand;
use rust_decimal::Decimal;
use tracing::info;

use armoire_client::color_editor::ColorEditor;
use armoire_client::reorder::ImageOrderer;
use armoire_core::{ColorId, ProductId};

use super::{CliError, expect_saved, load_image, require_yes, store};

#[derive(Subcommand)]
pub enum ColorAction {
    /// Add a color variant to a product
    Add {
        /// Product id
        product: String,

        /// Color name
        #[arg(short, long)]
        name: String,

        /// Body color
        #[arg(short, long)]
        body: String,

        /// Door color
        #[arg(short, long)]
        door: Option<String>,

        /// Variant price
        #[arg(long)]
        price: Option<Decimal>,

        /// Variant MRP
        #[arg(long)]
        mrp: Option<Decimal>,

        /// Mark the variant unavailable
        #[arg(long)]
        unavailable: bool,

        /// Image file to upload (repeatable)
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,
    },
    /// Update a color variant; omitted fields keep their stored value
    Update {
        /// Product id
        product: String,

        /// Color id
        color: String,

        /// Color name
        #[arg(short, long)]
        name: Option<String>,

        /// Body color
        #[arg(short, long)]
        body: Option<String>,

        /// Door color
        #[arg(short, long)]
        door: Option<String>,

        /// Variant price
        #[arg(long)]
        price: Option<Decimal>,

        /// Variant MRP
        #[arg(long)]
        mrp: Option<Decimal>,

        /// Mark the variant available
        #[arg(long, conflicts_with = "unavailable")]
        available: bool,

        /// Mark the variant unavailable
        #[arg(long)]
        unavailable: bool,

        /// Image file to upload (repeatable)
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,

        /// Hosted image URL to remove (repeatable)
        #[arg(long = "remove-image")]
        remove_images: Vec<String>,
    },
    /// Delete a color variant
    Delete {
        /// Product id
        product: String,

        /// Color id
        color: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Move an image within a variant's gallery
    Reorder {
        /// Product id
        product: String,

        /// Color id
        color: String,

        /// Current position of the image to move (0-based)
        #[arg(long)]
        from: usize,

        /// Position it should end up at (0-based)
        #[arg(long)]
        to: usize,
    },
}

pub async fn run(action: ColorAction) -> Result<(), CliError> {
    let store = store().await?;

    match action {
        ColorAction::Add {
            product,
            name,
            body,
            door,
            price,
            mrp,
            unavailable,
            images,
        } => {
            let mut editor = ColorEditor::add(store, ProductId::new(product));
            editor.set_name(name);
            editor.set_body(body);
            if let Some(door) = door {
                editor.set_door(door);
            }
            editor.set_price(price);
            editor.set_mrp(mrp);
            editor.set_available(!unavailable);

            let mut uploads = Vec::with_capacity(images.len());
            for image in &images {
                uploads.push(load_image(image).await?);
            }
            editor.add_new_images(uploads);

            expect_saved(editor.submit().await?)?;
            info!("Color added");
        }
        ColorAction::Update {
            product,
            color,
            name,
            body,
            door,
            price,
            mrp,
            available,
            unavailable,
            images,
            remove_images,
        } => {
            let product_id = ProductId::new(product);
            let color_id = ColorId::new(color);

            let stored = store.product(&product_id).await?;
            let Some(variant) = stored.color(&color_id) else {
                return Err(CliError::InvalidInput(format!(
                    "no color {color_id} on product {product_id}"
                )));
            };

            let mut editor = ColorEditor::edit(store, product_id, variant);
            if let Some(name) = name {
                editor.set_name(name);
            }
            if let Some(body) = body {
                editor.set_body(body);
            }
            if let Some(door) = door {
                editor.set_door(door);
            }
            if price.is_some() {
                editor.set_price(price);
            }
            if mrp.is_some() {
                editor.set_mrp(mrp);
            }
            if available {
                editor.set_available(true);
            } else if unavailable {
                editor.set_available(false);
            }
            for url in &remove_images {
                editor.remove_existing_image(url);
            }

            let mut uploads = Vec::with_capacity(images.len());
            for image in &images {
                uploads.push(load_image(image).await?);
            }
            editor.add_new_images(uploads);

            expect_saved(editor.submit().await?)?;
            info!("Color {color_id} updated");
        }
        ColorAction::Delete {
            product,
            color,
            yes,
        } => {
            require_yes(yes, &format!("color {color} of product {product}"))?;
            let product_id = ProductId::new(product);
            let color_id = ColorId::new(color);
            store.delete_color(&product_id, &color_id).await?;
            info!("Deleted color {color_id}");
        }
        ColorAction::Reorder {
            product,
            color,
            from,
            to,
        } => {
            let product_id = ProductId::new(product);
            let color_id = ColorId::new(color);

            let stored = store.product(&product_id).await?;
            let Some(variant) = stored.color(&color_id) else {
                return Err(CliError::InvalidInput(format!(
                    "no color {color_id} on product {product_id}"
                )));
            };
            let images = variant.images.clone();

            let mut orderer = ImageOrderer::new(store, product_id, color_id, images);
            orderer.move_image(from, to);
            if !orderer.is_dirty() {
                info!("Order unchanged");
                return Ok(());
            }
            orderer.commit().await?;

            info!("New order:");
            for (index, url) in orderer.order().iter().enumerate() {
                info!("  {index}: {url}");
            }
        }
    }
    Ok(())
}
