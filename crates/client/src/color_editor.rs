//! Standalone color variant editor for the product detail view.
//!
//! Unlike the product form, which stages variants locally and saves them
//! with the product, this editor targets one variant's own endpoints:
//! adding a color to a stored product or updating one in place. Removed
//! hosted images are tracked by URL and sent as `removeImages[]` parts;
//! new uploads ride along as `images` file parts.

use std::sync::atomic::{AtomicBool, Ordering};

use armoire_core::{ColorId, ColorVariant, ProductId};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::error::ApiError;
use crate::form::SubmitOutcome;
use crate::form::draft::ImageUpload;
use crate::form::multipart::MultipartPayload;
use crate::store::CatalogStore;

/// Which endpoint a save targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit(ColorId),
}

/// Editable state of one color variant.
pub struct ColorEditor {
    store: CatalogStore,
    product_id: ProductId,
    mode: EditorMode,
    name: String,
    body: String,
    door: String,
    price: Option<Decimal>,
    mrp: Option<Decimal>,
    available: bool,
    existing_images: Vec<String>,
    removed_images: Vec<String>,
    new_images: Vec<ImageUpload>,
    in_flight: AtomicBool,
}

impl ColorEditor {
    /// Editor for adding a new color to a product.
    #[must_use]
    pub fn add(store: CatalogStore, product_id: ProductId) -> Self {
        Self {
            store,
            product_id,
            mode: EditorMode::Add,
            name: String::new(),
            body: String::new(),
            door: String::new(),
            price: None,
            mrp: None,
            available: true,
            existing_images: Vec::new(),
            removed_images: Vec::new(),
            new_images: Vec::new(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Editor seeded from a stored variant. A zero price or MRP seeds as
    /// an empty field. A variant the backend never assigned an id saves
    /// as a new color.
    #[must_use]
    pub fn edit(store: CatalogStore, product_id: ProductId, variant: &ColorVariant) -> Self {
        Self {
            store,
            product_id,
            mode: variant
                .id
                .clone()
                .map_or(EditorMode::Add, EditorMode::Edit),
            name: variant.name.clone(),
            body: variant.body.clone(),
            door: variant.door.clone().unwrap_or_default(),
            price: (!variant.price.is_zero()).then_some(variant.price),
            mrp: (!variant.mrp.is_zero()).then_some(variant.mrp),
            available: variant.available,
            existing_images: variant.images.clone(),
            removed_images: Vec::new(),
            new_images: Vec::new(),
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn door(&self) -> &str {
        &self.door
    }

    #[must_use]
    pub const fn price(&self) -> Option<Decimal> {
        self.price
    }

    #[must_use]
    pub const fn mrp(&self) -> Option<Decimal> {
        self.mrp
    }

    #[must_use]
    pub const fn available(&self) -> bool {
        self.available
    }

    /// Hosted images still attached to the variant.
    #[must_use]
    pub fn existing_images(&self) -> &[String] {
        &self.existing_images
    }

    /// Hosted images marked for removal on the next save.
    #[must_use]
    pub fn removed_images(&self) -> &[String] {
        &self.removed_images
    }

    /// Uploads staged for the next save.
    #[must_use]
    pub fn new_images(&self) -> &[ImageUpload] {
        &self.new_images
    }

    /// Whether a save is currently running.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn set_door(&mut self, door: impl Into<String>) {
        self.door = door.into();
    }

    pub fn set_price(&mut self, price: Option<Decimal>) {
        self.price = price;
    }

    pub fn set_mrp(&mut self, mrp: Option<Decimal>) {
        self.mrp = mrp;
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Mark a hosted image for removal. Unknown URLs change nothing.
    pub fn remove_existing_image(&mut self, url: &str) {
        let before = self.existing_images.len();
        self.existing_images.retain(|img| img != url);
        if self.existing_images.len() < before {
            self.removed_images.push(url.to_owned());
        }
    }

    /// Stage uploads. An empty selection changes nothing.
    pub fn add_new_images(&mut self, images: Vec<ImageUpload>) {
        self.new_images.extend(images);
    }

    /// Drop a staged upload. Out-of-range indices change nothing.
    pub fn remove_new_image(&mut self, index: usize) {
        if index < self.new_images.len() {
            self.new_images.remove(index);
        }
    }

    /// Images the variant would hold after a save.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.existing_images.len() + self.new_images.len()
    }

    /// First rule the current state breaks, if any.
    #[must_use]
    pub fn validate(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            return Some("Color name is required");
        }
        if self.body.trim().is_empty() {
            return Some("Body color is required");
        }
        if self.image_count() == 0 {
            return Some("At least one image is required");
        }
        None
    }

    /// Assemble the multipart body for the current state.
    #[must_use]
    pub fn payload(&self) -> MultipartPayload {
        let mut payload = MultipartPayload::default();
        payload.text("name", &self.name);
        payload.text("body", &self.body);
        payload.text("door", &self.door);
        payload.text(
            "price",
            self.price.map_or_else(|| "0".to_string(), |p| p.to_string()),
        );
        payload.text(
            "mrp",
            self.mrp.map_or_else(|| "0".to_string(), |m| m.to_string()),
        );
        payload.text("available", self.available.to_string());
        for url in &self.removed_images {
            payload.text("removeImages[]", url.clone());
        }
        for upload in &self.new_images {
            payload.file("images", upload.clone());
        }
        payload
    }

    /// Validate and save the variant.
    ///
    /// Editor state is untouched either way; on success the caller
    /// refetches the product, whose caches were already invalidated.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request itself fails.
    #[instrument(skip(self), fields(product_id = %self.product_id))]
    pub async fn submit(&self) -> Result<SubmitOutcome, ApiError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(SubmitOutcome::AlreadyInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        if let Some(message) = self.validate() {
            return Ok(SubmitOutcome::Invalid {
                message: message.to_string(),
            });
        }

        let payload = self.payload();
        match &self.mode {
            EditorMode::Add => self.store.add_color(&self.product_id, payload).await?,
            EditorMode::Edit(color_id) => {
                self.store
                    .update_color(&self.product_id, color_id, payload)
                    .await?;
            }
        }
        Ok(SubmitOutcome::Saved)
    }
}

/// Clears the in-flight flag when the save ends, even if the future is
/// dropped mid-await.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
