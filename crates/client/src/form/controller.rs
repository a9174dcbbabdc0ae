//! Product form controller: draft, errors, and submission.
//!
//! Field setters clear the error slot of the field they touch, so a
//! message disappears as soon as the operator edits the offending input.
//! Submission validates first, surfaces the first message when blocked,
//! and guards against duplicate in-flight saves with an atomic flag
//! rather than relying on a disabled button.

use std::sync::atomic::{AtomicBool, Ordering};

use armoire_core::{CategoryId, ModelId, Product, ProductId};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::error::ApiError;
use crate::form::draft::{ImageSource, ImageUpload, ProductDraft};
use crate::form::validate::{ValidationErrors, validate};
use crate::store::CatalogStore;

/// Whether the form creates a new product or edits a stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

/// Result of a submit attempt that produced no transport error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend accepted the save.
    Saved,
    /// Validation blocked the request; `message` is the first error.
    Invalid { message: String },
    /// Another submission is still running; nothing was sent.
    AlreadyInFlight,
}

/// Clears the in-flight flag when the submission ends, even if the
/// future is dropped mid-await.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Owned state of the product form.
pub struct ProductFormController {
    store: CatalogStore,
    mode: FormMode,
    draft: ProductDraft,
    errors: ValidationErrors,
    in_flight: AtomicBool,
}

impl ProductFormController {
    /// Controller for creating a new product.
    #[must_use]
    pub fn create(store: CatalogStore) -> Self {
        Self {
            store,
            mode: FormMode::Create,
            draft: ProductDraft::new(),
            errors: ValidationErrors::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Controller editing a stored product, seeded from its current state.
    #[must_use]
    pub fn edit(store: CatalogStore, product: &Product) -> Self {
        Self {
            store,
            mode: FormMode::Edit(product.id.clone()),
            draft: ProductDraft::from_product(product),
            errors: ValidationErrors::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Whether a submission is currently running.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    // =========================================================================
    // Field Transitions
    // =========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.errors.product.name = None;
    }

    pub fn set_model(&mut self, model_id: Option<ModelId>) {
        self.draft.model_id = model_id;
        self.errors.product.model = None;
    }

    /// Select a category. The model selection resets, but a pending model
    /// error stays until the model field itself changes.
    pub fn set_category(&mut self, category_id: Option<CategoryId>) {
        self.draft.set_category(category_id);
        self.errors.product.category = None;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.errors.product.description = None;
    }

    pub fn set_number_of_doors(&mut self, doors: u32) {
        self.draft.number_of_doors = doors;
    }

    pub fn set_color_options_count(&mut self, count: u32) {
        self.draft.color_options_count = count;
    }

    pub fn set_price(&mut self, price: Decimal) {
        self.draft.price = price;
        self.errors.product.price = None;
    }

    pub fn set_mrp(&mut self, mrp: Decimal) {
        self.draft.mrp = mrp;
        self.errors.product.mrp = None;
    }

    pub fn set_material(&mut self, material: impl Into<String>) {
        self.draft.material = material.into();
    }

    pub fn set_warranty(&mut self, warranty: impl Into<String>) {
        self.draft.warranty = warranty.into();
    }

    pub fn set_paint_type(&mut self, paint_type: impl Into<String>) {
        self.draft.paint_type = paint_type.into();
    }

    pub fn set_card_image(&mut self, image: ImageSource) {
        self.draft.set_card_image(image);
        self.errors.product.card_image = None;
    }

    // =========================================================================
    // Color Variant Transitions
    // =========================================================================

    /// Append an empty variant and clear the no-variants error.
    pub fn add_color_variant(&mut self) {
        self.draft.add_color_variant();
        self.errors.product.colors = None;
    }

    /// Remove a variant. Its errors and those of every later variant are
    /// dropped; the next validation rebuilds them against the new indices.
    pub fn remove_color_variant(&mut self, index: usize) {
        self.draft.remove_color_variant(index);
        self.errors.variants.truncate(index);
    }

    pub fn set_color_name(&mut self, index: usize, name: impl Into<String>) {
        if let Some(color) = self.draft.colors.get_mut(index) {
            color.name = name.into();
            if let Some(slot) = self.errors.variants.get_mut(index) {
                slot.name = None;
            }
        }
    }

    pub fn set_color_body(&mut self, index: usize, body: impl Into<String>) {
        if let Some(color) = self.draft.colors.get_mut(index) {
            color.body = body.into();
            if let Some(slot) = self.errors.variants.get_mut(index) {
                slot.body = None;
            }
        }
    }

    pub fn set_color_door(&mut self, index: usize, door: impl Into<String>) {
        if let Some(color) = self.draft.colors.get_mut(index) {
            color.door = door.into();
        }
    }

    pub fn set_color_price(&mut self, index: usize, price: Option<Decimal>) {
        if let Some(color) = self.draft.colors.get_mut(index) {
            color.price = price;
        }
    }

    pub fn set_color_mrp(&mut self, index: usize, mrp: Option<Decimal>) {
        if let Some(color) = self.draft.colors.get_mut(index) {
            color.mrp = mrp;
        }
    }

    pub fn set_color_available(&mut self, index: usize, available: bool) {
        if let Some(color) = self.draft.colors.get_mut(index) {
            color.available = available;
        }
    }

    /// Stage uploads on a variant and clear its missing-image error.
    /// An empty selection changes nothing.
    pub fn add_color_images(&mut self, index: usize, images: Vec<ImageUpload>) {
        if images.is_empty() {
            return;
        }
        self.draft.add_color_images(index, images);
        if let Some(slot) = self.errors.variants.get_mut(index) {
            slot.images = None;
        }
    }

    pub fn remove_color_image(&mut self, index: usize, image_index: usize) {
        self.draft.remove_color_image(index, image_index);
    }

    // =========================================================================
    // Validation and Submission
    // =========================================================================

    /// Validate the draft, store the errors, and report whether it passed.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.draft);
        self.errors.is_empty()
    }

    /// Validate and save the draft.
    ///
    /// On a successful create the draft resets to form defaults; a
    /// successful edit keeps it. Validation failures block the request
    /// and report the first message. Transport and backend failures leave
    /// the draft untouched so the operator can retry.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request itself fails.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<SubmitOutcome, ApiError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(SubmitOutcome::AlreadyInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let errors = validate(&self.draft);
        if !errors.is_empty() {
            let message = errors
                .first_message()
                .unwrap_or("Validation error")
                .to_string();
            self.errors = errors;
            return Ok(SubmitOutcome::Invalid { message });
        }
        self.errors = ValidationErrors::default();

        let payload = self.draft.to_payload();
        match &self.mode {
            FormMode::Create => {
                self.store.create_product(payload).await?;
                self.draft = ProductDraft::new();
            }
            FormMode::Edit(id) => {
                self.store.update_product(id, payload).await?;
            }
        }
        Ok(SubmitOutcome::Saved)
    }
}
