//! Product form validation.
//!
//! Validation is pure: it reads a draft and produces a typed error map,
//! never touching the draft. Message text matches what the backend's
//! operators already know from the admin screens.

use rust_decimal::Decimal;

use crate::form::draft::ProductDraft;

/// Errors on the product's scalar fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFieldErrors {
    pub name: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub mrp: Option<String>,
    pub card_image: Option<String>,
    /// Aggregate error when no variants exist at all.
    pub colors: Option<String>,
}

impl ProductFieldErrors {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.model.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.mrp.is_none()
            && self.card_image.is_none()
            && self.colors.is_none()
    }
}

/// Errors on one color variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantFieldErrors {
    pub name: Option<String>,
    pub body: Option<String>,
    pub images: Option<String>,
}

impl VariantFieldErrors {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.body.is_none() && self.images.is_none()
    }
}

/// Typed validation result for the whole form.
///
/// One slot per field instead of a string-keyed map, so clearing an error
/// when its field changes cannot miss through key drift.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub product: ProductFieldErrors,
    /// Indexed like the draft's variants. May be shorter when variants
    /// were added after the last validation.
    pub variants: Vec<VariantFieldErrors>,
}

impl ValidationErrors {
    /// Whether the draft passed validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.product.is_empty() && self.variants.iter().all(VariantFieldErrors::is_empty)
    }

    /// First error in display order, for the submit-blocked notification.
    ///
    /// Product fields come first in form order, then each variant's
    /// name, body, and images.
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        let product = &self.product;
        let product_slots = [
            &product.name,
            &product.model,
            &product.category,
            &product.description,
            &product.price,
            &product.mrp,
            &product.card_image,
            &product.colors,
        ];
        for slot in product_slots {
            if let Some(message) = slot {
                return Some(message);
            }
        }
        for variant in &self.variants {
            for slot in [&variant.name, &variant.body, &variant.images] {
                if let Some(message) = slot {
                    return Some(message);
                }
            }
        }
        None
    }
}

/// Validate a draft.
///
/// When `mrp` is below `price`, the below-price message replaces any
/// not-positive message in the `mrp` slot.
#[must_use]
pub fn validate(draft: &ProductDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    let product = &mut errors.product;

    if draft.name.trim().is_empty() {
        product.name = Some("Product name is required".to_string());
    }
    if draft.model_id.is_none() {
        product.model = Some("Please select a model".to_string());
    }
    if draft.category_id.is_none() {
        product.category = Some("Please select a category".to_string());
    }
    if draft.description.trim().is_empty() {
        product.description = Some("Description is required".to_string());
    }
    if draft.price <= Decimal::ZERO {
        product.price = Some("Price must be greater than 0".to_string());
    }
    if draft.mrp <= Decimal::ZERO {
        product.mrp = Some("MRP must be greater than 0".to_string());
    }
    if draft.mrp < draft.price {
        product.mrp = Some("MRP must be greater than or equal to price".to_string());
    }
    if draft.card_image.is_none() {
        product.card_image = Some("Product image is required".to_string());
    }

    if draft.colors.is_empty() {
        product.colors = Some("At least one color variant is required".to_string());
    } else {
        errors.variants = draft
            .colors
            .iter()
            .enumerate()
            .map(|(index, color)| {
                let mut variant = VariantFieldErrors::default();
                if color.name.trim().is_empty() {
                    variant.name =
                        Some(format!("Color name is required for variant {}", index + 1));
                }
                if color.body.trim().is_empty() {
                    variant.body =
                        Some(format!("Body color is required for variant {}", index + 1));
                }
                if color.images.is_empty() {
                    variant.images = Some(format!(
                        "At least one image is required for variant {}",
                        index + 1
                    ));
                }
                variant
            })
            .collect();
    }

    errors
}
