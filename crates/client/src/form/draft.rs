//! Owned product form state.
//!
//! A [`ProductDraft`] holds everything the product form edits, detached
//! from any rendering concern. Transitions are plain methods; coupled
//! rules (category change resets the model selection) live here so they
//! hold no matter which surface drives the form.

use armoire_core::{CategoryId, ModelId, Product};
use rust_decimal::Decimal;

const DEFAULT_DOORS: u32 = 1;
const DEFAULT_MATERIAL: &str = "Steel";
const DEFAULT_WARRANTY: &str = "5 Years";
const DEFAULT_PAINT_TYPE: &str = "Powder Coating";

/// An image file staged for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name sent with the multipart part.
    pub file_name: String,
    /// MIME type of the file contents.
    pub mime_type: String,
    /// Raw file bytes.
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// One gallery entry: an already-hosted URL or a staged upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Image already stored by the backend.
    Url(String),
    /// New file to submit with the next save.
    Upload(ImageUpload),
}

impl ImageSource {
    /// Whether this entry still needs uploading.
    #[must_use]
    pub fn is_upload(&self) -> bool {
        matches!(self, Self::Upload(_))
    }
}

/// Draft of one color variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorVariantDraft {
    pub name: String,
    pub body: String,
    pub door: String,
    /// Unset until the user enters one; submitted as 0 when unset.
    pub price: Option<Decimal>,
    /// Unset until the user enters one; submitted as 0 when unset.
    pub mrp: Option<Decimal>,
    pub available: bool,
    /// Gallery in display order. Uploads keep their position among URLs.
    pub images: Vec<ImageSource>,
}

impl Default for ColorVariantDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            body: String::new(),
            door: String::new(),
            price: None,
            mrp: None,
            available: true,
            images: Vec::new(),
        }
    }
}

/// Draft of a product being created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub model_id: Option<ModelId>,
    pub category_id: Option<CategoryId>,
    pub description: String,
    pub number_of_doors: u32,
    pub color_options_count: u32,
    pub price: Decimal,
    pub mrp: Decimal,
    pub material: String,
    pub warranty: String,
    pub paint_type: String,
    pub card_image: Option<ImageSource>,
    pub colors: Vec<ColorVariantDraft>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            model_id: None,
            category_id: None,
            description: String::new(),
            number_of_doors: DEFAULT_DOORS,
            color_options_count: 0,
            price: Decimal::ZERO,
            mrp: Decimal::ZERO,
            material: DEFAULT_MATERIAL.to_string(),
            warranty: DEFAULT_WARRANTY.to_string(),
            paint_type: DEFAULT_PAINT_TYPE.to_string(),
            card_image: None,
            colors: Vec::new(),
        }
    }
}

impl ProductDraft {
    /// Fresh draft with form defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from a stored product for editing.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            model_id: Some(product.model.id.clone()),
            category_id: Some(product.category.id.clone()),
            description: product.description.clone(),
            number_of_doors: product.number_of_doors,
            color_options_count: product.color_options_count,
            price: product.price,
            mrp: product.mrp,
            material: product.material.clone(),
            warranty: product.warranty.clone(),
            paint_type: product.paint_type.clone(),
            card_image: (!product.card_image.is_empty())
                .then(|| ImageSource::Url(product.card_image.clone())),
            colors: product
                .colors
                .iter()
                .map(|color| ColorVariantDraft {
                    name: color.name.clone(),
                    body: color.body.clone(),
                    door: color.door.clone().unwrap_or_default(),
                    price: Some(color.price),
                    mrp: Some(color.mrp),
                    available: color.available,
                    images: color
                        .images
                        .iter()
                        .map(|url| ImageSource::Url(url.clone()))
                        .collect(),
                })
                .collect(),
        }
    }

    /// Select a category. Always resets the model selection, since models
    /// belong to one category.
    pub fn set_category(&mut self, category_id: Option<CategoryId>) {
        self.category_id = category_id;
        self.model_id = None;
    }

    /// Stage the card image.
    pub fn set_card_image(&mut self, image: ImageSource) {
        self.card_image = Some(image);
    }

    /// Append an empty color variant.
    pub fn add_color_variant(&mut self) {
        self.colors.push(ColorVariantDraft::default());
    }

    /// Remove the variant at `index`. Out-of-range indices are ignored.
    pub fn remove_color_variant(&mut self, index: usize) {
        if index < self.colors.len() {
            self.colors.remove(index);
        }
    }

    /// Stage uploads at the end of a variant's gallery.
    pub fn add_color_images(
        &mut self,
        index: usize,
        images: impl IntoIterator<Item = ImageUpload>,
    ) {
        if let Some(color) = self.colors.get_mut(index) {
            color.images.extend(images.into_iter().map(ImageSource::Upload));
        }
    }

    /// Drop one gallery entry. Out-of-range indices are ignored.
    pub fn remove_color_image(&mut self, index: usize, image_index: usize) {
        if let Some(color) = self.colors.get_mut(index)
            && image_index < color.images.len()
        {
            color.images.remove(image_index);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn upload(name: &str) -> ImageUpload {
        ImageUpload::new(name, "image/jpeg", vec![0xFF, 0xD8])
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = ProductDraft::new();
        assert_eq!(draft.number_of_doors, 1);
        assert_eq!(draft.color_options_count, 0);
        assert_eq!(draft.price, Decimal::ZERO);
        assert_eq!(draft.material, "Steel");
        assert_eq!(draft.warranty, "5 Years");
        assert_eq!(draft.paint_type, "Powder Coating");
        assert!(draft.card_image.is_none());
        assert!(draft.colors.is_empty());
    }

    #[test]
    fn test_new_variant_defaults() {
        let variant = ColorVariantDraft::default();
        assert!(variant.available);
        assert!(variant.price.is_none());
        assert!(variant.images.is_empty());
    }

    #[test]
    fn test_category_change_resets_model() {
        let mut draft = ProductDraft::new();
        draft.set_category(Some(CategoryId::new("cat1")));
        draft.model_id = Some(ModelId::new("m1"));

        draft.set_category(Some(CategoryId::new("cat2")));
        assert_eq!(draft.category_id, Some(CategoryId::new("cat2")));
        assert!(draft.model_id.is_none());
    }

    #[test]
    fn test_add_and_remove_variant() {
        let mut draft = ProductDraft::new();
        draft.add_color_variant();
        draft.add_color_variant();
        draft.colors[1].name = "Ivory".to_string();

        draft.remove_color_variant(0);
        assert_eq!(draft.colors.len(), 1);
        assert_eq!(draft.colors[0].name, "Ivory");

        // Out of range is a no-op
        draft.remove_color_variant(5);
        assert_eq!(draft.colors.len(), 1);
    }

    #[test]
    fn test_image_staging_keeps_order() {
        let mut draft = ProductDraft::new();
        draft.add_color_variant();
        draft.colors[0].images.push(ImageSource::Url(
            "https://cdn.example.com/a.jpg".to_string(),
        ));
        draft.add_color_images(0, [upload("b.jpg")]);

        assert_eq!(draft.colors[0].images.len(), 2);
        assert!(!draft.colors[0].images[0].is_upload());
        assert!(draft.colors[0].images[1].is_upload());

        draft.remove_color_image(0, 0);
        assert_eq!(draft.colors[0].images.len(), 1);
        assert!(draft.colors[0].images[0].is_upload());
    }

    #[test]
    fn test_from_product_seeds_edit_draft() {
        let json = r#"{
            "_id": "66e1a2",
            "name": "Slimline 2-Door Wardrobe",
            "modelId": { "_id": "66d901", "name": "Slimline" },
            "categoryId": { "_id": "66c7f3", "categoryName": "Wardrobes" },
            "description": "Compact steel wardrobe",
            "numberOfDoors": 2,
            "price": 8999.5,
            "mrp": 10999,
            "colors": [{
                "name": "Graphite",
                "body": "Grey",
                "images": ["https://cdn.example.com/a.jpg"],
                "price": 8999.5,
                "mrp": 10999
            }],
            "cardImage": "https://cdn.example.com/card.jpg"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        let draft = ProductDraft::from_product(&product);
        assert_eq!(draft.name, "Slimline 2-Door Wardrobe");
        assert_eq!(draft.model_id, Some(ModelId::new("66d901")));
        assert_eq!(
            draft.card_image,
            Some(ImageSource::Url("https://cdn.example.com/card.jpg".to_string()))
        );
        assert_eq!(draft.colors.len(), 1);
        assert_eq!(draft.colors[0].door, "");
        assert_eq!(draft.colors[0].price, Some(Decimal::new(89_995, 1)));
        assert!(!draft.colors[0].images[0].is_upload());
    }
}
