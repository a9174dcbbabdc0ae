//! Multipart submission payloads.
//!
//! A [`MultipartPayload`] is the assembled request body in inspectable
//! form: ordered text fields plus named file parts. It converts to a
//! [`reqwest::multipart::Form`] only at the wire.
//!
//! Part naming contract for product saves:
//! - scalar fields go as text parts under their wire names
//! - `colors` is one JSON text part holding every variant's scalar
//!   fields, without images
//! - each staged upload goes as `color_{variant}_image_{position}`,
//!   where `position` indexes the variant's full gallery, so uploads
//!   keep their slot among already-hosted URLs

use rust_decimal::prelude::ToPrimitive;

use crate::form::draft::{ImageSource, ImageUpload, ProductDraft};

/// One file part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Part name on the wire.
    pub name: String,
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// An assembled multipart body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    /// Text parts in append order. Names may repeat.
    pub texts: Vec<(String, String)>,
    /// File parts in append order.
    pub files: Vec<FilePart>,
}

impl MultipartPayload {
    /// Append a text part.
    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.texts.push((name.into(), value.into()));
    }

    /// Append a file part.
    pub fn file(&mut self, name: impl Into<String>, upload: ImageUpload) {
        self.files.push(FilePart {
            name: name.into(),
            file_name: upload.file_name,
            mime_type: upload.mime_type,
            data: upload.data,
        });
    }

    /// First text part with this name, if any.
    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|(part, _)| part == name)
            .map(|(_, value)| value.as_str())
    }

    /// Convert to the wire form.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if a file part carries an invalid MIME
    /// type string.
    pub fn into_form(self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.texts {
            form = form.text(name, value);
        }
        for file in self.files {
            let part = reqwest::multipart::Part::bytes(file.data)
                .file_name(file.file_name)
                .mime_str(&file.mime_type)?;
            form = form.part(file.name, part);
        }
        Ok(form)
    }
}

impl ProductDraft {
    /// Build the multipart body for saving this draft.
    ///
    /// Always-present text parts: `name`, `modelId`, `categoryId`,
    /// `numberOfDoors`, `colorOptionsCount`, `price`, `mrp`. Optional
    /// text fields are omitted when empty. The card image becomes a file
    /// part only when staged as an upload; a URL means the backend
    /// already has it.
    #[must_use]
    pub fn to_payload(&self) -> MultipartPayload {
        let mut payload = MultipartPayload::default();

        payload.text("name", &self.name);
        payload.text(
            "modelId",
            self.model_id.as_ref().map_or("", |id| id.as_str()),
        );
        payload.text(
            "categoryId",
            self.category_id.as_ref().map_or("", |id| id.as_str()),
        );
        if !self.description.is_empty() {
            payload.text("description", &self.description);
        }
        payload.text("numberOfDoors", self.number_of_doors.to_string());
        payload.text("colorOptionsCount", self.color_options_count.to_string());
        payload.text("price", self.price.to_string());
        payload.text("mrp", self.mrp.to_string());
        if !self.material.is_empty() {
            payload.text("material", &self.material);
        }
        if !self.warranty.is_empty() {
            payload.text("warranty", &self.warranty);
        }
        if !self.paint_type.is_empty() {
            payload.text("paintType", &self.paint_type);
        }

        if let Some(ImageSource::Upload(upload)) = &self.card_image {
            payload.file("cardImage", upload.clone());
        }

        if !self.colors.is_empty() {
            let records: Vec<serde_json::Value> = self
                .colors
                .iter()
                .map(|color| {
                    serde_json::json!({
                        "name": color.name,
                        "body": color.body,
                        "door": color.door,
                        "price": decimal_to_json_number(color.price.unwrap_or_default()),
                        "mrp": decimal_to_json_number(color.mrp.unwrap_or_default()),
                        "available": color.available,
                    })
                })
                .collect();
            payload.text("colors", serde_json::Value::Array(records).to_string());

            for (index, color) in self.colors.iter().enumerate() {
                for (image_index, image) in color.images.iter().enumerate() {
                    if let ImageSource::Upload(upload) = image {
                        payload.file(
                            format!("color_{index}_image_{image_index}"),
                            upload.clone(),
                        );
                    }
                }
            }
        }

        payload
    }
}

fn decimal_to_json_number(value: rust_decimal::Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use armoire_core::{CategoryId, ModelId};
    use rust_decimal::Decimal;

    fn upload(name: &str) -> ImageUpload {
        ImageUpload::new(name, "image/jpeg", vec![0xFF, 0xD8])
    }

    fn filled_draft() -> ProductDraft {
        let mut draft = ProductDraft::new();
        draft.name = "Slimline Wardrobe".to_string();
        draft.category_id = Some(CategoryId::new("cat1"));
        draft.model_id = Some(ModelId::new("m1"));
        draft.description = "Compact steel wardrobe".to_string();
        draft.price = Decimal::new(89_995, 1);
        draft.mrp = Decimal::from(10_999_u32);
        draft.card_image = Some(ImageSource::Upload(upload("card.jpg")));
        draft.add_color_variant();
        draft.colors[0].name = "Graphite".to_string();
        draft.colors[0].body = "Grey".to_string();
        draft.add_color_images(0, [upload("a.jpg")]);
        draft
    }

    #[test]
    fn test_scalar_parts_present() {
        let payload = filled_draft().to_payload();
        assert_eq!(payload.text_value("name"), Some("Slimline Wardrobe"));
        assert_eq!(payload.text_value("modelId"), Some("m1"));
        assert_eq!(payload.text_value("categoryId"), Some("cat1"));
        assert_eq!(payload.text_value("numberOfDoors"), Some("1"));
        assert_eq!(payload.text_value("colorOptionsCount"), Some("0"));
        assert_eq!(payload.text_value("price"), Some("8999.5"));
        assert_eq!(payload.text_value("mrp"), Some("10999"));
        assert_eq!(payload.text_value("material"), Some("Steel"));
        assert_eq!(payload.text_value("warranty"), Some("5 Years"));
        assert_eq!(payload.text_value("paintType"), Some("Powder Coating"));
    }

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let mut draft = filled_draft();
        draft.description.clear();
        draft.material.clear();
        draft.warranty.clear();
        draft.paint_type.clear();

        let payload = draft.to_payload();
        assert_eq!(payload.text_value("description"), None);
        assert_eq!(payload.text_value("material"), None);
        assert_eq!(payload.text_value("warranty"), None);
        assert_eq!(payload.text_value("paintType"), None);
        // Required parts stay even when blank
        assert_eq!(payload.text_value("mrp"), Some("10999"));
    }

    #[test]
    fn test_unselected_taxonomy_submits_empty_strings() {
        let payload = ProductDraft::new().to_payload();
        assert_eq!(payload.text_value("modelId"), Some(""));
        assert_eq!(payload.text_value("categoryId"), Some(""));
    }

    #[test]
    fn test_card_image_url_is_not_resubmitted() {
        let mut draft = filled_draft();
        draft.card_image = Some(ImageSource::Url(
            "https://cdn.example.com/card.jpg".to_string(),
        ));

        let payload = draft.to_payload();
        assert!(payload.files.iter().all(|file| file.name != "cardImage"));
    }

    #[test]
    fn test_colors_json_excludes_images_and_fills_defaults() {
        let payload = filled_draft().to_payload();
        let colors: serde_json::Value =
            serde_json::from_str(payload.text_value("colors").unwrap()).unwrap();

        let record = &colors[0];
        assert_eq!(record["name"], "Graphite");
        assert_eq!(record["body"], "Grey");
        assert_eq!(record["door"], "");
        assert_eq!(record["price"], 0.0);
        assert_eq!(record["mrp"], 0.0);
        assert_eq!(record["available"], true);
        assert!(record.get("images").is_none());
    }

    #[test]
    fn test_no_colors_part_without_variants() {
        let payload = ProductDraft::new().to_payload();
        assert_eq!(payload.text_value("colors"), None);
    }

    #[test]
    fn test_upload_parts_index_into_full_gallery() {
        let mut draft = filled_draft();
        // First variant: hosted URL at 0, upload at 1
        draft.colors[0].images.insert(
            0,
            ImageSource::Url("https://cdn.example.com/a.jpg".to_string()),
        );
        // Second variant: upload at 0
        draft.add_color_variant();
        draft.colors[1].name = "Ivory".to_string();
        draft.colors[1].body = "White".to_string();
        draft.add_color_images(1, [upload("b.jpg")]);

        let payload = draft.to_payload();
        let names: Vec<&str> = payload
            .files
            .iter()
            .map(|file| file.name.as_str())
            .collect();
        assert_eq!(names, ["cardImage", "color_0_image_1", "color_1_image_0"]);
    }

    #[test]
    fn test_into_form_accepts_payload() {
        let form = filled_draft().to_payload().into_form();
        assert!(form.is_ok());
    }
}
