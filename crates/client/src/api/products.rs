//! Product and color variant endpoints.
//!
//! Product create/update and the color variant mutations submit multipart
//! bodies carrying both scalar fields and image files. The payloads are
//! assembled by [`crate::form`] and [`crate::color_editor`] and converted
//! to wire form here.

use armoire_core::{CategoryId, ColorId, ModelId, Pagination, Product, ProductId};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ApiClient, Page};
use crate::error::ApiError;
use crate::form::multipart::MultipartPayload;

/// Query parameters for the product list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Server-side name filter, omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
    /// Restrict to one category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// Restrict to one model verity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<ModelId>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            limit: 10,
            category_id: None,
            model_id: None,
        }
    }
}

#[derive(Deserialize)]
struct ProductsEnvelope {
    products: Vec<Product>,
    pagination: Pagination,
}

#[derive(Deserialize)]
struct ProductEnvelope {
    product: Product,
}

#[derive(Serialize)]
struct ImageOrderPayload<'a> {
    #[serde(rename = "newOrder")]
    new_order: &'a [String],
}

impl ApiClient {
    /// List products with search, pagination, and taxonomy filters.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self))]
    pub async fn products(&self, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        let builder = self.request(Method::GET, "/products").await?.query(query);
        let envelope: ProductsEnvelope = self.send(builder, "products response").await?;
        Ok(Page {
            items: envelope.products,
            pagination: envelope.pagination,
        })
    }

    /// Fetch one product with populated references and color variants.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let builder = self
            .request(Method::GET, &format!("/products/{id}"))
            .await?;
        let envelope: ProductEnvelope = self.send(builder, "product response").await?;
        Ok(envelope.product)
    }

    /// Create a product from a multipart payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails; `ApiError::Api` carries the
    /// backend's validation message when the payload is rejected.
    #[instrument(skip(self, payload))]
    pub async fn create_product(&self, payload: MultipartPayload) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/products")
            .await?
            .multipart(payload.into_form()?);
        self.send_ok(builder, "create product response").await
    }

    /// Update a product from a multipart payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, payload), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        payload: MultipartPayload,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/products/{id}"))
            .await?
            .multipart(payload.into_form()?);
        self.send_ok(builder, "update product response").await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let builder = self
            .request(Method::DELETE, &format!("/products/{id}"))
            .await?;
        self.send_ok(builder, "delete product response").await
    }

    // =========================================================================
    // Color Variants
    // =========================================================================

    /// Add a color variant to a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, payload), fields(product_id = %product_id))]
    pub async fn add_color(
        &self,
        product_id: &ProductId,
        payload: MultipartPayload,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, &format!("/products/{product_id}/colors"))
            .await?
            .multipart(payload.into_form()?);
        self.send_ok(builder, "add color response").await
    }

    /// Update a color variant's fields and images.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, payload), fields(product_id = %product_id, color_id = %color_id))]
    pub async fn update_color(
        &self,
        product_id: &ProductId,
        color_id: &ColorId,
        payload: MultipartPayload,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(
                Method::PUT,
                &format!("/products/{product_id}/colors/{color_id}"),
            )
            .await?
            .multipart(payload.into_form()?);
        self.send_ok(builder, "update color response").await
    }

    /// Delete a color variant.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id, color_id = %color_id))]
    pub async fn delete_color(
        &self,
        product_id: &ProductId,
        color_id: &ColorId,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(
                Method::DELETE,
                &format!("/products/{product_id}/colors/{color_id}"),
            )
            .await?;
        self.send_ok(builder, "delete color response").await
    }

    /// Persist a new display order for a color variant's images.
    ///
    /// `new_order` must hold the variant's image URLs in the desired order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, new_order), fields(product_id = %product_id, color_id = %color_id))]
    pub async fn reorder_color_images(
        &self,
        product_id: &ProductId,
        color_id: &ColorId,
        new_order: &[String],
    ) -> Result<(), ApiError> {
        let builder = self
            .request(
                Method::PUT,
                &format!("/products/{product_id}/colors/{color_id}/images-order"),
            )
            .await?
            .json(&ImageOrderPayload { new_order });
        self.send_ok(builder, "reorder images response").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_query_serializes_filters() {
        let http = reqwest::Client::new();
        let query = ProductQuery {
            search: Some("wardrobe".to_string()),
            page: 1,
            limit: 10,
            category_id: Some(CategoryId::new("66c7f3")),
            model_id: None,
        };
        let request = http
            .get("https://api.example.com/api/v1/products")
            .query(&query)
            .build()
            .unwrap();
        assert_eq!(
            request.url().query(),
            Some("search=wardrobe&page=1&limit=10&categoryId=66c7f3")
        );
    }

    #[test]
    fn test_image_order_payload_uses_wire_key() {
        let order = vec!["https://cdn.example.com/a.jpg".to_string()];
        let json = serde_json::to_value(ImageOrderPayload { new_order: &order }).unwrap();
        assert!(json.get("newOrder").is_some());
    }
}
