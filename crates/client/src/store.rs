//! Cacheable query layer over the HTTP gateway.
//!
//! Read endpoints are cached per query family with a short TTL so list
//! views and dropdowns stay snappy across navigation. Mutations write
//! through to the backend and invalidate the families whose contents they
//! may have changed, so the next read refetches. Errors never populate a
//! cache.
//!
//! Invalidation edges:
//! - category mutations touch category lists, category options, and both
//!   model families (models embed their category's name)
//! - model mutations touch model lists and model options
//! - product and color variant mutations touch product lists and that
//!   product's detail entry

use std::hash::Hash;
use std::time::Duration;

use armoire_core::{
    Category, CategoryId, CategoryRef, ColorId, ModelId, ModelRef, ModelVerity, Product, ProductId,
};
use moka::future::Cache;
use tracing::debug;

use crate::api::{ApiClient, ListQuery, Page, ProductQuery};
use crate::error::ApiError;
use crate::form::multipart::MultipartPayload;
use crate::session::Session;

fn cache<K, V>() -> Cache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build()
}

fn list_key(query: &ListQuery) -> String {
    format!(
        "page={}:limit={}:search={}",
        query.page,
        query.limit,
        query.search.as_deref().unwrap_or("")
    )
}

fn product_list_key(query: &ProductQuery) -> String {
    format!(
        "page={}:limit={}:category={}:model={}:search={}",
        query.page,
        query.limit,
        query.category_id.as_ref().map_or("", CategoryId::as_str),
        query.model_id.as_ref().map_or("", ModelId::as_str),
        query.search.as_deref().unwrap_or("")
    )
}

/// Cached catalog reads and write-through mutations.
///
/// Cheap to clone; clones share the caches and the underlying client.
#[derive(Clone)]
pub struct CatalogStore {
    client: ApiClient,
    categories: Cache<String, Page<Category>>,
    category_options: Cache<(), Vec<CategoryRef>>,
    models: Cache<String, Page<ModelVerity>>,
    model_options: Cache<CategoryId, Vec<ModelRef>>,
    products: Cache<String, Page<Product>>,
    product_details: Cache<ProductId, Product>,
}

impl CatalogStore {
    /// Wrap a gateway client with fresh caches.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            categories: cache(),
            category_options: cache(),
            models: cache(),
            model_options: cache(),
            products: cache(),
            product_details: cache(),
        }
    }

    /// The underlying gateway client.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Log in and start from empty caches.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the credentials are rejected or the session
    /// cannot be persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let session = self.client.login(email, password).await?;
        self.invalidate_everything();
        Ok(session)
    }

    /// Log out locally and drop all cached reads.
    pub async fn logout(&self) {
        self.client.logout().await;
        self.invalidate_everything();
    }

    /// The current login session, if any.
    pub async fn session(&self) -> Option<Session> {
        self.client.session().await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List categories, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend must be queried and the request
    /// fails.
    pub async fn categories(&self, query: &ListQuery) -> Result<Page<Category>, ApiError> {
        let key = list_key(query);
        if let Some(page) = self.categories.get(&key).await {
            debug!("Cache hit for categories");
            return Ok(page);
        }
        let page = self.client.categories(query).await?;
        self.categories.insert(key, page.clone()).await;
        Ok(page)
    }

    /// Category dropdown options, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend must be queried and the request
    /// fails.
    pub async fn category_options(&self) -> Result<Vec<CategoryRef>, ApiError> {
        if let Some(options) = self.category_options.get(&()).await {
            debug!("Cache hit for category options");
            return Ok(options);
        }
        let options = self.client.category_options().await?;
        self.category_options.insert((), options.clone()).await;
        Ok(options)
    }

    /// Create a category and invalidate everything that lists one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, ApiError> {
        let category = self.client.create_category(name, description).await?;
        self.invalidate_taxonomy();
        Ok(category)
    }

    /// Update a category and invalidate everything that lists one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update_category(
        &self,
        id: &CategoryId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, ApiError> {
        let category = self.client.update_category(id, name, description).await?;
        self.invalidate_taxonomy();
        Ok(category)
    }

    /// Delete a category and invalidate everything that lists one.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), ApiError> {
        self.client.delete_category(id).await?;
        self.invalidate_taxonomy();
        Ok(())
    }

    // =========================================================================
    // Models
    // =========================================================================

    /// List model verities, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend must be queried and the request
    /// fails.
    pub async fn models(&self, query: &ListQuery) -> Result<Page<ModelVerity>, ApiError> {
        let key = list_key(query);
        if let Some(page) = self.models.get(&key).await {
            debug!("Cache hit for models");
            return Ok(page);
        }
        let page = self.client.models(query).await?;
        self.models.insert(key, page.clone()).await;
        Ok(page)
    }

    /// Model dropdown options for one category, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend must be queried and the request
    /// fails.
    pub async fn model_options(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<ModelRef>, ApiError> {
        if let Some(options) = self.model_options.get(category_id).await {
            debug!("Cache hit for model options");
            return Ok(options);
        }
        let options = self.client.model_options(category_id).await?;
        self.model_options
            .insert(category_id.clone(), options.clone())
            .await;
        Ok(options)
    }

    /// Create a model verity and invalidate the model families.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn create_model(
        &self,
        name: &str,
        description: Option<&str>,
        category_id: &CategoryId,
    ) -> Result<ModelVerity, ApiError> {
        let model = self
            .client
            .create_model(name, description, category_id)
            .await?;
        self.invalidate_models();
        Ok(model)
    }

    /// Update a model verity and invalidate the model families.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update_model(
        &self,
        id: &ModelId,
        name: &str,
        description: Option<&str>,
        category_id: &CategoryId,
    ) -> Result<ModelVerity, ApiError> {
        let model = self
            .client
            .update_model(id, name, description, category_id)
            .await?;
        self.invalidate_models();
        Ok(model)
    }

    /// Delete a model verity and invalidate the model families.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_model(&self, id: &ModelId) -> Result<(), ApiError> {
        self.client.delete_model(id).await?;
        self.invalidate_models();
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List products, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend must be queried and the request
    /// fails.
    pub async fn products(&self, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        let key = product_list_key(query);
        if let Some(page) = self.products.get(&key).await {
            debug!("Cache hit for products");
            return Ok(page);
        }
        let page = self.client.products(query).await?;
        self.products.insert(key, page.clone()).await;
        Ok(page)
    }

    /// Fetch one product, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend must be queried and the request
    /// fails.
    pub async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        if let Some(product) = self.product_details.get(id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }
        let product = self.client.product(id).await?;
        self.product_details
            .insert(id.clone(), product.clone())
            .await;
        Ok(product)
    }

    /// Create a product and invalidate product lists.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn create_product(&self, payload: MultipartPayload) -> Result<(), ApiError> {
        self.client.create_product(payload).await?;
        self.products.invalidate_all();
        Ok(())
    }

    /// Update a product and invalidate its cached reads.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update_product(
        &self,
        id: &ProductId,
        payload: MultipartPayload,
    ) -> Result<(), ApiError> {
        self.client.update_product(id, payload).await?;
        self.invalidate_product(id).await;
        Ok(())
    }

    /// Delete a product and invalidate its cached reads.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.client.delete_product(id).await?;
        self.invalidate_product(id).await;
        Ok(())
    }

    // =========================================================================
    // Color Variants
    // =========================================================================

    /// Add a color variant and invalidate the product's cached reads.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn add_color(
        &self,
        product_id: &ProductId,
        payload: MultipartPayload,
    ) -> Result<(), ApiError> {
        self.client.add_color(product_id, payload).await?;
        self.invalidate_product(product_id).await;
        Ok(())
    }

    /// Update a color variant and invalidate the product's cached reads.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update_color(
        &self,
        product_id: &ProductId,
        color_id: &ColorId,
        payload: MultipartPayload,
    ) -> Result<(), ApiError> {
        self.client
            .update_color(product_id, color_id, payload)
            .await?;
        self.invalidate_product(product_id).await;
        Ok(())
    }

    /// Delete a color variant and invalidate the product's cached reads.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete_color(
        &self,
        product_id: &ProductId,
        color_id: &ColorId,
    ) -> Result<(), ApiError> {
        self.client.delete_color(product_id, color_id).await?;
        self.invalidate_product(product_id).await;
        Ok(())
    }

    /// Persist a new image order and invalidate the product's cached reads.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn reorder_color_images(
        &self,
        product_id: &ProductId,
        color_id: &ColorId,
        new_order: &[String],
    ) -> Result<(), ApiError> {
        self.client
            .reorder_color_images(product_id, color_id, new_order)
            .await?;
        self.invalidate_product(product_id).await;
        Ok(())
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Models embed their category's name, so category changes spill over.
    fn invalidate_taxonomy(&self) {
        self.categories.invalidate_all();
        self.category_options.invalidate_all();
        self.invalidate_models();
    }

    fn invalidate_models(&self) {
        self.models.invalidate_all();
        self.model_options.invalidate_all();
    }

    async fn invalidate_product(&self, id: &ProductId) {
        self.products.invalidate_all();
        self.product_details.invalidate(id).await;
    }

    fn invalidate_everything(&self) {
        self.invalidate_taxonomy();
        self.products.invalidate_all();
        self.product_details.invalidate_all();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_key_distinguishes_searches() {
        let a = list_key(&ListQuery {
            search: Some("steel".to_string()),
            page: 1,
            limit: 10,
        });
        let b = list_key(&ListQuery {
            search: None,
            page: 1,
            limit: 10,
        });
        assert_ne!(a, b);
        assert_eq!(b, "page=1:limit=10:search=");
    }

    #[test]
    fn test_product_list_key_includes_filters() {
        let query = ProductQuery {
            category_id: Some(CategoryId::new("66c7f3")),
            ..ProductQuery::default()
        };
        assert_eq!(
            product_list_key(&query),
            "page=1:limit=10:category=66c7f3:model=:search="
        );
    }
}
