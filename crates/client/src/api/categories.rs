//! Category endpoints.

use armoire_core::{Category, CategoryId, CategoryRef, Pagination};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ApiClient, ListQuery, Page};
use crate::error::ApiError;

#[derive(Serialize)]
struct CategoryPayload<'a> {
    #[serde(rename = "categoryName")]
    category_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Deserialize)]
struct CategoriesEnvelope {
    categories: Vec<Category>,
    pagination: Pagination,
}

#[derive(Deserialize)]
struct CategoryEnvelope {
    data: Category,
}

#[derive(Deserialize)]
struct CategoryOptionsEnvelope {
    data: Vec<CategoryRef>,
}

impl ApiClient {
    /// List categories with search and pagination.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self))]
    pub async fn categories(&self, query: &ListQuery) -> Result<Page<Category>, ApiError> {
        let builder = self.request(Method::GET, "/categories").await?.query(query);
        let envelope: CategoriesEnvelope = self.send(builder, "categories response").await?;
        Ok(Page {
            items: envelope.categories,
            pagination: envelope.pagination,
        })
    }

    /// Fetch the full category list as dropdown options.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self))]
    pub async fn category_options(&self) -> Result<Vec<CategoryRef>, ApiError> {
        let builder = self.request(Method::GET, "/categories/options").await?;
        let envelope: CategoryOptionsEnvelope =
            self.send(builder, "category options response").await?;
        Ok(envelope.data)
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails, typically `ApiError::Api`
    /// with the backend's message when the name already exists.
    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, ApiError> {
        let builder = self
            .request(Method::POST, "/categories/create")
            .await?
            .json(&CategoryPayload {
                category_name: name,
                description,
            });
        let envelope: CategoryEnvelope = self.send(builder, "category response").await?;
        Ok(envelope.data)
    }

    /// Update a category's name and description.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: &CategoryId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/categories/{id}"))
            .await?
            .json(&CategoryPayload {
                category_name: name,
                description,
            });
        let envelope: CategoryEnvelope = self.send(builder, "category response").await?;
        Ok(envelope.data)
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), ApiError> {
        let builder = self
            .request(Method::DELETE, &format!("/categories/{id}"))
            .await?;
        self.send_ok(builder, "delete category response").await
    }
}
