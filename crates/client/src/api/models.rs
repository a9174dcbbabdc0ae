//! Model verity endpoints.

use armoire_core::{CategoryId, ModelId, ModelRef, ModelVerity, Pagination};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{ApiClient, ListQuery, Page};
use crate::error::ApiError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelPayload<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    category_id: &'a CategoryId,
}

#[derive(Deserialize)]
struct ModelsEnvelope {
    #[serde(rename = "modelVerities")]
    model_verities: Vec<ModelVerity>,
    pagination: Pagination,
}

#[derive(Deserialize)]
struct ModelEnvelope {
    data: ModelVerity,
}

#[derive(Deserialize)]
struct ModelOptionsEnvelope {
    data: Vec<ModelRef>,
}

impl ApiClient {
    /// List model verities with search and pagination.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self))]
    pub async fn models(&self, query: &ListQuery) -> Result<Page<ModelVerity>, ApiError> {
        let builder = self
            .request(Method::GET, "/modelVerities")
            .await?
            .query(query);
        let envelope: ModelsEnvelope = self.send(builder, "models response").await?;
        Ok(Page {
            items: envelope.model_verities,
            pagination: envelope.pagination,
        })
    }

    /// Fetch the models of one category as dropdown options.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self), fields(category_id = %category_id))]
    pub async fn model_options(&self, category_id: &CategoryId) -> Result<Vec<ModelRef>, ApiError> {
        let builder = self
            .request(Method::GET, "/modelVerities/options")
            .await?
            .query(&[("categoryId", category_id.as_str())]);
        let envelope: ModelOptionsEnvelope =
            self.send(builder, "model options response").await?;
        Ok(envelope.data)
    }

    /// Create a model verity under a category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self), fields(category_id = %category_id))]
    pub async fn create_model(
        &self,
        name: &str,
        description: Option<&str>,
        category_id: &CategoryId,
    ) -> Result<ModelVerity, ApiError> {
        let builder = self
            .request(Method::POST, "/modelVerities/create")
            .await?
            .json(&ModelPayload {
                name,
                description,
                category_id,
            });
        let envelope: ModelEnvelope = self.send(builder, "model response").await?;
        Ok(envelope.data)
    }

    /// Update a model verity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self), fields(model_id = %id))]
    pub async fn update_model(
        &self,
        id: &ModelId,
        name: &str,
        description: Option<&str>,
        category_id: &CategoryId,
    ) -> Result<ModelVerity, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/modelVerities/{id}"))
            .await?
            .json(&ModelPayload {
                name,
                description,
                category_id,
            });
        let envelope: ModelEnvelope = self.send(builder, "model response").await?;
        Ok(envelope.data)
    }

    /// Delete a model verity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(model_id = %id))]
    pub async fn delete_model(&self, id: &ModelId) -> Result<(), ApiError> {
        let builder = self
            .request(Method::DELETE, &format!("/modelVerities/{id}"))
            .await?;
        self.send_ok(builder, "delete model response").await
    }
}
