//! Drag-reorder state for a color variant's image gallery.
//!
//! Moves apply to the local order immediately so the surface can render
//! the new arrangement, then [`ImageOrderer::commit`] sends the full URL
//! sequence to the backend. A failed commit reverts the local order to
//! the last order the backend confirmed, so the surface never keeps
//! showing an arrangement the server refused.

use armoire_core::{ColorId, ProductId};
use tracing::instrument;

use crate::error::ApiError;
use crate::store::CatalogStore;

/// Reorderable view of one variant's image URLs.
pub struct ImageOrderer {
    store: CatalogStore,
    product_id: ProductId,
    color_id: ColorId,
    order: Vec<String>,
    committed: Vec<String>,
}

impl ImageOrderer {
    /// Orderer over a variant's current gallery.
    #[must_use]
    pub fn new(
        store: CatalogStore,
        product_id: ProductId,
        color_id: ColorId,
        images: Vec<String>,
    ) -> Self {
        Self {
            store,
            product_id,
            color_id,
            committed: images.clone(),
            order: images,
        }
    }

    /// The order as currently displayed, committed or not.
    #[must_use]
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Whether the local order differs from the last confirmed one.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.order != self.committed
    }

    /// Move the image at `from` so it sits at `to`, shifting the images
    /// between them. Out-of-range indices change nothing.
    pub fn move_image(&mut self, from: usize, to: usize) {
        if from == to || from >= self.order.len() || to >= self.order.len() {
            return;
        }
        let image = self.order.remove(from);
        self.order.insert(to, image);
    }

    /// Persist the current order. A clean orderer sends nothing.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails; the local order reverts
    /// to the last confirmed one.
    #[instrument(skip(self), fields(product_id = %self.product_id, color_id = %self.color_id))]
    pub async fn commit(&mut self) -> Result<(), ApiError> {
        if !self.is_dirty() {
            return Ok(());
        }
        match self
            .store
            .reorder_color_images(&self.product_id, &self.color_id, &self.order)
            .await
        {
            Ok(()) => {
                self.committed.clone_from(&self.order);
                Ok(())
            }
            Err(err) => {
                self.order.clone_from(&self.committed);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::config::Config;
    use std::time::Duration;

    async fn offline_orderer(dir: &tempfile::TempDir) -> ImageOrderer {
        let config = Config {
            api_base_url: "http://127.0.0.1:9/api/v1".parse().unwrap(),
            session_file: dir.path().join("session.json"),
            http_timeout: Duration::from_secs(5),
        };
        let client = ApiClient::new(&config).await.unwrap();
        ImageOrderer::new(
            CatalogStore::new(client),
            ProductId::new("p1"),
            ColorId::new("c1"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
        )
    }

    #[tokio::test]
    async fn test_move_shifts_between_positions() {
        let dir = tempfile::tempdir().unwrap();
        let mut orderer = offline_orderer(&dir).await;

        orderer.move_image(0, 2);
        assert_eq!(orderer.order(), ["b", "c", "a", "d"]);
        assert!(orderer.is_dirty());

        orderer.move_image(3, 0);
        assert_eq!(orderer.order(), ["d", "b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_out_of_range_moves_change_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut orderer = offline_orderer(&dir).await;

        orderer.move_image(4, 0);
        orderer.move_image(0, 4);
        orderer.move_image(1, 1);
        assert_eq!(orderer.order(), ["a", "b", "c", "d"]);
        assert!(!orderer.is_dirty());
    }

    #[tokio::test]
    async fn test_clean_commit_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut orderer = offline_orderer(&dir).await;

        // No session and an unroutable backend, yet a clean commit is Ok
        orderer.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_commit_reverts_to_confirmed_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut orderer = offline_orderer(&dir).await;

        orderer.move_image(0, 3);
        assert_eq!(orderer.order(), ["b", "c", "d", "a"]);

        let err = orderer.commit().await.unwrap_err();
        assert!(matches!(err, ApiError::NotLoggedIn));
        assert_eq!(orderer.order(), ["a", "b", "c", "d"]);
        assert!(!orderer.is_dirty());
    }
}
