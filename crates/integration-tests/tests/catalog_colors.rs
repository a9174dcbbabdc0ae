//! Integration tests for color variant editing and image reordering.
//!
//! These tests require:
//! - A running catalog backend (`ARMOIRE_API_BASE_URL`)
//! - A test account with admin rights (`ARMOIRE_TEST_EMAIL` / `ARMOIRE_TEST_PASSWORD`)
//! - The backend able to store uploaded images
//!
//! Run with: cargo test -p armoire-integration-tests -- --ignored

use std::time::Duration;

use armoire_client::color_editor::ColorEditor;
use armoire_client::form::{ImageSource, ImageUpload, ProductFormController, SubmitOutcome};
use armoire_client::list::ListState;
use armoire_client::reorder::ImageOrderer;
use armoire_client::{ApiClient, CatalogStore, Config};
use armoire_core::{CategoryId, ColorId, ModelId, Product};
use rust_decimal::Decimal;
use tempfile::TempDir;
use uuid::Uuid;

/// Smallest valid PNG (one transparent pixel), enough for upload tests.
const TEST_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Base URL for the catalog API (configurable via environment).
fn api_base_url() -> String {
    std::env::var("ARMOIRE_API_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:5000/api/v1".to_string())
}

/// Log in with the test account over a throwaway session file.
async fn logged_in_store(dir: &TempDir) -> CatalogStore {
    dotenvy::dotenv().ok();
    let config = Config {
        api_base_url: api_base_url().parse().expect("Invalid ARMOIRE_API_BASE_URL"),
        session_file: dir.path().join("session.json"),
        http_timeout: Duration::from_secs(30),
    };
    let client = ApiClient::new(&config)
        .await
        .expect("Failed to build API client");
    let store = CatalogStore::new(client);
    let email =
        std::env::var("ARMOIRE_TEST_EMAIL").expect("Set ARMOIRE_TEST_EMAIL to run live tests");
    let password = std::env::var("ARMOIRE_TEST_PASSWORD")
        .expect("Set ARMOIRE_TEST_PASSWORD to run live tests");
    store
        .login(&email, &password)
        .await
        .expect("Login failed; check ARMOIRE_TEST_EMAIL / ARMOIRE_TEST_PASSWORD");
    store
}

/// Unique name for a throwaway record.
fn test_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

fn png_upload(file_name: &str) -> ImageUpload {
    ImageUpload::new(file_name, "image/png", TEST_PNG.to_vec())
}

/// Ids of everything a test created, for teardown.
struct Seeded {
    category_id: CategoryId,
    model_id: ModelId,
    product: Product,
}

/// Create a product with one color variant carrying two images, the
/// smallest shape the color endpoints accept.
async fn seed_product(store: &CatalogStore) -> Seeded {
    let category = store
        .create_category(&test_name("it-category"), None)
        .await
        .expect("Failed to create category");
    let model = store
        .create_model(&test_name("it-model"), None, &category.id)
        .await
        .expect("Failed to create model");

    let name = test_name("it-wardrobe");
    let mut form = ProductFormController::create(store.clone());
    form.set_name(name.clone());
    form.set_category(Some(category.id.clone()));
    form.set_model(Some(model.id.clone()));
    form.set_price(Decimal::from(12_999));
    form.set_mrp(Decimal::from(15_999));
    form.set_card_image(ImageSource::Upload(png_upload("card.png")));
    form.add_color_variant();
    form.set_color_name(0, "Walnut");
    form.set_color_body(0, "Brown");
    form.add_color_images(0, vec![png_upload("walnut-1.png"), png_upload("walnut-2.png")]);

    let outcome = form.submit().await.expect("Create request failed");
    assert_eq!(outcome, SubmitOutcome::Saved);

    let mut state = ListState::default();
    state.set_search(name.clone());
    let page = store
        .products(&state.product_params(None, None))
        .await
        .expect("Failed to search products");
    let product = page
        .items
        .into_iter()
        .find(|p| p.name == name)
        .expect("Created product not found by its name");
    Seeded {
        category_id: category.id,
        model_id: model.id,
        product,
    }
}

/// Best-effort removal of everything a test created.
async fn cleanup(store: &CatalogStore, seeded: &Seeded) {
    let _ = store.delete_product(&seeded.product.id).await;
    let _ = store.delete_model(&seeded.model_id).await;
    let _ = store.delete_category(&seeded.category_id).await;
}

/// The stored id of the first variant, which the backend assigns on save.
fn first_color_id(product: &Product) -> ColorId {
    product
        .colors
        .first()
        .and_then(|c| c.id.clone())
        .expect("Backend did not assign a color id")
}

// ============================================================================
// Editor Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running catalog backend and test credentials"]
async fn test_color_add_then_update() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = logged_in_store(&dir).await;
    let seeded = seed_product(&store).await;

    // Add a second color through the editor.
    let mut editor = ColorEditor::add(store.clone(), seeded.product.id.clone());
    editor.set_name("Oak");
    editor.set_body("Beige");
    editor.set_price(Some(Decimal::from(13_499)));
    editor.add_new_images(vec![png_upload("oak-1.png"), png_upload("oak-2.png")]);
    let outcome = editor.submit().await.expect("Add color request failed");
    assert_eq!(outcome, SubmitOutcome::Saved);

    let detail = store
        .product(&seeded.product.id)
        .await
        .expect("Failed to re-fetch product");
    assert_eq!(detail.colors.len(), 2);
    let oak = detail
        .colors
        .iter()
        .find(|c| c.name == "Oak")
        .expect("New color missing from the product");
    assert_eq!(oak.images.len(), 2);
    assert!(oak.available, "A new color defaults to available");

    // Update it: flip availability and drop one hosted image.
    let removed_url = oak.images.first().expect("Hosted image missing").clone();
    let mut editor = ColorEditor::edit(store.clone(), seeded.product.id.clone(), oak);
    editor.set_available(false);
    editor.remove_existing_image(&removed_url);
    let outcome = editor.submit().await.expect("Update color request failed");
    assert_eq!(outcome, SubmitOutcome::Saved);

    let detail = store
        .product(&seeded.product.id)
        .await
        .expect("Failed to re-fetch product");
    let oak = detail
        .colors
        .iter()
        .find(|c| c.name == "Oak")
        .expect("Updated color missing from the product");
    assert!(!oak.available);
    assert_eq!(oak.images.len(), 1);
    assert!(
        !oak.images.contains(&removed_url),
        "Removed image still hosted on the color"
    );

    cleanup(&store, &seeded).await;
}

#[tokio::test]
#[ignore = "Requires a running catalog backend and test credentials"]
async fn test_color_without_images_is_rejected_locally() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = logged_in_store(&dir).await;
    let seeded = seed_product(&store).await;

    let mut editor = ColorEditor::add(store.clone(), seeded.product.id.clone());
    editor.set_name("Ash");
    editor.set_body("Grey");
    match editor.submit().await.expect("Validation must not hit the network") {
        SubmitOutcome::Invalid { message } => {
            assert_eq!(message, "At least one image is required");
        }
        other => panic!("Expected a validation failure, got {other:?}"),
    }

    cleanup(&store, &seeded).await;
}

#[tokio::test]
#[ignore = "Requires a running catalog backend and test credentials"]
async fn test_color_delete() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = logged_in_store(&dir).await;
    let seeded = seed_product(&store).await;

    let detail = store
        .product(&seeded.product.id)
        .await
        .expect("Failed to fetch product");
    let color_id = first_color_id(&detail);

    store
        .delete_color(&seeded.product.id, &color_id)
        .await
        .expect("Failed to delete color");

    let detail = store
        .product(&seeded.product.id)
        .await
        .expect("Failed to re-fetch product");
    assert!(
        detail.colors.iter().all(|c| c.id.as_ref() != Some(&color_id)),
        "Deleted color still on the product"
    );

    cleanup(&store, &seeded).await;
}

// ============================================================================
// Reorder Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running catalog backend and test credentials"]
async fn test_image_reorder_persists() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = logged_in_store(&dir).await;
    let seeded = seed_product(&store).await;

    let detail = store
        .product(&seeded.product.id)
        .await
        .expect("Failed to fetch product");
    let color_id = first_color_id(&detail);
    let images = detail
        .colors
        .first()
        .map(|c| c.images.clone())
        .expect("Variant missing");
    assert!(images.len() >= 2, "Need at least two images to reorder");

    let mut orderer = ImageOrderer::new(
        store.clone(),
        seeded.product.id.clone(),
        color_id.clone(),
        images.clone(),
    );
    orderer.move_image(0, 1);
    assert!(orderer.is_dirty());
    orderer.commit().await.expect("Reorder request failed");
    assert!(!orderer.is_dirty());

    // The backend returns the gallery in the committed order.
    let detail = store
        .product(&seeded.product.id)
        .await
        .expect("Failed to re-fetch product");
    let reordered = detail
        .colors
        .iter()
        .find(|c| c.id.as_ref() == Some(&color_id))
        .map(|c| c.images.clone())
        .expect("Variant missing after reorder");
    assert_eq!(reordered, orderer.order());

    cleanup(&store, &seeded).await;
}
