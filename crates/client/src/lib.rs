//! Armoire Client - typed client for the catalog backend.
//!
//! This crate is the whole back-office brain without a rendering surface:
//! it authenticates against the catalog backend, exposes typed CRUD
//! operations per resource, caches reads with mutation-driven invalidation,
//! and owns the form/editor state machines for products and their color
//! variants.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`session`] - Bearer-token session store with file persistence
//! - [`api`] - HTTP gateway and per-resource request functions
//! - [`store`] - Read-through cached query/mutation layer
//! - [`list`] - List-view state (search, page, page size) and debouncing
//! - [`form`] - Product draft aggregate, validation, multipart submission
//! - [`color_editor`] - Color-variant editor for persisted products
//! - [`reorder`] - Optimistic image reordering with revert on failure
//!
//! # Example
//!
//! ```rust,ignore
//! use armoire_client::{ApiClient, CatalogStore, Config};
//!
//! let config = Config::from_env()?;
//! let store = CatalogStore::new(ApiClient::new(&config).await?);
//!
//! store.login(&email, &password).await?;
//! let page = store.products(&Default::default()).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod color_editor;
pub mod config;
pub mod error;
pub mod form;
pub mod list;
pub mod reorder;
pub mod session;
pub mod store;

pub use api::ApiClient;
pub use config::Config;
pub use error::ApiError;
pub use store::CatalogStore;
