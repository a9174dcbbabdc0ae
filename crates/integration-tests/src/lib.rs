//! Integration tests for Armoire.
//!
//! Every test in this crate talks to a live catalog backend, so all of
//! them carry `#[ignore]` and `cargo test` skips them by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Point the tests at a backend and a test account
//! export ARMOIRE_API_BASE_URL=http://localhost:5000/api/v1
//! export ARMOIRE_TEST_EMAIL=admin@example.com
//! export ARMOIRE_TEST_PASSWORD=secret
//!
//! # Run the ignored tests
//! cargo test -p armoire-integration-tests -- --ignored --test-threads=1
//! ```
//!
//! # Test Categories
//!
//! - `catalog_sessions` - Login, session persistence, and logout
//! - `catalog_taxonomy` - Category and model verity CRUD
//! - `catalog_products` - Product lifecycle through the form controller
//! - `catalog_colors` - Color variant editing and image reordering
//!
//! Tests create their own throwaway records (names carry a random suffix)
//! and delete them on the way out, so they can run against a shared
//! development backend. Each test logs in with its own session file under
//! a temp directory and never touches `~/.config/armoire`.
