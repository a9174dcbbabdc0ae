//! Core types for Armoire.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod email;
pub mod id;
pub mod pagination;
pub mod role;

pub use catalog::{
    Category, CategoryRef, ColorVariant, CreatedBy, ModelRef, ModelVerity, Product, User, UserRef,
};
pub use email::{Email, EmailError};
pub use id::*;
pub use pagination::Pagination;
pub use role::Role;
