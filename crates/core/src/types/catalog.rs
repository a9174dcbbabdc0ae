//! Catalog records as the backend returns them.
//!
//! Field names follow the backend's wire format (Mongo-style `_id`,
//! camelCase keys). Monetary amounts arrive as JSON numbers and are held
//! as [`Decimal`] to keep comparisons exact.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{CategoryId, ColorId, ModelId, ProductId, UserId};
use crate::types::role::Role;

fn default_true() -> bool {
    true
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    #[serde(rename = "categoryName")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Embedded category reference inside other records and option lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    #[serde(rename = "categoryName")]
    pub name: String,
}

/// A model verity (product family within a category).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelVerity {
    #[serde(rename = "_id")]
    pub id: ModelId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "categoryId")]
    pub category: CategoryRef,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Embedded model reference inside product records and option lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    #[serde(rename = "_id")]
    pub id: ModelId,
    pub name: String,
}

/// Embedded user reference on populated records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
}

/// Creator of a record.
///
/// List payloads carry the bare user id; detail payloads populate it into
/// a full reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedBy {
    User(UserRef),
    Id(UserId),
}

impl CreatedBy {
    /// The referenced user id.
    #[must_use]
    pub fn id(&self) -> &UserId {
        match self {
            Self::User(user) => &user.id,
            Self::Id(id) => id,
        }
    }

    /// Display name, when the reference is populated.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::User(user) => Some(user.name.as_str()),
            Self::Id(_) => None,
        }
    }
}

/// One color variant of a product, with its image gallery in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorVariant {
    /// Present on stored variants, absent in creation payloads.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ColorId>,
    pub name: String,
    pub body: String,
    #[serde(default)]
    pub door: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub mrp: Decimal,
    #[serde(default = "default_true")]
    pub available: bool,
}

/// A catalog product with its populated category/model references and
/// color variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "modelId")]
    pub model: ModelRef,
    #[serde(rename = "categoryId")]
    pub category: CategoryRef,
    #[serde(default)]
    pub created_by: Option<CreatedBy>,
    #[serde(default)]
    pub description: String,
    pub number_of_doors: u32,
    #[serde(default)]
    pub color_options_count: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub mrp: Decimal,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub warranty: String,
    #[serde(default)]
    pub paint_type: String,
    #[serde(default)]
    pub colors: Vec<ColorVariant>,
    #[serde(default)]
    pub card_image: String,
    #[serde(default = "default_true")]
    pub colors_available: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Look up a color variant by its ID.
    #[must_use]
    pub fn color(&self, color_id: &ColorId) -> Option<&ColorVariant> {
        self.colors
            .iter()
            .find(|color| color.id.as_ref() == Some(color_id))
    }
}

/// A back-office user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
