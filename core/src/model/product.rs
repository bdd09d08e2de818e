// catalog/src/model/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub slug: String,
  pub description: String,
  pub price: i32, // minor currency units, never negative
  pub images: Vec<String>,
  // None until the first update links a category (draft).
  pub category_id: Option<Uuid>,
  pub created_at: DateTime<Utc>,
}

impl Product {
  /// A product is a draft between `create` and the first completing `update`.
  pub fn is_draft(&self) -> bool {
    self.category_id.is_none()
  }
}

/// A product row joined with its category, as returned by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
  pub product: Product,
  pub category: Option<Category>,
}

/// Unique keys a product can be looked up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductKey {
  Id(Uuid),
  Slug(String),
}

impl std::fmt::Display for ProductKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ProductKey::Id(id) => write!(f, "id={}", id),
      ProductKey::Slug(slug) => write!(f, "slug={}", slug),
    }
  }
}

/// Placeholder values written by the first phase of creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
  pub name: String,
  pub slug: String,
  pub description: String,
  pub price: i32,
  pub images: Vec<String>,
  pub category_id: Option<Uuid>,
}

impl NewProduct {
  pub fn draft() -> Self {
    Self {
      name: String::new(),
      slug: String::new(),
      description: String::new(),
      price: 0,
      images: Vec::new(),
      category_id: None,
    }
  }
}

/// Caller-supplied fields for `update`. The slug is absent: it is always
/// derived from `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChanges {
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub price: i32,
  #[serde(default)]
  pub images: Vec<String>,
  pub category_id: Uuid,
}

/// What a store actually writes on update: the caller's changes plus the derived slug.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWrite {
  pub changes: ProductChanges,
  pub slug: String,
}

/// Abbreviated projection used by listing and similarity results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
  pub id: Uuid,
  pub name: String,
  pub slug: String,
  pub price: i32,
  pub thumbnail: Option<String>,
  pub category_id: Option<Uuid>,
  pub created_at: DateTime<Utc>,
}

impl From<ProductRecord> for ProductSummary {
  fn from(record: ProductRecord) -> Self {
    let product = record.product;
    Self {
      id: product.id,
      name: product.name,
      slug: product.slug,
      price: product.price,
      thumbnail: product.images.into_iter().next(),
      category_id: product.category_id,
      created_at: product.created_at,
    }
  }
}

/// Fullest projection used by single-item lookups and category listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
  pub id: Uuid,
  pub name: String,
  pub slug: String,
  pub description: String,
  pub price: i32,
  pub images: Vec<String>,
  pub category: Option<Category>,
  pub created_at: DateTime<Utc>,
}

impl From<ProductRecord> for ProductDetail {
  fn from(record: ProductRecord) -> Self {
    let ProductRecord { product, category } = record;
    Self {
      id: product.id,
      name: product.name,
      slug: product.slug,
      description: product.description,
      price: product.price,
      images: product.images,
      category,
      created_at: product.created_at,
    }
  }
}

/// One page of a product listing plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
  pub items: Vec<ProductSummary>,
  pub total_count: i64,
}
