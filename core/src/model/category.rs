// catalog/src/model/category.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  pub id: Uuid,
  pub name: String,
  pub slug: String,
}

/// Unique keys a category can be looked up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryKey {
  Id(Uuid),
  Slug(String),
}

impl std::fmt::Display for CategoryKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CategoryKey::Id(id) => write!(f, "id={}", id),
      CategoryKey::Slug(slug) => write!(f, "slug={}", slug),
    }
  }
}
