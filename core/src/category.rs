// catalog/src/category.rs

//! Read-through category lookups.

use std::sync::Arc;

use tracing::{instrument, warn};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Category, CategoryKey};
use crate::observe::QueryObserver;
use crate::store::CatalogStore;

/// Resolves category identifiers and slugs to records. No caching, no mutation.
#[derive(Clone)]
pub struct CategoryResolver {
  store: Arc<dyn CatalogStore>,
  observer: Arc<dyn QueryObserver>,
}

impl CategoryResolver {
  pub fn new(store: Arc<dyn CatalogStore>, observer: Arc<dyn QueryObserver>) -> Self {
    Self { store, observer }
  }

  #[instrument(name = "CategoryResolver::by_id", skip(self), err(Display))]
  pub async fn by_id(&self, id: Uuid) -> CatalogResult<Category> {
    self.resolve(CategoryKey::Id(id)).await
  }

  #[instrument(name = "CategoryResolver::by_slug", skip(self), err(Display))]
  pub async fn by_slug(&self, slug: &str) -> CatalogResult<Category> {
    self.resolve(CategoryKey::Slug(slug.to_string())).await
  }

  /// Every category, ordered by name.
  pub async fn list_all(&self) -> CatalogResult<Vec<Category>> {
    self.store.list_categories().await
  }

  async fn resolve(&self, key: CategoryKey) -> CatalogResult<Category> {
    self.observer.on_category_lookup(&key);
    match self.store.find_category(&key).await? {
      Some(category) => Ok(category),
      None => {
        warn!(category = %key, "Category not found.");
        Err(CatalogError::category_not_found(key))
      }
    }
  }
}
