// catalog/src/store/mod.rs

//! The persistence contract the engine runs against.
//!
//! Stores receive fully-built predicates, orderings and windows; they never see
//! request descriptors. Implementations must report a missing key on `update` and
//! `delete` as `CatalogError::NotFound` and a unique-slug collision as
//! `CatalogError::Conflict`. Transport failures become `StoreUnavailable`.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::model::{Category, CategoryKey, NewProduct, ProductKey, ProductRecord, ProductWrite};
use crate::query::{PageWindow, Predicate, SortOrdering};

pub use memory::InMemoryStore;

#[async_trait]
pub trait CatalogStore: Send + Sync {
  /// Rows matching `filter`, in `ordering` (store order when `None`), restricted to `window`.
  async fn find_many(
    &self,
    filter: &Predicate,
    ordering: Option<SortOrdering>,
    window: Option<PageWindow>,
  ) -> CatalogResult<Vec<ProductRecord>>;

  async fn count(&self, filter: &Predicate) -> CatalogResult<i64>;

  async fn find_one(&self, key: &ProductKey) -> CatalogResult<Option<ProductRecord>>;

  async fn create(&self, fields: NewProduct) -> CatalogResult<ProductRecord>;

  async fn update(&self, id: Uuid, write: ProductWrite) -> CatalogResult<ProductRecord>;

  async fn delete(&self, id: Uuid) -> CatalogResult<()>;

  async fn find_category(&self, key: &CategoryKey) -> CatalogResult<Option<Category>>;

  async fn list_categories(&self) -> CatalogResult<Vec<Category>>;
}
