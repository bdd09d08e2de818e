// catalog/src/engine.rs

//! `CatalogQueryEngine`: turns listing, lookup, similarity and mutation requests
//! into store calls and shapes the rows that come back.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::category::CategoryResolver;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{
  Category, NewProduct, ProductChanges, ProductDetail, ProductKey, ProductPage, ProductRecord, ProductSummary,
  ProductWrite,
};
use crate::observe::{QueryEvent, QueryObserver, TracingObserver};
use crate::query::{
  ListProductsQuery, PageWindow, Predicate, SimilarMatch, SortField, SortOrdering, DEFAULT_PAGE_SIZE,
};
use crate::slug::to_slug;
use crate::store::CatalogStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
  /// Page size applied when a listing request gives none.
  pub default_per_page: i64,
  pub similar_match: SimilarMatch,
}

impl Default for EngineSettings {
  fn default() -> Self {
    Self {
      default_per_page: DEFAULT_PAGE_SIZE,
      similar_match: SimilarMatch::CategoryName,
    }
  }
}

#[derive(Clone)]
pub struct CatalogQueryEngine {
  store: Arc<dyn CatalogStore>,
  categories: CategoryResolver,
  observer: Arc<dyn QueryObserver>,
  settings: EngineSettings,
}

impl CatalogQueryEngine {
  pub fn new(store: Arc<dyn CatalogStore>) -> Self {
    Self::with_observer(store, Arc::new(TracingObserver), EngineSettings::default())
  }

  pub fn with_observer(
    store: Arc<dyn CatalogStore>,
    observer: Arc<dyn QueryObserver>,
    settings: EngineSettings,
  ) -> Self {
    Self {
      categories: CategoryResolver::new(store.clone(), observer.clone()),
      store,
      observer,
      settings,
    }
  }

  pub fn settings(&self) -> EngineSettings {
    self.settings
  }

  pub fn categories(&self) -> &CategoryResolver {
    &self.categories
  }

  /// One page of products plus the size of the whole filtered set.
  ///
  /// The page and the count are two independent reads; under concurrent writes they
  /// may disagree.
  #[instrument(name = "CatalogQueryEngine::list_products", skip(self), err(Display))]
  pub async fn list_products(&self, query: &ListProductsQuery) -> CatalogResult<ProductPage> {
    let ordering = query.sort.unwrap_or_default().ordering();
    let filter = Predicate::search(query.search_term.as_deref());
    let window = PageWindow::compute(query.page, query.per_page, self.settings.default_per_page);

    self.observe("list_products", &filter, Some(ordering), Some(window));
    let rows = self.store.find_many(&filter, Some(ordering), Some(window)).await?;

    self.observe("count_products", &filter, None, None);
    let total_count = self.store.count(&filter).await?;

    info!(returned = rows.len(), total_count, "Listed products.");
    Ok(ProductPage {
      items: rows.into_iter().map(ProductSummary::from).collect(),
      total_count,
    })
  }

  #[instrument(name = "CatalogQueryEngine::get_by_id", skip(self), err(Display))]
  pub async fn get_by_id(&self, id: Uuid) -> CatalogResult<ProductDetail> {
    self.find_record(ProductKey::Id(id)).await.map(ProductDetail::from)
  }

  #[instrument(name = "CatalogQueryEngine::get_by_slug", skip(self), err(Display))]
  pub async fn get_by_slug(&self, slug: &str) -> CatalogResult<ProductDetail> {
    // Drafts hold the empty slug; it never names a product.
    if slug.is_empty() {
      warn!("Empty slug lookup.");
      return Err(CatalogError::product_not_found(ProductKey::Slug(String::new())));
    }
    self
      .find_record(ProductKey::Slug(slug.to_string()))
      .await
      .map(ProductDetail::from)
  }

  /// Products whose category has `category_slug`. An empty or unknown category yields
  /// an empty list, not an error.
  #[instrument(name = "CatalogQueryEngine::get_by_category", skip(self), err(Display))]
  pub async fn get_by_category(&self, category_slug: &str) -> CatalogResult<Vec<ProductDetail>> {
    let filter = Predicate::in_category_slug(category_slug);
    self.observe("get_by_category", &filter, None, None);
    let rows = self.store.find_many(&filter, None, None).await?;
    info!(returned = rows.len(), "Listed products by category.");
    Ok(rows.into_iter().map(ProductDetail::from).collect())
  }

  /// Products sharing the anchor's category, newest first, never including the anchor.
  #[instrument(name = "CatalogQueryEngine::get_similar", skip(self), err(Display))]
  pub async fn get_similar(&self, id: Uuid) -> CatalogResult<Vec<ProductSummary>> {
    let anchor = self.find_record(ProductKey::Id(id)).await?;

    let Some(filter) = Predicate::similar_to(&anchor, self.settings.similar_match) else {
      warn!(product_id = %id, "Anchor product is a draft without a category; no similar products.");
      return Ok(Vec::new());
    };
    let ordering = SortOrdering::desc(SortField::CreatedAt);

    self.observe("get_similar", &filter, Some(ordering), None);
    let rows = self.store.find_many(&filter, Some(ordering), None).await?;
    Ok(rows.into_iter().map(ProductSummary::from).collect())
  }

  /// First phase of creation: writes a draft with placeholder values and returns its id.
  #[instrument(name = "CatalogQueryEngine::create", skip(self), err(Display))]
  pub async fn create(&self) -> CatalogResult<Uuid> {
    let record = self.store.create(NewProduct::draft()).await?;
    info!(product_id = %record.product.id, "Draft product created.");
    Ok(record.product.id)
  }

  /// Replaces the product's fields, re-deriving the slug from the new name and
  /// rebinding the category.
  #[instrument(name = "CatalogQueryEngine::update", skip(self, changes), fields(category_id = %changes.category_id), err(Display))]
  pub async fn update(&self, id: Uuid, changes: ProductChanges) -> CatalogResult<ProductDetail> {
    let slug = to_slug(&changes.name);
    if slug.is_empty() {
      return Err(CatalogError::Validation(format!(
        "name '{}' has no characters usable in a slug",
        changes.name
      )));
    }
    let category: Category = self.categories.by_id(changes.category_id).await?;

    let record = self.store.update(id, ProductWrite { changes, slug }).await?;
    info!(product_id = %id, slug = %record.product.slug, category = %category.slug, "Product updated.");
    Ok(ProductDetail::from(record))
  }

  #[instrument(name = "CatalogQueryEngine::delete", skip(self), err(Display))]
  pub async fn delete(&self, id: Uuid) -> CatalogResult<()> {
    self.store.delete(id).await?;
    info!(product_id = %id, "Product deleted.");
    Ok(())
  }

  async fn find_record(&self, key: ProductKey) -> CatalogResult<ProductRecord> {
    match self.store.find_one(&key).await? {
      Some(record) => Ok(record),
      None => {
        warn!(product = %key, "Product not found.");
        Err(CatalogError::product_not_found(key))
      }
    }
  }

  fn observe(
    &self,
    operation: &'static str,
    filter: &Predicate,
    ordering: Option<SortOrdering>,
    window: Option<PageWindow>,
  ) {
    self.observer.on_query(QueryEvent {
      operation,
      filter,
      ordering,
      window,
    });
  }
}
