// catalog/src/store/memory.rs

//! A `CatalogStore` held entirely in process memory.
//!
//! Rows are kept in insertion order, which is also the tie-break order for sorts.
//! Used by the test suites and benchmarks, and as a reference for how a store is
//! expected to interpret predicates.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::cmp::Ordering;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Category, CategoryKey, NewProduct, Product, ProductKey, ProductRecord, ProductWrite};
use crate::query::{Direction, PageWindow, Predicate, SortField, SortOrdering};
use crate::store::CatalogStore;

#[derive(Debug, Default)]
struct Tables {
  categories: Vec<Category>,
  products: Vec<Product>,
}

impl Tables {
  fn category(&self, id: Uuid) -> Option<&Category> {
    self.categories.iter().find(|c| c.id == id)
  }

  fn join(&self, product: &Product) -> ProductRecord {
    ProductRecord {
      product: product.clone(),
      category: product.category_id.and_then(|id| self.category(id)).cloned(),
    }
  }

  fn slug_taken(&self, slug: &str, except: Option<Uuid>) -> bool {
    // Drafts all carry an empty slug; uniqueness only applies once a name is set.
    !slug.is_empty() && self.products.iter().any(|p| p.slug == slug && Some(p.id) != except)
  }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
  tables: RwLock<Tables>,
  require_category: bool,
  unavailable: RwLock<bool>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Rejects products without a category, like a schema where the relation is mandatory.
  pub fn require_category(mut self, required: bool) -> Self {
    self.require_category = required;
    self
  }

  /// Makes every subsequent call fail with `StoreUnavailable` until reset.
  pub fn set_unavailable(&self, unavailable: bool) {
    *self.unavailable.write() = unavailable;
  }

  pub fn put_category(&self, category: Category) -> Category {
    self.tables.write().categories.push(category.clone());
    category
  }

  /// Inserts a fully-formed row, bypassing the draft lifecycle. Seeding only.
  pub fn put_product(&self, product: Product) -> Product {
    self.tables.write().products.push(product.clone());
    product
  }

  pub fn product_count(&self) -> usize {
    self.tables.read().products.len()
  }

  fn ensure_available(&self) -> CatalogResult<()> {
    if *self.unavailable.read() {
      warn!("In-memory store is flagged unavailable.");
      return Err(CatalogError::StoreUnavailable {
        source: anyhow::anyhow!("in-memory store flagged unavailable"),
      });
    }
    Ok(())
  }
}

fn compare(a: &ProductRecord, b: &ProductRecord, ordering: SortOrdering) -> Ordering {
  let natural = match ordering.field {
    SortField::CreatedAt => a.product.created_at.cmp(&b.product.created_at),
    SortField::Price => a.product.price.cmp(&b.product.price),
  };
  match ordering.direction {
    Direction::Asc => natural,
    Direction::Desc => natural.reverse(),
  }
}

fn to_index(value: i64) -> usize {
  usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

#[async_trait]
impl CatalogStore for InMemoryStore {
  async fn find_many(
    &self,
    filter: &Predicate,
    ordering: Option<SortOrdering>,
    window: Option<PageWindow>,
  ) -> CatalogResult<Vec<ProductRecord>> {
    self.ensure_available()?;
    let tables = self.tables.read();
    let mut rows: Vec<ProductRecord> = tables
      .products
      .iter()
      .map(|p| tables.join(p))
      .filter(|row| filter.matches(row))
      .collect();

    if let Some(ordering) = ordering {
      // Stable: equal keys keep insertion order.
      rows.sort_by(|a, b| compare(a, b, ordering));
    }

    let rows = match window {
      Some(window) => rows
        .into_iter()
        .skip(to_index(window.offset))
        .take(to_index(window.limit))
        .collect(),
      None => rows,
    };
    debug!(rows = rows.len(), "In-memory find_many finished.");
    Ok(rows)
  }

  async fn count(&self, filter: &Predicate) -> CatalogResult<i64> {
    self.ensure_available()?;
    let tables = self.tables.read();
    let count = tables.products.iter().filter(|p| filter.matches(&tables.join(p))).count();
    Ok(count as i64)
  }

  async fn find_one(&self, key: &ProductKey) -> CatalogResult<Option<ProductRecord>> {
    self.ensure_available()?;
    let tables = self.tables.read();
    let found = tables.products.iter().find(|p| match key {
      ProductKey::Id(id) => p.id == *id,
      ProductKey::Slug(slug) => p.slug == *slug,
    });
    Ok(found.map(|p| tables.join(p)))
  }

  async fn create(&self, fields: NewProduct) -> CatalogResult<ProductRecord> {
    self.ensure_available()?;
    let mut tables = self.tables.write();

    match fields.category_id {
      None if self.require_category => {
        return Err(CatalogError::InvalidReference(
          "product.category_id is required but no category was given".to_string(),
        ));
      }
      Some(id) if tables.category(id).is_none() => {
        return Err(CatalogError::InvalidReference(format!("category {} does not exist", id)));
      }
      _ => {}
    }
    if tables.slug_taken(&fields.slug, None) {
      return Err(CatalogError::Conflict(format!("slug '{}' is already in use", fields.slug)));
    }

    let product = Product {
      id: Uuid::new_v4(),
      name: fields.name,
      slug: fields.slug,
      description: fields.description,
      price: fields.price,
      images: fields.images,
      category_id: fields.category_id,
      created_at: Utc::now(),
    };
    tables.products.push(product.clone());
    Ok(tables.join(&product))
  }

  async fn update(&self, id: Uuid, write: ProductWrite) -> CatalogResult<ProductRecord> {
    self.ensure_available()?;
    let mut tables = self.tables.write();

    let idx = tables
      .products
      .iter()
      .position(|p| p.id == id)
      .ok_or_else(|| CatalogError::product_not_found(id))?;
    let category_id = write.changes.category_id;
    if tables.category(category_id).is_none() {
      return Err(CatalogError::category_not_found(category_id));
    }
    if tables.slug_taken(&write.slug, Some(id)) {
      return Err(CatalogError::Conflict(format!("slug '{}' is already in use", write.slug)));
    }

    let ProductWrite { changes, slug } = write;
    let product = &mut tables.products[idx];
    product.name = changes.name;
    product.slug = slug;
    product.description = changes.description;
    product.price = changes.price;
    product.images = changes.images;
    product.category_id = Some(category_id);

    let updated = product.clone();
    Ok(tables.join(&updated))
  }

  async fn delete(&self, id: Uuid) -> CatalogResult<()> {
    self.ensure_available()?;
    let mut tables = self.tables.write();
    let idx = tables
      .products
      .iter()
      .position(|p| p.id == id)
      .ok_or_else(|| CatalogError::product_not_found(id))?;
    tables.products.remove(idx);
    Ok(())
  }

  async fn find_category(&self, key: &CategoryKey) -> CatalogResult<Option<Category>> {
    self.ensure_available()?;
    let tables = self.tables.read();
    Ok(
      tables
        .categories
        .iter()
        .find(|c| match key {
          CategoryKey::Id(id) => c.id == *id,
          CategoryKey::Slug(slug) => c.slug == *slug,
        })
        .cloned(),
    )
  }

  async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
    self.ensure_available()?;
    let mut categories = self.tables.read().categories.clone();
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(categories)
  }
}
