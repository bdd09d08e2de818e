// catalog_server/src/db/mod.rs

//! PostgreSQL implementation of `CatalogStore`.

pub mod sql;

use async_trait::async_trait;
use catalog::query::{IdField, PageWindow, Predicate, SortOrdering, TextField};
use catalog::{
  CatalogError, CatalogResult, CatalogStore, Category, CategoryKey, NewProduct, Product, ProductKey, ProductRecord,
  ProductWrite,
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, instrument};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct JoinedRow {
  id: Uuid,
  name: String,
  slug: String,
  description: String,
  price: i32,
  images: Vec<String>,
  category_id: Option<Uuid>,
  created_at: DateTime<Utc>,
  cat_id: Option<Uuid>,
  cat_name: Option<String>,
  cat_slug: Option<String>,
}

impl From<JoinedRow> for ProductRecord {
  fn from(row: JoinedRow) -> Self {
    let category = match (row.cat_id, row.cat_name, row.cat_slug) {
      (Some(id), Some(name), Some(slug)) => Some(Category { id, name, slug }),
      _ => None,
    };
    ProductRecord {
      product: Product {
        id: row.id,
        name: row.name,
        slug: row.slug,
        description: row.description,
        price: row.price,
        images: row.images,
        category_id: row.category_id,
        created_at: row.created_at,
      },
      category,
    }
  }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
  id: Uuid,
  name: String,
  slug: String,
}

impl From<CategoryRow> for Category {
  fn from(row: CategoryRow) -> Self {
    Category {
      id: row.id,
      name: row.name,
      slug: row.slug,
    }
  }
}

/// Maps Postgres constraint violations onto catalog error kinds. `on_foreign_key`
/// decides what a dangling category reference means for the calling operation.
fn map_db_error(err: sqlx::Error, on_foreign_key: impl FnOnce(String) -> CatalogError) -> CatalogError {
  if let sqlx::Error::Database(db_err) = &err {
    let message = db_err.message().to_string();
    match db_err.code().as_deref() {
      Some("23505") => return CatalogError::Conflict(message),
      Some("23503") => return on_foreign_key(message),
      Some("23502") => return CatalogError::InvalidReference(message),
      Some("23514") => return CatalogError::Validation(message),
      _ => {}
    }
  }
  error!(error = %err, "Database operation failed.");
  CatalogError::StoreUnavailable {
    source: anyhow::Error::new(err),
  }
}

fn store_error(err: sqlx::Error) -> CatalogError {
  map_db_error(err, CatalogError::InvalidReference)
}

#[derive(Clone)]
pub struct PgCatalogStore {
  pool: PgPool,
}

impl PgCatalogStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn fetch_joined(&self, mut qb: QueryBuilder<'_, Postgres>) -> CatalogResult<Option<ProductRecord>> {
    let row: Option<JoinedRow> = qb
      .build_query_as()
      .fetch_optional(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(row.map(ProductRecord::from))
  }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
  #[instrument(name = "PgCatalogStore::find_many", skip_all)]
  async fn find_many(
    &self,
    filter: &Predicate,
    ordering: Option<SortOrdering>,
    window: Option<PageWindow>,
  ) -> CatalogResult<Vec<ProductRecord>> {
    let mut qb = sql::select_products(filter, ordering, window);
    debug!(sql = qb.sql(), "find_many");
    let rows: Vec<JoinedRow> = qb
      .build_query_as()
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(rows.into_iter().map(ProductRecord::from).collect())
  }

  #[instrument(name = "PgCatalogStore::count", skip_all)]
  async fn count(&self, filter: &Predicate) -> CatalogResult<i64> {
    let mut qb = sql::count_products(filter);
    let total = qb
      .build_query_scalar::<i64>()
      .fetch_one(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(total)
  }

  async fn find_one(&self, key: &ProductKey) -> CatalogResult<Option<ProductRecord>> {
    let predicate = match key {
      ProductKey::Id(id) => Predicate::IdEq {
        field: IdField::Product,
        value: *id,
      },
      ProductKey::Slug(slug) => Predicate::TextEq {
        field: TextField::ProductSlug,
        value: slug.clone(),
      },
    };
    let mut qb = sql::select_products(&predicate, None, None);
    qb.push(" LIMIT 1");
    self.fetch_joined(qb).await
  }

  #[instrument(name = "PgCatalogStore::create", skip_all, err(Display))]
  async fn create(&self, fields: NewProduct) -> CatalogResult<ProductRecord> {
    let mut qb = QueryBuilder::<Postgres>::new(
      "WITH p AS (INSERT INTO products (id, name, slug, description, price, images, category_id) VALUES (",
    );
    let mut values = qb.separated(", ");
    values.push_bind(Uuid::new_v4());
    values.push_bind(fields.name);
    values.push_bind(fields.slug);
    values.push_bind(fields.description);
    values.push_bind(fields.price);
    values.push_bind(fields.images);
    values.push_bind(fields.category_id);
    qb.push(
      ") RETURNING *) SELECT p.id, p.name, p.slug, p.description, p.price, p.images, p.category_id, p.created_at, \
       c.id AS cat_id, c.name AS cat_name, c.slug AS cat_slug FROM p LEFT JOIN categories c ON c.id = p.category_id",
    );

    let row: JoinedRow = qb
      .build_query_as()
      .fetch_one(&self.pool)
      .await
      .map_err(|e| map_db_error(e, CatalogError::InvalidReference))?;
    Ok(row.into())
  }

  #[instrument(name = "PgCatalogStore::update", skip(self, write), err(Display))]
  async fn update(&self, id: Uuid, write: ProductWrite) -> CatalogResult<ProductRecord> {
    let ProductWrite { changes, slug } = write;
    let category_id = changes.category_id;

    let mut qb = QueryBuilder::<Postgres>::new("WITH p AS (UPDATE products SET name = ");
    qb.push_bind(changes.name);
    qb.push(", slug = ").push_bind(slug);
    qb.push(", description = ").push_bind(changes.description);
    qb.push(", price = ").push_bind(changes.price);
    qb.push(", images = ").push_bind(changes.images);
    qb.push(", category_id = ").push_bind(category_id);
    qb.push(" WHERE id = ").push_bind(id);
    qb.push(
      " RETURNING *) SELECT p.id, p.name, p.slug, p.description, p.price, p.images, p.category_id, p.created_at, \
       c.id AS cat_id, c.name AS cat_name, c.slug AS cat_slug FROM p LEFT JOIN categories c ON c.id = p.category_id",
    );

    let row: Option<JoinedRow> = qb
      .build_query_as()
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| map_db_error(e, |_| CatalogError::category_not_found(category_id)))?;
    row
      .map(ProductRecord::from)
      .ok_or_else(|| CatalogError::product_not_found(id))
  }

  #[instrument(name = "PgCatalogStore::delete", skip(self), err(Display))]
  async fn delete(&self, id: Uuid) -> CatalogResult<()> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(store_error)?;
    if result.rows_affected() == 0 {
      return Err(CatalogError::product_not_found(id));
    }
    Ok(())
  }

  async fn find_category(&self, key: &CategoryKey) -> CatalogResult<Option<Category>> {
    let query = match key {
      CategoryKey::Id(id) => sqlx::query_as::<_, CategoryRow>("SELECT id, name, slug FROM categories WHERE id = $1").bind(*id),
      CategoryKey::Slug(slug) => {
        sqlx::query_as::<_, CategoryRow>("SELECT id, name, slug FROM categories WHERE slug = $1").bind(slug.clone())
      }
    };
    let row = query.fetch_optional(&self.pool).await.map_err(store_error)?;
    Ok(row.map(Category::from))
  }

  async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
    let rows = sqlx::query_as::<_, CategoryRow>("SELECT id, name, slug FROM categories ORDER BY name ASC")
      .fetch_all(&self.pool)
      .await
      .map_err(store_error)?;
    Ok(rows.into_iter().map(Category::from).collect())
  }
}
