// catalog/src/service.rs

//! `CatalogService`: the upward-facing surface. Each call runs the stage chain for
//! its operation and only then hands the request to the engine.

use tracing::instrument;
use uuid::Uuid;

use crate::engine::CatalogQueryEngine;
use crate::error::{CatalogError, CatalogResult};
use crate::model::{Category, ProductChanges, ProductDetail, ProductPage, ProductSummary};
use crate::pipeline::{ChainResult, Operation, OperationContext, StageChain};
use crate::query::ListProductsQuery;

/// Credentials accompanying a request, as extracted by the transport.
pub type Credentials = Option<String>;

#[derive(Clone)]
pub struct CatalogService {
  engine: CatalogQueryEngine,
  stages: StageChain,
}

impl CatalogService {
  pub fn new(engine: CatalogQueryEngine, stages: StageChain) -> Self {
    Self { engine, stages }
  }

  pub fn engine(&self) -> &CatalogQueryEngine {
    &self.engine
  }

  async fn admit(&self, ctx: &OperationContext) -> CatalogResult<()> {
    match self.stages.run(ctx).await? {
      ChainResult::Completed => Ok(()),
      ChainResult::Stopped { stage } => Err(CatalogError::Halted { stage }),
    }
  }

  pub async fn list_products(&self, credentials: Credentials, query: &ListProductsQuery) -> CatalogResult<ProductPage> {
    self
      .admit(&OperationContext::new(Operation::ListProducts, credentials))
      .await?;
    self.engine.list_products(query).await
  }

  pub async fn get_product(&self, credentials: Credentials, id: Uuid) -> CatalogResult<ProductDetail> {
    self
      .admit(&OperationContext::new(Operation::GetProduct, credentials).for_product(id))
      .await?;
    self.engine.get_by_id(id).await
  }

  pub async fn get_product_by_slug(&self, credentials: Credentials, slug: &str) -> CatalogResult<ProductDetail> {
    self
      .admit(&OperationContext::new(Operation::GetProductBySlug, credentials))
      .await?;
    self.engine.get_by_slug(slug).await
  }

  pub async fn get_products_by_category(
    &self,
    credentials: Credentials,
    category_slug: &str,
  ) -> CatalogResult<Vec<ProductDetail>> {
    self
      .admit(&OperationContext::new(Operation::GetProductsByCategory, credentials))
      .await?;
    self.engine.get_by_category(category_slug).await
  }

  pub async fn get_similar_products(&self, credentials: Credentials, id: Uuid) -> CatalogResult<Vec<ProductSummary>> {
    self
      .admit(&OperationContext::new(Operation::GetSimilarProducts, credentials).for_product(id))
      .await?;
    self.engine.get_similar(id).await
  }

  #[instrument(name = "CatalogService::create_product", skip_all, err(Display))]
  pub async fn create_product(&self, credentials: Credentials) -> CatalogResult<Uuid> {
    self
      .admit(&OperationContext::new(Operation::CreateProduct, credentials))
      .await?;
    self.engine.create().await
  }

  #[instrument(name = "CatalogService::update_product", skip(self, credentials, changes), err(Display))]
  pub async fn update_product(
    &self,
    credentials: Credentials,
    id: Uuid,
    changes: ProductChanges,
  ) -> CatalogResult<ProductDetail> {
    let ctx = OperationContext::new(Operation::UpdateProduct, credentials)
      .for_product(id)
      .with_changes(changes.clone());
    self.admit(&ctx).await?;
    self.engine.update(id, changes).await
  }

  #[instrument(name = "CatalogService::delete_product", skip(self, credentials), err(Display))]
  pub async fn delete_product(&self, credentials: Credentials, id: Uuid) -> CatalogResult<()> {
    self
      .admit(&OperationContext::new(Operation::DeleteProduct, credentials).for_product(id))
      .await?;
    self.engine.delete(id).await
  }

  pub async fn list_categories(&self, credentials: Credentials) -> CatalogResult<Vec<Category>> {
    self
      .admit(&OperationContext::new(Operation::ListCategories, credentials))
      .await?;
    self.engine.categories().list_all().await
  }

  pub async fn get_category(&self, credentials: Credentials, id: Uuid) -> CatalogResult<Category> {
    self
      .admit(&OperationContext::new(Operation::GetCategory, credentials))
      .await?;
    self.engine.categories().by_id(id).await
  }

  pub async fn get_category_by_slug(&self, credentials: Credentials, slug: &str) -> CatalogResult<Category> {
    self
      .admit(&OperationContext::new(Operation::GetCategoryBySlug, credentials))
      .await?;
    self.engine.categories().by_slug(slug).await
  }
}
