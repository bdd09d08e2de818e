// catalog/src/pipeline/context.rs

use uuid::Uuid;

use crate::model::ProductChanges;

/// Every operation exposed above the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
  ListProducts,
  GetProduct,
  GetProductBySlug,
  GetProductsByCategory,
  GetSimilarProducts,
  CreateProduct,
  UpdateProduct,
  DeleteProduct,
  ListCategories,
  GetCategory,
  GetCategoryBySlug,
}

impl Operation {
  pub fn is_mutation(self) -> bool {
    matches!(
      self,
      Operation::CreateProduct | Operation::UpdateProduct | Operation::DeleteProduct
    )
  }

  pub fn name(self) -> &'static str {
    match self {
      Operation::ListProducts => "list_products",
      Operation::GetProduct => "get_product",
      Operation::GetProductBySlug => "get_product_by_slug",
      Operation::GetProductsByCategory => "get_products_by_category",
      Operation::GetSimilarProducts => "get_similar_products",
      Operation::CreateProduct => "create_product",
      Operation::UpdateProduct => "update_product",
      Operation::DeleteProduct => "delete_product",
      Operation::ListCategories => "list_categories",
      Operation::GetCategory => "get_category",
      Operation::GetCategoryBySlug => "get_category_by_slug",
    }
  }
}

/// What a stage gets to inspect about the incoming request.
#[derive(Debug, Clone)]
pub struct OperationContext {
  pub operation: Operation,
  /// Raw bearer credential from the transport, if any.
  pub credentials: Option<String>,
  pub product_id: Option<Uuid>,
  pub changes: Option<ProductChanges>,
}

impl OperationContext {
  pub fn new(operation: Operation, credentials: Option<String>) -> Self {
    Self {
      operation,
      credentials,
      product_id: None,
      changes: None,
    }
  }

  pub fn for_product(mut self, id: Uuid) -> Self {
    self.product_id = Some(id);
    self
  }

  pub fn with_changes(mut self, changes: ProductChanges) -> Self {
    self.changes = Some(changes);
    self
  }
}
