// catalog/src/pipeline/stage.rs

//! The `Stage` trait and the stages the core ships with.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::context::{Operation, OperationContext};
use super::control::StageControl;
use crate::error::{CatalogError, CatalogResult};
use crate::slug::to_slug;

/// A pre-processing step run before an operation reaches the engine.
///
/// Returning `Err` rejects the request with that error; returning
/// `StageControl::Stop` halts it with `CatalogError::Halted`.
#[async_trait]
pub trait Stage: Send + Sync {
  fn name(&self) -> &str;

  /// Stages are skipped for operations they do not apply to.
  fn applies_to(&self, _operation: Operation) -> bool {
    true
  }

  async fn check(&self, ctx: &OperationContext) -> CatalogResult<StageControl>;
}

/// Rejects malformed update payloads before any store access.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidateChanges;

#[async_trait]
impl Stage for ValidateChanges {
  fn name(&self) -> &str {
    "validate_changes"
  }

  fn applies_to(&self, operation: Operation) -> bool {
    operation == Operation::UpdateProduct
  }

  async fn check(&self, ctx: &OperationContext) -> CatalogResult<StageControl> {
    let Some(changes) = ctx.changes.as_ref() else {
      return Err(CatalogError::Validation("update requires a product payload".to_string()));
    };

    if changes.name.trim().is_empty() {
      return Err(CatalogError::Validation("name must not be empty".to_string()));
    }
    if to_slug(&changes.name).is_empty() {
      return Err(CatalogError::Validation(format!(
        "name '{}' has no characters usable in a slug",
        changes.name
      )));
    }
    if changes.price < 0 {
      return Err(CatalogError::Validation(format!(
        "price must not be negative (got {})",
        changes.price
      )));
    }
    if let Some(idx) = changes.images.iter().position(|uri| uri.trim().is_empty()) {
      return Err(CatalogError::Validation(format!("image #{} has an empty URI", idx)));
    }

    debug!("Product changes passed validation.");
    Ok(StageControl::Continue)
  }
}

/// Stops every mutation while the catalog is frozen. Reads pass through.
#[derive(Debug, Clone, Copy)]
pub struct ReadOnlyGuard {
  frozen: bool,
}

impl ReadOnlyGuard {
  pub fn new(frozen: bool) -> Self {
    Self { frozen }
  }
}

#[async_trait]
impl Stage for ReadOnlyGuard {
  fn name(&self) -> &str {
    "read_only_guard"
  }

  fn applies_to(&self, operation: Operation) -> bool {
    operation.is_mutation()
  }

  async fn check(&self, ctx: &OperationContext) -> CatalogResult<StageControl> {
    if self.frozen {
      warn!(operation = ctx.operation.name(), "Catalog is read-only; stopping mutation.");
      return Ok(StageControl::Stop);
    }
    Ok(StageControl::Continue)
  }
}
