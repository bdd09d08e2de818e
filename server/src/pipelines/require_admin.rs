// catalog_server/src/pipelines/require_admin.rs

use async_trait::async_trait;
use catalog::{CatalogError, CatalogResult, Operation, OperationContext, Stage, StageControl};
use tracing::{error, info, instrument, warn};

use crate::services::auth_service;

/// Admits guarded operations only when the bearer token matches the configured hash.
#[derive(Debug, Clone)]
pub struct RequireAdmin {
  token_hash: Option<String>,
}

impl RequireAdmin {
  pub fn new(token_hash: Option<String>) -> Self {
    Self { token_hash }
  }
}

#[async_trait]
impl Stage for RequireAdmin {
  fn name(&self) -> &str {
    "require_admin"
  }

  fn applies_to(&self, operation: Operation) -> bool {
    operation.is_mutation() || operation == Operation::GetCategory
  }

  #[instrument(name = "stage::require_admin", skip_all, fields(operation = ctx.operation.name()))]
  async fn check(&self, ctx: &OperationContext) -> CatalogResult<StageControl> {
    let Some(token) = ctx.credentials.clone() else {
      warn!("Guarded operation attempted without credentials.");
      return Err(CatalogError::Unauthorized("admin credentials required".to_string()));
    };
    let Some(hash) = self.token_hash.clone() else {
      warn!("No admin token hash configured; refusing guarded operation.");
      return Err(CatalogError::Unauthorized("admin access is not configured".to_string()));
    };

    // Argon2 verification blocks; run it off the async workers.
    let verified = tokio::task::spawn_blocking(move || auth_service::verify_secret(&hash, &token))
      .await
      .map_err(|join_err| {
        error!(error = %join_err, "Token verification task failed.");
        CatalogError::Unauthorized("credential verification failed".to_string())
      })?
      .map_err(|app_err| {
        error!(error = %app_err, "Token verification could not run.");
        CatalogError::Unauthorized("credential verification failed".to_string())
      })?;

    if !verified {
      warn!("Invalid admin token presented.");
      return Err(CatalogError::Unauthorized("invalid admin credentials".to_string()));
    }
    info!("Admin credentials accepted.");
    Ok(StageControl::Continue)
  }
}
