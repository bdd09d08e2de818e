// catalog_server/src/pipelines/mod.rs

//! Assembles the request stages every catalog operation passes through.

use catalog::{ReadOnlyGuard, StageChain, ValidateChanges};

use crate::config::AppConfig;

pub mod require_admin;

pub use require_admin::RequireAdmin;

/// Authorization first, then the freeze check, then payload validation.
pub fn build_stage_chain(config: &AppConfig) -> StageChain {
  let chain = StageChain::new()
    .with(RequireAdmin::new(config.admin_token_hash.clone()))
    .with(ReadOnlyGuard::new(config.read_only))
    .with(ValidateChanges);

  tracing::info!(stages = ?chain.stage_names(), "Catalog request stages registered.");
  chain
}
