// catalog/src/pipeline/chain.rs

//! `StageChain`: an ordered list of stages run before each operation.

use std::sync::Arc;

use tracing::{event, instrument, span, Instrument, Level};

use super::context::OperationContext;
use super::control::{ChainResult, StageControl};
use super::stage::Stage;
use crate::error::CatalogResult;

#[derive(Clone, Default)]
pub struct StageChain {
  stages: Vec<Arc<dyn Stage>>,
}

impl StageChain {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a stage. Stages run in registration order.
  pub fn with(mut self, stage: impl Stage + 'static) -> Self {
    self.stages.push(Arc::new(stage));
    self
  }

  pub fn push(&mut self, stage: Arc<dyn Stage>) {
    self.stages.push(stage);
  }

  pub fn len(&self) -> usize {
    self.stages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }

  pub fn stage_names(&self) -> Vec<&str> {
    self.stages.iter().map(|s| s.name()).collect()
  }

  /// Runs every stage that applies to `ctx.operation`.
  ///
  /// The first error is returned as-is; the first `Stop` ends the run with
  /// `ChainResult::Stopped` naming that stage.
  #[instrument(
        name = "StageChain::run",
        skip_all,
        fields(operation = ctx.operation.name(), num_stages = self.stages.len()),
        err(Display)
    )]
  pub async fn run(&self, ctx: &OperationContext) -> CatalogResult<ChainResult> {
    for (stage_idx, stage) in self.stages.iter().enumerate() {
      if !stage.applies_to(ctx.operation) {
        event!(Level::TRACE, stage = stage.name(), "Stage does not apply, skipping.");
        continue;
      }

      let stage_span = span!(Level::DEBUG, "stage_execution", stage = stage.name(), stage_index = stage_idx);
      match stage.check(ctx).instrument(stage_span).await {
        Ok(StageControl::Continue) => {}
        Ok(StageControl::Stop) => {
          event!(Level::INFO, stage = stage.name(), "Request stopped by stage.");
          return Ok(ChainResult::Stopped {
            stage: stage.name().to_string(),
          });
        }
        Err(e) => {
          event!(Level::WARN, stage = stage.name(), error = %e, "Stage rejected request.");
          return Err(e);
        }
      }
    }

    event!(Level::DEBUG, "All stages passed.");
    Ok(ChainResult::Completed)
  }
}
