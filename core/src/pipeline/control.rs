// catalog/src/pipeline/control.rs

//! Signals for controlling stage-chain flow and the outcome of a chain run.

/// Signal from a stage indicating whether the request may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageControl {
  /// Hand the request to the next stage (or to the engine, after the last one).
  Continue,
  /// Halt the request. No further stages run and the operation is not executed.
  Stop,
}

/// Outcome of running every applicable stage for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainResult {
  Completed,
  Stopped { stage: String },
}
