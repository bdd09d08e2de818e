// catalog/src/pipeline/mod.rs

//! Cross-cutting request stages (validation, authorization, freezes) that wrap
//! catalog operations without living inside the query engine.

pub mod chain;
pub mod context;
pub mod control;
pub mod stage;

pub use chain::StageChain;
pub use context::{Operation, OperationContext};
pub use control::{ChainResult, StageControl};
pub use stage::{ReadOnlyGuard, Stage, ValidateChanges};
