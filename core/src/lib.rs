// src/lib.rs

//! catalog: a storage-agnostic product catalog query engine.
//!
//! The crate turns loosely-specified requests into deterministic store queries:
//!  - Listing with a single-key sort, case-insensitive free-text search and
//!    page/offset translation, plus a total count of the filtered set.
//!  - Lookups by identifier, slug and category slug.
//!  - "Similar products": a second query keyed off the category of a first result.
//!  - Two-phase product creation (draft, then completing update) with slugs always
//!    derived from the product name.
//!  - Composable request stages (validation, authorization, freezes) run before
//!    each operation.
//!
//! Persistence sits behind the `CatalogStore` trait; `InMemoryStore` is provided.

pub mod category;
pub mod engine;
pub mod error;
pub mod model;
pub mod observe;
pub mod pipeline;
pub mod query;
pub mod service;
pub mod slug;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::category::CategoryResolver;
pub use crate::engine::{CatalogQueryEngine, EngineSettings};
pub use crate::error::{CatalogError, CatalogResult};
pub use crate::model::{
  Category, CategoryKey, NewProduct, Product, ProductChanges, ProductDetail, ProductKey, ProductPage, ProductRecord,
  ProductSummary, ProductWrite,
};
pub use crate::observe::{NoopObserver, QueryEvent, QueryObserver, TracingObserver};
pub use crate::pipeline::{
  ChainResult, Operation, OperationContext, ReadOnlyGuard, Stage, StageChain, StageControl, ValidateChanges,
};
pub use crate::query::{
  ListProductsQuery, PageWindow, Predicate, ProductSort, SimilarMatch, SortOrdering, DEFAULT_PAGE_SIZE,
};
pub use crate::service::{CatalogService, Credentials};
pub use crate::slug::to_slug;
pub use crate::store::{CatalogStore, InMemoryStore};
