// catalog/src/observe.rs

//! Observability hooks the engine reports query construction to.
//!
//! The observer is injected into `CatalogQueryEngine` and `CategoryResolver`; nothing
//! in the core logs query details through global state.

use tracing::{event, Level};

use crate::model::CategoryKey;
use crate::query::{PageWindow, Predicate, SortOrdering};

/// A query about to be sent to the store.
#[derive(Debug, Clone, Copy)]
pub struct QueryEvent<'a> {
  pub operation: &'static str,
  pub filter: &'a Predicate,
  pub ordering: Option<SortOrdering>,
  pub window: Option<PageWindow>,
}

pub trait QueryObserver: Send + Sync {
  fn on_query(&self, event: QueryEvent<'_>);

  fn on_category_lookup(&self, _key: &CategoryKey) {}
}

/// Emits each query as a `tracing` debug event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl QueryObserver for TracingObserver {
  fn on_query(&self, query: QueryEvent<'_>) {
    event!(
      Level::DEBUG,
      operation = query.operation,
      filter = ?query.filter,
      ordering = ?query.ordering,
      window = ?query.window,
      "Issuing catalog query."
    );
  }

  fn on_category_lookup(&self, key: &CategoryKey) {
    event!(Level::DEBUG, category = %key, "Resolving category.");
  }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl QueryObserver for NoopObserver {
  fn on_query(&self, _event: QueryEvent<'_>) {}
}
