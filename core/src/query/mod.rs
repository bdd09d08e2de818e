// catalog/src/query/mod.rs

//! Building blocks the engine assembles queries from: sort orderings, filter
//! predicates and pagination windows, plus the listing request descriptor.

pub mod pagination;
pub mod predicate;
pub mod sort;

use serde::Deserialize;

pub use pagination::{PageWindow, DEFAULT_PAGE_SIZE};
pub use predicate::{IdField, Predicate, SimilarMatch, TextField};
pub use sort::{Direction, ProductSort, SortField, SortOrdering};

/// Listing request. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
  pub sort: Option<ProductSort>,
  pub search_term: Option<String>,
  pub page: Option<i64>,
  pub per_page: Option<i64>,
}

impl ListProductsQuery {
  pub fn sorted(sort: ProductSort) -> Self {
    Self {
      sort: Some(sort),
      ..Default::default()
    }
  }

  pub fn search(term: impl Into<String>) -> Self {
    Self {
      search_term: Some(term.into()),
      ..Default::default()
    }
  }

  pub fn page(mut self, page: i64, per_page: i64) -> Self {
    self.page = Some(page);
    self.per_page = Some(per_page);
    self
  }
}
