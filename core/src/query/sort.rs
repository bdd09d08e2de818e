// catalog/src/query/sort.rs

//! Sort modes accepted from callers and the single-key orderings they map to.

use serde::{Deserialize, Serialize};

/// Caller-facing sort mode. Deserialization never fails: an unrecognized mode
/// falls back to `Newest`, same as an absent one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum ProductSort {
  #[default]
  Newest,
  Oldest,
  PriceAsc,
  PriceDesc,
}

impl ProductSort {
  pub fn as_str(&self) -> &'static str {
    match self {
      ProductSort::Newest => "newest",
      ProductSort::Oldest => "oldest",
      ProductSort::PriceAsc => "price-asc",
      ProductSort::PriceDesc => "price-desc",
    }
  }

  /// Exactly one ordering key; ties are left to the store.
  pub fn ordering(self) -> SortOrdering {
    match self {
      ProductSort::Newest => SortOrdering::desc(SortField::CreatedAt),
      ProductSort::Oldest => SortOrdering::asc(SortField::CreatedAt),
      ProductSort::PriceAsc => SortOrdering::asc(SortField::Price),
      ProductSort::PriceDesc => SortOrdering::desc(SortField::Price),
    }
  }
}

impl From<&str> for ProductSort {
  fn from(mode: &str) -> Self {
    match mode {
      "oldest" => ProductSort::Oldest,
      "price-asc" => ProductSort::PriceAsc,
      "price-desc" => ProductSort::PriceDesc,
      _ => ProductSort::Newest,
    }
  }
}

impl From<String> for ProductSort {
  fn from(mode: String) -> Self {
    ProductSort::from(mode.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
  CreatedAt,
  Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Asc,
  Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrdering {
  pub field: SortField,
  pub direction: Direction,
}

impl SortOrdering {
  pub fn asc(field: SortField) -> Self {
    Self {
      field,
      direction: Direction::Asc,
    }
  }

  pub fn desc(field: SortField) -> Self {
    Self {
      field,
      direction: Direction::Desc,
    }
  }
}
