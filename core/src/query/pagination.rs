// catalog/src/query/pagination.rs

//! Translates a 1-based page number and page size into an offset/limit window.

/// Page size used when a request gives none, or gives a non-positive one.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
  pub offset: i64,
  pub limit: i64,
}

impl PageWindow {
  /// `page` < 1 or absent becomes 1; `per_page` <= 0 or absent becomes `default_per_page`.
  /// A non-positive `default_per_page` falls back to `DEFAULT_PAGE_SIZE`, so the limit
  /// is always positive and the offset never negative.
  pub fn compute(page: Option<i64>, per_page: Option<i64>, default_per_page: i64) -> Self {
    let fallback = if default_per_page > 0 {
      default_per_page
    } else {
      DEFAULT_PAGE_SIZE
    };
    let limit = per_page.filter(|size| *size > 0).unwrap_or(fallback);
    let page = page.filter(|page| *page >= 1).unwrap_or(1);

    Self {
      offset: (page - 1).saturating_mul(limit),
      limit,
    }
  }

  pub fn with_default_size(page: Option<i64>, per_page: Option<i64>) -> Self {
    Self::compute(page, per_page, DEFAULT_PAGE_SIZE)
  }
}
