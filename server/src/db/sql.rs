// catalog_server/src/db/sql.rs

//! Translation of catalog predicates, orderings and windows into Postgres SQL.

use catalog::query::{Direction, IdField, PageWindow, Predicate, SortField, SortOrdering, TextField};
use sqlx::{Postgres, QueryBuilder};

/// Joined product + category columns. Category columns are NULL for drafts.
pub const SELECT_JOINED: &str = "SELECT p.id, p.name, p.slug, p.description, p.price, p.images, p.category_id, \
   p.created_at, c.id AS cat_id, c.name AS cat_name, c.slug AS cat_slug \
   FROM products p LEFT JOIN categories c ON c.id = p.category_id";

pub const COUNT_JOINED: &str = "SELECT COUNT(*) FROM products p LEFT JOIN categories c ON c.id = p.category_id";

fn text_column(field: TextField) -> &'static str {
  match field {
    TextField::ProductName => "p.name",
    TextField::ProductDescription => "p.description",
    TextField::ProductSlug => "p.slug",
    TextField::CategoryName => "c.name",
    TextField::CategorySlug => "c.slug",
  }
}

fn id_column(field: IdField) -> &'static str {
  match field {
    IdField::Product => "p.id",
    IdField::Category => "p.category_id",
  }
}

/// Escapes LIKE metacharacters so the needle matches literally (Postgres' default escape is `\`).
pub fn escape_like(needle: &str) -> String {
  let mut escaped = String::with_capacity(needle.len());
  for ch in needle.chars() {
    if matches!(ch, '%' | '_' | '\\') {
      escaped.push('\\');
    }
    escaped.push(ch);
  }
  escaped
}

pub fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
  match predicate {
    Predicate::MatchAll => {
      qb.push("TRUE");
    }
    Predicate::Contains { field, needle } => {
      qb.push(text_column(*field))
        .push(" ILIKE ")
        .push_bind(format!("%{}%", escape_like(needle)));
    }
    Predicate::TextEq { field, value } => {
      qb.push(text_column(*field)).push(" = ").push_bind(value.clone());
    }
    Predicate::IdEq { field, value } => {
      qb.push(id_column(*field)).push(" = ").push_bind(*value);
    }
    Predicate::AnyOf(parts) => push_group(qb, parts, " OR ", "FALSE"),
    Predicate::AllOf(parts) => push_group(qb, parts, " AND ", "TRUE"),
    Predicate::Not(inner) => {
      qb.push("NOT (");
      push_predicate(qb, inner);
      qb.push(")");
    }
  }
}

fn push_group(qb: &mut QueryBuilder<'_, Postgres>, parts: &[Predicate], joiner: &str, empty: &str) {
  if parts.is_empty() {
    qb.push(empty);
    return;
  }
  qb.push("(");
  for (idx, part) in parts.iter().enumerate() {
    if idx > 0 {
      qb.push(joiner);
    }
    push_predicate(qb, part);
  }
  qb.push(")");
}

pub fn push_where(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
  qb.push(" WHERE ");
  push_predicate(qb, predicate);
}

pub fn push_ordering(qb: &mut QueryBuilder<'_, Postgres>, ordering: Option<SortOrdering>) {
  let Some(ordering) = ordering else {
    return;
  };
  let column = match ordering.field {
    SortField::CreatedAt => "p.created_at",
    SortField::Price => "p.price",
  };
  let direction = match ordering.direction {
    Direction::Asc => "ASC",
    Direction::Desc => "DESC",
  };
  qb.push(" ORDER BY ").push(column).push(" ").push(direction);
}

pub fn push_window(qb: &mut QueryBuilder<'_, Postgres>, window: Option<PageWindow>) {
  if let Some(window) = window {
    qb.push(" LIMIT ").push_bind(window.limit);
    qb.push(" OFFSET ").push_bind(window.offset);
  }
}

/// Full `find_many` statement.
pub fn select_products(
  filter: &Predicate,
  ordering: Option<SortOrdering>,
  window: Option<PageWindow>,
) -> QueryBuilder<'static, Postgres> {
  let mut qb = QueryBuilder::new(SELECT_JOINED);
  push_where(&mut qb, filter);
  push_ordering(&mut qb, ordering);
  push_window(&mut qb, window);
  qb
}

pub fn count_products(filter: &Predicate) -> QueryBuilder<'static, Postgres> {
  let mut qb = QueryBuilder::new(COUNT_JOINED);
  push_where(&mut qb, filter);
  qb
}

#[cfg(test)]
mod tests {
  use super::*;
  use catalog::query::ProductSort;
  use uuid::Uuid;

  #[test]
  fn search_becomes_or_of_ilike_conditions() {
    let qb = count_products(&Predicate::search(Some("shoe")));
    assert_eq!(
      qb.sql(),
      format!(
        "{} WHERE (c.name ILIKE $1 OR p.name ILIKE $2 OR p.description ILIKE $3)",
        COUNT_JOINED
      )
    );
  }

  #[test]
  fn no_search_selects_everything() {
    let qb = count_products(&Predicate::search(None));
    assert!(qb.sql().ends_with(" WHERE TRUE"));
  }

  #[test]
  fn listing_applies_single_order_key_and_window() {
    let window = PageWindow::with_default_size(Some(2), Some(10));
    let qb = select_products(&Predicate::MatchAll, Some(ProductSort::PriceDesc.ordering()), Some(window));
    assert!(qb.sql().ends_with(" WHERE TRUE ORDER BY p.price DESC LIMIT $1 OFFSET $2"));
  }

  #[test]
  fn similarity_excludes_anchor() {
    let predicate = Predicate::AllOf(vec![
      Predicate::TextEq {
        field: TextField::CategoryName,
        value: "Shoes".to_string(),
      },
      Predicate::Not(Box::new(Predicate::IdEq {
        field: IdField::Product,
        value: Uuid::nil(),
      })),
    ]);
    let qb = select_products(&predicate, Some(ProductSort::Newest.ordering()), None);
    assert!(qb
      .sql()
      .ends_with(" WHERE (c.name = $1 AND NOT (p.id = $2)) ORDER BY p.created_at DESC"));
  }

  #[test]
  fn like_metacharacters_are_escaped() {
    assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    assert_eq!(escape_like("plain"), "plain");
  }
}
