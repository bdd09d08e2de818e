// catalog/src/query/predicate.rs

//! Filter predicates over joined product rows.
//!
//! A `Predicate` is a small boolean AST. The engine only ever builds predicates;
//! stores interpret them, either by evaluating `Predicate::matches` against rows
//! held in memory or by translating the tree into their own query language.

use std::str::FromStr;

use uuid::Uuid;

use crate::model::ProductRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
  ProductName,
  ProductDescription,
  ProductSlug,
  CategoryName,
  CategorySlug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdField {
  Product,
  Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
  MatchAll,
  /// Case-insensitive substring match.
  Contains { field: TextField, needle: String },
  /// Exact, case-sensitive equality.
  TextEq { field: TextField, value: String },
  IdEq { field: IdField, value: Uuid },
  AnyOf(Vec<Predicate>),
  AllOf(Vec<Predicate>),
  Not(Box<Predicate>),
}

/// How "same category" is decided when looking up similar products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SimilarMatch {
  /// Compare category names. Distinct categories sharing a name are conflated.
  #[default]
  CategoryName,
  /// Compare category identifiers.
  CategoryId,
}

impl FromStr for SimilarMatch {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "category-name" => Ok(SimilarMatch::CategoryName),
      "category-id" => Ok(SimilarMatch::CategoryId),
      other => Err(format!(
        "unknown similar-match strategy '{}' (expected 'category-name' or 'category-id')",
        other
      )),
    }
  }
}

impl Predicate {
  /// Free-text search over category name, product name and product description.
  ///
  /// Only a literally empty term disables filtering; whitespace is not trimmed.
  pub fn search(term: Option<&str>) -> Self {
    match term {
      None | Some("") => Predicate::MatchAll,
      Some(term) => Predicate::AnyOf(vec![
        Predicate::contains(TextField::CategoryName, term),
        Predicate::contains(TextField::ProductName, term),
        Predicate::contains(TextField::ProductDescription, term),
      ]),
    }
  }

  pub fn in_category_slug(slug: &str) -> Self {
    Predicate::TextEq {
      field: TextField::CategorySlug,
      value: slug.to_string(),
    }
  }

  /// Products in the same category as `anchor`, excluding the anchor itself.
  /// Returns `None` when the anchor is a draft with no category to compare against.
  pub fn similar_to(anchor: &ProductRecord, strategy: SimilarMatch) -> Option<Self> {
    let same_category = match strategy {
      SimilarMatch::CategoryName => Predicate::TextEq {
        field: TextField::CategoryName,
        value: anchor.category.as_ref()?.name.clone(),
      },
      SimilarMatch::CategoryId => Predicate::IdEq {
        field: IdField::Category,
        value: anchor.product.category_id?,
      },
    };

    Some(Predicate::AllOf(vec![
      same_category,
      Predicate::Not(Box::new(Predicate::IdEq {
        field: IdField::Product,
        value: anchor.product.id,
      })),
    ]))
  }

  pub fn contains(field: TextField, needle: &str) -> Self {
    Predicate::Contains {
      field,
      needle: needle.to_string(),
    }
  }

  /// Evaluates the predicate against a joined row. Comparisons against a
  /// missing category are false.
  pub fn matches(&self, record: &ProductRecord) -> bool {
    match self {
      Predicate::MatchAll => true,
      Predicate::Contains { field, needle } => text_value(record, *field)
        .map(|value| value.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false),
      Predicate::TextEq { field, value } => text_value(record, *field).map_or(false, |v| v == value),
      Predicate::IdEq { field, value } => id_value(record, *field).map_or(false, |v| v == *value),
      Predicate::AnyOf(parts) => parts.iter().any(|p| p.matches(record)),
      Predicate::AllOf(parts) => parts.iter().all(|p| p.matches(record)),
      Predicate::Not(inner) => !inner.matches(record),
    }
  }
}

fn text_value(record: &ProductRecord, field: TextField) -> Option<&str> {
  match field {
    TextField::ProductName => Some(record.product.name.as_str()),
    TextField::ProductDescription => Some(record.product.description.as_str()),
    TextField::ProductSlug => Some(record.product.slug.as_str()),
    TextField::CategoryName => record.category.as_ref().map(|c| c.name.as_str()),
    TextField::CategorySlug => record.category.as_ref().map(|c| c.slug.as_str()),
  }
}

fn id_value(record: &ProductRecord, field: IdField) -> Option<Uuid> {
  match field {
    IdField::Product => Some(record.product.id),
    IdField::Category => record.product.category_id,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::{Category, Product};
  use chrono::Utc;

  fn record(name: &str, description: &str, category: Option<(&str, &str)>) -> ProductRecord {
    let category = category.map(|(name, slug)| Category {
      id: Uuid::new_v4(),
      name: name.to_string(),
      slug: slug.to_string(),
    });
    ProductRecord {
      product: Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: name.to_lowercase(),
        description: description.to_string(),
        price: 100,
        images: Vec::new(),
        category_id: category.as_ref().map(|c| c.id),
        created_at: Utc::now(),
      },
      category,
    }
  }

  #[test]
  fn search_matches_any_text_field_ignoring_case() {
    let shoe = record("Trail Runner", "Grippy sole", Some(("Shoes", "shoes")));
    assert!(Predicate::search(Some("trail")).matches(&shoe));
    assert!(Predicate::search(Some("GRIPPY")).matches(&shoe));
    assert!(Predicate::search(Some("sHoE")).matches(&shoe));
    assert!(!Predicate::search(Some("hat")).matches(&shoe));
  }

  #[test]
  fn empty_search_term_matches_everything() {
    assert_eq!(Predicate::search(Some("")), Predicate::MatchAll);
    assert_eq!(Predicate::search(None), Predicate::MatchAll);
  }

  #[test]
  fn whitespace_search_term_is_not_trimmed() {
    let product = record("Cap", "Plain", None);
    assert!(!Predicate::search(Some(" ")).matches(&product));
    let spaced = record("Wool Cap", "Plain", None);
    assert!(Predicate::search(Some(" ")).matches(&spaced));
  }

  #[test]
  fn category_comparisons_fail_on_drafts() {
    let draft = record("", "", None);
    assert!(!Predicate::in_category_slug("shoes").matches(&draft));
    assert!(Predicate::similar_to(&draft, SimilarMatch::CategoryName).is_none());
    assert!(Predicate::similar_to(&draft, SimilarMatch::CategoryId).is_none());
  }

  #[test]
  fn similar_predicate_excludes_the_anchor() {
    let anchor = record("Boot", "", Some(("Shoes", "shoes")));
    let predicate = Predicate::similar_to(&anchor, SimilarMatch::CategoryName).unwrap();
    assert!(!predicate.matches(&anchor));

    let sibling = record("Sandal", "", Some(("Shoes", "other-shoes")));
    assert!(predicate.matches(&sibling));

    let by_id = Predicate::similar_to(&anchor, SimilarMatch::CategoryId).unwrap();
    assert!(!by_id.matches(&sibling));
  }

  #[test]
  fn similar_match_parses_config_values() {
    assert_eq!("category-id".parse::<SimilarMatch>(), Ok(SimilarMatch::CategoryId));
    assert_eq!("category-name".parse::<SimilarMatch>(), Ok(SimilarMatch::CategoryName));
    assert!("name".parse::<SimilarMatch>().is_err());
  }
}
