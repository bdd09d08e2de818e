// catalog/src/slug.rs

/// Derives a URL slug from a product title.
///
/// Lowercases, joins whitespace-separated words with a single `-`, then drops every
/// character that is not an ASCII letter, digit, `_` or `-`. Total: empty or
/// whitespace-only titles give an empty slug. Uniqueness is the store's concern.
pub fn to_slug(title: &str) -> String {
  title
    .to_lowercase()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join("-")
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
    .collect()
}
