// catalog/src/model/mod.rs

//! Data structures for catalog entities and the projections handed back to callers.

pub mod category;
pub mod product;

pub use category::{Category, CategoryKey};
pub use product::{
  NewProduct, Product, ProductChanges, ProductDetail, ProductKey, ProductPage, ProductRecord, ProductSummary,
  ProductWrite,
};
