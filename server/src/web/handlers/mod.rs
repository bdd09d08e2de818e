// catalog_server/src/web/handlers/mod.rs

pub mod category_handlers;
pub mod credentials;
pub mod product_handlers;

#[cfg(test)]
mod tests;
