// catalog_server/src/state.rs
use crate::config::AppConfig;
use catalog::CatalogService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<CatalogService>,
  pub config: Arc<AppConfig>, // Share loaded config
}
