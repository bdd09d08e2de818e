// catalog_server/src/main.rs

mod config;
mod db;
mod errors;
mod pipelines;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::db::PgCatalogStore;
use crate::errors::{AppError, Result as AppResult};
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use catalog::{CatalogQueryEngine, CatalogService, TracingObserver};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  // `catalog_server --hash-token <token>` prints the ADMIN_TOKEN_HASH value for a token and exits.
  if let Some(token) = token_to_hash(std::env::args().skip(1)) {
    return match services::auth_service::hash_secret(&token) {
      Ok(hash) => {
        println!("{}", hash);
        Ok(())
      }
      Err(e) => Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())),
    };
  }

  tracing::info!("Starting catalog server...");

  let app_state = match build_state().await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialize the catalog server.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  let server_address = format!("{}:{}", app_state.config.server_host, app_state.config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}

fn token_to_hash(mut args: impl Iterator<Item = String>) -> Option<String> {
  match args.next().as_deref() {
    Some("--hash-token") => Some(args.next().unwrap_or_default()),
    _ => None,
  }
}

async fn build_state() -> AppResult<AppState> {
  let app_config = Arc::new(AppConfig::from_env()?);

  let db_pool = PgPool::connect(&app_config.database_url).await.map_err(|e| {
    tracing::error!(error = %e, "Failed to connect to the database.");
    AppError::Sqlx(e)
  })?;
  tracing::info!("Successfully connected to the database.");

  if app_config.run_migrations {
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("Database migrations applied.");
  }

  let store = Arc::new(PgCatalogStore::new(db_pool));
  let engine = CatalogQueryEngine::with_observer(store, Arc::new(TracingObserver), app_config.engine_settings());
  let stages = pipelines::build_stage_chain(&app_config);

  Ok(AppState {
    catalog: Arc::new(CatalogService::new(engine, stages)),
    config: app_config,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(values: &[&str]) -> impl Iterator<Item = String> {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().into_iter()
  }

  #[test]
  fn hash_token_flag_takes_the_next_argument() {
    assert_eq!(token_to_hash(args(&["--hash-token", "s3cret"])), Some("s3cret".to_string()));
    assert_eq!(token_to_hash(args(&["--hash-token"])), Some(String::new()));
  }

  #[test]
  fn no_flag_starts_the_server() {
    assert_eq!(token_to_hash(args(&[])), None);
    assert_eq!(token_to_hash(args(&["--verbose"])), None);
  }
}
