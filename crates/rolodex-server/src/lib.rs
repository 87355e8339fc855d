//! Rolodex server assembly: configuration and the top-level router.
//!
//! The binary in `main.rs` loads a [`ServerConfig`], opens the store and
//! serves [`app`]. Everything the API exposes lives under `/api`.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use rolodex_core::store::ContactStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROLODEX_*` environment variables. Every field has a default.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3000 }
fn default_store_path() -> PathBuf { PathBuf::from("rolodex.db") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      store_path: default_store_path(),
    }
  }
}

impl ServerConfig {
  /// `host:port`, suitable for [`tokio::net::TcpListener::bind`].
  pub fn bind_address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API nested under `/api`, with per-request tracing.
pub fn app<S: ContactStore + 'static>(store: Arc<S>) -> Router {
  Router::new()
    .nest("/api", rolodex_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
