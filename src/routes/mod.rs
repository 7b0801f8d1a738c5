use axum::{extract::DefaultBodyLimit, Router};

use crate::{Config, SessionStore};

mod contact;
mod dashboard;
mod datasets;
mod health;

// ---

/// Shared state handed to every handler.
pub type AppState = (SessionStore, Config);

pub fn router(store: SessionStore, config: Config) -> Router {
    // ---
    let body_limit = DefaultBodyLimit::max(config.max_upload_bytes);

    Router::new()
        .merge(datasets::router())
        .merge(dashboard::router())
        .merge(contact::router())
        .merge(health::router())
        .layer(body_limit)
        .with_state((store, config))
}
