use axum::{Router, routing::get};

use crate::state::AppState;

pub mod api;
pub mod doc;
pub mod health;
pub mod movies;
pub mod reviews;
pub mod users;

// Page routes plus the JSON API; state is provided at the top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health_check))
        .merge(users::router())
        .merge(movies::router())
        .merge(reviews::router())
        .nest("/api", api::router())
}
