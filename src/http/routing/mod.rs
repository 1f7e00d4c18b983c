pub mod tasks;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub fn app(router: Router) -> Router {
    Router::new()
        .route("/", get(|| async { "Server running" }))
        .merge(router)
        .layer(CorsLayer::permissive())
}
