use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{words, Ctx};

/// Initialize HTTP routes.
pub fn init_handlers(ctx: Arc<Ctx>) -> Router {
    let api_routes = Router::new()
        .route("/api/words/{word}", post(words::insert_word))
        .route("/api/autocomplete/{prefix}", get(words::autocomplete))
        .route("/api/stats", get(words::get_stats));

    // Paths used by existing front-ends.
    let legacy_routes = Router::new()
        .route("/insert/{word}", post(words::insert_word))
        .route("/autocomplete/{prefix}", get(words::autocomplete));

    Router::new()
        .merge(api_routes)
        .merge(legacy_routes)
        .layer(cors_layer())
        .with_state(ctx)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
