use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::middleware;
use crate::routes;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/scenarios", get(routes::scenarios::list_scenarios))
        .route("/chat", post(routes::chat::chat))
        .route("/get_viva", post(routes::viva::get_viva))
        .route("/grade", post(routes::grade::grade))
        .route("/grade_viva", post(routes::viva::grade_viva))
        .route("/final_assessment", post(routes::finalize::final_assessment))
        .route("/attempts", get(routes::attempts::list_attempts))
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .with_state(state)
}
