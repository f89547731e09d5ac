//! Axum router construction.
//!
//! Assembles every route into a single [`Router`] with CORS enabled so the
//! page can be served from a different origin during development.

use axum::Router;
use axum::routing::{delete, get, post, put};
use hatchery_genai::CreatureGenerator;
use hatchery_store::CreatureStore;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, SharedController};

/// Build the complete router.
///
/// Routes are listed in [`crate::handlers`].
pub fn build_router<S: CreatureStore, G: CreatureGenerator>(
    controller: SharedController<S, G>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/state", get(handlers::get_state::<S, G>))
        .route("/api/creatures/{id}", get(handlers::get_creature::<S, G>))
        .route("/api/generate", post(handlers::generate::<S, G>))
        .route("/api/creatures/{id}/evolve", post(handlers::evolve::<S, G>))
        .route(
            "/api/creatures/{id}/resell",
            post(handlers::request_resell::<S, G>),
        )
        .route(
            "/api/confirmation/confirm",
            post(handlers::confirm::<S, G>),
        )
        .route("/api/confirmation/cancel", post(handlers::cancel::<S, G>))
        .route("/api/sort", put(handlers::set_sort::<S, G>))
        .route("/api/notice", delete(handlers::dismiss_notice::<S, G>))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(controller)
}
