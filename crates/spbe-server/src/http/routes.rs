use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{auth, dashboard, evidence, health, reference, upload, verification};
use super::{ApiError, AppState};

/// The route table, without state or middleware.
fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/profile", get(auth::profile))
        .route("/auth/logout", post(auth::logout))
        // Reference data
        .route("/unit-kerja", get(reference::units))
        .route("/domain-spbe", get(reference::domains))
        .route("/aspek-spbe", get(reference::aspects))
        .route("/indikator-spbe", get(reference::indicators))
        // Evidence
        .route("/bukti-dukung", get(evidence::list).post(evidence::create))
        .route(
            "/bukti-dukung/:id",
            put(evidence::update).delete(evidence::remove),
        )
        // Verification
        .route("/verifikasi/:id", put(verification::verify))
        .route("/verifikasi-log/:bukti_id", get(verification::log))
        // Files and dashboard
        .route("/upload", post(upload::upload))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/health", get(health::health))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".into())
}

/// Build the full application: routes at `/` and `/api`, a JSON 404
/// fallback, body limit, request tracing and CORS.
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;
    let mut router = api_routes()
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    if server.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}
