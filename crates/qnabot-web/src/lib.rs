//! QnABot Web Server
//!
//! Axum-based REST API over the ingestion pipeline, retrieval engine and
//! conversation flow.

pub mod routes;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use qnabot_engine::Services;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Bots
        .route(
            "/bots",
            get(routes::bots::list_bots).post(routes::bots::create_bot),
        )
        .route("/bots/{id}", get(routes::bots::get_bot))
        .route("/bots/{id}/reply", post(routes::bots::reply))
        // QnA records
        .route(
            "/qna",
            get(routes::qna::list_qna).post(routes::qna::create_qna),
        )
        .route("/qna/batch", post(routes::qna::create_qna_batch))
        .route(
            "/qna/{id}",
            get(routes::qna::get_qna)
                .put(routes::qna::update_qna)
                .delete(routes::qna::delete_qna),
        )
        // Search
        .route("/qna/search/similar", post(routes::search::similar))
        .route("/qna/search/cosine", post(routes::search::cosine))
        .route(
            "/qna/search/similar-by-question",
            post(routes::search::similar_by_question),
        )
        .route(
            "/qna/search/cosine-by-question",
            post(routes::search::cosine_by_question),
        )
        .route(
            "/qna/search/hybrid-by-question",
            post(routes::search::hybrid_by_question),
        )
        .route(
            "/qna/search/best-by-question",
            post(routes::search::best_by_question),
        )
        // Unresolved queries
        .route("/unresolved", get(routes::unresolved::list_unresolved))
        .route(
            "/unresolved/{id}",
            get(routes::unresolved::get_unresolved)
                .patch(routes::unresolved::update_status)
                .delete(routes::unresolved::delete_unresolved),
        )
        .route("/health", get(routes::health::health))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Run the web server.
pub async fn run_server(services: Services, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(AppState::new(services));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
