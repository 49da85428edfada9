//! Orgnet Web Server
//!
//! Axum-based JSON API for network analysis and the read-only graph views.

pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use orgnet_graph::GraphStore;
use tower::ServiceBuilder;
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
        // Analysis
        .route("/network-analysis", post(routes::analysis::network_analysis))
        // Directory
        .route("/people", get(routes::directory::list_people))
        .route("/companies", get(routes::directory::list_companies))
        .route("/governments", get(routes::directory::list_governments))
        .route("/relationship-types", get(routes::directory::relationship_types))
        // Canned lookups
        .route("/queries", get(routes::lookups::list_lookups))
        .route("/queries/{id}", post(routes::lookups::run_lookup))
        // Node inspection
        .route("/node", get(routes::nodes::node_detail))
        .route("/node-ids", get(routes::nodes::node_ids))
        .route("/node-relations", get(routes::nodes::node_relations))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_routes)
        .route("/schema-data", get(routes::graph::schema_data))
        .route("/full-graph", get(routes::graph::full_graph))
        .route("/export-json", get(routes::graph::export_json))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(store: Arc<dyn GraphStore>, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(store);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
