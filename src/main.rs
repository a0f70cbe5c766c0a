use axum::{
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use adr_portal_api::handlers;
use adr_portal_api::middleware::gate;
use adr_portal_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = adr_portal_api::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting ADR portal API in {:?} mode", config.environment);

    let state = AppState::from_config(config);

    // Best-effort migrations; the server still serves health and static
    // registry errors when the database is down.
    match state.db.migrate().await {
        Ok(_) => tracing::info!("database migrations applied"),
        Err(e) => tracing::warn!("database migrations not applied: {}", e),
    }

    let app = app(state);

    let port = config.server.port;
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("ADR portal API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/api/health", get(handlers::health::health))
        .route("/api/health/db", get(handlers::health::health_db))
        // Auth (verifies tokens in-handler; outside the gate's matcher)
        .route("/api/auth/login", post(handlers::auth::login))
        .route(
            "/api/auth/profile",
            get(handlers::auth::profile_get).put(handlers::auth::profile_put),
        )
        // Audit trail (admin-only, verified in-handler)
        .route("/api/audit-logs", get(handlers::audit::list))
        // Content CRUD behind the gate
        .route(
            "/api/content/:content_type",
            get(handlers::content::list)
                .post(handlers::content::create)
                .put(handlers::content::update)
                .delete(handlers::content::remove),
        )
        // Headless CMS passthrough
        .route("/api/cms/*path", get(handlers::cms::proxy))
        // Global middleware
        .layer(axum::middleware::from_fn(gate::request_gate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "ADR Portal API",
            "version": version,
            "description": "Content and admin backend for the ADR services portal",
            "endpoints": {
                "home": "/ (public)",
                "health": "/api/health, /api/health/db (public)",
                "auth": "/api/auth/login, /api/auth/profile",
                "content": "/api/content/:type (GET public, writes admin-only)",
                "audit": "/api/audit-logs (admin)",
                "cms": "/api/cms/*path (public passthrough)",
            }
        }
    }))
}
