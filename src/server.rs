//! HTTP server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Service identity (`{ "name", "status": "ok" }`) |
//! | `GET`  | `/test` | Persistence diagnostics; always 200 |
//! | `POST` | `/api/recipes` | Match a pantry against the catalog |
//!
//! # Error Contract
//!
//! Client errors are returned as `400` with a single reason string:
//!
//! ```json
//! { "detail": "ingredients must be a list of strings" }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use kollny_core::catalog::CATALOG;
use kollny_core::error::QueryError;
use kollny_core::models::{RecipeResult, SearchLogRecord};
use kollny_core::pantry::parse_query;
use kollny_core::search::search;
use kollny_core::store::DocumentStore;

use crate::config::Config;
use crate::diagnostics::{build_report, DiagnosticsReport, StoreStatus};
use crate::search_log::SearchLogger;
use crate::sqlite_store::SqliteStore;

/// Name reported by `GET /`.
pub const SERVICE_NAME: &str = "Kollny EXPRESS API";

/// The persistence collaborator as resolved at startup.
#[derive(Clone)]
pub enum Persistence {
    /// No database configured.
    Disabled,
    /// A database is configured but could not be opened. Holds the error text.
    Failed(String),
    Ready(Arc<dyn DocumentStore>),
}

impl Persistence {
    /// Open the configured database. Failure is recorded, not returned:
    /// the server runs without persistence rather than refusing to start.
    pub async fn open(config: &Config) -> Self {
        let Some(db) = &config.db else {
            info!("No [db] configured; search logging disabled");
            return Persistence::Disabled;
        };
        match SqliteStore::open(db).await {
            Ok(store) => {
                info!(path = %db.path.display(), name = store.name(), "Database ready");
                Persistence::Ready(Arc::new(store))
            }
            Err(e) => {
                warn!(path = %db.path.display(), error = %e, "Database unavailable; continuing without it");
                Persistence::Failed(e.to_string())
            }
        }
    }

    pub fn store(&self) -> Option<Arc<dyn DocumentStore>> {
        match self {
            Persistence::Ready(store) => Some(store.clone()),
            _ => None,
        }
    }

    pub fn status(&self) -> StoreStatus<'_> {
        match self {
            Persistence::Disabled => StoreStatus::NotConfigured,
            Persistence::Failed(err) => StoreStatus::Failed(err),
            Persistence::Ready(store) => StoreStatus::Open(store.as_ref()),
        }
    }
}

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    persistence: Persistence,
    logger: SearchLogger,
}

/// Build the application router.
pub fn router(config: &Config, persistence: Persistence) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        logger: SearchLogger::new(persistence.store()),
        persistence,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_root))
        .route("/test", get(handle_test))
        .route("/api/recipes", post(handle_recipes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the HTTP server.
///
/// Opens the configured database (if any), binds to `[server]` host/port,
/// and serves until Ctrl+C or SIGTERM.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let persistence = Persistence::open(config).await;
    run_server_with_persistence(config, persistence).await
}

/// Like [`run_server`], but with a caller-supplied persistence collaborator.
pub async fn run_server_with_persistence(
    config: &Config,
    persistence: Persistence,
) -> anyhow::Result<()> {
    let bind_addr = config.server.bind_addr();
    let app = router(config, persistence);

    info!("Binding to {bind_addr}");
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("{SERVICE_NAME} listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        bad_request(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request(format!("invalid JSON body: {}", rejection.body_text()))
    }
}

// ============ GET / ============

#[derive(Serialize)]
struct ServiceInfo {
    name: &'static str,
    status: &'static str,
}

async fn handle_root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: SERVICE_NAME,
        status: "ok",
    })
}

// ============ GET /test ============

async fn handle_test(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    Json(build_report(&state.config, state.persistence.status()).await)
}

// ============ POST /api/recipes ============

/// Handler for `POST /api/recipes`.
///
/// Validation happens before matching, so a rejected request never
/// produces partial results. The search log write is dispatched after the
/// response body is computed and cannot change it.
async fn handle_recipes(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<RecipeResult>>, AppError> {
    let Json(body) = body?;
    let query = parse_query(&body)?;

    let results = search(CATALOG, &query);
    debug!(
        ingredients = query.ingredients.len(),
        results = results.len(),
        "recipe search"
    );

    let client = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .logger
        .record(SearchLogRecord::new(&query, results.len(), client));

    Ok(Json(results))
}
