//! kousei-server library - web API and dashboard for the spell checker.

use std::sync::{Arc, Mutex};

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use kousei_core::Checker;
use kousei_store::LexiconStore;

pub mod api;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The checking engine (immutable after startup)
    pub checker: Arc<Checker>,
    /// Lexicon store, also the check-history sink
    pub store: Arc<Mutex<LexiconStore>>,
    /// Configured model identifier, echoed by the API
    pub model_name: String,
}

impl AppState {
    /// Create new application state
    pub fn new(checker: Checker, store: LexiconStore, model_name: String) -> Self {
        Self {
            checker: Arc::new(checker),
            store: Arc::new(Mutex::new(store)),
            model_name,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::ui::serve_index))
        .route("/dashboard", get(api::ui::serve_dashboard))
        .route("/static/app.js", get(api::ui::serve_app_js))
        .route("/static/dashboard.js", get(api::ui::serve_dashboard_js))
        .route("/api/check", post(api::check::check_text))
        .route("/api/health", get(api::health::health_check))
        .route("/api/models", get(api::models::available_models))
        .route("/api/stats", get(api::stats::store_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the store, build the checker, bind and serve.
///
/// Model-load failure is not fatal: the checker degrades to rules-only
/// operation and the health endpoint reports `model_loaded: false`.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let store = LexiconStore::open(&config.store.path)?;
    store.init_schema()?;
    if config.store.seed {
        store.seed_defaults()?;
    }
    info!("database path: {}", config.store.path.display());

    let data = store.lexicon_data()?;
    let checker = Checker::new(config.checker_config(), data)?;
    if checker.has_neural() {
        info!("masked-LM loaded from {}", config.model_dir().display());
    } else {
        info!("running rules-only (no masked-LM)");
    }

    let state = AppState::new(checker, store, config.model.name.clone());
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("kousei-server listening on http://{addr}");
    info!("health check: http://{addr}/api/health");

    axum::serve(listener, app).await?;
    Ok(())
}
