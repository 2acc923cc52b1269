use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use debtdash_core::domain::record::ClientRecord;
use debtdash_core::domain::snapshot::{filter_records, DashboardSnapshot, RiskFilter};

const DASHBOARD_PAGE: &str = include_str!("../assets/dashboard.html");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = debtdash_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let csv_path = settings.require_csv_path()?;
    let as_of_date = debtdash_core::time::resolve_as_of_date(None, chrono::Utc::now())?;

    // One-time load at startup; a malformed CSV is fatal since there is
    // nothing to serve without it.
    let records = match debtdash_core::ingest::csv::load_records(Path::new(csv_path), as_of_date)
    {
        Ok(records) => records,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, csv_path, "failed to load debt records");
            return Err(e);
        }
    };

    tracing::info!(rows = records.len(), %as_of_date, csv_path, "loaded debt records");

    let snapshot = DashboardSnapshot::new(as_of_date, chrono::Utc::now(), records);
    let state = AppState {
        snapshot: Arc::new(snapshot),
    };

    let app = Router::new()
        .route("/", get(dashboard_page))
        .route("/healthz", get(healthz))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/records", get(get_records))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "dashboard listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

#[derive(Debug, Clone)]
struct AppState {
    snapshot: Arc<DashboardSnapshot>,
}

async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.snapshot.as_ref().clone())
}

#[derive(Debug, Deserialize)]
struct RecordsQuery {
    risk: Option<String>,
}

async fn get_records(
    State(state): State<AppState>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<Vec<ClientRecord>>, StatusCode> {
    let filter = match query.risk.as_deref() {
        None => RiskFilter::All,
        Some(s) => RiskFilter::parse(s).ok_or(StatusCode::BAD_REQUEST)?,
    };

    Ok(Json(filter_records(&state.snapshot.records, filter)))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &debtdash_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
