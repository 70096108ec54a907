//! HTTP surface for the dashboard.
//!
//! Three routes: `/` serves the embedded static page, `/data` the
//! daily/weekly/monthly JSON, `/series` the sorted long-format records.
//! Any load or aggregation failure becomes a 500 with an `{"error": ...}`
//! body.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tracing::{error, info};

use crate::error::TrendsError;
use crate::snapshot::Snapshot;

static INDEX_HTML: &str = include_str!("../static/index.html");

/// Where each request gets its data from.
pub enum DataSource {
    /// Immutable snapshot built at startup; shared read-only across requests.
    Snapshot(Snapshot),
    /// Rebuild from the file on every request.
    Reload { path: String, reference_year: i32 },
}

#[derive(Clone)]
pub struct AppState {
    source: Arc<DataSource>,
}

impl AppState {
    pub fn new(source: DataSource) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

/// Maps a [`TrendsError`] onto the 500 JSON error contract.
pub struct AppError(TrendsError);

impl From<TrendsError> for AppError {
    fn from(err: TrendsError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/data", get(data))
        .route("/series", get(series))
        .with_state(state)
}

/// Binds on all interfaces and serves until shutdown.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn data(State(state): State<AppState>) -> Result<Response, AppError> {
    let response = match state.source.as_ref() {
        DataSource::Snapshot(snapshot) => Json(snapshot.dashboard()).into_response(),
        DataSource::Reload {
            path,
            reference_year,
        } => {
            let snapshot = Snapshot::from_file(path, *reference_year)?;
            Json(snapshot.dashboard()).into_response()
        }
    };
    Ok(response)
}

async fn series(State(state): State<AppState>) -> Result<Response, AppError> {
    let response = match state.source.as_ref() {
        DataSource::Snapshot(snapshot) => Json(&snapshot.series).into_response(),
        DataSource::Reload {
            path,
            reference_year,
        } => {
            let snapshot = Snapshot::from_file(path, *reference_year)?;
            Json(&snapshot.series).into_response()
        }
    };
    Ok(response)
}
