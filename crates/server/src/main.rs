use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use server_api::{reconcile, ApiContext};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{ErrorReply, RsvpSubmission, SubmissionReceipt},
};
use storage::{GoogleSheetStore, ServiceAccountKey};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;

mod config;

use config::{load_settings, normalize_private_key};

#[derive(Clone)]
struct AppState {
    api: ApiContext,
}

// An RSVP payload is a handful of short strings; anything bigger is noise.
const MAX_BODY_BYTES: usize = 16 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let key = ServiceAccountKey {
        client_email: settings.google_client_email,
        private_key: normalize_private_key(&settings.google_private_key),
    };
    let store = GoogleSheetStore::new(key, settings.spreadsheet_id, settings.sheet_name);
    let state = AppState {
        api: ApiContext {
            store: Arc::new(store),
        },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "rsvp server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/rsvp", post(submit_rsvp))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn submit_rsvp(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<RsvpSubmission>,
) -> Result<Json<SubmissionReceipt>, (StatusCode, Json<ErrorReply>)> {
    let ack = reconcile(&state.api, &submission)
        .await
        .map_err(error_reply)?;
    Ok(Json(SubmissionReceipt {
        success: true,
        data: ack,
    }))
}

fn error_reply(err: ApiError) -> (StatusCode, Json<ErrorReply>) {
    let status = match err.code {
        ErrorCode::GuestNotFound => StatusCode::NOT_FOUND,
        ErrorCode::StoreUnavailable | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorReply { error: err.message }))
}
