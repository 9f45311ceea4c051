use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::AppError;
use crate::gacha::GachaSource;
use crate::pipeline::{self, TierOutcome, TierReport};
use crate::report::render_html;

pub struct ServerContext<S> {
    pub source: S,
    /// Tiers for `/api/report` and `/`. Empty means discover from the price source.
    pub tiers: Vec<String>,
}

pub fn router<S>(ctx: Arc<ServerContext<S>>) -> Router
where
    S: GachaSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index::<S>))
        .route("/api/tiers", get(list_tiers::<S>))
        .route("/api/tiers/{tier}", get(tier_report::<S>))
        .route("/api/report", get(full_report::<S>))
        .with_state(ctx)
}

#[derive(Debug, Serialize)]
struct TiersBody {
    tiers: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TierEntry<'a> {
    tier: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a TierReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportBody<'a> {
    generated_at: String,
    tiers: Vec<TierEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError(anyhow::Error);

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

/// HTTP status for a pipeline failure.
pub fn status_for(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<AppError>() {
        Some(AppError::UnknownTier(_)) => StatusCode::NOT_FOUND,
        Some(AppError::Analytics(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(AppError::SourceUnavailable { .. }) | Some(AppError::Http(_)) | Some(AppError::Json(_)) => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let message = format!("{:#}", self.0);
        tracing::warn!(status = status.as_u16(), error = %message, "Request failed");
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

async fn run_configured<S>(ctx: &ServerContext<S>) -> anyhow::Result<Vec<TierOutcome>>
where
    S: GachaSource + Send + Sync + 'static,
{
    pipeline::run_report(&ctx.source, &ctx.tiers).await
}

async fn index<S>(State(ctx): State<Arc<ServerContext<S>>>) -> Result<Html<String>, ApiError>
where
    S: GachaSource + Send + Sync + 'static,
{
    let outcomes = run_configured(&ctx).await?;
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    Ok(Html(render_html(&outcomes, &generated_at)))
}

async fn list_tiers<S>(State(ctx): State<Arc<ServerContext<S>>>) -> Result<Json<TiersBody>, ApiError>
where
    S: GachaSource + Send + Sync + 'static,
{
    let tiers = pipeline::discover_tiers(&ctx.source).await?;
    Ok(Json(TiersBody { tiers }))
}

async fn tier_report<S>(
    State(ctx): State<Arc<ServerContext<S>>>,
    Path(tier): Path<String>,
) -> Result<Json<TierReport>, ApiError>
where
    S: GachaSource + Send + Sync + 'static,
{
    let report = pipeline::run_tier(&ctx.source, &tier).await?;
    Ok(Json(report))
}

async fn full_report<S>(State(ctx): State<Arc<ServerContext<S>>>) -> Result<Response, ApiError>
where
    S: GachaSource + Send + Sync + 'static,
{
    let outcomes = run_configured(&ctx).await?;
    let body = ReportBody {
        generated_at: chrono::Utc::now().to_rfc3339(),
        tiers: outcomes
            .iter()
            .map(|o| TierEntry {
                tier: &o.tier,
                ok: o.is_ok(),
                report: o.result.as_ref().ok(),
                error: o.error_message(),
            })
            .collect(),
    };
    Ok(Json(body).into_response())
}
