use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use serplens_common::{Config, RankingRecord, ReportSection, SerpLensError};
use serplens_engine::{analyze_site, get_rankings, HttpFetcher, PageFetcher, PhraseTagger};
use tagger_client::TaggerClient;

// --- App State ---

struct AppState {
    fetcher: Arc<dyn PageFetcher>,
    tagger: Arc<dyn PhraseTagger>,
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let state = Arc::new(AppState {
        fetcher: Arc::new(HttpFetcher::new()),
        tagger: Arc::new(TaggerClient::new(
            &config.tagger_url,
            config.tagger_token.as_deref(),
        )),
    });

    // Browser frontends call this API directly; allow any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/trends-result", post(trends_result))
        .route("/analysis-result", post(analysis_result))
        .with_state(state)
        .layer(cors)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("SerpLens web server starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Request/response envelopes ---

#[derive(Deserialize)]
struct TrendsRequest {
    keyword: String,
    sitename: String,
    competitors: Vec<String>,
}

#[derive(Deserialize)]
struct AnalysisRequest {
    sitename: String,
}

/// Logical outcome envelope. Pipeline failures ride in a 200 with
/// `status: "failed"`; only unexpected internal errors become 500s.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum ApiResponse<T> {
    Success { data: T },
    Failed { message: String },
}

fn pipeline_response<T: Serialize>(result: Result<T, SerpLensError>) -> axum::response::Response {
    match result {
        Ok(data) => Json(ApiResponse::Success { data }).into_response(),
        Err(SerpLensError::Anyhow(e)) => {
            warn!(error = %e, "Unexpected internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<T>::Failed {
                    message: "Internal server error".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => Json(ApiResponse::<T>::Failed {
            message: e.to_string(),
        })
        .into_response(),
    }
}

// --- Handlers ---

async fn index() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Welcome to the API" }))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn trends_result(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrendsRequest>,
) -> axum::response::Response {
    let result: Result<Vec<RankingRecord>, SerpLensError> = get_rankings(
        state.fetcher.as_ref(),
        &req.keyword,
        &req.sitename,
        &req.competitors,
    )
    .await;
    pipeline_response(result)
}

async fn analysis_result(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalysisRequest>,
) -> axum::response::Response {
    let result: Result<Vec<ReportSection>, SerpLensError> =
        analyze_site(state.fetcher.as_ref(), state.tagger.as_ref(), &req.sitename).await;
    pipeline_response(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serplens_common::RankType;

    #[test]
    fn success_envelope_carries_status_and_data() {
        let records = vec![RankingRecord {
            keyword: "coffee".to_string(),
            rank: 1,
            url: "https://mysite.com/".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
            rank_type: RankType::Site,
        }];
        let json = serde_json::to_value(ApiResponse::Success { data: records }).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["data"][0]["Rank"], 1);
        assert_eq!(json["data"][0]["Type"], "My Site");
    }

    #[test]
    fn failure_envelope_carries_the_pipeline_message() {
        let err = SerpLensError::RateLimited;
        let json = serde_json::to_value(ApiResponse::<()>::Failed {
            message: err.to_string(),
        })
        .unwrap();

        assert_eq!(json["status"], "failed");
        assert!(json["message"].as_str().unwrap().contains("429"));
    }
}
