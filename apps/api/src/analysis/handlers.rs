use axum::{extract::State, Json};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::analysis::analyzer::analyze_match;
use crate::analysis::models::{AnalysisRequest, AnalysisResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /analyze
///
/// Returns 200 with `{"analysis": ...}`, or 200 with a null analysis and an
/// `error` string when the model's reply is not JSON. Model call failures are
/// 500, timeouts 504.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let span = info_span!("analyze", request_id = %Uuid::new_v4());
    let response = analyze_match(state.llm.as_ref(), &request, state.config.llm_timeout)
        .instrument(span)
        .await?;
    Ok(Json(response))
}
