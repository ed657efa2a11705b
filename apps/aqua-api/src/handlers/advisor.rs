//! 用水顾问 handlers
//!
//! - `GET /advisor/tip` - 一条节水建议
//! - `POST /advisor/analysis` - 基于当前客户月度指标的消费分析
//!
//! 顾问调用失败时不向调用方透出错误，降级为固定文案。

use crate::AppState;
use crate::middleware::require_session;
use crate::utils::response::session_error;
use api_contract::{AdvisorTextDto, ApiResponse};
use aqua_external::ConsumptionFigures;
use aqua_session::SessionError;
use aqua_telemetry::{record_advisor_failure, record_advisor_request};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::warn;

const TIP_FALLBACK: &str =
    "Nao foi possivel obter a dica no momento. Tente novamente mais tarde.";
const ANALYSIS_FALLBACK: &str =
    "Nao foi possivel gerar a analise no momento. Tente novamente mais tarde.";

/// 节水建议
pub async fn advisor_tip(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_session(&state, &headers) {
        return response;
    }
    record_advisor_request();
    let text = match state.advisor.saving_tip().await {
        Ok(text) => text,
        Err(err) => {
            record_advisor_failure();
            warn!(error = %err, "advisor tip failed");
            TIP_FALLBACK.to_string()
        }
    };
    (
        StatusCode::OK,
        Json(ApiResponse::success(AdvisorTextDto { text })),
    )
        .into_response()
}

/// 消费分析：输入指标取自当前选中客户的月度汇总。
pub async fn advisor_analysis(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let Some(client) = session.selected_client.as_ref() else {
        return session_error(SessionError::TransitionDenied(
            "select a client before requesting an analysis".to_string(),
        ));
    };
    let ctx = session.principal.to_access_context();
    let metrics = match state.reporting.overall_metrics(&ctx, &client.client_id).await {
        Ok(metrics) => metrics,
        Err(err) => return crate::utils::response::storage_error(err),
    };
    let figures = ConsumptionFigures {
        current_month_total: metrics.total_current_month,
        previous_month_total: metrics.total_previous_month,
        average_daily: metrics.average_daily_current_month,
    };

    record_advisor_request();
    let text = match state.advisor.consumption_analysis(figures).await {
        Ok(text) => text,
        Err(err) => {
            record_advisor_failure();
            warn!(error = %err, "advisor analysis failed");
            ANALYSIS_FALLBACK.to_string()
        }
    };
    (
        StatusCode::OK,
        Json(ApiResponse::success(AdvisorTextDto { text })),
    )
        .into_response()
}
