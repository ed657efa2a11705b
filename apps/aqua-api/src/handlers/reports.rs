//! 报表 handlers
//!
//! - `GET /reports/trend` - 近 30 天按日用量趋势
//! - `GET /reports/units` - 当前月分户用量排行
//! - `GET /reports/metrics` - 七项月度汇总指标
//! - `GET /reports/series` - 液位/压力/能耗历史序列
//! - `GET /reports/financial` - 3/6/12 个月财务汇总
//!
//! 所有报表都作用于会话当前选中的客户；未选中客户返回 409。

use crate::AppState;
use crate::middleware::require_session;
use crate::utils::response::{
    bad_request_error, metrics_to_dto, series_to_dto, session_error, storage_error, units_to_dto,
};
use api_contract::{ApiResponse, FinancialQuery, SeriesQuery};
use aqua_reporting::{FinancialPeriod, SeriesKind, SeriesRange};
use aqua_session::{SessionError, SessionState};
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use domain::ClientIdentity;

/// 会话当前选中的客户；未选中返回 409。
fn require_selected_client(session: &SessionState) -> Result<ClientIdentity, Response> {
    session.selected_client.clone().ok_or_else(|| {
        session_error(SessionError::TransitionDenied(
            "select a client before requesting reports".to_string(),
        ))
    })
}

/// 近 30 天用量趋势
pub async fn report_trend(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let client = match require_selected_client(&session) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let ctx = session.principal.to_access_context();
    match state.reporting.monthly_trend(&ctx, &client.client_id).await {
        Ok(points) => (
            StatusCode::OK,
            Json(ApiResponse::success(series_to_dto(points))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 当前月分户排行
pub async fn report_units(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let client = match require_selected_client(&session) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let ctx = session.principal.to_access_context();
    match state.reporting.unit_breakdown(&ctx, &client.client_id).await {
        Ok(units) => (
            StatusCode::OK,
            Json(ApiResponse::success(units_to_dto(units))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 月度汇总指标
pub async fn report_metrics(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let client = match require_selected_client(&session) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let ctx = session.principal.to_access_context();
    match state.reporting.overall_metrics(&ctx, &client.client_id).await {
        Ok(metrics) => (
            StatusCode::OK,
            Json(ApiResponse::success(metrics_to_dto(metrics))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 历史序列
pub async fn report_series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
    headers: HeaderMap,
) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let client = match require_selected_client(&session) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let Some(kind) = SeriesKind::parse(&query.kind) else {
        return bad_request_error(format!("unknown series kind: {}", query.kind));
    };
    let range = SeriesRange {
        from_ms: query.from_ms,
        to_ms: query.to_ms,
        max_points: query.max_points,
    };
    let ctx = session.principal.to_access_context();
    match state
        .reporting
        .series_history(&ctx, &client.client_id, kind, range)
        .await
    {
        Ok(points) => (
            StatusCode::OK,
            Json(ApiResponse::success(series_to_dto(points))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 财务汇总
pub async fn report_financial(
    State(state): State<AppState>,
    Query(query): Query<FinancialQuery>,
    headers: HeaderMap,
) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let client = match require_selected_client(&session) {
        Ok(client) => client,
        Err(response) => return response,
    };
    let Some(period) = FinancialPeriod::from_months(query.months) else {
        return bad_request_error("months must be 3, 6 or 12");
    };
    let ctx = session.principal.to_access_context();
    match state
        .reporting
        .financial_summary(&ctx, &client.client_id, period)
        .await
    {
        Ok(points) => (
            StatusCode::OK,
            Json(ApiResponse::success(series_to_dto(points))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}
