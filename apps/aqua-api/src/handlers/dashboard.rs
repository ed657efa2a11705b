//! 仪表盘 handlers
//!
//! - `POST /dashboard/refresh` - 发起一次完整刷新并应用快照
//! - `GET /dashboard` - 当前快照
//! - `POST /pump/toggle` - 切换水泵开关
//!
//! 刷新按代数防陈旧：发起时取得代数，应用时代数落后的快照
//! 被丢弃；环境遥测失败不阻断刷新，只记录在快照内。

use crate::AppState;
use crate::middleware::require_session;
use crate::utils::response::{
    not_found_error, pump_to_dto, session_error, snapshot_to_dto, storage_error,
};
use api_contract::{ApiResponse, PumpToggleRequest};
use aqua_session::SessionError;
use aqua_telemetry::{
    record_dashboard_refresh_failure, record_dashboard_refresh_success,
    record_environment_feed_failure, record_pump_toggle, record_refresh_latency_ms,
    record_stale_snapshot_discarded,
};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::time::Instant;

/// 发起仪表盘刷新
pub async fn refresh_dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (token, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let (generation, client) = match state.sessions.start_refresh(&token) {
        Ok(started) => started,
        Err(err) => return session_error(err),
    };
    let ctx = session.principal.to_access_context();

    let started_at = Instant::now();
    let snapshot = match state.dashboard.refresh(&ctx, &client.client_id).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            record_dashboard_refresh_failure();
            return storage_error(err);
        }
    };
    record_refresh_latency_ms(started_at.elapsed().as_millis() as u64);
    record_dashboard_refresh_success();
    if snapshot.environment_error.is_some() {
        record_environment_feed_failure();
    }

    match state.sessions.apply_snapshot(&token, generation, snapshot.clone()) {
        Ok(applied) => {
            if !applied {
                record_stale_snapshot_discarded();
            }
        }
        Err(err) => return session_error(err),
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(snapshot_to_dto(snapshot))),
    )
        .into_response()
}

/// 当前快照
pub async fn get_dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (token, _) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    match state.sessions.snapshot(&token) {
        Ok(Some(snapshot)) => (
            StatusCode::OK,
            Json(ApiResponse::success(snapshot_to_dto(snapshot))),
        )
            .into_response(),
        Ok(None) => not_found_error("no dashboard snapshot yet"),
        Err(err) => session_error(err),
    }
}

/// 切换水泵开关
pub async fn toggle_pump(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PumpToggleRequest>,
) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let Some(client) = session.selected_client.as_ref() else {
        return session_error(SessionError::TransitionDenied(
            "select a client before toggling the pump".to_string(),
        ));
    };
    let ctx = session.principal.to_access_context();
    match state
        .dashboard
        .toggle_pump(&ctx, &client.client_id, req.active)
        .await
    {
        Ok(status) => {
            record_pump_toggle();
            (
                StatusCode::OK,
                Json(ApiResponse::success(pump_to_dto(status))),
            )
                .into_response()
        }
        Err(err) => storage_error(err),
    }
}
