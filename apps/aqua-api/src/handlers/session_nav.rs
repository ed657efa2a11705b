//! 视图切换 handler
//!
//! - `POST /session/view` - 显式视图切换
//!
//! 切换规则在会话状态机内实施；被拒绝的切换返回 409，
//! 当前视图保持不变。

use crate::AppState;
use crate::middleware::require_session;
use crate::utils::response::{bad_request_error, session_error, session_to_dto};
use api_contract::{ApiResponse, SetViewRequest};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use domain::View;

/// 显式视图切换
pub async fn set_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SetViewRequest>,
) -> Response {
    let (token, _) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let Some(view) = View::parse(&req.view) else {
        return bad_request_error(format!("unknown view: {}", req.view));
    };
    match state.sessions.enter_view(&token, view) {
        Ok(session) => (
            StatusCode::OK,
            Json(ApiResponse::success(session_to_dto(&session))),
        )
            .into_response(),
        Err(err) => session_error(err),
    }
}
