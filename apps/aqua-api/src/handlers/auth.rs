//! 认证相关 handlers：登录、登出、当前会话
//!
//! - `GET /health` - 健康检查，返回 `{"ok": true}`
//! - `POST /login` - 按角色登录，创建会话并返回 bearer token
//! - `POST /logout` - 整体移除会话
//! - `GET /session` - 当前主体/视图/选中项
//!
//! 登录按角色走独立凭据表，任何失败统一返回 401
//! `invalid credentials`（反枚举契约）。会话 token 为不透明 uuid，
//! 初始视图由角色决定。

use crate::AppState;
use crate::middleware::require_session;
use crate::utils::response::{auth_error, bad_request_error, session_error, session_to_dto};
use api_contract::{ApiResponse, LoginRequest, LoginResponse};
use aqua_telemetry::{record_login_failure, record_login_success};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use domain::Role;

/// 健康检查端点
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

/// 按角色登录
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    let Some(role) = Role::parse(&req.role) else {
        return bad_request_error(format!("unknown role: {}", req.role));
    };
    match state.auth.login(role, &req.identifier, &req.password).await {
        Ok(principal) => match state.sessions.create(principal) {
            Ok((token, session)) => {
                record_login_success();
                let response = LoginResponse {
                    token,
                    session: session_to_dto(&session),
                };
                (StatusCode::OK, Json(ApiResponse::success(response))).into_response()
            }
            Err(err) => session_error(err),
        },
        Err(err) => {
            record_login_failure();
            auth_error(err)
        }
    }
}

/// 登出：移除会话
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (token, _) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    match state.sessions.remove(&token) {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({ "ok": true }))),
        )
            .into_response(),
        Err(err) => session_error(err),
    }
}

/// 当前会话状态
pub async fn current_session(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    (
        StatusCode::OK,
        Json(ApiResponse::success(session_to_dto(&session))),
    )
        .into_response()
}
