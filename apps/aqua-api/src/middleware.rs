//! 请求追踪与会话提取
//!
//! - request_context：注入 request_id/trace_id 并回写响应头
//! - bearer_token：从 Authorization 头提取 Bearer token
//! - require_session：校验 bearer token 并取出当前会话状态

use aqua_session::SessionError;
use aqua_telemetry::new_request_ids;
use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, info_span};

use crate::AppState;
use crate::utils::response::{session_error, unauthorized_error};
use aqua_session::SessionState;

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response = next.run(req).instrument(span).await;
    response.headers_mut().insert(
        "x-request-id",
        HeaderValue::from_str(&ids.request_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response.headers_mut().insert(
        "x-trace-id",
        HeaderValue::from_str(&ids.trace_id).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    response
}

/// 从请求头中提取 Bearer token
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header_value = headers.get(header::AUTHORIZATION)?;
    let auth_str = header_value.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}

/// 校验并取出当前会话：缺失或过期的 token 返回 401。
pub fn require_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(String, SessionState), Response> {
    let token = match bearer_token(headers) {
        Some(token) => token.to_string(),
        None => return Err(unauthorized_error()),
    };
    match state.sessions.current(&token) {
        Ok(session) => Ok((token, session)),
        Err(SessionError::NotFound) => Err(unauthorized_error()),
        Err(err) => Err(session_error(err)),
    }
}
