//! 管理公司 handlers
//!
//! - `GET /companies` - 列出全部管理公司（仅超级管理员）
//! - `POST /companies` - 创建管理公司（仅超级管理员）
//! - `POST /session/select-company` - 选择当前公司作用域
//!
//! 选择公司会清空已选客户与仪表盘快照，并跳转客户管理视图。

use crate::AppState;
use crate::middleware::require_session;
use crate::utils::response::{
    company_to_dto, forbidden_error, not_found_error, session_error, session_to_dto,
    storage_error,
};
use api_contract::{ApiResponse, CompanyDto, CreateCompanyRequest, SelectCompanyRequest};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use domain::Role;

/// 列出管理公司
pub async fn list_companies(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    if session.principal.role() != Role::SuperAdmin {
        return forbidden_error("company listing requires the super admin role");
    }
    let ctx = session.principal.to_access_context();
    match state.companies.list_companies(&ctx).await {
        Ok(companies) => {
            let data: Vec<CompanyDto> = companies.into_iter().map(company_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 创建管理公司
pub async fn create_company(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateCompanyRequest>,
) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    if session.principal.role() != Role::SuperAdmin {
        return forbidden_error("company creation requires the super admin role");
    }
    let ctx = session.principal.to_access_context();
    match state
        .companies
        .create_company(&ctx, &req.name, &req.admin_email, req.responsible_person)
        .await
    {
        Ok(company) => (
            StatusCode::OK,
            Json(ApiResponse::success(company_to_dto(company))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 选择当前公司作用域
pub async fn select_company(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SelectCompanyRequest>,
) -> Response {
    let (token, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let ctx = session.principal.to_access_context();
    let company = match state.companies.find_company(&ctx, &req.company_id).await {
        Ok(Some(company)) => company,
        Ok(None) => return not_found_error("no such managing company"),
        Err(err) => return storage_error(err),
    };
    match state.sessions.select_company(&token, company.identity()) {
        Ok(session) => (
            StatusCode::OK,
            Json(ApiResponse::success(session_to_dto(&session))),
        )
            .into_response(),
        Err(err) => session_error(err),
    }
}
