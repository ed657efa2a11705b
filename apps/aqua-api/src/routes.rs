//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers。
//! 路由包括：
//! - 健康检查：/health
//! - 认证与会话：/login, /logout, /session, /session/view
//! - 公司管理：/companies, /session/select-company
//! - 客户管理：/clients, /clients/{id}, /session/select-client
//! - 仪表盘：/dashboard, /dashboard/refresh, /pump/toggle
//! - 报表：/reports/*
//! - 用水顾问：/advisor/*

use crate::AppState;
use crate::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(current_session))
        .route("/session/view", post(set_view))
        .route("/session/select-company", post(select_company))
        .route("/session/select-client", post(select_client))
        .route("/companies", get(list_companies).post(create_company))
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/:client_id", get(get_client).put(update_client))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .route("/pump/toggle", post(toggle_pump))
        .route("/reports/trend", get(report_trend))
        .route("/reports/units", get(report_units))
        .route("/reports/metrics", get(report_metrics))
        .route("/reports/series", get(report_series))
        .route("/reports/financial", get(report_financial))
        .route("/advisor/tip", get(advisor_tip))
        .route("/advisor/analysis", post(advisor_analysis))
}
