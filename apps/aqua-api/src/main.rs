//! AquaFleet HTTP API：登录/导航/仪表盘/报表的单一运行时二进制。
//!
//! 启动流程：加载 .env 与环境配置、初始化 tracing、构建内存存储
//! 并写入演示注册表、播种合成时序、按 API key 选择顾问实现、
//! 挂载路由并启动 axum 服务。

mod handlers;
mod middleware;
mod routes;
mod utils;

use aqua_auth::AuthService;
use aqua_config::AppConfig;
use aqua_dashboard::DashboardService;
use aqua_external::{Advisor, DisabledAdvisor, EnvironmentFeed, HttpAdvisor, ThingSpeakFeed};
use aqua_reporting::ReportingService;
use aqua_seed::Seeder;
use aqua_session::SessionRegistry;
use aqua_storage::{
    ClientStore, CompanyStore, InMemoryClientStore, InMemoryCompanyStore,
    InMemoryConsumptionStore, InMemoryPressureStore, InMemoryPumpEnergyStore,
    InMemoryPumpStatusStore, InMemoryTankLevelStore, InMemoryTankLocationStore,
    InMemoryTankReadingStore,
};
use aqua_telemetry::init_tracing;
use axum::middleware as axum_middleware;
use domain::AccessContext;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 全量共享状态：各能力服务的句柄。
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub sessions: Arc<SessionRegistry>,
    pub companies: Arc<dyn CompanyStore>,
    pub clients: Arc<dyn ClientStore>,
    pub seeder: Arc<Seeder>,
    pub reporting: Arc<ReportingService>,
    pub dashboard: Arc<DashboardService>,
    pub advisor: Arc<dyn Advisor>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let state = build_state(&config).await?;

    let app = routes::create_api_router()
        .with_state(state)
        // 注入 request_id/trace_id
        .layer(axum_middleware::from_fn(middleware::request_context))
        .layer(TraceLayer::new_for_http());

    info!(addr = %config.http_addr, "aqua-api listening");
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// 构建全部内存存储与服务，并按配置播种演示数据。
async fn build_state(config: &AppConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let companies: Arc<dyn CompanyStore> = Arc::new(InMemoryCompanyStore::with_companies(
        aqua_seed::demo_companies(),
    ));
    let clients: Arc<dyn ClientStore> = Arc::new(InMemoryClientStore::with_clients(
        aqua_seed::demo_clients(),
    ));
    let consumption = Arc::new(InMemoryConsumptionStore::new());
    let tank_levels = Arc::new(InMemoryTankLevelStore::new());
    let pressures = Arc::new(InMemoryPressureStore::new());
    let pump_energy = Arc::new(InMemoryPumpEnergyStore::new());
    let pump_status = Arc::new(InMemoryPumpStatusStore::new());
    let tank_readings = Arc::new(InMemoryTankReadingStore::new());
    let tank_locations = Arc::new(InMemoryTankLocationStore::new());

    let seeder = Arc::new(Seeder {
        consumption: consumption.clone(),
        tank_levels: tank_levels.clone(),
        pressures: pressures.clone(),
        pump_energy: pump_energy.clone(),
        pump_status: pump_status.clone(),
        tank_readings: tank_readings.clone(),
        tank_locations: tank_locations.clone(),
        consumption_days: config.seed_consumption_days as u32,
    });

    if config.seed_enabled {
        let ctx = AccessContext::service();
        let demo = aqua_seed::demo_clients();
        let seeded = seeder.seed_all(&ctx, &demo).await?;
        aqua_telemetry::record_seeded_records(seeded as u64);
    }

    let reporting = Arc::new(ReportingService::new(
        clients.clone(),
        consumption.clone(),
        tank_levels.clone(),
        pressures.clone(),
        pump_energy.clone(),
    ));

    let environment: Arc<dyn EnvironmentFeed> =
        Arc::new(ThingSpeakFeed::new(config.environment_feed_url.clone()));
    let dashboard = Arc::new(DashboardService::new(
        reporting.clone(),
        pump_status.clone(),
        tank_readings.clone(),
        tank_locations.clone(),
        environment,
    ));

    let advisor: Arc<dyn Advisor> = match &config.advisor_api_key {
        Some(api_key) => Arc::new(HttpAdvisor::new(
            config.advisor_endpoint.clone(),
            api_key.clone(),
        )),
        None => {
            info!("no advisor api key configured, using disabled advisor");
            Arc::new(DisabledAdvisor)
        }
    };

    let auth = Arc::new(AuthService::new(companies.clone(), clients.clone()));
    let sessions = Arc::new(SessionRegistry::new());

    Ok(AppState {
        auth,
        sessions,
        companies,
        clients,
        seeder,
        reporting,
        dashboard,
        advisor,
    })
}

#[cfg(test)]
mod tests {
    use super::{AppState, build_state};
    use aqua_config::AppConfig;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt as _;
    use serde_json::{Value, json};
    use tower::ServiceExt as _;

    fn test_config() -> AppConfig {
        AppConfig {
            http_addr: "127.0.0.1:0".to_string(),
            advisor_api_key: None,
            advisor_endpoint: "http://localhost/unused".to_string(),
            environment_feed_url: "http://localhost/unused".to_string(),
            seed_enabled: false,
            seed_consumption_days: 60,
        }
    }

    async fn test_app() -> (Router, AppState) {
        let state = build_state(&test_config()).await.expect("state");
        let app = crate::routes::create_api_router().with_state(state.clone());
        (app, state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).expect("request")
    }

    fn get_with_token(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request")
    }

    async fn login(app: &Router, role: &str, identifier: &str, password: &str) -> Value {
        let response = app
            .clone()
            .oneshot(post_json(
                "/login",
                None,
                json!({ "role": role, "identifier": identifier, "password": password }),
            ))
            .await
            .expect("login response");
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    #[tokio::test]
    async fn health_is_public() {
        let (app, _) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn bad_credentials_stay_generic() {
        let (app, _) = test_app().await;
        let response = app
            .oneshot(post_json(
                "/login",
                None,
                json!({
                    "role": "superAdmin",
                    "identifier": "superadmin@gmail.com",
                    "password": "wrong"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "invalid credentials");
    }

    #[tokio::test]
    async fn super_admin_walks_down_to_a_client_dashboard() {
        let (app, _) = test_app().await;
        let login_body = login(&app, "superAdmin", "superadmin@gmail.com", "123456").await;
        let token = login_body["data"]["token"].as_str().expect("token").to_string();
        assert_eq!(login_body["data"]["session"]["view"], "manageCompanies");

        // 未选公司前客户列表不可用
        let response = app
            .clone()
            .oneshot(get_with_token("/clients", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .clone()
            .oneshot(get_with_token("/companies", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let companies = body_json(response).await;
        assert!(companies["data"].as_array().unwrap().len() >= 3);

        let response = app
            .clone()
            .oneshot(post_json(
                "/session/select-company",
                Some(&token),
                json!({ "companyId": "admincomp-001" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let session = body_json(response).await;
        assert_eq!(session["data"]["view"], "manageClients");

        let response = app
            .clone()
            .oneshot(post_json(
                "/session/select-client",
                Some(&token),
                json!({ "clientId": "condo-789" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let session = body_json(response).await;
        assert_eq!(session["data"]["view"], "dashboard");

        // 播种关闭时财务汇总仍返回完整的零填充窗口
        let response = app
            .clone()
            .oneshot(get_with_token("/reports/financial?months=6", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let financial = body_json(response).await;
        let entries = financial["data"].as_array().unwrap();
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().all(|entry| entry["value"] == 0.0));
    }

    #[tokio::test]
    async fn client_user_cannot_manage_clients() {
        let (app, _) = test_app().await;
        let login_body = login(&app, "clientUser", "condominio01@gmail.com", "123456").await;
        let token = login_body["data"]["token"].as_str().expect("token").to_string();
        assert_eq!(login_body["data"]["session"]["view"], "dashboard");

        let response = app
            .clone()
            .oneshot(get_with_token("/clients", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(post_json(
                "/session/view",
                Some(&token),
                json!({ "view": "manageClients" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn creating_a_client_seeds_series_and_counts_telemetry() {
        let (app, _) = test_app().await;
        let login_body = login(&app, "companyAdmin", "gestao01@gmail.com", "123456").await;
        let token = login_body["data"]["token"].as_str().expect("token").to_string();

        let before = aqua_telemetry::metrics().snapshot();
        let response = app
            .clone()
            .oneshot(post_json(
                "/clients",
                Some(&token),
                json!({ "name": "Condominio Horizonte" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = body_json(response).await;
        let client_id = created["data"]["clientId"].as_str().expect("clientId").to_string();

        // 创建即播种：水表 + 两箱液位 + 两路压力 + 泵能耗
        let after = aqua_telemetry::metrics().snapshot();
        assert!(after.seeded_records - before.seeded_records >= 120 + 720 * 2 + 288 * 2 + 720);

        // 新客户立即可刷新；环境 feed 不可达只降级为局部错误
        let response = app
            .clone()
            .oneshot(post_json(
                "/session/select-client",
                Some(&token),
                json!({ "clientId": client_id }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(post_json("/dashboard/refresh", Some(&token), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let snapshot = body_json(response).await;
        assert!(snapshot["data"]["environmentError"].is_string());
        let final_metrics = aqua_telemetry::metrics().snapshot();
        assert!(final_metrics.environment_feed_failures > before.environment_feed_failures);
    }

    #[tokio::test]
    async fn logout_invalidates_the_token() {
        let (app, _) = test_app().await;
        let login_body = login(&app, "companyAdmin", "gestao01@gmail.com", "123456").await;
        let token = login_body["data"]["token"].as_str().expect("token").to_string();

        let response = app
            .clone()
            .oneshot(post_json("/logout", Some(&token), json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_with_token("/session", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
