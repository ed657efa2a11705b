//! 客户（小区）handlers
//!
//! - `GET /clients` - 列出当前作用域内的客户
//! - `POST /clients` - 创建客户并在请求内播种其全部时序
//! - `GET /clients/{id}` - 客户详情
//! - `PUT /clients/{id}` - 部分更新（顶层覆盖、嵌套逐字段合并）
//! - `POST /session/select-client` - 选中客户并跳转仪表盘
//!
//! 作用域：超级管理员用已选公司，公司管理员隐式本公司，
//! 住户端无权访问客户管理接口。

use crate::AppState;
use crate::middleware::require_session;
use crate::utils::response::{
    bad_request_error, client_summary_to_dto, client_to_dto, forbidden_error, not_found_error,
    session_error, session_to_dto, storage_error,
};
use api_contract::{
    ApiResponse, ClientSummaryDto, ContactInfoPatch, ContractDetailsPatch, CreateClientRequest,
    MqttConfigPatch, SelectClientRequest, SupportInfoPatch, UpdateClientRequest,
};
use aqua_session::{SessionError, SessionState};
use aqua_storage::{
    ClientRecord, ClientUpdate, ContactInfoUpdate, ContractDetailsUpdate, MqttConfigUpdate,
    SupportInfoUpdate,
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use domain::{Principal, Role};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct ClientPath {
    client_id: String,
}

/// 当前会话的公司作用域：超级管理员取已选公司，公司管理员取本公司。
fn company_scope(session: &SessionState) -> Result<String, Response> {
    match &session.principal {
        Principal::SuperAdmin(_) => session
            .selected_company
            .as_ref()
            .map(|company| company.company_id.clone())
            .ok_or_else(|| {
                session_error(SessionError::TransitionDenied(
                    "select a managing company first".to_string(),
                ))
            }),
        Principal::CompanyAdmin(identity) => Ok(identity.company_id.clone()),
        Principal::ClientUser(_) => Err(forbidden_error(
            "client management requires an admin role",
        )),
    }
}

/// 列出当前作用域内的客户
pub async fn list_clients(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let company_id = match company_scope(&session) {
        Ok(company_id) => company_id,
        Err(response) => return response,
    };
    let ctx = session.principal.to_access_context();
    match state.clients.list_clients_of_company(&ctx, &company_id).await {
        Ok(clients) => {
            let data: Vec<ClientSummaryDto> =
                clients.iter().map(client_summary_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 创建客户并在返回前播种其全部时序
pub async fn create_client(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateClientRequest>,
) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let company_id = match company_scope(&session) {
        Ok(company_id) => company_id,
        Err(response) => return response,
    };
    let ctx = session.principal.to_access_context();

    let name = req.name.trim();
    if name.is_empty() {
        return bad_request_error("name required");
    }
    let record = ClientRecord::with_defaults(
        format!("client-{}", Uuid::new_v4()),
        name,
        company_id.clone(),
        Utc::now(),
        req.price_per_m3.unwrap_or(aqua_seed::DEFAULT_PRICE_PER_M3),
        req.price_per_kwh.unwrap_or(aqua_seed::DEFAULT_PRICE_PER_KWH),
    );

    let created = match state.clients.create_client(&ctx, record).await {
        Ok(created) => created,
        Err(err) => return storage_error(err),
    };

    // 引用完整性：客户创建返回前其全部序列必须已存在
    let index = match state.clients.list_clients_of_company(&ctx, &company_id).await {
        Ok(clients) => clients.len(),
        Err(err) => return storage_error(err),
    };
    match state.seeder.seed_client(&ctx, &created, index).await {
        Ok(seeded) => aqua_telemetry::record_seeded_records(seeded as u64),
        Err(err) => return storage_error(err),
    }

    (
        StatusCode::OK,
        Json(ApiResponse::success(client_to_dto(created))),
    )
        .into_response()
}

/// 客户详情
pub async fn get_client(
    State(state): State<AppState>,
    Path(path): Path<ClientPath>,
    headers: HeaderMap,
) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let ctx = session.principal.to_access_context();
    match state.clients.find_client(&ctx, &path.client_id).await {
        Ok(Some(client)) => (
            StatusCode::OK,
            Json(ApiResponse::success(client_to_dto(client))),
        )
            .into_response(),
        Ok(None) => not_found_error("no such client"),
        Err(err) => storage_error(err),
    }
}

/// 部分更新客户
pub async fn update_client(
    State(state): State<AppState>,
    Path(path): Path<ClientPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateClientRequest>,
) -> Response {
    let (_, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    if session.principal.role() == Role::ClientUser {
        return forbidden_error("client updates require an admin role");
    }
    let ctx = session.principal.to_access_context();
    let update = to_client_update(req);
    match state
        .clients
        .update_client(&ctx, &path.client_id, update)
        .await
    {
        Ok(Some(client)) => (
            StatusCode::OK,
            Json(ApiResponse::success(client_to_dto(client))),
        )
            .into_response(),
        Ok(None) => not_found_error("no such client"),
        Err(err) => storage_error(err),
    }
}

/// 选中客户并跳转仪表盘
pub async fn select_client(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SelectClientRequest>,
) -> Response {
    let (token, session) = match require_session(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let ctx = session.principal.to_access_context();
    let client = match state.clients.find_client(&ctx, &req.client_id).await {
        Ok(Some(client)) => client,
        Ok(None) => return not_found_error("no such client"),
        Err(err) => return storage_error(err),
    };
    match state.sessions.select_client(&token, client.identity()) {
        Ok((session, _generation)) => (
            StatusCode::OK,
            Json(ApiResponse::success(session_to_dto(&session))),
        )
            .into_response(),
        Err(err) => session_error(err),
    }
}

fn to_client_update(req: UpdateClientRequest) -> ClientUpdate {
    ClientUpdate {
        name: req.name,
        price_per_m3: req.price_per_m3,
        price_per_kwh: req.price_per_kwh,
        contact_info: req.contact_info.map(to_contact_update),
        contract_details: req.contract_details.map(to_contract_update),
        mqtt_config: req.mqtt_config.map(to_mqtt_update),
        support_info: req.support_info.map(to_support_update),
    }
}

fn to_contact_update(patch: ContactInfoPatch) -> ContactInfoUpdate {
    ContactInfoUpdate {
        primary_contact_name: patch.primary_contact_name,
        primary_contact_email: patch.primary_contact_email,
        primary_contact_phone: patch.primary_contact_phone,
        secondary_contact_name: patch.secondary_contact_name,
        secondary_contact_email: patch.secondary_contact_email,
        secondary_contact_phone: patch.secondary_contact_phone,
    }
}

fn to_contract_update(patch: ContractDetailsPatch) -> ContractDetailsUpdate {
    ContractDetailsUpdate {
        contract_id: patch.contract_id,
        start_date: patch.start_date,
        end_date: patch.end_date,
        service_level: patch.service_level,
        notes: patch.notes,
    }
}

fn to_mqtt_update(patch: MqttConfigPatch) -> MqttConfigUpdate {
    MqttConfigUpdate {
        broker_url: patch.broker_url,
        username: patch.username,
        password: patch.password,
        consumption_topic: patch.consumption_topic,
        tank_upper_topic: patch.tank_upper_topic,
        tank_lower_topic: patch.tank_lower_topic,
        pump_status_topic: patch.pump_status_topic,
        pressure_network_topic: patch.pressure_network_topic,
        pressure_internal_topic: patch.pressure_internal_topic,
        topic_notes: patch.topic_notes,
    }
}

fn to_support_update(patch: SupportInfoPatch) -> SupportInfoUpdate {
    SupportInfoUpdate {
        support_tier: patch.support_tier,
        dedicated_agent_name: patch.dedicated_agent_name,
        last_ticket_id: patch.last_ticket_id,
        internal_notes: patch.internal_notes,
    }
}
