//! HTTP 响应辅助函数和 DTO 转换
//!
//! 提供统一的错误响应构造函数和 DTO 转换函数：
//! - 错误响应：unauthorized_error, bad_request_error, not_found_error,
//!   storage_error, session_error
//! - DTO 转换：session_to_dto, company_to_dto, client_summary_to_dto,
//!   client_to_dto, metrics_to_dto, snapshot_to_dto, pump_to_dto
//!
//! 状态码映射：
//! - Validation → 400，NotFound → 404，Scope → 403，Internal → 500
//! - SessionError::NotFound → 401，TransitionDenied → 409
//! - AuthError::InvalidCredentials → 401

use api_contract::{
    ApiResponse, ClientDto, ClientSummaryDto, CompanyDto, CompanySummaryDto, ContactInfoDto,
    ContractDetailsDto, DashboardDto, EnvironmentPointDto, MetricsDto, MqttConfigDto,
    PumpStatusDto, SeriesPointDto, SessionDto, SupportInfoDto, TankLocationDto, TankReadingDto,
    UnitTotalDto,
};
use aqua_auth::AuthError;
use aqua_session::{SessionError, SessionState};
use aqua_storage::{ClientRecord, CompanyRecord, StorageError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{
    DashboardSnapshot, EnvironmentPoint, OverallMetrics, PumpStatus, SeriesPoint, TankLocation,
    TankReading, UnitTotal,
};

/// 认证失败响应（401）。
pub fn unauthorized_error() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(
            "AUTH.UNAUTHORIZED",
            "unauthorized",
        )),
    )
        .into_response()
}

/// 禁止访问错误响应（403）。
pub fn forbidden_error(message: impl Into<String>) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ApiResponse::<()>::error("AUTH.FORBIDDEN", message.into())),
    )
        .into_response()
}

/// 错误请求响应（400）。
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应（404）。
pub fn not_found_error(message: impl Into<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error(
            "RESOURCE.NOT_FOUND",
            message.into(),
        )),
    )
        .into_response()
}

/// 存储错误响应：按错误类别映射状态码。
pub fn storage_error(err: StorageError) -> Response {
    let (status, code) = match &err {
        StorageError::Validation(_) => (StatusCode::BAD_REQUEST, "INVALID.REQUEST"),
        StorageError::NotFound(_) => (StatusCode::NOT_FOUND, "RESOURCE.NOT_FOUND"),
        StorageError::Scope(_) => (StatusCode::FORBIDDEN, "AUTH.FORBIDDEN"),
        StorageError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL.ERROR"),
    };
    (status, Json(ApiResponse::<()>::error(code, err.to_string()))).into_response()
}

/// 会话错误响应：丢失会话 401，被拒绝的切换 409。
pub fn session_error(err: SessionError) -> Response {
    let (status, code) = match &err {
        SessionError::NotFound => (StatusCode::UNAUTHORIZED, "AUTH.UNAUTHORIZED"),
        SessionError::TransitionDenied(_) => (StatusCode::CONFLICT, "SESSION.TRANSITION_DENIED"),
        SessionError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL.ERROR"),
    };
    (status, Json(ApiResponse::<()>::error(code, err.to_string()))).into_response()
}

/// 认证错误响应：凭据失败统一 401。
pub fn auth_error(err: AuthError) -> Response {
    match err {
        AuthError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error(
                "AUTH.INVALID_CREDENTIALS",
                "invalid credentials",
            )),
        )
            .into_response(),
        AuthError::Internal(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
        )
            .into_response(),
    }
}

/// SessionState 转 SessionDto
pub fn session_to_dto(state: &SessionState) -> SessionDto {
    SessionDto {
        role: state.principal.role().as_str().to_string(),
        actor_id: state.principal.actor_id().to_string(),
        display_name: state.principal.display_name().to_string(),
        view: state.view.as_str().to_string(),
        selected_company: state.selected_company.as_ref().map(|company| {
            CompanySummaryDto {
                company_id: company.company_id.clone(),
                name: company.name.clone(),
            }
        }),
        selected_client: state.selected_client.as_ref().map(|client| ClientSummaryDto {
            client_id: client.client_id.clone(),
            name: client.name.clone(),
            managing_company_id: client.managing_company_id.clone(),
        }),
    }
}

/// CompanyRecord 转 CompanyDto
pub fn company_to_dto(record: CompanyRecord) -> CompanyDto {
    CompanyDto {
        company_id: record.company_id,
        name: record.name,
        admin_email: record.admin_email,
        responsible_person: record.responsible_person,
        registration_number: record.registration_number,
    }
}

/// ClientRecord 转 ClientSummaryDto
pub fn client_summary_to_dto(record: &ClientRecord) -> ClientSummaryDto {
    ClientSummaryDto {
        client_id: record.client_id.clone(),
        name: record.name.clone(),
        managing_company_id: record.managing_company_id.clone(),
    }
}

/// ClientRecord 转完整 ClientDto
pub fn client_to_dto(record: ClientRecord) -> ClientDto {
    ClientDto {
        client_id: record.client_id,
        name: record.name,
        managing_company_id: record.managing_company_id,
        registered_at: record.registered_at.to_rfc3339(),
        price_per_m3: record.price_per_m3,
        price_per_kwh: record.price_per_kwh,
        contact_info: ContactInfoDto {
            primary_contact_name: record.contact_info.primary_contact_name,
            primary_contact_email: record.contact_info.primary_contact_email,
            primary_contact_phone: record.contact_info.primary_contact_phone,
            secondary_contact_name: record.contact_info.secondary_contact_name,
            secondary_contact_email: record.contact_info.secondary_contact_email,
            secondary_contact_phone: record.contact_info.secondary_contact_phone,
        },
        contract_details: ContractDetailsDto {
            contract_id: record.contract_details.contract_id,
            start_date: record.contract_details.start_date,
            end_date: record.contract_details.end_date,
            service_level: record.contract_details.service_level,
            notes: record.contract_details.notes,
        },
        mqtt_config: MqttConfigDto {
            broker_url: record.mqtt_config.broker_url,
            username: record.mqtt_config.username,
            password: record.mqtt_config.password,
            consumption_topic: record.mqtt_config.consumption_topic,
            tank_upper_topic: record.mqtt_config.tank_upper_topic,
            tank_lower_topic: record.mqtt_config.tank_lower_topic,
            pump_status_topic: record.mqtt_config.pump_status_topic,
            pressure_network_topic: record.mqtt_config.pressure_network_topic,
            pressure_internal_topic: record.mqtt_config.pressure_internal_topic,
            topic_notes: record.mqtt_config.topic_notes,
        },
        support_info: SupportInfoDto {
            support_tier: record.support_info.support_tier,
            dedicated_agent_name: record.support_info.dedicated_agent_name,
            last_ticket_id: record.support_info.last_ticket_id,
            internal_notes: record.support_info.internal_notes,
        },
    }
}

/// SeriesPoint 列表转 DTO 列表
pub fn series_to_dto(points: Vec<SeriesPoint>) -> Vec<SeriesPointDto> {
    points
        .into_iter()
        .map(|point| SeriesPointDto {
            label: point.label,
            value: point.value,
        })
        .collect()
}

/// UnitTotal 列表转 DTO 列表
pub fn units_to_dto(units: Vec<UnitTotal>) -> Vec<UnitTotalDto> {
    units
        .into_iter()
        .map(|unit| UnitTotalDto {
            unit_id: unit.unit_id,
            total_m3: unit.total_m3,
        })
        .collect()
}

/// OverallMetrics 转 MetricsDto
pub fn metrics_to_dto(metrics: OverallMetrics) -> MetricsDto {
    MetricsDto {
        total_current_month: metrics.total_current_month,
        total_previous_month: metrics.total_previous_month,
        average_daily_current_month: metrics.average_daily_current_month,
        active_units: metrics.active_units,
        percent_change: metrics.percent_change,
        estimated_water_bill: metrics.estimated_water_bill,
        estimated_pump_energy_cost: metrics.estimated_pump_energy_cost,
    }
}

/// PumpStatus 转 PumpStatusDto
pub fn pump_to_dto(status: PumpStatus) -> PumpStatusDto {
    PumpStatusDto {
        pressure_psi: status.pressure_psi,
        is_active: status.is_active,
        changed_at_ms: status.changed_at_ms,
    }
}

fn tank_to_dto(reading: TankReading) -> TankReadingDto {
    TankReadingDto {
        level_percent: reading.level_percent,
        updated_at_ms: reading.updated_at_ms,
    }
}

fn location_to_dto(location: TankLocation) -> TankLocationDto {
    TankLocationDto {
        latitude: location.latitude,
        longitude: location.longitude,
        address: location.address,
    }
}

fn environment_to_dto(points: Vec<EnvironmentPoint>) -> Vec<EnvironmentPointDto> {
    points
        .into_iter()
        .map(|point| EnvironmentPointDto {
            label: point.label,
            temperature: point.temperature,
            humidity: point.humidity,
            ts_ms: point.ts_ms,
        })
        .collect()
}

/// DashboardSnapshot 转 DashboardDto
pub fn snapshot_to_dto(snapshot: DashboardSnapshot) -> DashboardDto {
    DashboardDto {
        metrics: metrics_to_dto(snapshot.metrics),
        trend: series_to_dto(snapshot.trend),
        unit_breakdown: units_to_dto(snapshot.unit_breakdown),
        pump: pump_to_dto(snapshot.pump),
        tank: tank_to_dto(snapshot.tank),
        location: location_to_dto(snapshot.location),
        environment: environment_to_dto(snapshot.environment),
        environment_error: snapshot.environment_error,
    }
}
