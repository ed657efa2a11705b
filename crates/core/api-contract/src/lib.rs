//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 登录请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// 登录角色："superAdmin" | "companyAdmin" | "clientUser"。
    pub role: String,
    /// 角色对应的标识：邮箱（管理员）或客户 id（住户端）。
    pub identifier: String,
    pub password: String,
}

/// 登录响应体。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub session: SessionDto,
}

/// 会话当前状态返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub role: String,
    pub actor_id: String,
    pub display_name: String,
    pub view: String,
    pub selected_company: Option<CompanySummaryDto>,
    pub selected_client: Option<ClientSummaryDto>,
}

/// 公司摘要（会话选中项）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummaryDto {
    pub company_id: String,
    pub name: String,
}

/// 客户摘要（列表与会话选中项）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummaryDto {
    pub client_id: String,
    pub name: String,
    pub managing_company_id: String,
}

/// 公司创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    pub name: String,
    pub admin_email: String,
    pub responsible_person: Option<String>,
}

/// 公司返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub company_id: String,
    pub name: String,
    pub admin_email: String,
    pub responsible_person: Option<String>,
    pub registration_number: Option<String>,
}

/// 选择公司请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectCompanyRequest {
    pub company_id: String,
}

/// 选择客户请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectClientRequest {
    pub client_id: String,
}

/// 视图切换请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetViewRequest {
    /// 目标视图："manageCompanies" | "manageClients" | "clientDetails"
    /// | "dashboard" | "reports"。
    pub view: String,
}

/// 客户创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub name: String,
    pub price_per_m3: Option<f64>,
    pub price_per_kwh: Option<f64>,
}

/// 客户更新请求体：顶层标量覆盖，嵌套子对象逐字段合并。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub price_per_m3: Option<f64>,
    pub price_per_kwh: Option<f64>,
    pub contact_info: Option<ContactInfoPatch>,
    pub contract_details: Option<ContractDetailsPatch>,
    pub mqtt_config: Option<MqttConfigPatch>,
    pub support_info: Option<SupportInfoPatch>,
}

/// 联系人信息更新片段。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfoPatch {
    pub primary_contact_name: Option<String>,
    pub primary_contact_email: Option<String>,
    pub primary_contact_phone: Option<String>,
    pub secondary_contact_name: Option<String>,
    pub secondary_contact_email: Option<String>,
    pub secondary_contact_phone: Option<String>,
}

/// 合同细节更新片段。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDetailsPatch {
    pub contract_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub service_level: Option<String>,
    pub notes: Option<String>,
}

/// MQTT 配置更新片段。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MqttConfigPatch {
    pub broker_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub consumption_topic: Option<String>,
    pub tank_upper_topic: Option<String>,
    pub tank_lower_topic: Option<String>,
    pub pump_status_topic: Option<String>,
    pub pressure_network_topic: Option<String>,
    pub pressure_internal_topic: Option<String>,
    pub topic_notes: Option<String>,
}

/// 客服支持信息更新片段。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportInfoPatch {
    pub support_tier: Option<String>,
    pub dedicated_agent_name: Option<String>,
    pub last_ticket_id: Option<String>,
    pub internal_notes: Option<String>,
}

/// 客户完整返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub client_id: String,
    pub name: String,
    pub managing_company_id: String,
    pub registered_at: String,
    pub price_per_m3: f64,
    pub price_per_kwh: f64,
    pub contact_info: ContactInfoDto,
    pub contract_details: ContractDetailsDto,
    pub mqtt_config: MqttConfigDto,
    pub support_info: SupportInfoDto,
}

/// 联系人信息返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfoDto {
    pub primary_contact_name: String,
    pub primary_contact_email: String,
    pub primary_contact_phone: String,
    pub secondary_contact_name: String,
    pub secondary_contact_email: String,
    pub secondary_contact_phone: String,
}

/// 合同细节返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDetailsDto {
    pub contract_id: String,
    pub start_date: String,
    pub end_date: String,
    pub service_level: String,
    pub notes: String,
}

/// MQTT 配置返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MqttConfigDto {
    pub broker_url: String,
    pub username: String,
    pub password: String,
    pub consumption_topic: String,
    pub tank_upper_topic: String,
    pub tank_lower_topic: String,
    pub pump_status_topic: String,
    pub pressure_network_topic: String,
    pub pressure_internal_topic: String,
    pub topic_notes: String,
}

/// 客服支持信息返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportInfoDto {
    pub support_tier: String,
    pub dedicated_agent_name: String,
    pub last_ticket_id: String,
    pub internal_notes: String,
}

/// 图表序列点返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPointDto {
    pub label: String,
    pub value: f64,
}

/// 分户用量返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitTotalDto {
    pub unit_id: String,
    pub total_m3: f64,
}

/// 月度汇总指标返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDto {
    pub total_current_month: f64,
    pub total_previous_month: f64,
    pub average_daily_current_month: f64,
    pub active_units: u32,
    pub percent_change: f64,
    pub estimated_water_bill: f64,
    pub estimated_pump_energy_cost: f64,
}

/// 泵状态返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PumpStatusDto {
    pub pressure_psi: f64,
    pub is_active: bool,
    pub changed_at_ms: i64,
}

/// 水箱读数返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TankReadingDto {
    pub level_percent: f64,
    pub updated_at_ms: i64,
}

/// 水箱位置返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TankLocationDto {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// 环境遥测点返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentPointDto {
    pub label: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ts_ms: i64,
}

/// 仪表盘快照返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub metrics: MetricsDto,
    pub trend: Vec<SeriesPointDto>,
    pub unit_breakdown: Vec<UnitTotalDto>,
    pub pump: PumpStatusDto,
    pub tank: TankReadingDto,
    pub location: TankLocationDto,
    pub environment: Vec<EnvironmentPointDto>,
    pub environment_error: Option<String>,
}

/// 泵开关请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PumpToggleRequest {
    pub active: bool,
}

/// 历史序列查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesQuery {
    /// 序列类型："tankUpper" | "tankLower" | "pressureNetwork"
    /// | "pressureInternal" | "energyKwh" | "energyCost"。
    pub kind: String,
    pub max_points: Option<usize>,
    pub from_ms: Option<i64>,
    pub to_ms: Option<i64>,
}

/// 财务汇总查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialQuery {
    /// 窗口长度（月）：3 | 6 | 12。
    pub months: u32,
}

/// 咨询建议返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorTextDto {
    pub text: String,
}
