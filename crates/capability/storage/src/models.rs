//! 数据模型
//!
//! 定义注册表相关的数据模型和更新结构：
//! - 管理公司模型：CompanyRecord
//! - 客户模型：ClientRecord, ClientUpdate（含四组嵌套子对象）
//! - 嵌套子对象：ContactInfo / ContractDetails / MqttConfig / SupportInfo，
//!   每组配套一个 Update 结构，按字段浅合并
//!
//! 合并契约：顶层标量字段整体覆盖；嵌套子对象逐字段合并，
//! 未出现的字段保留原值。该契约由显式的 `apply` 函数承载，
//! 保持可测试，不依赖通用的对象展开。

use chrono::{DateTime, Utc};
use domain::{ClientIdentity, CompanyIdentity};

/// 管理公司记录。
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub company_id: String,
    pub name: String,
    /// 公司管理员登录邮箱，注册表内唯一。
    pub admin_email: String,
    pub responsible_person: Option<String>,
    pub registration_number: Option<String>,
}

impl CompanyRecord {
    pub fn identity(&self) -> CompanyIdentity {
        CompanyIdentity {
            company_id: self.company_id.clone(),
            name: self.name.clone(),
            admin_email: self.admin_email.clone(),
        }
    }
}

/// 联系人信息（嵌套子对象）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactInfo {
    pub primary_contact_name: String,
    pub primary_contact_email: String,
    pub primary_contact_phone: String,
    pub secondary_contact_name: String,
    pub secondary_contact_email: String,
    pub secondary_contact_phone: String,
}

/// 联系人信息更新输入（逐字段合并）。
#[derive(Debug, Clone, Default)]
pub struct ContactInfoUpdate {
    pub primary_contact_name: Option<String>,
    pub primary_contact_email: Option<String>,
    pub primary_contact_phone: Option<String>,
    pub secondary_contact_name: Option<String>,
    pub secondary_contact_email: Option<String>,
    pub secondary_contact_phone: Option<String>,
}

impl ContactInfo {
    pub fn apply(&mut self, update: ContactInfoUpdate) {
        if let Some(value) = update.primary_contact_name {
            self.primary_contact_name = value;
        }
        if let Some(value) = update.primary_contact_email {
            self.primary_contact_email = value;
        }
        if let Some(value) = update.primary_contact_phone {
            self.primary_contact_phone = value;
        }
        if let Some(value) = update.secondary_contact_name {
            self.secondary_contact_name = value;
        }
        if let Some(value) = update.secondary_contact_email {
            self.secondary_contact_email = value;
        }
        if let Some(value) = update.secondary_contact_phone {
            self.secondary_contact_phone = value;
        }
    }
}

/// 合同细节（嵌套子对象）。
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDetails {
    pub contract_id: String,
    pub start_date: String,
    pub end_date: String,
    pub service_level: String,
    pub notes: String,
}

impl Default for ContractDetails {
    fn default() -> Self {
        Self {
            contract_id: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            service_level: "standard".to_string(),
            notes: String::new(),
        }
    }
}

/// 合同细节更新输入（逐字段合并）。
#[derive(Debug, Clone, Default)]
pub struct ContractDetailsUpdate {
    pub contract_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub service_level: Option<String>,
    pub notes: Option<String>,
}

impl ContractDetails {
    pub fn apply(&mut self, update: ContractDetailsUpdate) {
        if let Some(value) = update.contract_id {
            self.contract_id = value;
        }
        if let Some(value) = update.start_date {
            self.start_date = value;
        }
        if let Some(value) = update.end_date {
            self.end_date = value;
        }
        if let Some(value) = update.service_level {
            self.service_level = value;
        }
        if let Some(value) = update.notes {
            self.notes = value;
        }
    }
}

/// 采集侧 MQTT 配置（嵌套子对象，仅存储，不建立连接）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MqttConfig {
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

impl MqttConfig {
    /// 为新客户生成默认主题布局。
    pub fn default_for(client_id: &str) -> Self {
        Self {
            broker_url: "mqtt://test.mosquitto.org:1883".to_string(),
            username: String::new(),
            password: String::new(),
            consumption_topic: format!("clients/{client_id}/water/consumption/total"),
            tank_upper_topic: format!("clients/{client_id}/tank/upper/level"),
            tank_lower_topic: format!("clients/{client_id}/tank/lower/level"),
            pump_status_topic: format!("clients/{client_id}/pump/main/status"),
            pressure_network_topic: format!("clients/{client_id}/pressure/network"),
            pressure_internal_topic: format!("clients/{client_id}/pressure/internal"),
            topic_notes: "Topics are static per client; no template placeholders.".to_string(),
        }
    }
}

/// MQTT 配置更新输入（逐字段合并）。
#[derive(Debug, Clone, Default)]
pub struct MqttConfigUpdate {
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

impl MqttConfig {
    pub fn apply(&mut self, update: MqttConfigUpdate) {
        if let Some(value) = update.broker_url {
            self.broker_url = value;
        }
        if let Some(value) = update.username {
            self.username = value;
        }
        if let Some(value) = update.password {
            self.password = value;
        }
        if let Some(value) = update.consumption_topic {
            self.consumption_topic = value;
        }
        if let Some(value) = update.tank_upper_topic {
            self.tank_upper_topic = value;
        }
        if let Some(value) = update.tank_lower_topic {
            self.tank_lower_topic = value;
        }
        if let Some(value) = update.pump_status_topic {
            self.pump_status_topic = value;
        }
        if let Some(value) = update.pressure_network_topic {
            self.pressure_network_topic = value;
        }
        if let Some(value) = update.pressure_internal_topic {
            self.pressure_internal_topic = value;
        }
        if let Some(value) = update.topic_notes {
            self.topic_notes = value;
        }
    }
}

/// 客服支持信息（嵌套子对象）。
#[derive(Debug, Clone, PartialEq)]
pub struct SupportInfo {
    pub support_tier: String,
    pub dedicated_agent_name: String,
    pub last_ticket_id: String,
    pub internal_notes: String,
}

impl Default for SupportInfo {
    fn default() -> Self {
        Self {
            support_tier: "silver".to_string(),
            dedicated_agent_name: String::new(),
            last_ticket_id: String::new(),
            internal_notes: String::new(),
        }
    }
}

/// 客服支持信息更新输入（逐字段合并）。
#[derive(Debug, Clone, Default)]
pub struct SupportInfoUpdate {
    pub support_tier: Option<String>,
    pub dedicated_agent_name: Option<String>,
    pub last_ticket_id: Option<String>,
    pub internal_notes: Option<String>,
}

impl SupportInfo {
    pub fn apply(&mut self, update: SupportInfoUpdate) {
        if let Some(value) = update.support_tier {
            self.support_tier = value;
        }
        if let Some(value) = update.dedicated_agent_name {
            self.dedicated_agent_name = value;
        }
        if let Some(value) = update.last_ticket_id {
            self.last_ticket_id = value;
        }
        if let Some(value) = update.internal_notes {
            self.internal_notes = value;
        }
    }
}

/// 客户（小区）记录。
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    pub client_id: String,
    pub name: String,
    pub managing_company_id: String,
    pub registered_at: DateTime<Utc>,
    /// 当前水价（月度账单估算用，历史记录的 cost 不随之重算）。
    pub price_per_m3: f64,
    pub price_per_kwh: f64,
    pub contact_info: ContactInfo,
    pub contract_details: ContractDetails,
    pub mqtt_config: MqttConfig,
    pub support_info: SupportInfo,
}

impl ClientRecord {
    /// 以默认子对象构造新客户记录。
    pub fn with_defaults(
        client_id: impl Into<String>,
        name: impl Into<String>,
        managing_company_id: impl Into<String>,
        registered_at: DateTime<Utc>,
        price_per_m3: f64,
        price_per_kwh: f64,
    ) -> Self {
        let client_id = client_id.into();
        let mqtt_config = MqttConfig::default_for(&client_id);
        Self {
            client_id,
            name: name.into(),
            managing_company_id: managing_company_id.into(),
            registered_at,
            price_per_m3,
            price_per_kwh,
            contact_info: ContactInfo::default(),
            contract_details: ContractDetails::default(),
            mqtt_config,
            support_info: SupportInfo::default(),
        }
    }

    pub fn identity(&self) -> ClientIdentity {
        ClientIdentity {
            client_id: self.client_id.clone(),
            name: self.name.clone(),
            managing_company_id: self.managing_company_id.clone(),
        }
    }

    /// 执行客户更新：顶层标量覆盖，嵌套子对象逐字段合并。
    pub fn apply(&mut self, update: ClientUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price_per_m3 {
            self.price_per_m3 = price;
        }
        if let Some(price) = update.price_per_kwh {
            self.price_per_kwh = price;
        }
        if let Some(contact) = update.contact_info {
            self.contact_info.apply(contact);
        }
        if let Some(contract) = update.contract_details {
            self.contract_details.apply(contract);
        }
        if let Some(mqtt) = update.mqtt_config {
            self.mqtt_config.apply(mqtt);
        }
        if let Some(support) = update.support_info {
            self.support_info.apply(support);
        }
    }
}

/// 客户更新输入。
#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub price_per_m3: Option<f64>,
    pub price_per_kwh: Option<f64>,
    pub contact_info: Option<ContactInfoUpdate>,
    pub contract_details: Option<ContractDetailsUpdate>,
    pub mqtt_config: Option<MqttConfigUpdate>,
    pub support_info: Option<SupportInfoUpdate>,
}
