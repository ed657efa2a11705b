//! 演示环境的初始注册表数据

use aqua_storage::{
    ClientRecord, CompanyRecord, ContactInfo, ContractDetails, MqttConfig, SupportInfo,
};
use chrono::{Duration, Utc};

/// 新客户的默认水价（R$/m³）。
pub const DEFAULT_PRICE_PER_M3: f64 = 5.75;
/// 新客户的默认电价（R$/kWh）。
pub const DEFAULT_PRICE_PER_KWH: f64 = 0.75;

/// 演示用管理公司列表。
pub fn demo_companies() -> Vec<CompanyRecord> {
    vec![
        CompanyRecord {
            company_id: "admincomp-001".to_string(),
            name: "Gestao de Aguas Inteligentes Ltda.".to_string(),
            admin_email: "gestao01@gmail.com".to_string(),
            responsible_person: Some("Carlos Pereira".to_string()),
            registration_number: Some("11.222.333/0001-44".to_string()),
        },
        CompanyRecord {
            company_id: "admincomp-002".to_string(),
            name: "EcoSindicos Profissionais S.A.".to_string(),
            admin_email: "admincomp2@example.com".to_string(),
            responsible_person: Some("Mariana Costa".to_string()),
            registration_number: Some("55.666.777/0001-88".to_string()),
        },
        CompanyRecord {
            company_id: "admincomp-legacy".to_string(),
            name: "Administradora Legada (JV)".to_string(),
            admin_email: "joaovictor.priv@gmail.com".to_string(),
            responsible_person: Some("Joao Victor (Legado)".to_string()),
            registration_number: Some("99.999.999/0001-99".to_string()),
        },
    ]
}

/// 演示用客户（小区）列表。
pub fn demo_clients() -> Vec<ClientRecord> {
    let now = Utc::now();
    vec![
        ClientRecord {
            client_id: "condominio01@gmail.com".to_string(),
            name: "Residencial Aguas Claras".to_string(),
            managing_company_id: "admincomp-001".to_string(),
            registered_at: now - Duration::days(10),
            price_per_m3: 5.50,
            price_per_kwh: 0.78,
            contact_info: ContactInfo {
                primary_contact_name: "Sindico Joao Silva".to_string(),
                primary_contact_email: "sindico.ac@email.com".to_string(),
                primary_contact_phone: "(11) 98765-4321".to_string(),
                ..ContactInfo::default()
            },
            contract_details: ContractDetails {
                contract_id: "CTR-AC-001".to_string(),
                start_date: "2023-01-15".to_string(),
                end_date: "2025-01-14".to_string(),
                service_level: "premium".to_string(),
                notes: "Cliente fundador, atencao especial.".to_string(),
            },
            mqtt_config: MqttConfig::default_for("condominio01@gmail.com"),
            support_info: SupportInfo {
                support_tier: "gold".to_string(),
                dedicated_agent_name: "Ana Pereira".to_string(),
                last_ticket_id: "SUP-987".to_string(),
                internal_notes: "Renovacao de contrato em breve.".to_string(),
            },
        },
        ClientRecord {
            client_id: "condo-789".to_string(),
            name: "Condominio Sol Nascente".to_string(),
            managing_company_id: "admincomp-001".to_string(),
            registered_at: now - Duration::days(5),
            price_per_m3: 6.00,
            price_per_kwh: 0.72,
            contact_info: ContactInfo {
                primary_contact_name: "Gerente Maria Oliveira".to_string(),
                primary_contact_email: "gerencia.sn@email.com".to_string(),
                primary_contact_phone: "(21) 91234-5678".to_string(),
                ..ContactInfo::default()
            },
            contract_details: ContractDetails {
                contract_id: "CTR-SN-002".to_string(),
                start_date: "2023-06-01".to_string(),
                notes: "Solicitou treinamento adicional para equipe local.".to_string(),
                ..ContractDetails::default()
            },
            mqtt_config: MqttConfig::default_for("condo-789"),
            support_info: SupportInfo {
                internal_notes: "Cliente satisfeito com os relatorios.".to_string(),
                ..SupportInfo::default()
            },
        },
        ClientRecord::with_defaults(
            "condo-abc",
            "Edificio Vista Verde",
            "admincomp-002",
            now - Duration::days(2),
            5.25,
            0.80,
        ),
        ClientRecord {
            client_id: "condo-legacy-1".to_string(),
            name: "Condominio Antigo Principal".to_string(),
            managing_company_id: "admincomp-legacy".to_string(),
            registered_at: now - Duration::days(30),
            price_per_m3: 5.00,
            price_per_kwh: 0.70,
            contact_info: ContactInfo {
                primary_contact_name: "Sindico Legado".to_string(),
                primary_contact_email: "sindico.legacy@email.com".to_string(),
                primary_contact_phone: "(11) 99999-0000".to_string(),
                ..ContactInfo::default()
            },
            contract_details: ContractDetails::default(),
            mqtt_config: MqttConfig::default_for("condo-legacy-1"),
            support_info: SupportInfo::default(),
        },
    ]
}
