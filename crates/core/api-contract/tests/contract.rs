//! DTO 字段命名契约测试（camelCase 线协议）

use api_contract::{
    LoginRequest, MetricsDto, SeriesQuery, SessionDto, UpdateClientRequest,
};
use serde_json::{Value, json};

#[test]
fn login_request_accepts_camel_case() {
    let body = json!({
        "role": "companyAdmin",
        "identifier": "gestao01@gmail.com",
        "password": "123456"
    });
    let request: LoginRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.role, "companyAdmin");
    assert_eq!(request.identifier, "gestao01@gmail.com");
}

#[test]
fn metrics_dto_serializes_camel_case() {
    let dto = MetricsDto {
        total_current_month: 120.5,
        total_previous_month: 98.0,
        average_daily_current_month: 4.02,
        active_units: 3,
        percent_change: 23.0,
        estimated_water_bill: 692.88,
        estimated_pump_energy_cost: 41.2,
    };
    let value: Value = serde_json::to_value(&dto).unwrap();
    assert_eq!(value["totalCurrentMonth"], json!(120.5));
    assert_eq!(value["activeUnits"], json!(3));
    assert_eq!(value["percentChange"], json!(23.0));
    assert!(value.get("total_current_month").is_none());
}

#[test]
fn session_dto_serializes_camel_case() {
    let dto = SessionDto {
        role: "superAdmin".to_string(),
        actor_id: "superadmin-01".to_string(),
        display_name: "Super Admin".to_string(),
        view: "manageCompanies".to_string(),
        selected_company: None,
        selected_client: None,
    };
    let value: Value = serde_json::to_value(&dto).unwrap();
    assert_eq!(value["actorId"], json!("superadmin-01"));
    assert_eq!(value["selectedCompany"], Value::Null);
    assert_eq!(value["selectedClient"], Value::Null);
}

#[test]
fn update_client_request_partial_body() {
    let body = json!({
        "pricePerM3": 6.1,
        "contactInfo": { "primaryContactEmail": "joao@example.com" }
    });
    let request: UpdateClientRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.price_per_m3, Some(6.1));
    assert!(request.name.is_none());
    let contact = request.contact_info.unwrap();
    assert_eq!(
        contact.primary_contact_email.as_deref(),
        Some("joao@example.com")
    );
    assert!(contact.primary_contact_name.is_none());
}

#[test]
fn series_query_parses_optional_fields() {
    let query: SeriesQuery =
        serde_json::from_value(json!({ "kind": "tankUpper", "maxPoints": 100 })).unwrap();
    assert_eq!(query.kind, "tankUpper");
    assert_eq!(query.max_points, Some(100));
    assert!(query.from_ms.is_none());
}
