//! ApiResponse 封装序列化契约测试

use api_contract::ApiResponse;
use serde_json::{Value, json};

#[test]
fn success_envelope_shape() {
    let response = ApiResponse::success(json!({ "ok": true }));
    let value: Value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["success"], json!(true));
    assert_eq!(value["data"]["ok"], json!(true));
    assert_eq!(value["error"], Value::Null);
}

#[test]
fn error_envelope_shape() {
    let response: ApiResponse<Value> = ApiResponse::error("NOT_FOUND", "client not found");
    let value: Value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["success"], json!(false));
    assert_eq!(value["data"], Value::Null);
    assert_eq!(value["error"]["code"], json!("NOT_FOUND"));
    assert_eq!(value["error"]["message"], json!("client not found"));
}
