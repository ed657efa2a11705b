//! 注册表存储集成测试：公司/客户 CRUD、作用域隔离与合并语义

use aqua_storage::{
    ClientRecord, ClientStore, ClientUpdate, CompanyStore, ContactInfoUpdate, InMemoryClientStore,
    InMemoryCompanyStore, StorageError, SupportInfoUpdate,
};
use chrono::Utc;
use domain::{AccessContext, Role};

fn admin_ctx() -> AccessContext {
    AccessContext::service()
}

fn company_ctx(company_id: &str) -> AccessContext {
    AccessContext::new(
        "admin@example.com",
        Role::CompanyAdmin,
        Some(company_id.to_string()),
        None,
    )
}

fn client_ctx(client_id: &str) -> AccessContext {
    AccessContext::new(
        client_id,
        Role::ClientUser,
        None,
        Some(client_id.to_string()),
    )
}

fn sample_client(client_id: &str, name: &str, company_id: &str) -> ClientRecord {
    ClientRecord::with_defaults(client_id, name, company_id, Utc::now(), 5.75, 0.75)
}

#[tokio::test]
async fn create_and_list_companies_sorted_by_name() {
    let ctx = admin_ctx();
    let store = InMemoryCompanyStore::new();

    store
        .create_company(&ctx, "Zeta Gestao", "zeta@example.com", None)
        .await
        .unwrap();
    store
        .create_company(&ctx, "Alfa Gestao", "alfa@example.com", Some("Maria".to_string()))
        .await
        .unwrap();

    let companies = store.list_companies(&ctx).await.unwrap();
    assert_eq!(companies.len(), 2);
    assert_eq!(companies[0].name, "Alfa Gestao");
    assert_eq!(companies[1].name, "Zeta Gestao");
    assert!(companies[0].company_id.starts_with("company-"));
}

#[tokio::test]
async fn duplicate_admin_email_is_rejected() {
    let ctx = admin_ctx();
    let store = InMemoryCompanyStore::new();

    store
        .create_company(&ctx, "Alfa Gestao", "alfa@example.com", None)
        .await
        .unwrap();
    let err = store
        .create_company(&ctx, "Outra Gestao", "alfa@example.com", None)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}

#[tokio::test]
async fn blank_company_fields_are_rejected() {
    let ctx = admin_ctx();
    let store = InMemoryCompanyStore::new();

    let err = store
        .create_company(&ctx, "  ", "alfa@example.com", None)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));

    let err = store
        .create_company(&ctx, "Alfa Gestao", "", None)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}

#[tokio::test]
async fn find_company_by_admin_email() {
    let ctx = admin_ctx();
    let store = InMemoryCompanyStore::new();

    let created = store
        .create_company(&ctx, "Alfa Gestao", "alfa@example.com", None)
        .await
        .unwrap();

    let found = store
        .find_company_by_admin_email(&ctx, "alfa@example.com")
        .await
        .unwrap();
    assert_eq!(found.map(|c| c.company_id), Some(created.company_id));

    let missing = store
        .find_company_by_admin_email(&ctx, "nobody@example.com")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn clients_are_listed_per_company_sorted_by_name() {
    let ctx = admin_ctx();
    let store = InMemoryClientStore::new();

    store
        .create_client(&ctx, sample_client("client-2", "Vila Nova", "company-1"))
        .await
        .unwrap();
    store
        .create_client(&ctx, sample_client("client-1", "Condominio Sol", "company-1"))
        .await
        .unwrap();
    store
        .create_client(&ctx, sample_client("client-3", "Residencial Lua", "company-2"))
        .await
        .unwrap();

    let clients = store
        .list_clients_of_company(&ctx, "company-1")
        .await
        .unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].name, "Condominio Sol");
    assert_eq!(clients[1].name, "Vila Nova");
}

#[tokio::test]
async fn company_admin_cannot_list_other_company_clients() {
    let store = InMemoryClientStore::new();
    store
        .create_client(
            &admin_ctx(),
            sample_client("client-1", "Condominio Sol", "company-1"),
        )
        .await
        .unwrap();

    let err = store
        .list_clients_of_company(&company_ctx("company-2"), "company-1")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Scope(_)));
}

#[tokio::test]
async fn out_of_scope_client_reads_as_absent() {
    let store = InMemoryClientStore::new();
    store
        .create_client(
            &admin_ctx(),
            sample_client("client-1", "Condominio Sol", "company-1"),
        )
        .await
        .unwrap();

    let found = store
        .find_client(&client_ctx("client-9"), "client-1")
        .await
        .unwrap();
    assert!(found.is_none());

    let found = store
        .find_client(&client_ctx("client-1"), "client-1")
        .await
        .unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn client_update_merges_nested_objects_per_field() {
    let ctx = admin_ctx();
    let store = InMemoryClientStore::new();
    let mut seeded = sample_client("client-1", "Condominio Sol", "company-1");
    seeded.contact_info.primary_contact_name = "Joao".to_string();
    seeded.contact_info.primary_contact_phone = "11 99999-0000".to_string();
    store.create_client(&ctx, seeded).await.unwrap();

    let update = ClientUpdate {
        price_per_m3: Some(6.10),
        contact_info: Some(ContactInfoUpdate {
            primary_contact_email: Some("joao@example.com".to_string()),
            ..Default::default()
        }),
        support_info: Some(SupportInfoUpdate {
            support_tier: Some("gold".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let updated = store
        .update_client(&ctx, "client-1", update)
        .await
        .unwrap()
        .unwrap();

    // 顶层标量覆盖
    assert_eq!(updated.price_per_m3, 6.10);
    assert_eq!(updated.name, "Condominio Sol");
    // 嵌套对象出现的字段更新
    assert_eq!(updated.contact_info.primary_contact_email, "joao@example.com");
    assert_eq!(updated.support_info.support_tier, "gold");
    // 未出现的字段保持原值
    assert_eq!(updated.contact_info.primary_contact_name, "Joao");
    assert_eq!(updated.contact_info.primary_contact_phone, "11 99999-0000");
    assert_eq!(
        updated.mqtt_config.consumption_topic,
        "clients/client-1/water/consumption/total"
    );
}

#[tokio::test]
async fn update_missing_client_returns_none() {
    let store = InMemoryClientStore::new();
    let result = store
        .update_client(&admin_ctx(), "client-404", ClientUpdate::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn blank_client_name_update_is_rejected() {
    let ctx = admin_ctx();
    let store = InMemoryClientStore::new();
    store
        .create_client(&ctx, sample_client("client-1", "Condominio Sol", "company-1"))
        .await
        .unwrap();

    let update = ClientUpdate {
        name: Some("   ".to_string()),
        ..Default::default()
    };
    let err = store.update_client(&ctx, "client-1", update).await.unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}
