use domain::{AccessContext, ClientIdentity, CompanyIdentity, Principal, Role, SuperAdminIdentity};

#[test]
fn access_context_builds() {
    let ctx = AccessContext::new(
        "company-1",
        Role::CompanyAdmin,
        Some("company-1".to_string()),
        None,
    );

    assert_eq!(ctx.actor_id, "company-1");
    assert_eq!(ctx.role, Role::CompanyAdmin);
    assert_eq!(ctx.company_scope.as_deref(), Some("company-1"));
    assert!(ctx.client_scope.is_none());
}

#[test]
fn service_context_is_unscoped() {
    let ctx = AccessContext::service();
    assert_eq!(ctx.role, Role::SuperAdmin);
    assert!(ctx.company_scope.is_none());
    assert!(ctx.client_scope.is_none());
}

#[test]
fn principal_scopes_follow_role() {
    let super_admin = Principal::SuperAdmin(SuperAdminIdentity {
        admin_id: "super-001".to_string(),
        name: "Global Admin".to_string(),
        email: "superadmin@example.com".to_string(),
    });
    let ctx = super_admin.to_access_context();
    assert_eq!(ctx.role, Role::SuperAdmin);
    assert!(ctx.company_scope.is_none());
    assert!(ctx.client_scope.is_none());

    let company_admin = Principal::CompanyAdmin(CompanyIdentity {
        company_id: "company-1".to_string(),
        name: "Aqua Gestao".to_string(),
        admin_email: "gestao@example.com".to_string(),
    });
    let ctx = company_admin.to_access_context();
    assert_eq!(ctx.role, Role::CompanyAdmin);
    assert_eq!(ctx.company_scope.as_deref(), Some("company-1"));

    let client_user = Principal::ClientUser(ClientIdentity {
        client_id: "client-1".to_string(),
        name: "Residencial Aguas Claras".to_string(),
        managing_company_id: "company-1".to_string(),
    });
    let ctx = client_user.to_access_context();
    assert_eq!(ctx.role, Role::ClientUser);
    assert_eq!(ctx.client_scope.as_deref(), Some("client-1"));
    assert!(ctx.company_scope.is_none());
}

#[test]
fn role_strings_are_stable() {
    assert_eq!(Role::SuperAdmin.as_str(), "superAdmin");
    assert_eq!(Role::CompanyAdmin.as_str(), "companyAdmin");
    assert_eq!(Role::ClientUser.as_str(), "clientUser");
}
