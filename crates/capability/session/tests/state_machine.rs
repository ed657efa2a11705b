//! 导航状态机集成测试

use aqua_session::{SessionError, SessionRegistry};
use domain::{
    ClientIdentity, CompanyIdentity, DashboardSnapshot, OverallMetrics, Principal, PumpStatus,
    SuperAdminIdentity, TankLocation, TankReading, View,
};

fn super_admin() -> Principal {
    Principal::SuperAdmin(SuperAdminIdentity {
        admin_id: "super-001".to_string(),
        name: "Super Admin".to_string(),
        email: "superadmin@gmail.com".to_string(),
    })
}

fn company_admin() -> Principal {
    Principal::CompanyAdmin(CompanyIdentity {
        company_id: "admincomp-001".to_string(),
        name: "Gestao de Aguas".to_string(),
        admin_email: "gestao01@gmail.com".to_string(),
    })
}

fn client_user() -> Principal {
    Principal::ClientUser(client("condo-789"))
}

fn client(id: &str) -> ClientIdentity {
    ClientIdentity {
        client_id: id.to_string(),
        name: "Condominio Sol Nascente".to_string(),
        managing_company_id: "admincomp-001".to_string(),
    }
}

fn company(id: &str) -> CompanyIdentity {
    CompanyIdentity {
        company_id: id.to_string(),
        name: "Gestao de Aguas".to_string(),
        admin_email: "gestao01@gmail.com".to_string(),
    }
}

fn snapshot(client_id: &str) -> DashboardSnapshot {
    DashboardSnapshot {
        metrics: OverallMetrics::zero(),
        trend: Vec::new(),
        unit_breakdown: Vec::new(),
        pump: PumpStatus {
            client_id: client_id.to_string(),
            pressure_psi: 40.0,
            is_active: false,
            changed_at_ms: 0,
        },
        tank: TankReading {
            client_id: client_id.to_string(),
            level_percent: 60.0,
            updated_at_ms: 0,
        },
        location: TankLocation {
            client_id: client_id.to_string(),
            latitude: -23.55,
            longitude: -46.63,
            address: "Rua Ficticia, 100".to_string(),
        },
        environment: Vec::new(),
        environment_error: None,
    }
}

#[test]
fn initial_view_follows_role() {
    let registry = SessionRegistry::new();

    let (_, state) = registry.create(super_admin()).unwrap();
    assert_eq!(state.view, View::ManageCompanies);
    assert!(state.selected_company.is_none());

    let (_, state) = registry.create(company_admin()).unwrap();
    assert_eq!(state.view, View::ManageClients);
    // 公司管理员隐式选中本公司
    assert_eq!(
        state.selected_company.map(|c| c.company_id),
        Some("admincomp-001".to_string())
    );

    let (_, state) = registry.create(client_user()).unwrap();
    assert_eq!(state.view, View::Dashboard);
    // 客户用户隐式选中自己
    assert_eq!(
        state.selected_client.map(|c| c.client_id),
        Some("condo-789".to_string())
    );
}

#[test]
fn dashboard_requires_selected_client_and_view_is_unchanged_on_rejection() {
    let registry = SessionRegistry::new();
    let (token, _) = registry.create(company_admin()).unwrap();

    let err = registry.enter_view(&token, View::Dashboard).unwrap_err();
    assert!(matches!(err, SessionError::TransitionDenied(_)));

    // 被拒绝的切换不改变当前视图
    let state = registry.current(&token).unwrap();
    assert_eq!(state.view, View::ManageClients);
}

#[test]
fn manage_companies_is_super_admin_only() {
    let registry = SessionRegistry::new();

    let (token, _) = registry.create(company_admin()).unwrap();
    assert!(registry.enter_view(&token, View::ManageCompanies).is_err());

    let (token, _) = registry.create(client_user()).unwrap();
    assert!(registry.enter_view(&token, View::ManageCompanies).is_err());
    assert!(registry.enter_view(&token, View::ManageClients).is_err());
    assert!(registry.enter_view(&token, View::ClientDetails).is_err());
    // 客户用户自带选中客户，可进入仪表盘与报表
    assert!(registry.enter_view(&token, View::Reports).is_ok());
}

#[test]
fn super_admin_needs_selected_company_for_client_management() {
    let registry = SessionRegistry::new();
    let (token, _) = registry.create(super_admin()).unwrap();

    assert!(registry.enter_view(&token, View::ManageClients).is_err());

    let state = registry
        .select_company(&token, company("admincomp-001"))
        .unwrap();
    assert_eq!(state.view, View::ManageClients);
    assert!(registry.enter_view(&token, View::ManageClients).is_ok());
}

#[test]
fn selecting_company_clears_client_and_snapshot() {
    let registry = SessionRegistry::new();
    let (token, _) = registry.create(super_admin()).unwrap();

    registry
        .select_company(&token, company("admincomp-001"))
        .unwrap();
    let (_, generation) = registry.select_client(&token, client("condo-789")).unwrap();
    registry
        .apply_snapshot(&token, generation, snapshot("condo-789"))
        .unwrap();
    assert!(registry.snapshot(&token).unwrap().is_some());

    let state = registry
        .select_company(&token, company("admincomp-002"))
        .unwrap();
    assert!(state.selected_client.is_none());
    assert!(state.snapshot.is_none());
    assert_eq!(state.view, View::ManageClients);
}

#[test]
fn selecting_client_bumps_generation_and_enters_dashboard() {
    let registry = SessionRegistry::new();
    let (token, _) = registry.create(company_admin()).unwrap();

    let (state, first) = registry.select_client(&token, client("condo-789")).unwrap();
    assert_eq!(state.view, View::Dashboard);
    assert_eq!(first, 1);

    let (_, second) = registry.select_client(&token, client("condo-abc")).unwrap();
    assert_eq!(second, 2);
}

#[test]
fn selecting_client_requires_the_owning_company() {
    let registry = SessionRegistry::new();
    let (token, _) = registry.create(super_admin()).unwrap();

    // 未选公司时不能选客户
    let err = registry.select_client(&token, client("condo-789")).unwrap_err();
    assert!(matches!(err, SessionError::TransitionDenied(_)));

    // 已选公司也不能选其他公司的客户
    registry
        .select_company(&token, company("admincomp-002"))
        .unwrap();
    let err = registry.select_client(&token, client("condo-789")).unwrap_err();
    assert!(matches!(err, SessionError::TransitionDenied(_)));
    let state = registry.current(&token).unwrap();
    assert!(state.selected_client.is_none());
    assert_eq!(state.view, View::ManageClients);

    registry
        .select_company(&token, company("admincomp-001"))
        .unwrap();
    assert!(registry.select_client(&token, client("condo-789")).is_ok());
}

#[test]
fn client_user_cannot_switch_clients() {
    let registry = SessionRegistry::new();
    let (token, _) = registry.create(client_user()).unwrap();
    assert!(registry.select_client(&token, client("condo-abc")).is_err());
}

#[test]
fn stale_snapshot_is_discarded() {
    let registry = SessionRegistry::new();
    let (token, _) = registry.create(company_admin()).unwrap();
    registry.select_client(&token, client("condo-789")).unwrap();

    let (old_generation, _) = registry.start_refresh(&token).unwrap();
    // 用户在旧刷新完成前切换了客户
    registry.select_client(&token, client("condo-abc")).unwrap();
    let (new_generation, _) = registry.start_refresh(&token).unwrap();

    let applied = registry
        .apply_snapshot(&token, old_generation, snapshot("condo-789"))
        .unwrap();
    assert!(!applied);
    assert!(registry.snapshot(&token).unwrap().is_none());

    let applied = registry
        .apply_snapshot(&token, new_generation, snapshot("condo-abc"))
        .unwrap();
    assert!(applied);
    assert_eq!(
        registry.snapshot(&token).unwrap().map(|s| s.pump.client_id),
        Some("condo-abc".to_string())
    );
}

#[test]
fn logout_removes_the_whole_session() {
    let registry = SessionRegistry::new();
    let (token, _) = registry.create(super_admin()).unwrap();

    registry.remove(&token).unwrap();
    assert!(matches!(
        registry.current(&token),
        Err(SessionError::NotFound)
    ));
    assert!(matches!(registry.remove(&token), Err(SessionError::NotFound)));
}
