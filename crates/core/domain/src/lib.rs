pub mod data;

pub use data::{
    ConsumptionRecord, DashboardSnapshot, EnergyMetric, EnvironmentPoint, OverallMetrics,
    PressureKind, PressureRecord, PumpEnergyRecord, PumpStatus, SeriesPoint, TankKind,
    TankLevelRecord, TankLocation, TankReading, UnitTotal,
};

/// 登录主体的角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    SuperAdmin,
    CompanyAdmin,
    ClientUser,
}

impl Role {
    /// 角色的稳定字符串表示（DTO 与日志共用）。
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superAdmin",
            Role::CompanyAdmin => "companyAdmin",
            Role::ClientUser => "clientUser",
        }
    }

    /// 解析线协议上的角色标识。
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "superAdmin" => Some(Role::SuperAdmin),
            "companyAdmin" => Some(Role::CompanyAdmin),
            "clientUser" => Some(Role::ClientUser),
            _ => None,
        }
    }
}

/// 平台超级管理员身份。
#[derive(Debug, Clone, PartialEq)]
pub struct SuperAdminIdentity {
    pub admin_id: String,
    pub name: String,
    pub email: String,
}

/// 物业管理公司身份摘要。
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyIdentity {
    pub company_id: String,
    pub name: String,
    pub admin_email: String,
}

/// 小区客户身份摘要。
#[derive(Debug, Clone, PartialEq)]
pub struct ClientIdentity {
    pub client_id: String,
    pub name: String,
    pub managing_company_id: String,
}

/// 已认证主体：角色标签 + 对应身份载荷。
///
/// 状态机中所有按角色分支统一走穷尽匹配，不做运行时强转。
#[derive(Debug, Clone, PartialEq)]
pub enum Principal {
    SuperAdmin(SuperAdminIdentity),
    CompanyAdmin(CompanyIdentity),
    ClientUser(ClientIdentity),
}

impl Principal {
    pub fn role(&self) -> Role {
        match self {
            Principal::SuperAdmin(_) => Role::SuperAdmin,
            Principal::CompanyAdmin(_) => Role::CompanyAdmin,
            Principal::ClientUser(_) => Role::ClientUser,
        }
    }

    pub fn actor_id(&self) -> &str {
        match self {
            Principal::SuperAdmin(identity) => &identity.admin_id,
            Principal::CompanyAdmin(identity) => &identity.company_id,
            Principal::ClientUser(identity) => &identity.client_id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Principal::SuperAdmin(identity) => &identity.name,
            Principal::CompanyAdmin(identity) => &identity.name,
            Principal::ClientUser(identity) => &identity.name,
        }
    }

    /// 构造该主体的访问上下文。
    ///
    /// 公司管理员携带公司作用域，客户用户携带客户作用域，
    /// 超级管理员不受作用域限制。
    pub fn to_access_context(&self) -> AccessContext {
        match self {
            Principal::SuperAdmin(identity) => AccessContext::new(
                identity.admin_id.clone(),
                Role::SuperAdmin,
                None,
                None,
            ),
            Principal::CompanyAdmin(identity) => AccessContext::new(
                identity.company_id.clone(),
                Role::CompanyAdmin,
                Some(identity.company_id.clone()),
                None,
            ),
            Principal::ClientUser(identity) => AccessContext::new(
                identity.client_id.clone(),
                Role::ClientUser,
                None,
                Some(identity.client_id.clone()),
            ),
        }
    }
}

/// 访问上下文：所有存储调用共享的执行上下文。
#[derive(Debug, Clone)]
pub struct AccessContext {
    pub actor_id: String,
    pub role: Role,
    pub company_scope: Option<String>,
    pub client_scope: Option<String>,
}

impl AccessContext {
    /// 构造显式身份与作用域的访问上下文。
    pub fn new(
        actor_id: impl Into<String>,
        role: Role,
        company_scope: Option<String>,
        client_scope: Option<String>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            role,
            company_scope,
            client_scope,
        }
    }

    /// 内部服务上下文（启动播种、后台任务使用）。
    pub fn service() -> Self {
        Self {
            actor_id: "system".to_string(),
            role: Role::SuperAdmin,
            company_scope: None,
            client_scope: None,
        }
    }
}

/// 已认证应用内的视图（导航状态机的状态维度）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    ManageCompanies,
    ManageClients,
    ClientDetails,
    Dashboard,
    Reports,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::ManageCompanies => "manageCompanies",
            View::ManageClients => "manageClients",
            View::ClientDetails => "clientDetails",
            View::Dashboard => "dashboard",
            View::Reports => "reports",
        }
    }

    /// 解析线协议上的视图标识。
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "manageCompanies" => Some(View::ManageCompanies),
            "manageClients" => Some(View::ManageClients),
            "clientDetails" => Some(View::ClientDetails),
            "dashboard" => Some(View::Dashboard),
            "reports" => Some(View::Reports),
            _ => None,
        }
    }
}
