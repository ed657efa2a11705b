//! # Aqua Session 模块
//!
//! 会话与导航状态机：每个登录会话由不透明的 uuid bearer token
//! 标识，持有已认证主体、当前视图、公司/客户选中项、
//! 仪表盘快照槽与刷新代数。
//!
//! 状态机规则：
//! - `manageCompanies` 仅超级管理员可进入
//! - `manageClients` 需要超级管理员已选公司，或公司管理员（隐式本公司）
//! - `clientDetails` / `dashboard` / `reports` 需要已选客户，
//!   其中 `clientDetails` 还要求管理员角色
//! - 选择公司（仅超级管理员）清空已选客户与仪表盘快照
//! - 选择客户要求客户属于已选公司，置位后递增刷新代数并跳转 `dashboard`
//! - 被拒绝的切换不改变当前视图
//! - 登出整体移除会话
//!
//! 快照槽按代数防陈旧：应用快照时携带发起刷新那一刻的代数，
//! 代数落后的快照直接丢弃，后发起的刷新永远不会被先完成的
//! 旧刷新覆盖。

use domain::{
    ClientIdentity, CompanyIdentity, DashboardSnapshot, Principal, Role, View,
};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// 会话相关错误。
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,
    #[error("{0}")]
    TransitionDenied(String),
    #[error("internal session error: {0}")]
    Internal(String),
}

impl SessionError {
    fn denied(message: impl Into<String>) -> Self {
        Self::TransitionDenied(message.into())
    }

    fn lock_failed() -> Self {
        Self::Internal("session lock poisoned".to_string())
    }
}

/// 单个登录会话的完整状态。
#[derive(Debug, Clone)]
pub struct SessionState {
    pub principal: Principal,
    pub view: View,
    pub selected_company: Option<CompanyIdentity>,
    pub selected_client: Option<ClientIdentity>,
    pub snapshot: Option<DashboardSnapshot>,
    pub refresh_generation: u64,
}

/// 角色对应的登录初始视图。
pub fn initial_view(role: Role) -> View {
    match role {
        Role::SuperAdmin => View::ManageCompanies,
        Role::CompanyAdmin => View::ManageClients,
        Role::ClientUser => View::Dashboard,
    }
}

/// 会话注册表：token → 会话状态。
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionState>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// 为已认证主体创建会话，返回 bearer token。
    ///
    /// 公司管理员隐式选中本公司；客户用户隐式选中自己并
    /// 直接落在仪表盘视图。
    pub fn create(&self, principal: Principal) -> Result<(String, SessionState), SessionError> {
        let view = initial_view(principal.role());
        let selected_company = match &principal {
            Principal::CompanyAdmin(identity) => Some(identity.clone()),
            _ => None,
        };
        let selected_client = match &principal {
            Principal::ClientUser(identity) => Some(identity.clone()),
            _ => None,
        };
        let state = SessionState {
            principal,
            view,
            selected_company,
            selected_client,
            snapshot: None,
            refresh_generation: 0,
        };
        let token = uuid::Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().map_err(|_| SessionError::lock_failed())?;
        sessions.insert(token.clone(), state.clone());
        debug!(role = state.principal.role().as_str(), "session created");
        Ok((token, state))
    }

    /// 当前会话状态。
    pub fn current(&self, token: &str) -> Result<SessionState, SessionError> {
        let sessions = self.sessions.read().map_err(|_| SessionError::lock_failed())?;
        sessions.get(token).cloned().ok_or(SessionError::NotFound)
    }

    /// 登出：整体移除会话。
    pub fn remove(&self, token: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::lock_failed())?;
        sessions.remove(token).map(|_| ()).ok_or(SessionError::NotFound)
    }

    fn with_session<T>(
        &self,
        token: &str,
        f: impl FnOnce(&mut SessionState) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::lock_failed())?;
        let state = sessions.get_mut(token).ok_or(SessionError::NotFound)?;
        f(state)
    }

    /// 显式视图切换；被拒绝时视图保持不变。
    pub fn enter_view(&self, token: &str, view: View) -> Result<SessionState, SessionError> {
        self.with_session(token, |state| {
            let role = state.principal.role();
            match view {
                View::ManageCompanies => {
                    if role != Role::SuperAdmin {
                        return Err(SessionError::denied(
                            "company management requires the super admin role",
                        ));
                    }
                }
                View::ManageClients => match role {
                    Role::SuperAdmin => {
                        if state.selected_company.is_none() {
                            return Err(SessionError::denied(
                                "select a managing company before entering client management",
                            ));
                        }
                    }
                    Role::CompanyAdmin => {}
                    Role::ClientUser => {
                        return Err(SessionError::denied(
                            "client management requires an admin role",
                        ));
                    }
                },
                View::ClientDetails => {
                    if role == Role::ClientUser {
                        return Err(SessionError::denied(
                            "client details require an admin role",
                        ));
                    }
                    if state.selected_client.is_none() {
                        return Err(SessionError::denied(
                            "select a client before entering client details",
                        ));
                    }
                }
                View::Dashboard | View::Reports => {
                    if state.selected_client.is_none() {
                        return Err(SessionError::denied(
                            "select a client before entering the dashboard",
                        ));
                    }
                }
            }
            state.view = view;
            Ok(state.clone())
        })
    }

    /// 选择管理公司（仅超级管理员）。
    ///
    /// 清空已选客户与仪表盘快照，跳转客户管理视图。
    pub fn select_company(
        &self,
        token: &str,
        company: CompanyIdentity,
    ) -> Result<SessionState, SessionError> {
        self.with_session(token, |state| {
            if state.principal.role() != Role::SuperAdmin {
                return Err(SessionError::denied(
                    "company selection requires the super admin role",
                ));
            }
            state.selected_company = Some(company);
            state.selected_client = None;
            state.snapshot = None;
            state.view = View::ManageClients;
            Ok(state.clone())
        })
    }

    /// 选择客户：置位、递增刷新代数、跳转仪表盘。
    ///
    /// 返回新代数，调用方随后以该代数发起仪表盘刷新。
    /// 客户必须属于当前选中的公司，超级管理员未选公司时直接拒绝。
    pub fn select_client(
        &self,
        token: &str,
        client: ClientIdentity,
    ) -> Result<(SessionState, u64), SessionError> {
        self.with_session(token, |state| {
            if state.principal.role() == Role::ClientUser {
                return Err(SessionError::denied(
                    "client selection requires an admin role",
                ));
            }
            let company = state.selected_company.as_ref().ok_or_else(|| {
                SessionError::denied("select a managing company before selecting a client")
            })?;
            if company.company_id != client.managing_company_id {
                return Err(SessionError::denied(
                    "client is not managed by the selected company",
                ));
            }
            state.selected_client = Some(client);
            state.snapshot = None;
            state.refresh_generation += 1;
            state.view = View::Dashboard;
            let generation = state.refresh_generation;
            Ok((state.clone(), generation))
        })
    }

    /// 发起一次仪表盘刷新：递增代数并返回（代数，选中客户）。
    pub fn start_refresh(&self, token: &str) -> Result<(u64, ClientIdentity), SessionError> {
        self.with_session(token, |state| {
            let client = state
                .selected_client
                .clone()
                .ok_or_else(|| SessionError::denied("select a client before refreshing"))?;
            state.refresh_generation += 1;
            Ok((state.refresh_generation, client))
        })
    }

    /// 应用刷新结果；代数落后的快照被丢弃，返回是否生效。
    pub fn apply_snapshot(
        &self,
        token: &str,
        generation: u64,
        snapshot: DashboardSnapshot,
    ) -> Result<bool, SessionError> {
        self.with_session(token, |state| {
            if generation < state.refresh_generation {
                debug!(
                    generation,
                    current = state.refresh_generation,
                    "stale dashboard snapshot discarded"
                );
                return Ok(false);
            }
            state.snapshot = Some(snapshot);
            Ok(true)
        })
    }

    /// 当前快照（若有）。
    pub fn snapshot(&self, token: &str) -> Result<Option<DashboardSnapshot>, SessionError> {
        Ok(self.current(token)?.snapshot)
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
