//! 认证能力：按角色登录并产出已认证主体。
//!
//! 三个角色走三张独立的凭据表；任何一步失败都归并为同一个
//! `invalid credentials` 错误，不向调用方泄露是账号不存在
//! 还是口令错误（反枚举契约）。

mod credentials;
mod password;

use aqua_storage::{ClientStore, CompanyStore};
use async_trait::async_trait;
use domain::{AccessContext, Principal, Role};
use std::sync::Arc;
use tracing::debug;

pub use credentials::{SUPER_ADMIN_EMAIL, super_admin};
pub use password::verify_password;

/// 认证相关错误。
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("internal error: {0}")]
    Internal(String),
}

/// 认证能力 trait，便于替换实现与测试。
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(
        &self,
        role: Role,
        identifier: &str,
        password: &str,
    ) -> Result<Principal, AuthError>;
}

/// 认证服务：凭据表 + 注册表查找。
pub struct AuthService {
    companies: Arc<dyn CompanyStore>,
    clients: Arc<dyn ClientStore>,
}

impl AuthService {
    pub fn new(companies: Arc<dyn CompanyStore>, clients: Arc<dyn ClientStore>) -> Self {
        Self { companies, clients }
    }

    /// 按角色校验凭据。
    ///
    /// - superAdmin：邮箱等于单例邮箱且口令匹配
    /// - companyAdmin：注册表按管理员邮箱查公司 + 该邮箱的口令
    /// - clientUser：注册表按客户 id 查客户 + 通用口令
    pub async fn login(
        &self,
        role: Role,
        identifier: &str,
        password: &str,
    ) -> Result<Principal, AuthError> {
        let ctx = AccessContext::service();
        let principal = match role {
            Role::SuperAdmin => {
                let identity = credentials::super_admin();
                if identifier != identity.email
                    || !verify_password(credentials::super_admin_password(), password)
                {
                    return Err(AuthError::InvalidCredentials);
                }
                Principal::SuperAdmin(identity)
            }
            Role::CompanyAdmin => {
                let company = self
                    .companies
                    .find_company_by_admin_email(&ctx, identifier)
                    .await
                    .map_err(|err| AuthError::Internal(err.to_string()))?
                    .ok_or(AuthError::InvalidCredentials)?;
                let expected = credentials::company_password(&company.admin_email)
                    .ok_or(AuthError::InvalidCredentials)?;
                if !verify_password(expected, password) {
                    return Err(AuthError::InvalidCredentials);
                }
                Principal::CompanyAdmin(company.identity())
            }
            Role::ClientUser => {
                let client = self
                    .clients
                    .find_client(&ctx, identifier)
                    .await
                    .map_err(|err| AuthError::Internal(err.to_string()))?
                    .ok_or(AuthError::InvalidCredentials)?;
                if !verify_password(credentials::client_password(), password) {
                    return Err(AuthError::InvalidCredentials);
                }
                Principal::ClientUser(client.identity())
            }
        };
        debug!(role = role.as_str(), actor = principal.actor_id(), "login verified");
        Ok(principal)
    }
}

#[async_trait]
impl Authenticator for AuthService {
    async fn login(
        &self,
        role: Role,
        identifier: &str,
        password: &str,
    ) -> Result<Principal, AuthError> {
        self.login(role, identifier, password).await
    }
}
