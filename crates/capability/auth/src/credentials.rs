//! 演示环境的内置凭据表
//!
//! 三张互不相通的凭据表：超级管理员单例、按管理员邮箱匹配的
//! 公司口令、全体客户共用的通用口令。仅用于演示，不落盘。

use domain::SuperAdminIdentity;

/// 超级管理员登录邮箱。
pub const SUPER_ADMIN_EMAIL: &str = "superadmin@gmail.com";
const SUPER_ADMIN_PASSWORD: &str = "123456";

/// 客户（小区）登录的通用口令。
const CLIENT_SHARED_PASSWORD: &str = "123456";

/// 公司管理员邮箱 → 口令。
const COMPANY_PASSWORDS: &[(&str, &str)] = &[
    ("gestao01@gmail.com", "123456"),
    ("admincomp2@example.com", "comp2pass"),
    ("joaovictor.priv@gmail.com", "123456"),
];

/// 超级管理员单例身份。
pub fn super_admin() -> SuperAdminIdentity {
    SuperAdminIdentity {
        admin_id: "super-001".to_string(),
        name: "Super Administrador Global".to_string(),
        email: SUPER_ADMIN_EMAIL.to_string(),
    }
}

pub fn super_admin_password() -> &'static str {
    SUPER_ADMIN_PASSWORD
}

/// 公司管理员邮箱对应的口令。
pub fn company_password(admin_email: &str) -> Option<&'static str> {
    COMPANY_PASSWORDS
        .iter()
        .find(|(email, _)| *email == admin_email)
        .map(|(_, password)| *password)
}

pub fn client_password() -> &'static str {
    CLIENT_SHARED_PASSWORD
}
