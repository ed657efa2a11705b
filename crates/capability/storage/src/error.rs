//! 存储层错误类型
//!
//! 定义统一的存储错误类型，区分四类失败：
//! - 用户输入校验失败（空名称、重复邮箱等，携带可读信息）
//! - 资源不存在（仅用于真正非法的操作，如切换无泵客户的泵）
//! - 作用域越权（公司/客户作用域不匹配）
//! - 内部错误（锁中毒等）

/// 存储层统一错误。
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("scope mismatch: {0}")]
    Scope(String),
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl StorageError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn scope(message: impl Into<String>) -> Self {
        Self::Scope(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// 锁中毒的统一映射。
    pub fn lock_failed() -> Self {
        Self::Internal("lock failed".to_string())
    }
}
