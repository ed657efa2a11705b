//! 验证辅助函数
//!
//! 提供统一的验证逻辑，确保数据一致性：
//! - ensure_actor：验证访问上下文的行为人非空
//! - ensure_client_scope：验证客户作用域（客户用户只能读自己的数据）
//!
//! 使用场景：
//! - 所有数据访问前验证访问上下文
//! - 时序/实时数据读取前验证客户作用域

use crate::error::StorageError;
use domain::AccessContext;

/// 验证行为人 ID 非空
///
/// 确保所有数据访问都有有效的访问上下文。
pub fn ensure_actor(ctx: &AccessContext) -> Result<(), StorageError> {
    if ctx.actor_id.is_empty() {
        return Err(StorageError::scope("actor_id required"));
    }
    Ok(())
}

/// 验证客户作用域
///
/// 携带客户作用域的上下文（客户用户）只能访问自己的客户数据。
/// 公司作用域的归属校验在客户注册表查询处完成。
pub fn ensure_client_scope(ctx: &AccessContext, client_id: &str) -> Result<(), StorageError> {
    ensure_actor(ctx)?;
    if let Some(scope) = ctx.client_scope.as_deref() {
        if scope != client_id {
            return Err(StorageError::scope("client scope mismatch"));
        }
    }
    Ok(())
}
