//! 客户注册表内存实现
//!
//! 功能：
//! - 按管理公司列出客户、查找、创建
//! - 更新时执行"顶层标量覆盖 + 嵌套子对象逐字段合并"契约
//! - 公司/客户作用域隔离：作用域外的记录按不存在处理

use crate::error::StorageError;
use crate::models::{ClientRecord, ClientUpdate};
use crate::traits::ClientStore;
use crate::validation::ensure_actor;
use domain::AccessContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// 客户注册表内存存储。
pub struct InMemoryClientStore {
    clients: RwLock<HashMap<String, ClientRecord>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// 以一组既有客户初始化（播种用）。
    pub fn with_clients(records: Vec<ClientRecord>) -> Self {
        let mut clients = HashMap::new();
        for record in records {
            clients.insert(record.client_id.clone(), record);
        }
        Self {
            clients: RwLock::new(clients),
        }
    }

    /// 当前客户数量（测试用）。
    pub fn len(&self) -> usize {
        self.clients.read().map(|map| map.len()).unwrap_or(0)
    }
}

impl Default for InMemoryClientStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 记录是否落在上下文的可见范围内。
fn in_scope(ctx: &AccessContext, record: &ClientRecord) -> bool {
    if let Some(scope) = ctx.client_scope.as_deref() {
        return scope == record.client_id;
    }
    if let Some(scope) = ctx.company_scope.as_deref() {
        return scope == record.managing_company_id;
    }
    true
}

#[async_trait::async_trait]
impl ClientStore for InMemoryClientStore {
    async fn list_clients_of_company(
        &self,
        ctx: &AccessContext,
        company_id: &str,
    ) -> Result<Vec<ClientRecord>, StorageError> {
        ensure_actor(ctx)?;
        if let Some(scope) = ctx.company_scope.as_deref() {
            if scope != company_id {
                return Err(StorageError::scope("company scope mismatch"));
            }
        }
        let mut clients: Vec<ClientRecord> = self
            .clients
            .read()
            .map_err(|_| StorageError::lock_failed())?
            .values()
            .filter(|record| record.managing_company_id == company_id)
            .cloned()
            .collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    async fn find_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<Option<ClientRecord>, StorageError> {
        ensure_actor(ctx)?;
        let client = self
            .clients
            .read()
            .map_err(|_| StorageError::lock_failed())?
            .get(client_id)
            .filter(|record| in_scope(ctx, record))
            .cloned();
        Ok(client)
    }

    async fn create_client(
        &self,
        ctx: &AccessContext,
        record: ClientRecord,
    ) -> Result<ClientRecord, StorageError> {
        ensure_actor(ctx)?;
        if record.name.trim().is_empty() {
            return Err(StorageError::validation("client name must not be empty"));
        }
        if let Some(scope) = ctx.company_scope.as_deref() {
            if scope != record.managing_company_id {
                return Err(StorageError::scope("company scope mismatch"));
            }
        }
        let mut map = self
            .clients
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        if map.contains_key(&record.client_id) {
            return Err(StorageError::validation("client already exists"));
        }
        map.insert(record.client_id.clone(), record.clone());
        Ok(record)
    }

    async fn update_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        update: ClientUpdate,
    ) -> Result<Option<ClientRecord>, StorageError> {
        ensure_actor(ctx)?;
        if let Some(name) = update.name.as_deref() {
            if name.trim().is_empty() {
                return Err(StorageError::validation("client name must not be empty"));
            }
        }
        let mut map = self
            .clients
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        let record = match map.get_mut(client_id) {
            Some(record) => record,
            None => return Ok(None),
        };
        if !in_scope(ctx, record) {
            return Ok(None);
        }
        record.apply(update);
        Ok(Some(record.clone()))
    }
}
