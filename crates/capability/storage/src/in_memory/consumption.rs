//! 水表日读数内存实现
//!
//! 只追加集合：播种与新增客户时批量写入，聚合层并发读取。

use crate::error::StorageError;
use crate::traits::ConsumptionStore;
use crate::validation::ensure_client_scope;
use domain::{AccessContext, ConsumptionRecord};
use std::sync::RwLock;

/// 水表日读数内存存储。
pub struct InMemoryConsumptionStore {
    records: RwLock<Vec<ConsumptionRecord>>,
}

impl InMemoryConsumptionStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// 当前读数数量（测试用）。
    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }
}

impl Default for InMemoryConsumptionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ConsumptionStore for InMemoryConsumptionStore {
    async fn append_consumption(
        &self,
        ctx: &AccessContext,
        records: Vec<ConsumptionRecord>,
    ) -> Result<usize, StorageError> {
        for record in &records {
            ensure_client_scope(ctx, &record.client_id)?;
        }
        let appended = records.len();
        let mut store = self
            .records
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        store.extend(records);
        Ok(appended)
    }

    async fn consumption_for_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<Vec<ConsumptionRecord>, StorageError> {
        ensure_client_scope(ctx, client_id)?;
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::lock_failed())?
            .iter()
            .filter(|record| record.client_id == client_id)
            .cloned()
            .collect();
        Ok(records)
    }
}
