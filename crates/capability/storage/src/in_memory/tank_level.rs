//! 水箱液位时序内存实现

use crate::error::StorageError;
use crate::traits::TankLevelStore;
use crate::validation::ensure_client_scope;
use domain::{AccessContext, TankKind, TankLevelRecord};
use std::sync::RwLock;

/// 水箱液位时序内存存储。
pub struct InMemoryTankLevelStore {
    records: RwLock<Vec<TankLevelRecord>>,
}

impl InMemoryTankLevelStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }
}

impl Default for InMemoryTankLevelStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TankLevelStore for InMemoryTankLevelStore {
    async fn append_tank_levels(
        &self,
        ctx: &AccessContext,
        records: Vec<TankLevelRecord>,
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

    async fn tank_levels_for_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        kind: TankKind,
    ) -> Result<Vec<TankLevelRecord>, StorageError> {
        ensure_client_scope(ctx, client_id)?;
        let records = self
            .records
            .read()
            .map_err(|_| StorageError::lock_failed())?
            .iter()
            .filter(|record| record.client_id == client_id && record.kind == kind)
            .cloned()
            .collect();
        Ok(records)
    }
}
