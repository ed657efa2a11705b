//! 管网压力时序内存实现

use crate::error::StorageError;
use crate::traits::PressureStore;
use crate::validation::ensure_client_scope;
use domain::{AccessContext, PressureKind, PressureRecord};
use std::sync::RwLock;

/// 管网压力时序内存存储。
pub struct InMemoryPressureStore {
    records: RwLock<Vec<PressureRecord>>,
}

impl InMemoryPressureStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }
}

impl Default for InMemoryPressureStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PressureStore for InMemoryPressureStore {
    async fn append_pressures(
        &self,
        ctx: &AccessContext,
        records: Vec<PressureRecord>,
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

    async fn pressures_for_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        kind: PressureKind,
    ) -> Result<Vec<PressureRecord>, StorageError> {
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
