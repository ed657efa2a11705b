//! 泵能耗时序内存实现

use crate::error::StorageError;
use crate::traits::PumpEnergyStore;
use crate::validation::ensure_client_scope;
use domain::{AccessContext, PumpEnergyRecord};
use std::sync::RwLock;

/// 泵能耗时序内存存储。
pub struct InMemoryPumpEnergyStore {
    records: RwLock<Vec<PumpEnergyRecord>>,
}

impl InMemoryPumpEnergyStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }
}

impl Default for InMemoryPumpEnergyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PumpEnergyStore for InMemoryPumpEnergyStore {
    async fn append_pump_energy(
        &self,
        ctx: &AccessContext,
        records: Vec<PumpEnergyRecord>,
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

    async fn pump_energy_for_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<Vec<PumpEnergyRecord>, StorageError> {
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
