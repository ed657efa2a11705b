//! 泵实时状态内存实现

use crate::error::StorageError;
use crate::traits::PumpStatusStore;
use crate::validation::ensure_client_scope;
use domain::{AccessContext, PumpStatus};
use std::collections::HashMap;
use std::sync::RwLock;

/// 无记录客户首次读取时的默认压力。
const DEFAULT_PRESSURE_PSI: f64 = 40.0;

/// 泵实时状态内存存储。
pub struct InMemoryPumpStatusStore {
    statuses: RwLock<HashMap<String, PumpStatus>>,
}

impl InMemoryPumpStatusStore {
    pub fn new() -> Self {
        Self {
            statuses: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.statuses.read().map(|map| map.len()).unwrap_or(0)
    }
}

impl Default for InMemoryPumpStatusStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PumpStatusStore for InMemoryPumpStatusStore {
    async fn put_pump_status(
        &self,
        ctx: &AccessContext,
        status: PumpStatus,
    ) -> Result<(), StorageError> {
        ensure_client_scope(ctx, &status.client_id)?;
        let mut map = self
            .statuses
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        map.insert(status.client_id.clone(), status);
        Ok(())
    }

    async fn pump_status(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        now_ms: i64,
    ) -> Result<PumpStatus, StorageError> {
        ensure_client_scope(ctx, client_id)?;
        let mut map = self
            .statuses
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        let status = map
            .entry(client_id.to_string())
            .or_insert_with(|| PumpStatus {
                client_id: client_id.to_string(),
                pressure_psi: DEFAULT_PRESSURE_PSI,
                is_active: false,
                changed_at_ms: now_ms,
            });
        Ok(status.clone())
    }

    async fn set_pump_active(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        active: bool,
        pressure_psi: f64,
        now_ms: i64,
    ) -> Result<PumpStatus, StorageError> {
        ensure_client_scope(ctx, client_id)?;
        let mut map = self
            .statuses
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        let status = map
            .get_mut(client_id)
            .ok_or_else(|| StorageError::not_found("no pump record for this client"))?;
        status.is_active = active;
        status.pressure_psi = pressure_psi;
        status.changed_at_ms = now_ms;
        Ok(status.clone())
    }
}
