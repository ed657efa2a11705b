//! 水箱实时读数内存实现

use crate::error::StorageError;
use crate::traits::TankReadingStore;
use crate::validation::ensure_client_scope;
use domain::{AccessContext, TankReading};
use std::collections::HashMap;
use std::sync::RwLock;

/// 无记录客户首次读取时的默认液位。
const DEFAULT_LEVEL_PERCENT: f64 = 60.0;

/// 水箱实时读数内存存储。
///
/// 读取路径会应用调用方给出的漂移量并回写，
/// 模拟传感器在两次观测之间的缓慢变化。
pub struct InMemoryTankReadingStore {
    readings: RwLock<HashMap<String, TankReading>>,
}

impl InMemoryTankReadingStore {
    pub fn new() -> Self {
        Self {
            readings: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.readings.read().map(|map| map.len()).unwrap_or(0)
    }
}

impl Default for InMemoryTankReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TankReadingStore for InMemoryTankReadingStore {
    async fn put_tank_reading(
        &self,
        ctx: &AccessContext,
        reading: TankReading,
    ) -> Result<(), StorageError> {
        ensure_client_scope(ctx, &reading.client_id)?;
        let mut map = self
            .readings
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        map.insert(reading.client_id.clone(), reading);
        Ok(())
    }

    async fn tank_reading(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        drift: f64,
        now_ms: i64,
    ) -> Result<TankReading, StorageError> {
        ensure_client_scope(ctx, client_id)?;
        let mut map = self
            .readings
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        let reading = map
            .entry(client_id.to_string())
            .or_insert_with(|| TankReading {
                client_id: client_id.to_string(),
                level_percent: DEFAULT_LEVEL_PERCENT,
                updated_at_ms: now_ms,
            });
        reading.level_percent = (reading.level_percent + drift).clamp(0.0, 100.0);
        reading.updated_at_ms = now_ms;
        Ok(reading.clone())
    }
}
