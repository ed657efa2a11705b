//! 水箱位置内存实现

use crate::error::StorageError;
use crate::traits::TankLocationStore;
use crate::validation::ensure_client_scope;
use domain::{AccessContext, TankLocation};
use std::collections::HashMap;
use std::sync::RwLock;

/// 无记录客户的默认安装位置。
const DEFAULT_LATITUDE: f64 = -23.550;
const DEFAULT_LONGITUDE: f64 = -46.633;
const DEFAULT_ADDRESS: &str = "Default location";

/// 水箱位置内存存储。
pub struct InMemoryTankLocationStore {
    locations: RwLock<HashMap<String, TankLocation>>,
}

impl InMemoryTankLocationStore {
    pub fn new() -> Self {
        Self {
            locations: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.locations.read().map(|map| map.len()).unwrap_or(0)
    }
}

impl Default for InMemoryTankLocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TankLocationStore for InMemoryTankLocationStore {
    async fn put_tank_location(
        &self,
        ctx: &AccessContext,
        location: TankLocation,
    ) -> Result<(), StorageError> {
        ensure_client_scope(ctx, &location.client_id)?;
        let mut map = self
            .locations
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        map.insert(location.client_id.clone(), location);
        Ok(())
    }

    async fn tank_location(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<TankLocation, StorageError> {
        ensure_client_scope(ctx, client_id)?;
        let mut map = self
            .locations
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        let location = map
            .entry(client_id.to_string())
            .or_insert_with(|| TankLocation {
                client_id: client_id.to_string(),
                latitude: DEFAULT_LATITUDE,
                longitude: DEFAULT_LONGITUDE,
                address: DEFAULT_ADDRESS.to_string(),
            });
        Ok(location.clone())
    }
}
