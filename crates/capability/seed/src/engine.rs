//! 播种引擎：启动时与新增客户时写入合成时序

use crate::generators::{
    self, PRESSURE_POINTS, PUMP_ENERGY_POINTS, SERIES_DAYS, TANK_LEVEL_POINTS,
};
use aqua_storage::{
    ClientRecord, ConsumptionStore, PressureStore, PumpEnergyStore, PumpStatusStore, StorageError,
    TankLevelStore, TankLocationStore, TankReadingStore,
};
use chrono::Utc;
use domain::{AccessContext, PressureKind, TankKind};
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::info;

/// 播种引擎：持有全部时序与实时读数存储的句柄。
///
/// `seed_client` 在新增客户的请求内同步调用，
/// 保证客户创建返回前其全部序列已经存在。
pub struct Seeder {
    pub consumption: Arc<dyn ConsumptionStore>,
    pub tank_levels: Arc<dyn TankLevelStore>,
    pub pressures: Arc<dyn PressureStore>,
    pub pump_energy: Arc<dyn PumpEnergyStore>,
    pub pump_status: Arc<dyn PumpStatusStore>,
    pub tank_readings: Arc<dyn TankReadingStore>,
    pub tank_locations: Arc<dyn TankLocationStore>,
    /// 水表日读数回溯天数（配置可覆盖）。
    pub consumption_days: u32,
}

impl Seeder {
    /// 为单个客户生成并写入全部时序与实时读数，返回写入的记录总数。
    pub async fn seed_client(
        &self,
        ctx: &AccessContext,
        client: &ClientRecord,
        index: usize,
    ) -> Result<usize, StorageError> {
        let mut rng = StdRng::from_entropy();
        let now = Utc::now();
        let now_ms = now.timestamp_millis();
        let today = now.date_naive();
        let client_id = client.client_id.as_str();

        let consumption = generators::consumption_series(
            &mut rng,
            client_id,
            self.consumption_days,
            client.price_per_m3,
            today,
        );
        let mut appended = self.consumption.append_consumption(ctx, consumption).await?;

        for kind in [TankKind::Upper, TankKind::Lower] {
            let records = generators::tank_level_series(
                &mut rng,
                client_id,
                kind,
                TANK_LEVEL_POINTS,
                SERIES_DAYS,
                now_ms,
            );
            appended += self.tank_levels.append_tank_levels(ctx, records).await?;
        }
        for kind in [PressureKind::Network, PressureKind::Internal] {
            let records = generators::pressure_series(
                &mut rng,
                client_id,
                kind,
                PRESSURE_POINTS,
                SERIES_DAYS,
                now_ms,
            );
            appended += self.pressures.append_pressures(ctx, records).await?;
        }
        let energy = generators::pump_energy_series(
            &mut rng,
            client_id,
            client.price_per_kwh,
            PUMP_ENERGY_POINTS,
            SERIES_DAYS,
            now_ms,
        );
        appended += self.pump_energy.append_pump_energy(ctx, energy).await?;

        self.pump_status
            .put_pump_status(ctx, generators::initial_pump_status(&mut rng, client_id, now_ms))
            .await?;
        self.tank_readings
            .put_tank_reading(
                ctx,
                generators::initial_tank_reading(&mut rng, client_id, now_ms),
            )
            .await?;
        self.tank_locations
            .put_tank_location(
                ctx,
                generators::initial_tank_location(&mut rng, client_id, &client.name, index),
            )
            .await?;

        info!(client_id, records = appended, "seeded client series");
        Ok(appended)
    }

    /// 为全部已注册客户播种（启动时调用一次），返回写入的记录总数。
    pub async fn seed_all(
        &self,
        ctx: &AccessContext,
        clients: &[ClientRecord],
    ) -> Result<usize, StorageError> {
        let mut total = 0;
        for (index, client) in clients.iter().enumerate() {
            total += self.seed_client(ctx, client, index).await?;
        }
        info!(clients = clients.len(), records = total, "startup seeding complete");
        Ok(total)
    }
}
