//! 播种引擎集成测试

use aqua_seed::{Seeder, demo_clients};
use aqua_storage::{
    ConsumptionStore, InMemoryConsumptionStore, InMemoryPressureStore, InMemoryPumpEnergyStore,
    InMemoryPumpStatusStore, InMemoryTankLevelStore, InMemoryTankLocationStore,
    InMemoryTankReadingStore, TankLevelStore,
};
use domain::{AccessContext, PressureKind, TankKind};
use std::sync::Arc;

fn seeder() -> (
    Seeder,
    Arc<InMemoryConsumptionStore>,
    Arc<InMemoryTankLevelStore>,
) {
    let consumption = Arc::new(InMemoryConsumptionStore::new());
    let tank_levels = Arc::new(InMemoryTankLevelStore::new());
    let seeder = Seeder {
        consumption: consumption.clone(),
        tank_levels: tank_levels.clone(),
        pressures: Arc::new(InMemoryPressureStore::new()),
        pump_energy: Arc::new(InMemoryPumpEnergyStore::new()),
        pump_status: Arc::new(InMemoryPumpStatusStore::new()),
        tank_readings: Arc::new(InMemoryTankReadingStore::new()),
        tank_locations: Arc::new(InMemoryTankLocationStore::new()),
        consumption_days: aqua_seed::generators::CONSUMPTION_DAYS,
    };
    (seeder, consumption, tank_levels)
}

#[tokio::test]
async fn seed_client_populates_every_series() {
    let ctx = AccessContext::service();
    let (seeder, consumption, tank_levels) = seeder();
    let client = demo_clients().into_iter().next().unwrap();

    let appended = seeder.seed_client(&ctx, &client, 0).await.unwrap();

    let records = consumption
        .consumption_for_client(&ctx, &client.client_id)
        .await
        .unwrap();
    assert!(!records.is_empty());
    // 60 天、每天 2~4 个单元
    assert!(records.len() >= 120 && records.len() <= 240);
    // 返回值计入全部时序：水表 + 两箱液位 + 两路压力 + 泵能耗
    assert_eq!(appended, records.len() + 720 * 2 + 288 * 2 + 720);

    let upper = seeder
        .tank_levels
        .tank_levels_for_client(&ctx, &client.client_id, TankKind::Upper)
        .await
        .unwrap();
    assert_eq!(upper.len(), 720);
    let lower = tank_levels
        .tank_levels_for_client(&ctx, &client.client_id, TankKind::Lower)
        .await
        .unwrap();
    assert_eq!(lower.len(), 720);

    let network = seeder
        .pressures
        .pressures_for_client(&ctx, &client.client_id, PressureKind::Network)
        .await
        .unwrap();
    assert_eq!(network.len(), 288);

    let energy = seeder
        .pump_energy
        .pump_energy_for_client(&ctx, &client.client_id)
        .await
        .unwrap();
    assert_eq!(energy.len(), 720);

    // 实时读数在播种后立即存在
    let status = seeder
        .pump_status
        .pump_status(&ctx, &client.client_id, 0)
        .await
        .unwrap();
    assert!(status.pressure_psi >= 30.0 && status.pressure_psi < 60.0);
}

#[tokio::test]
async fn seed_all_covers_every_demo_client() {
    let ctx = AccessContext::service();
    let (seeder, consumption, _) = seeder();
    let clients = demo_clients();

    seeder.seed_all(&ctx, &clients).await.unwrap();

    for client in &clients {
        let records = consumption
            .consumption_for_client(&ctx, &client.client_id)
            .await
            .unwrap();
        assert!(!records.is_empty(), "missing series for {}", client.client_id);
    }
}
