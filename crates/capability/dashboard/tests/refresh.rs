//! 仪表盘刷新编排集成测试

use aqua_dashboard::DashboardService;
use aqua_external::{EnvironmentFeed, ExternalError};
use aqua_reporting::ReportingService;
use aqua_storage::{
    ConsumptionStore, InMemoryClientStore, InMemoryConsumptionStore, InMemoryPressureStore,
    InMemoryPumpEnergyStore, InMemoryPumpStatusStore, InMemoryTankLevelStore,
    InMemoryTankLocationStore, InMemoryTankReadingStore, PumpStatusStore, StorageError,
};
use async_trait::async_trait;
use chrono::Utc;
use domain::{AccessContext, ConsumptionRecord, EnvironmentPoint, PumpStatus};
use std::sync::Arc;

struct StaticFeed(Vec<EnvironmentPoint>);

#[async_trait]
impl EnvironmentFeed for StaticFeed {
    async fn temperature_humidity(&self) -> Result<Vec<EnvironmentPoint>, ExternalError> {
        Ok(self.0.clone())
    }
}

struct FailingFeed;

#[async_trait]
impl EnvironmentFeed for FailingFeed {
    async fn temperature_humidity(&self) -> Result<Vec<EnvironmentPoint>, ExternalError> {
        Err(ExternalError::Status {
            status: 503,
            body: "channel offline".to_string(),
        })
    }
}

struct Fixture {
    service: DashboardService,
    consumption: Arc<InMemoryConsumptionStore>,
    pump_status: Arc<InMemoryPumpStatusStore>,
}

fn fixture(feed: Arc<dyn EnvironmentFeed>) -> Fixture {
    let consumption = Arc::new(InMemoryConsumptionStore::new());
    let pump_status = Arc::new(InMemoryPumpStatusStore::new());
    let reporting = Arc::new(ReportingService::new(
        Arc::new(InMemoryClientStore::new()),
        consumption.clone(),
        Arc::new(InMemoryTankLevelStore::new()),
        Arc::new(InMemoryPressureStore::new()),
        Arc::new(InMemoryPumpEnergyStore::new()),
    ));
    let service = DashboardService::new(
        reporting,
        pump_status.clone(),
        Arc::new(InMemoryTankReadingStore::new()),
        Arc::new(InMemoryTankLocationStore::new()),
        feed,
    );
    Fixture {
        service,
        consumption,
        pump_status,
    }
}

#[tokio::test]
async fn refresh_assembles_core_data_and_environment() {
    let ctx = AccessContext::service();
    let fixture = fixture(Arc::new(StaticFeed(vec![EnvironmentPoint {
        label: "12:00".to_string(),
        temperature: Some(24.5),
        humidity: Some(60.0),
        ts_ms: 1_000,
    }])));

    let today = Utc::now().date_naive();
    fixture
        .consumption
        .append_consumption(
            &ctx,
            vec![ConsumptionRecord {
                record_id: "r-1".to_string(),
                client_id: "condo-789".to_string(),
                unit_id: Some("Apto 101".to_string()),
                day: today,
                volume_m3: 2.0,
                cost: 11.5,
            }],
        )
        .await
        .unwrap();

    let snapshot = fixture.service.refresh(&ctx, "condo-789").await.unwrap();

    assert_eq!(snapshot.metrics.total_current_month, 2.0);
    assert_eq!(snapshot.trend.len(), 1);
    assert_eq!(snapshot.unit_breakdown.len(), 1);
    assert_eq!(snapshot.environment.len(), 1);
    assert!(snapshot.environment_error.is_none());
    // 懒加载默认值在首次刷新即出现
    assert!(!snapshot.pump.is_active);
    assert!((0.0..=100.0).contains(&snapshot.tank.level_percent));
    assert!(!snapshot.location.address.is_empty());
}

#[tokio::test]
async fn environment_failure_never_fails_the_refresh() {
    let ctx = AccessContext::service();
    let fixture = fixture(Arc::new(FailingFeed));

    let snapshot = fixture.service.refresh(&ctx, "condo-404").await.unwrap();

    assert!(snapshot.environment.is_empty());
    let message = snapshot.environment_error.unwrap();
    assert!(message.contains("503"));
    // 未知客户的核心数据为空/零，但刷新本身成功
    assert_eq!(snapshot.metrics.total_current_month, 0.0);
    assert!(snapshot.trend.is_empty());
}

#[tokio::test]
async fn pump_toggle_draws_pressure_from_state_band() {
    let ctx = AccessContext::service();
    let fixture = fixture(Arc::new(FailingFeed));

    // 无泵记录时切换报错
    let err = fixture
        .service
        .toggle_pump(&ctx, "condo-789", true)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));

    fixture
        .pump_status
        .put_pump_status(
            &ctx,
            PumpStatus {
                client_id: "condo-789".to_string(),
                pressure_psi: 40.0,
                is_active: false,
                changed_at_ms: 0,
            },
        )
        .await
        .unwrap();

    let on = fixture
        .service
        .toggle_pump(&ctx, "condo-789", true)
        .await
        .unwrap();
    assert!(on.is_active);
    assert!((40.0..55.0).contains(&on.pressure_psi));

    let off = fixture
        .service
        .toggle_pump(&ctx, "condo-789", false)
        .await
        .unwrap();
    assert!(!off.is_active);
    assert!((5.0..15.0).contains(&off.pressure_psi));
}
