//! 报表服务集成测试（内存存储）

use aqua_reporting::{FinancialPeriod, ReportingService, SeriesKind, SeriesRange};
use aqua_storage::{
    ConsumptionStore, InMemoryClientStore, InMemoryConsumptionStore, InMemoryPressureStore,
    InMemoryPumpEnergyStore, InMemoryTankLevelStore, TankLevelStore,
};
use chrono::Utc;
use domain::{AccessContext, ConsumptionRecord, TankKind, TankLevelRecord};
use std::sync::Arc;

fn service() -> (
    ReportingService,
    Arc<InMemoryConsumptionStore>,
    Arc<InMemoryTankLevelStore>,
) {
    let consumption = Arc::new(InMemoryConsumptionStore::new());
    let tank_levels = Arc::new(InMemoryTankLevelStore::new());
    let service = ReportingService::new(
        Arc::new(InMemoryClientStore::new()),
        consumption.clone(),
        tank_levels.clone(),
        Arc::new(InMemoryPressureStore::new()),
        Arc::new(InMemoryPumpEnergyStore::new()),
    );
    (service, consumption, tank_levels)
}

#[tokio::test]
async fn unknown_client_yields_empty_and_zero_results() {
    let ctx = AccessContext::service();
    let (service, _, _) = service();

    let trend = service.monthly_trend(&ctx, "client-404").await.unwrap();
    assert!(trend.is_empty());

    let breakdown = service.unit_breakdown(&ctx, "client-404").await.unwrap();
    assert!(breakdown.is_empty());

    let metrics = service.overall_metrics(&ctx, "client-404").await.unwrap();
    assert_eq!(metrics.total_current_month, 0.0);
    assert_eq!(metrics.active_units, 0);

    let series = service
        .series_history(
            &ctx,
            "client-404",
            SeriesKind::TankLevel(TankKind::Upper),
            SeriesRange::default(),
        )
        .await
        .unwrap();
    assert!(series.is_empty());

    // 窗口仍然补满零月份
    let summary = service
        .financial_summary(&ctx, "client-404", FinancialPeriod::Last3Months)
        .await
        .unwrap();
    assert_eq!(summary.len(), 3);
}

#[tokio::test]
async fn trend_reflects_seeded_consumption() {
    let ctx = AccessContext::service();
    let (service, consumption, _) = service();

    let today = Utc::now().date_naive();
    consumption
        .append_consumption(
            &ctx,
            vec![ConsumptionRecord {
                record_id: "r-1".to_string(),
                client_id: "client-1".to_string(),
                unit_id: Some("Apto 101".to_string()),
                day: today,
                volume_m3: 1.25,
                cost: 7.19,
            }],
        )
        .await
        .unwrap();

    let trend = service.monthly_trend(&ctx, "client-1").await.unwrap();
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0].value, 1.25);
    assert_eq!(trend[0].label, today.format("%d/%m").to_string());
}

#[tokio::test]
async fn series_range_filters_before_truncation() {
    let ctx = AccessContext::service();
    let (service, _, tank_levels) = service();

    let records: Vec<TankLevelRecord> = (0..10)
        .map(|i| TankLevelRecord {
            record_id: format!("t-{i}"),
            client_id: "client-1".to_string(),
            kind: TankKind::Upper,
            ts_ms: i * 1_000,
            level_percent: i as f64,
        })
        .collect();
    tank_levels.append_tank_levels(&ctx, records).await.unwrap();

    let series = service
        .series_history(
            &ctx,
            "client-1",
            SeriesKind::TankLevel(TankKind::Upper),
            SeriesRange {
                from_ms: Some(3_000),
                to_ms: Some(7_000),
                max_points: Some(3),
            },
        )
        .await
        .unwrap();
    // 范围过滤出 3..=7，再保留最后 3 点
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].value, 5.0);
    assert_eq!(series[2].value, 7.0);
}

#[tokio::test]
async fn series_kind_parsing_matches_wire_names() {
    assert!(SeriesKind::parse("tankUpper").is_some());
    assert!(SeriesKind::parse("tankLower").is_some());
    assert!(SeriesKind::parse("pressureNetwork").is_some());
    assert!(SeriesKind::parse("pressureInternal").is_some());
    assert!(SeriesKind::parse("energyKwh").is_some());
    assert!(SeriesKind::parse("energyCost").is_some());
    assert!(SeriesKind::parse("tank_upper").is_none());

    assert_eq!(FinancialPeriod::from_months(6), Some(FinancialPeriod::Last6Months));
    assert!(FinancialPeriod::from_months(5).is_none());
}
