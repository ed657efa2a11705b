//! # Aqua Dashboard 模块
//!
//! 仪表盘刷新编排：六路核心数据并发取数（指标、趋势、分户排行、
//! 泵状态、水箱读数、位置），环境遥测尽力而为；外部 feed 的失败
//! 被捕获为快照内的局部错误信息，从不影响核心数据的完整性。
//!
//! 泵开关与水箱读数的随机量（切换后的压力、读取漂移）在本层
//! 生成后传入存储，存储实现保持确定性。

use aqua_external::EnvironmentFeed;
use aqua_reporting::ReportingService;
use aqua_storage::{PumpStatusStore, StorageError, TankLocationStore, TankReadingStore};
use chrono::Utc;
use domain::{AccessContext, DashboardSnapshot, EnvironmentPoint, PumpStatus};
use rand::Rng as _;
use std::sync::Arc;
use tracing::{debug, warn};

/// 仪表盘服务。
pub struct DashboardService {
    reporting: Arc<ReportingService>,
    pump_status: Arc<dyn PumpStatusStore>,
    tank_readings: Arc<dyn TankReadingStore>,
    tank_locations: Arc<dyn TankLocationStore>,
    environment: Arc<dyn EnvironmentFeed>,
}

impl DashboardService {
    pub fn new(
        reporting: Arc<ReportingService>,
        pump_status: Arc<dyn PumpStatusStore>,
        tank_readings: Arc<dyn TankReadingStore>,
        tank_locations: Arc<dyn TankLocationStore>,
        environment: Arc<dyn EnvironmentFeed>,
    ) -> Self {
        Self {
            reporting,
            pump_status,
            tank_readings,
            tank_locations,
            environment,
        }
    }

    /// 执行一次完整刷新，产出快照。
    ///
    /// 核心六路并发取数，全部成功才返回；环境遥测的失败
    /// 被捕获为 `environment_error`。
    pub async fn refresh(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<DashboardSnapshot, StorageError> {
        let now_ms = Utc::now().timestamp_millis();
        // 读取即漂移的观测行为：每次刷新液位小幅变化
        let drift = rand::thread_rng().gen_range(-1.0..1.0);

        let (metrics, trend, unit_breakdown, pump, tank, location, environment) = tokio::join!(
            self.reporting.overall_metrics(ctx, client_id),
            self.reporting.monthly_trend(ctx, client_id),
            self.reporting.unit_breakdown(ctx, client_id),
            self.pump_status.pump_status(ctx, client_id, now_ms),
            self.tank_readings.tank_reading(ctx, client_id, drift, now_ms),
            self.tank_locations.tank_location(ctx, client_id),
            self.fetch_environment(),
        );
        let (environment, environment_error) = environment;

        let snapshot = DashboardSnapshot {
            metrics: metrics?,
            trend: trend?,
            unit_breakdown: unit_breakdown?,
            pump: pump?,
            tank: tank?,
            location: location?,
            environment,
            environment_error,
        };
        debug!(client_id, "dashboard snapshot assembled");
        Ok(snapshot)
    }

    /// 尽力而为的环境遥测：失败降级为局部错误信息。
    async fn fetch_environment(&self) -> (Vec<EnvironmentPoint>, Option<String>) {
        match self.environment.temperature_humidity().await {
            Ok(points) => (points, None),
            Err(err) => {
                warn!(error = %err, "environment feed unavailable");
                (Vec::new(), Some(err.to_string()))
            }
        }
    }

    /// 切换泵开关。
    ///
    /// 压力随新状态重新取值：开泵落在工作压力区间，
    /// 关泵落在静置区间。客户无泵记录时返回 NotFound。
    pub async fn toggle_pump(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        active: bool,
    ) -> Result<PumpStatus, StorageError> {
        let now_ms = Utc::now().timestamp_millis();
        let pressure_psi = if active {
            rand::thread_rng().gen_range(40..55) as f64
        } else {
            rand::thread_rng().gen_range(5..15) as f64
        };
        self.pump_status
            .set_pump_active(ctx, client_id, active, pressure_psi, now_ms)
            .await
    }
}
