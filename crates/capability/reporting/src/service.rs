//! 报表服务：从存储取记录、注入当前时钟、调用聚合纯函数

use crate::aggregate::{self, DEFAULT_MAX_POINTS};
use aqua_storage::{
    ClientStore, ConsumptionStore, PressureStore, PumpEnergyStore, StorageError, TankLevelStore,
};
use chrono::Utc;
use domain::{
    AccessContext, EnergyMetric, OverallMetrics, PressureKind, SeriesPoint, TankKind, UnitTotal,
};
use std::sync::Arc;
use tracing::debug;

/// 未注册客户的水费估算退化水价（R$/m³）。
const FALLBACK_PRICE_PER_M3: f64 = 5.75;

/// 历史序列类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    TankLevel(TankKind),
    Pressure(PressureKind),
    PumpEnergy(EnergyMetric),
}

impl SeriesKind {
    /// 解析线协议上的序列类型标识。
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "tankUpper" => Some(Self::TankLevel(TankKind::Upper)),
            "tankLower" => Some(Self::TankLevel(TankKind::Lower)),
            "pressureNetwork" => Some(Self::Pressure(PressureKind::Network)),
            "pressureInternal" => Some(Self::Pressure(PressureKind::Internal)),
            "energyKwh" => Some(Self::PumpEnergy(EnergyMetric::Kwh)),
            "energyCost" => Some(Self::PumpEnergy(EnergyMetric::Cost)),
            _ => None,
        }
    }
}

/// 财务汇总窗口。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinancialPeriod {
    Last3Months,
    Last6Months,
    Last12Months,
}

impl FinancialPeriod {
    pub fn months(&self) -> u32 {
        match self {
            Self::Last3Months => 3,
            Self::Last6Months => 6,
            Self::Last12Months => 12,
        }
    }

    pub fn from_months(months: u32) -> Option<Self> {
        match months {
            3 => Some(Self::Last3Months),
            6 => Some(Self::Last6Months),
            12 => Some(Self::Last12Months),
            _ => None,
        }
    }
}

/// 历史序列查询的范围与截断参数。
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesRange {
    pub from_ms: Option<i64>,
    pub to_ms: Option<i64>,
    pub max_points: Option<usize>,
}

/// 报表服务。
pub struct ReportingService {
    clients: Arc<dyn ClientStore>,
    consumption: Arc<dyn ConsumptionStore>,
    tank_levels: Arc<dyn TankLevelStore>,
    pressures: Arc<dyn PressureStore>,
    pump_energy: Arc<dyn PumpEnergyStore>,
}

impl ReportingService {
    pub fn new(
        clients: Arc<dyn ClientStore>,
        consumption: Arc<dyn ConsumptionStore>,
        tank_levels: Arc<dyn TankLevelStore>,
        pressures: Arc<dyn PressureStore>,
        pump_energy: Arc<dyn PumpEnergyStore>,
    ) -> Self {
        Self {
            clients,
            consumption,
            tank_levels,
            pressures,
            pump_energy,
        }
    }

    /// 近 30 天按日用量趋势。
    pub async fn monthly_trend(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<Vec<SeriesPoint>, StorageError> {
        let records = self.consumption.consumption_for_client(ctx, client_id).await?;
        Ok(aggregate::monthly_trend(&records, Utc::now().date_naive()))
    }

    /// 当前月分户用量排行。
    pub async fn unit_breakdown(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<Vec<UnitTotal>, StorageError> {
        let records = self.consumption.consumption_for_client(ctx, client_id).await?;
        Ok(aggregate::unit_breakdown(&records, Utc::now().date_naive()))
    }

    /// 七项月度汇总指标。
    pub async fn overall_metrics(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<OverallMetrics, StorageError> {
        let consumption = self.consumption.consumption_for_client(ctx, client_id).await?;
        let energy = self.pump_energy.pump_energy_for_client(ctx, client_id).await?;
        let price_per_m3 = self
            .clients
            .find_client(ctx, client_id)
            .await?
            .map(|client| client.price_per_m3)
            .unwrap_or(FALLBACK_PRICE_PER_M3);
        Ok(aggregate::overall_metrics(
            &consumption,
            &energy,
            price_per_m3,
            Utc::now().date_naive(),
        ))
    }

    /// 指定类型的历史序列（升序，保留最近 `max_points` 个点）。
    pub async fn series_history(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        kind: SeriesKind,
        range: SeriesRange,
    ) -> Result<Vec<SeriesPoint>, StorageError> {
        let mut points: Vec<(i64, f64)> = match kind {
            SeriesKind::TankLevel(tank) => self
                .tank_levels
                .tank_levels_for_client(ctx, client_id, tank)
                .await?
                .into_iter()
                .map(|record| (record.ts_ms, record.level_percent))
                .collect(),
            SeriesKind::Pressure(network) => self
                .pressures
                .pressures_for_client(ctx, client_id, network)
                .await?
                .into_iter()
                .map(|record| (record.ts_ms, record.pressure_psi))
                .collect(),
            SeriesKind::PumpEnergy(metric) => self
                .pump_energy
                .pump_energy_for_client(ctx, client_id)
                .await?
                .into_iter()
                .map(|record| {
                    let value = match metric {
                        EnergyMetric::Kwh => record.energy_kwh,
                        EnergyMetric::Cost => record.cost,
                    };
                    (record.ts_ms, value)
                })
                .collect(),
        };
        if let Some(from_ms) = range.from_ms {
            points.retain(|(ts_ms, _)| *ts_ms >= from_ms);
        }
        if let Some(to_ms) = range.to_ms {
            points.retain(|(ts_ms, _)| *ts_ms <= to_ms);
        }
        debug!(client_id, points = points.len(), "series history assembled");
        Ok(aggregate::series_history(
            points,
            range.max_points.unwrap_or(DEFAULT_MAX_POINTS),
        ))
    }

    /// 财务汇总：窗口内每月水费合计。
    pub async fn financial_summary(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        period: FinancialPeriod,
    ) -> Result<Vec<SeriesPoint>, StorageError> {
        let records = self.consumption.consumption_for_client(ctx, client_id).await?;
        Ok(aggregate::financial_summary(
            &records,
            period.months(),
            Utc::now().date_naive(),
        ))
    }
}
