use chrono::NaiveDate;

/// 水表日读数（按日历日、按单元）。
///
/// `cost` 在生成时按当时的 `price_per_m3` 派生，此后不随价格变化重算。
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionRecord {
    pub record_id: String,
    pub client_id: String,
    pub unit_id: Option<String>,
    pub day: NaiveDate,
    pub volume_m3: f64,
    pub cost: f64,
}

/// 水箱类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankKind {
    Upper,
    Lower,
}

impl TankKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TankKind::Upper => "upper",
            TankKind::Lower => "lower",
        }
    }
}

/// 水箱液位时序记录（随机游走生成，生成后不可变）。
#[derive(Debug, Clone, PartialEq)]
pub struct TankLevelRecord {
    pub record_id: String,
    pub client_id: String,
    pub kind: TankKind,
    pub ts_ms: i64,
    /// 液位百分比，[0, 100]。
    pub level_percent: f64,
}

/// 管网压力序列类型：市政供水管网 / 内部管网。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureKind {
    Network,
    Internal,
}

impl PressureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressureKind::Network => "network",
            PressureKind::Internal => "internal",
        }
    }
}

/// 管网压力时序记录。
#[derive(Debug, Clone, PartialEq)]
pub struct PressureRecord {
    pub record_id: String,
    pub client_id: String,
    pub kind: PressureKind,
    pub ts_ms: i64,
    pub pressure_psi: f64,
}

/// 泵能耗时序记录。
///
/// `cost` 在生成时按当时的 `price_per_kwh` 派生，与水表读数相同的不可变规则。
#[derive(Debug, Clone, PartialEq)]
pub struct PumpEnergyRecord {
    pub record_id: String,
    pub client_id: String,
    pub ts_ms: i64,
    pub energy_kwh: f64,
    pub cost: f64,
}

/// 泵能耗序列的取值维度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyMetric {
    Kwh,
    Cost,
}

/// 泵当前状态。
#[derive(Debug, Clone, PartialEq)]
pub struct PumpStatus {
    pub client_id: String,
    pub pressure_psi: f64,
    pub is_active: bool,
    pub changed_at_ms: i64,
}

/// 水箱当前读数。
#[derive(Debug, Clone, PartialEq)]
pub struct TankReading {
    pub client_id: String,
    pub level_percent: f64,
    pub updated_at_ms: i64,
}

/// 水箱安装位置。
#[derive(Debug, Clone, PartialEq)]
pub struct TankLocation {
    pub client_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

/// 图表序列点（横轴标签 + 数值）。
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// 分户用量汇总项。
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTotal {
    pub unit_id: String,
    pub total_m3: f64,
}

/// 月度汇总指标。
///
/// 数值在聚合边界按约定精度舍入：体积/金额两位小数，百分比一位小数。
#[derive(Debug, Clone, PartialEq)]
pub struct OverallMetrics {
    pub total_current_month: f64,
    pub total_previous_month: f64,
    pub average_daily_current_month: f64,
    pub active_units: u32,
    pub percent_change: f64,
    pub estimated_water_bill: f64,
    pub estimated_pump_energy_cost: f64,
}

impl OverallMetrics {
    /// 无数据客户的全零指标。
    pub fn zero() -> Self {
        Self {
            total_current_month: 0.0,
            total_previous_month: 0.0,
            average_daily_current_month: 0.0,
            active_units: 0,
            percent_change: 0.0,
            estimated_water_bill: 0.0,
            estimated_pump_energy_cost: 0.0,
        }
    }
}

/// 环境遥测点（温度/湿度，字段可缺失）。
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentPoint {
    pub label: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ts_ms: i64,
}

/// 仪表盘快照：一次刷新产生的全部展示数据。
///
/// `environment_error` 承载尽力而为外部数据的局部失败，
/// 不影响核心数据的完整性。
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub metrics: OverallMetrics,
    pub trend: Vec<SeriesPoint>,
    pub unit_breakdown: Vec<UnitTotal>,
    pub pump: PumpStatus,
    pub tank: TankReading,
    pub location: TankLocation,
    pub environment: Vec<EnvironmentPoint>,
    pub environment_error: Option<String>,
}
