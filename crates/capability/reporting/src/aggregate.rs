//! 聚合纯函数
//!
//! 所有函数接收记录切片与显式时钟（`today` / `now_ms`），
//! 不访问存储，测试可完全确定。约定：
//! - 未知客户（空切片）产生空集合或全零结果，从不报错
//! - 舍入只发生在函数边界：体积/金额两位小数，百分比/液位一位小数
//! - 中间累加保持全精度

use chrono::{DateTime, Datelike as _, Duration, NaiveDate, Utc};
use domain::{ConsumptionRecord, OverallMetrics, PumpEnergyRecord, SeriesPoint, UnitTotal};
use std::collections::HashMap;

/// 历史序列默认保留的点数上限。
pub const DEFAULT_MAX_POINTS: usize = 300;

/// 月度趋势的回看窗口（天）。
pub const TREND_WINDOW_DAYS: i64 = 30;

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `(year, month)` 日历月键，用于分组与窗口预填。
type MonthKey = (i32, u32);

fn month_key(date: NaiveDate) -> MonthKey {
    (date.year(), date.month())
}

/// 从 `(year, month)` 回退 `back` 个月。
fn months_back(key: MonthKey, back: u32) -> MonthKey {
    let total = key.0 * 12 + key.1 as i32 - 1 - back as i32;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

/// 日历月的天数。
fn days_in_month(key: MonthKey) -> u32 {
    let (year, month) = key;
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap_or_default();
    (first_of_next - first).num_days() as u32
}

fn date_of_ms(ts_ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(ts_ms).map(|ts| ts.date_naive())
}

/// 近 30 天的按日用量趋势，升序，标签 `dd/mm`。
pub fn monthly_trend(records: &[ConsumptionRecord], today: NaiveDate) -> Vec<SeriesPoint> {
    let cutoff = today - Duration::days(TREND_WINDOW_DAYS);
    let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for record in records {
        if record.day >= cutoff {
            *by_day.entry(record.day).or_insert(0.0) += record.volume_m3;
        }
    }
    let mut days: Vec<(NaiveDate, f64)> = by_day.into_iter().collect();
    days.sort_by_key(|(day, _)| *day);
    days.into_iter()
        .map(|(day, total)| SeriesPoint {
            label: day.format("%d/%m").to_string(),
            value: round2(total),
        })
        .collect()
}

/// 当前日历月的分户用量，按总量降序（排名契约）。
pub fn unit_breakdown(records: &[ConsumptionRecord], today: NaiveDate) -> Vec<UnitTotal> {
    let current = month_key(today);
    let mut by_unit: HashMap<&str, f64> = HashMap::new();
    for record in records {
        let Some(unit_id) = record.unit_id.as_deref() else {
            continue;
        };
        if month_key(record.day) == current {
            *by_unit.entry(unit_id).or_insert(0.0) += record.volume_m3;
        }
    }
    let mut totals: Vec<UnitTotal> = by_unit
        .into_iter()
        .map(|(unit_id, total)| UnitTotal {
            unit_id: unit_id.to_string(),
            total_m3: round2(total),
        })
        .collect();
    totals.sort_by(|a, b| {
        b.total_m3
            .partial_cmp(&a.total_m3)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.unit_id.cmp(&b.unit_id))
    });
    totals
}

/// 七项月度汇总指标。
///
/// - `average_daily` 的分母是本月有数据的自然日数量；
///   为零时退化为日历月天数（有数据则至少为 1，估算口径）
/// - 环比：上月 > 0 按公式；上月为零且本月 > 0 记 100；双零记 0
/// - 水费估算用客户当前水价；泵电费直接累加当月记录的不可变 `cost`
pub fn overall_metrics(
    consumption: &[ConsumptionRecord],
    pump_energy: &[PumpEnergyRecord],
    price_per_m3: f64,
    today: NaiveDate,
) -> OverallMetrics {
    let current = month_key(today);
    let previous = months_back(current, 1);

    let mut total_current = 0.0;
    let mut total_previous = 0.0;
    let mut days_with_data: std::collections::HashSet<NaiveDate> = std::collections::HashSet::new();
    let mut active_units: std::collections::HashSet<&str> = std::collections::HashSet::new();

    for record in consumption {
        let key = month_key(record.day);
        if key == current {
            total_current += record.volume_m3;
            days_with_data.insert(record.day);
            if let Some(unit_id) = record.unit_id.as_deref() {
                active_units.insert(unit_id);
            }
        } else if key == previous {
            total_previous += record.volume_m3;
        }
    }

    let effective_days = if days_with_data.is_empty() {
        days_in_month(current)
    } else {
        days_with_data.len() as u32
    };
    let average_daily = total_current / effective_days.max(1) as f64;

    let percent_change = if total_previous > 0.0 {
        (total_current - total_previous) / total_previous * 100.0
    } else if total_current > 0.0 {
        100.0
    } else {
        0.0
    };

    let energy_cost: f64 = pump_energy
        .iter()
        .filter(|record| date_of_ms(record.ts_ms).map(month_key) == Some(current))
        .map(|record| record.cost)
        .sum();

    OverallMetrics {
        total_current_month: round2(total_current),
        total_previous_month: round2(total_previous),
        average_daily_current_month: round2(average_daily),
        active_units: active_units.len() as u32,
        percent_change: round1(percent_change),
        estimated_water_bill: round2(total_current * price_per_m3),
        estimated_pump_energy_cost: round2(energy_cost),
    }
}

/// 时间戳序列 → 图表序列：先升序排序，再保留时序上最后的
/// `max_points` 个点（尾部截断，丢弃最旧的），标签 `dd/mm HH:MM`。
pub fn series_history(mut points: Vec<(i64, f64)>, max_points: usize) -> Vec<SeriesPoint> {
    points.sort_by_key(|(ts_ms, _)| *ts_ms);
    let start = points.len().saturating_sub(max_points);
    points[start..]
        .iter()
        .map(|(ts_ms, value)| SeriesPoint {
            label: DateTime::<Utc>::from_timestamp_millis(*ts_ms)
                .map(|ts| ts.format("%d/%m %H:%M").to_string())
                .unwrap_or_default(),
            value: *value,
        })
        .collect()
}

/// 财务汇总：回看 `months` 个日历月的水费合计，升序，
/// 窗口内每个月恰好一条，无数据的月份为 0，标签 `mm/yyyy`。
pub fn financial_summary(
    records: &[ConsumptionRecord],
    months: u32,
    today: NaiveDate,
) -> Vec<SeriesPoint> {
    let current = month_key(today);
    let mut by_month: HashMap<MonthKey, f64> = HashMap::new();
    for back in 0..months {
        by_month.insert(months_back(current, back), 0.0);
    }
    for record in records {
        if let Some(total) = by_month.get_mut(&month_key(record.day)) {
            *total += record.cost;
        }
    }
    let mut entries: Vec<(MonthKey, f64)> = by_month.into_iter().collect();
    entries.sort_by_key(|(key, _)| *key);
    entries
        .into_iter()
        .map(|((year, month), total)| SeriesPoint {
            label: format!("{month:02}/{year}"),
            value: round2(total),
        })
        .collect()
}
