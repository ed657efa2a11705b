//! 合成时序生成器
//!
//! 每个客户的全部时序都由随机游走生成：
//! - 水表日读数：以客户为单位的基准用量 + 每日扰动 + 周期项
//! - 水箱液位：720 点 / 30 天，上箱大波动补水、下箱小波动升降
//! - 管网压力：288 点 / 30 天，截断到 [10, 80] PSI
//! - 泵能耗：720 点 / 30 天，白天时段占空比更高
//!
//! `cost` 字段在生成时按当时单价派生，此后不再重算。
//! 生成器接收显式 `Rng`，测试用固定种子保证确定性。

use chrono::{NaiveDate, Timelike as _, Utc};
use domain::{
    ConsumptionRecord, PressureKind, PressureRecord, PumpEnergyRecord, PumpStatus, TankKind,
    TankLevelRecord, TankLocation, TankReading,
};
use rand::Rng;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// 默认的时序生成参数。
pub const CONSUMPTION_DAYS: u32 = 60;
pub const TANK_LEVEL_POINTS: usize = 720;
pub const PRESSURE_POINTS: usize = 288;
pub const PUMP_ENERGY_POINTS: usize = 720;
pub const SERIES_DAYS: i64 = 30;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 生成某客户的水表日读数：`num_days` 天、每天 2~4 个分户单元。
pub fn consumption_series(
    rng: &mut impl Rng,
    client_id: &str,
    num_days: u32,
    price_per_m3: f64,
    today: NaiveDate,
) -> Vec<ConsumptionRecord> {
    let mut records = Vec::new();
    let base = rng.gen_range(0.0..0.3) + 0.1;

    for offset in 0..num_days {
        let day = today - chrono::Duration::days(offset as i64);
        let units = 2 + rng.gen_range(0..3u32);
        for unit in 1..=units {
            let period = (7 + unit % 3) as f64;
            let wave = (offset as f64 / period + unit as f64).sin() * 0.05;
            let volume = round2(base + rng.gen_range(-0.1..0.1) + wave);
            records.push(ConsumptionRecord {
                record_id: format!("record-{day}-{client_id}-unit-{}", 100 + unit),
                client_id: client_id.to_string(),
                unit_id: Some(format!("Apto {}", 100 + unit)),
                day,
                volume_m3: volume,
                cost: round2(volume * price_per_m3),
            });
        }
    }
    records.sort_by_key(|record| record.day);
    records
}

/// 生成水箱液位随机游走序列。
///
/// 上箱大幅波动并在低位概率补水；下箱缓慢升降并在高/低位概率调整。
pub fn tank_level_series(
    rng: &mut impl Rng,
    client_id: &str,
    kind: TankKind,
    num_records: usize,
    days_to_cover: i64,
    now_ms: i64,
) -> Vec<TankLevelRecord> {
    let interval_ms = days_to_cover * DAY_MS / num_records as i64;
    let mut level: f64 = match kind {
        TankKind::Upper => 40.0 + rng.gen_range(0.0..30.0),
        TankKind::Lower => 60.0 + rng.gen_range(0.0..20.0),
    };
    let mut records = Vec::with_capacity(num_records);

    for i in 0..num_records {
        let ts_ms = now_ms - (num_records as i64 - 1 - i as i64) * interval_ms;
        match kind {
            TankKind::Upper => {
                level += rng.gen_range(-6.0..4.0);
                if level < 15.0 && rng.gen_bool(0.2) {
                    level += 30.0 + rng.gen_range(0.0..20.0);
                }
            }
            TankKind::Lower => {
                level += rng.gen_range(-3.0..3.0);
                if level > 85.0 && rng.gen_bool(0.1) {
                    level -= 20.0 + rng.gen_range(0.0..10.0);
                }
                if level < 30.0 && rng.gen_bool(0.15) {
                    level += 25.0 + rng.gen_range(0.0..15.0);
                }
            }
        }
        level = level.clamp(0.0, 100.0);
        records.push(TankLevelRecord {
            record_id: format!("tlr-{client_id}-{}-{i}", kind.as_str()),
            client_id: client_id.to_string(),
            kind,
            ts_ms,
            level_percent: round1(level),
        });
    }
    records
}

/// 生成管网压力随机游走序列，截断到 [10, 80] PSI。
pub fn pressure_series(
    rng: &mut impl Rng,
    client_id: &str,
    kind: PressureKind,
    num_records: usize,
    days_to_cover: i64,
    now_ms: i64,
) -> Vec<PressureRecord> {
    let interval_ms = days_to_cover * DAY_MS / num_records as i64;
    let mut pressure: f64 = match kind {
        PressureKind::Network => 35.0 + rng.gen_range(0.0..10.0),
        PressureKind::Internal => 45.0 + rng.gen_range(0.0..10.0),
    };
    let mut records = Vec::with_capacity(num_records);

    for i in 0..num_records {
        let ts_ms = now_ms - (num_records as i64 - 1 - i as i64) * interval_ms;
        match kind {
            PressureKind::Network => {
                pressure += rng.gen_range(-2.0..2.0);
                if rng.gen_bool(0.05) {
                    pressure -= rng.gen_range(0.0..5.0);
                }
            }
            PressureKind::Internal => {
                pressure += rng.gen_range(-4.0..4.0);
                if rng.gen_bool(0.1) {
                    pressure += rng.gen_range(0.0..10.0);
                }
            }
        }
        pressure = pressure.clamp(10.0, 80.0);
        records.push(PressureRecord {
            record_id: format!("pr-{client_id}-{}-{i}", kind.as_str()),
            client_id: client_id.to_string(),
            kind,
            ts_ms,
            pressure_psi: round1(pressure),
        });
    }
    records
}

/// 生成泵能耗序列：白天（7~21 时）占空比更高，夜间偶发。
pub fn pump_energy_series(
    rng: &mut impl Rng,
    client_id: &str,
    price_per_kwh: f64,
    num_records: usize,
    days_to_cover: i64,
    now_ms: i64,
) -> Vec<PumpEnergyRecord> {
    let interval_ms = days_to_cover * DAY_MS / num_records as i64;
    let mut records = Vec::with_capacity(num_records);

    for i in 0..num_records {
        let ts_ms = now_ms - (num_records as i64 - 1 - i as i64) * interval_ms;
        let hour = chrono::DateTime::<Utc>::from_timestamp_millis(ts_ms)
            .map(|ts| ts.hour())
            .unwrap_or(0);
        let energy_kwh = if hour > 6 && hour < 22 && rng.gen_bool(0.3) {
            round2(0.5 + rng.gen_range(0.0..1.5))
        } else if rng.gen_bool(0.05) {
            round2(0.3 + rng.gen_range(0.0..0.7))
        } else {
            0.0
        };
        records.push(PumpEnergyRecord {
            record_id: format!("per-{client_id}-{i}"),
            client_id: client_id.to_string(),
            ts_ms,
            energy_kwh,
            cost: round2(energy_kwh * price_per_kwh),
        });
    }
    records
}

/// 新客户的初始泵状态。
pub fn initial_pump_status(rng: &mut impl Rng, client_id: &str, now_ms: i64) -> PumpStatus {
    PumpStatus {
        client_id: client_id.to_string(),
        pressure_psi: rng.gen_range(30..60) as f64,
        is_active: rng.gen_bool(0.5),
        changed_at_ms: now_ms,
    }
}

/// 新客户的初始水箱读数。
pub fn initial_tank_reading(rng: &mut impl Rng, client_id: &str, now_ms: i64) -> TankReading {
    TankReading {
        client_id: client_id.to_string(),
        level_percent: rng.gen_range(30..100) as f64,
        updated_at_ms: now_ms,
    }
}

/// 新客户的初始水箱位置：围绕市中心坐标小幅散布。
pub fn initial_tank_location(
    rng: &mut impl Rng,
    client_id: &str,
    client_name: &str,
    index: usize,
) -> TankLocation {
    let spread = 0.01 * (index + 1) as f64;
    let neighborhood = client_name.split_whitespace().next().unwrap_or("Centro");
    TankLocation {
        client_id: client_id.to_string(),
        latitude: -23.550520 + (rng.gen_range(0.0..1.0) - 0.5) * spread,
        longitude: -46.633308 + (rng.gen_range(0.0..1.0) - 0.5) * spread,
        address: format!(
            "Rua Ficticia, {}, Bairro {neighborhood}, Cidade Exemplo",
            100 + index * 50
        ),
    }
}
