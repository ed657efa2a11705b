//! 追踪与请求 ID 生成。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 基础指标快照（MVP）。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub login_success: u64,
    pub login_failure: u64,
    pub dashboard_refresh_success: u64,
    pub dashboard_refresh_failure: u64,
    pub stale_snapshot_discarded: u64,
    pub pump_toggles: u64,
    pub advisor_requests: u64,
    pub advisor_failures: u64,
    pub environment_feed_failures: u64,
    pub refresh_latency_ms_total: u64,
    pub refresh_latency_ms_count: u64,
    pub seeded_records: u64,
}

/// 基础指标（MVP）。
pub struct TelemetryMetrics {
    login_success: AtomicU64,
    login_failure: AtomicU64,
    dashboard_refresh_success: AtomicU64,
    dashboard_refresh_failure: AtomicU64,
    stale_snapshot_discarded: AtomicU64,
    pump_toggles: AtomicU64,
    advisor_requests: AtomicU64,
    advisor_failures: AtomicU64,
    environment_feed_failures: AtomicU64,
    refresh_latency_ms_total: AtomicU64,
    refresh_latency_ms_count: AtomicU64,
    seeded_records: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            login_success: AtomicU64::new(0),
            login_failure: AtomicU64::new(0),
            dashboard_refresh_success: AtomicU64::new(0),
            dashboard_refresh_failure: AtomicU64::new(0),
            stale_snapshot_discarded: AtomicU64::new(0),
            pump_toggles: AtomicU64::new(0),
            advisor_requests: AtomicU64::new(0),
            advisor_failures: AtomicU64::new(0),
            environment_feed_failures: AtomicU64::new(0),
            refresh_latency_ms_total: AtomicU64::new(0),
            refresh_latency_ms_count: AtomicU64::new(0),
            seeded_records: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            login_success: self.login_success.load(Ordering::Relaxed),
            login_failure: self.login_failure.load(Ordering::Relaxed),
            dashboard_refresh_success: self.dashboard_refresh_success.load(Ordering::Relaxed),
            dashboard_refresh_failure: self.dashboard_refresh_failure.load(Ordering::Relaxed),
            stale_snapshot_discarded: self.stale_snapshot_discarded.load(Ordering::Relaxed),
            pump_toggles: self.pump_toggles.load(Ordering::Relaxed),
            advisor_requests: self.advisor_requests.load(Ordering::Relaxed),
            advisor_failures: self.advisor_failures.load(Ordering::Relaxed),
            environment_feed_failures: self.environment_feed_failures.load(Ordering::Relaxed),
            refresh_latency_ms_total: self.refresh_latency_ms_total.load(Ordering::Relaxed),
            refresh_latency_ms_count: self.refresh_latency_ms_count.load(Ordering::Relaxed),
            seeded_records: self.seeded_records.load(Ordering::Relaxed),
        }
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例（MVP）。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录登录成功次数。
pub fn record_login_success() {
    metrics().login_success.fetch_add(1, Ordering::Relaxed);
}

/// 记录登录失败次数。
pub fn record_login_failure() {
    metrics().login_failure.fetch_add(1, Ordering::Relaxed);
}

/// 记录仪表盘刷新成功次数。
pub fn record_dashboard_refresh_success() {
    metrics()
        .dashboard_refresh_success
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录仪表盘刷新失败次数。
pub fn record_dashboard_refresh_failure() {
    metrics()
        .dashboard_refresh_failure
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录过期快照丢弃次数。
pub fn record_stale_snapshot_discarded() {
    metrics()
        .stale_snapshot_discarded
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录水泵开关操作次数。
pub fn record_pump_toggle() {
    metrics().pump_toggles.fetch_add(1, Ordering::Relaxed);
}

/// 记录建议服务请求次数。
pub fn record_advisor_request() {
    metrics().advisor_requests.fetch_add(1, Ordering::Relaxed);
}

/// 记录建议服务失败次数。
pub fn record_advisor_failure() {
    metrics().advisor_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录环境数据源失败次数。
pub fn record_environment_feed_failure() {
    metrics()
        .environment_feed_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录仪表盘刷新耗时（毫秒，含外部数据源）。
pub fn record_refresh_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .refresh_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .refresh_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录演示数据写入条数。
pub fn record_seeded_records(count: u64) {
    metrics().seeded_records.fetch_add(count, Ordering::Relaxed);
}
