//! # Aqua Reporting 模块
//!
//! 报表与聚合：从只追加的时序记录生成图表序列与标量指标。
//!
//! 分两层：
//! - [`aggregate`]：纯函数层，记录切片 + 显式时钟 → 结果，
//!   不触达存储，完全确定，承载全部业务规则
//! - [`service`]：异步服务层，负责取数、注入当前时钟与水价
//!
//! 业务规则（与前端展示契约一致）：
//! - 趋势：近 30 天硬截断、按日汇总、升序
//! - 分户排行：仅当前日历月，按总量降序
//! - 环比：上月为零的不对称规则（本月有数据记 +100%）
//! - 历史序列：升序排序后保留最后 300 点
//! - 财务汇总：窗口内每月恰好一条，缺数据的月份补零

pub mod aggregate;
pub mod service;

pub use aggregate::{DEFAULT_MAX_POINTS, TREND_WINDOW_DAYS};
pub use service::{FinancialPeriod, ReportingService, SeriesKind, SeriesRange};
