//! # Aqua External 模块
//!
//! 外部协作方的边界契约：用水顾问（生成式文本）与
//! 环境遥测 feed（温湿度）。每个契约配 HTTP 实现与
//! 降级路径，调用方在仪表盘边界捕获错误，外部失败
//! 从不影响核心数据。

pub mod advisor;
pub mod environment;
pub mod error;

pub use advisor::{Advisor, ConsumptionFigures, DISABLED_MESSAGE, DisabledAdvisor, HttpAdvisor};
pub use environment::{EnvironmentFeed, ThingSpeakFeed};
pub use error::ExternalError;
