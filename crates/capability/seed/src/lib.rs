//! # Aqua Seed 模块
//!
//! 合成数据播种：启动时为每个演示客户生成 60 天水表读数、
//! 30 天液位/压力/能耗随机游走序列与初始实时读数；
//! 新增客户时在请求内增量播种，保证引用完整性。

pub mod demo;
pub mod engine;
pub mod generators;

pub use demo::{DEFAULT_PRICE_PER_KWH, DEFAULT_PRICE_PER_M3, demo_clients, demo_companies};
pub use engine::Seeder;
