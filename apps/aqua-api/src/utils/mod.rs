//! 辅助函数模块

pub mod response;
