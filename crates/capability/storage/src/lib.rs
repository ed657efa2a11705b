//! # Aqua Storage 模块
//!
//! 本模块提供统一的数据存储抽象层，按资源划分异步接口。
//!
//! ## 架构设计
//!
//! 该模块采用分层架构，遵循以下原则：
//!
//! 1. **接口抽象层** (`traits.rs`)：定义所有资源存储的异步 Trait 接口
//! 2. **数据模型层** (`models.rs`)：定义注册表相关的数据结构
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **验证辅助层** (`validation.rs`)：访问上下文与客户作用域验证
//! 5. **实现层**：
//!    - `in_memory/`：内存存储实现（演示与测试环境使用）
//!
//! ## 核心特性
//!
//! - **作用域隔离**：所有存储接口都显式接收 `AccessContext`，
//!   客户级数据只在匹配的作用域内可见
//! - **只追加时序**：水表读数、液位、压力、能耗集合只在播种与
//!   新增客户时批量写入，此后只读
//! - **宽容读取**：未知 client_id 的读取返回空集合或惰性默认值，不报错
//! - **异步支持**：基于 Tokio 的异步接口，上层服务并发读取
//!
//! ## 模块说明
//!
//! - [`models`]：注册表数据模型（管理公司、客户及其嵌套配置）
//! - [`traits`]：存储接口定义（注册表 CRUD + 时序追加/读取 + 实时读数）
//! - [`error`]：存储错误类型定义
//! - [`validation`]：访问上下文和客户作用域验证函数
//! - [`in_memory`]：内存存储实现
//!   - 注册表与实时读数使用 `RwLock<HashMap>`
//!   - 时序集合使用 `RwLock<Vec>`
//!
//! ## 作用域安全
//!
//! 所有客户级操作都强制通过 `AccessContext` 校验：
//!
//! - **公司作用域**：companyAdmin 只能看到本公司名下的客户
//! - **客户作用域**：clientUser 只能访问自己的数据
//! - **越权即拒绝**：作用域不匹配返回 Scope 错误，列表查询中按不存在处理
//!
//! ## 更新语义
//!
//! 客户记录更新遵循两层合并规则：
//!
//! - 顶层标量字段（名称、单价）整体覆盖
//! - 嵌套子对象（联系方式、合同、MQTT 配置、支持信息）逐字段合并，
//!   未出现的字段保持原值

// 模块导出：将子模块的内容导出到 crate 根目录
pub mod error;
pub mod in_memory;
pub mod models;
pub mod traits;
pub mod validation;

// 导出常用类型到 crate 根目录，方便外部引用
pub use error::*;
pub use models::*;
pub use traits::*;
pub use validation::*;

// 导出内存存储实现类型
pub use in_memory::{
    InMemoryClientStore, InMemoryCompanyStore, InMemoryConsumptionStore, InMemoryPressureStore,
    InMemoryPumpEnergyStore, InMemoryPumpStatusStore, InMemoryTankLevelStore,
    InMemoryTankLocationStore, InMemoryTankReadingStore,
};
