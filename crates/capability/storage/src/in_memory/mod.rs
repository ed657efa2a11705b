//! 内存存储实现模块
//!
//! 记录存储的唯一后端：进程内集合，构造一次、以句柄传入各能力模块。
//!
//! 包含以下实现：
//! - CompanyStore: InMemoryCompanyStore
//! - ClientStore: InMemoryClientStore
//! - ConsumptionStore: InMemoryConsumptionStore
//! - TankLevelStore: InMemoryTankLevelStore
//! - PressureStore: InMemoryPressureStore
//! - PumpEnergyStore: InMemoryPumpEnergyStore
//! - PumpStatusStore / TankReadingStore / TankLocationStore: 实时读数实现

pub mod client;
pub mod company;
pub mod consumption;
pub mod pressure;
pub mod pump_energy;
pub mod pump_status;
pub mod tank_level;
pub mod tank_location;
pub mod tank_reading;

pub use client::*;
pub use company::*;
pub use consumption::*;
pub use pressure::*;
pub use pump_energy::*;
pub use pump_status::*;
pub use tank_level::*;
pub use tank_location::*;
pub use tank_reading::*;
