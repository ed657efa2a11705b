//! 存储接口 Trait 定义
//!
//! 定义所有资源存储的异步接口：
//! - CompanyStore：管理公司注册表
//! - ClientStore：客户（小区）注册表
//! - ConsumptionStore：水表日读数
//! - TankLevelStore：水箱液位时序
//! - PressureStore：管网压力时序
//! - PumpEnergyStore：泵能耗时序
//! - PumpStatusStore / TankReadingStore / TankLocationStore：实时读数
//!
//! 设计原则：
//! - 所有接口显式接收 AccessContext
//! - 所有接口返回 StorageError
//! - 时序集合只追加（add-client 触发的批量写），读取并发安全
//! - 未知 client_id 的时序读取返回空集合，不报错

use crate::error::StorageError;
use crate::models::{ClientRecord, ClientUpdate, CompanyRecord};
use async_trait::async_trait;
use domain::{
    AccessContext, ConsumptionRecord, PressureKind, PressureRecord, PumpEnergyRecord, PumpStatus,
    TankKind, TankLevelRecord, TankLocation, TankReading,
};

/// 管理公司注册表接口。
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// 列出全部管理公司，按名称升序。
    async fn list_companies(&self, ctx: &AccessContext)
    -> Result<Vec<CompanyRecord>, StorageError>;

    /// 查找指定公司。
    async fn find_company(
        &self,
        ctx: &AccessContext,
        company_id: &str,
    ) -> Result<Option<CompanyRecord>, StorageError>;

    /// 按管理员登录邮箱查找公司（认证用）。
    async fn find_company_by_admin_email(
        &self,
        ctx: &AccessContext,
        admin_email: &str,
    ) -> Result<Option<CompanyRecord>, StorageError>;

    /// 创建新公司。
    ///
    /// 空名称/空邮箱与重复邮箱返回 Validation 错误。
    async fn create_company(
        &self,
        ctx: &AccessContext,
        name: &str,
        admin_email: &str,
        responsible_person: Option<String>,
    ) -> Result<CompanyRecord, StorageError>;
}

/// 客户注册表接口。
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// 列出指定公司名下的客户，按名称升序。
    async fn list_clients_of_company(
        &self,
        ctx: &AccessContext,
        company_id: &str,
    ) -> Result<Vec<ClientRecord>, StorageError>;

    /// 查找指定客户（作用域外的记录按不存在处理）。
    async fn find_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<Option<ClientRecord>, StorageError>;

    /// 创建新客户记录。
    ///
    /// 空名称返回 Validation 错误；管理公司的存在性由调用方先行校验。
    async fn create_client(&self, ctx: &AccessContext, record: ClientRecord)
    -> Result<ClientRecord, StorageError>;

    /// 更新客户：顶层标量覆盖，嵌套子对象逐字段合并。
    async fn update_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        update: ClientUpdate,
    ) -> Result<Option<ClientRecord>, StorageError>;
}

/// 水表日读数存储接口。
#[async_trait]
pub trait ConsumptionStore: Send + Sync {
    /// 批量追加读数（播种与新增客户时调用）。
    async fn append_consumption(
        &self,
        ctx: &AccessContext,
        records: Vec<ConsumptionRecord>,
    ) -> Result<usize, StorageError>;

    /// 读取指定客户的全部读数。
    async fn consumption_for_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<Vec<ConsumptionRecord>, StorageError>;
}

/// 水箱液位时序存储接口。
#[async_trait]
pub trait TankLevelStore: Send + Sync {
    async fn append_tank_levels(
        &self,
        ctx: &AccessContext,
        records: Vec<TankLevelRecord>,
    ) -> Result<usize, StorageError>;

    /// 读取指定客户、指定水箱的液位序列。
    async fn tank_levels_for_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        kind: TankKind,
    ) -> Result<Vec<TankLevelRecord>, StorageError>;
}

/// 管网压力时序存储接口。
#[async_trait]
pub trait PressureStore: Send + Sync {
    async fn append_pressures(
        &self,
        ctx: &AccessContext,
        records: Vec<PressureRecord>,
    ) -> Result<usize, StorageError>;

    /// 读取指定客户、指定管网的压力序列。
    async fn pressures_for_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        kind: PressureKind,
    ) -> Result<Vec<PressureRecord>, StorageError>;
}

/// 泵能耗时序存储接口。
#[async_trait]
pub trait PumpEnergyStore: Send + Sync {
    async fn append_pump_energy(
        &self,
        ctx: &AccessContext,
        records: Vec<PumpEnergyRecord>,
    ) -> Result<usize, StorageError>;

    async fn pump_energy_for_client(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<Vec<PumpEnergyRecord>, StorageError>;
}

/// 泵实时状态存储接口。
#[async_trait]
pub trait PumpStatusStore: Send + Sync {
    /// 写入（播种或覆盖）泵状态。
    async fn put_pump_status(
        &self,
        ctx: &AccessContext,
        status: PumpStatus,
    ) -> Result<(), StorageError>;

    /// 读取泵状态；未知客户惰性写入并返回默认值。
    async fn pump_status(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        now_ms: i64,
    ) -> Result<PumpStatus, StorageError>;

    /// 切换泵开关；客户无泵记录返回 NotFound。
    async fn set_pump_active(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        active: bool,
        pressure_psi: f64,
        now_ms: i64,
    ) -> Result<PumpStatus, StorageError>;
}

/// 水箱实时读数存储接口。
#[async_trait]
pub trait TankReadingStore: Send + Sync {
    async fn put_tank_reading(
        &self,
        ctx: &AccessContext,
        reading: TankReading,
    ) -> Result<(), StorageError>;

    /// 读取水箱读数并应用一次漂移量（读取即更新的观测行为）。
    ///
    /// 未知客户惰性写入并返回默认值；漂移结果截断到 [0, 100]。
    async fn tank_reading(
        &self,
        ctx: &AccessContext,
        client_id: &str,
        drift: f64,
        now_ms: i64,
    ) -> Result<TankReading, StorageError>;
}

/// 水箱位置存储接口。
#[async_trait]
pub trait TankLocationStore: Send + Sync {
    async fn put_tank_location(
        &self,
        ctx: &AccessContext,
        location: TankLocation,
    ) -> Result<(), StorageError>;

    /// 读取位置；未知客户惰性写入并返回默认位置。
    async fn tank_location(
        &self,
        ctx: &AccessContext,
        client_id: &str,
    ) -> Result<TankLocation, StorageError>;
}
