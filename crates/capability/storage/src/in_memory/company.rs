//! 管理公司注册表内存实现
//!
//! 功能：
//! - 公司列表/查找/按邮箱查找/创建
//! - 创建时的输入校验与邮箱唯一性约束
//! - 公司不支持删除（注册表只增）

use crate::error::StorageError;
use crate::models::CompanyRecord;
use crate::traits::CompanyStore;
use crate::validation::ensure_actor;
use domain::AccessContext;
use std::collections::HashMap;
use std::sync::RwLock;

/// 管理公司注册表内存存储。
pub struct InMemoryCompanyStore {
    companies: RwLock<HashMap<String, CompanyRecord>>,
}

impl InMemoryCompanyStore {
    pub fn new() -> Self {
        Self {
            companies: RwLock::new(HashMap::new()),
        }
    }

    /// 以一组既有公司初始化（播种用）。
    pub fn with_companies(records: Vec<CompanyRecord>) -> Self {
        let mut companies = HashMap::new();
        for record in records {
            companies.insert(record.company_id.clone(), record);
        }
        Self {
            companies: RwLock::new(companies),
        }
    }

    /// 当前公司数量（测试用）。
    pub fn len(&self) -> usize {
        self.companies.read().map(|map| map.len()).unwrap_or(0)
    }
}

impl Default for InMemoryCompanyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CompanyStore for InMemoryCompanyStore {
    async fn list_companies(
        &self,
        ctx: &AccessContext,
    ) -> Result<Vec<CompanyRecord>, StorageError> {
        ensure_actor(ctx)?;
        let mut companies: Vec<CompanyRecord> = self
            .companies
            .read()
            .map_err(|_| StorageError::lock_failed())?
            .values()
            .cloned()
            .collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn find_company(
        &self,
        ctx: &AccessContext,
        company_id: &str,
    ) -> Result<Option<CompanyRecord>, StorageError> {
        ensure_actor(ctx)?;
        let company = self
            .companies
            .read()
            .map_err(|_| StorageError::lock_failed())?
            .get(company_id)
            .cloned();
        Ok(company)
    }

    async fn find_company_by_admin_email(
        &self,
        ctx: &AccessContext,
        admin_email: &str,
    ) -> Result<Option<CompanyRecord>, StorageError> {
        ensure_actor(ctx)?;
        let company = self
            .companies
            .read()
            .map_err(|_| StorageError::lock_failed())?
            .values()
            .find(|record| record.admin_email == admin_email)
            .cloned();
        Ok(company)
    }

    async fn create_company(
        &self,
        ctx: &AccessContext,
        name: &str,
        admin_email: &str,
        responsible_person: Option<String>,
    ) -> Result<CompanyRecord, StorageError> {
        ensure_actor(ctx)?;
        let name = name.trim();
        let admin_email = admin_email.trim();
        if name.is_empty() || admin_email.is_empty() {
            return Err(StorageError::validation(
                "company name and admin email are required",
            ));
        }
        let mut map = self
            .companies
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        if map.values().any(|record| record.admin_email == admin_email) {
            return Err(StorageError::validation(
                "a company with this admin email already exists",
            ));
        }
        let record = CompanyRecord {
            company_id: format!("company-{}", uuid::Uuid::new_v4()),
            name: name.to_string(),
            admin_email: admin_email.to_string(),
            responsible_person: responsible_person
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            registration_number: None,
        };
        map.insert(record.company_id.clone(), record.clone());
        Ok(record)
    }
}
