//! # 配置写入请求
//!
//! 写入请求在边界处一次性校验，校验通过后生成全新的 [`ConfigEntry`]。

use serde::Deserialize;
use std::fmt;

use super::entry::{ApiKeyCredentials, AuthMode, ConfigEntry};
use crate::error::{BackendError, Result};

/// 配置写入请求，未提供的字段按空字符串处理
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigRequest {
    pub home_tenancy_id: String,
    /// 为空时默认 `instance`
    pub auth_mode: Option<String>,
    pub tenancy_ocid: String,
    pub user_ocid: String,
    pub fingerprint: String,
    pub private_key: String,
    pub private_key_passphrase: String,
    pub region: String,
}

impl ConfigRequest {
    pub fn new(home_tenancy_id: impl Into<String>) -> Self {
        Self {
            home_tenancy_id: home_tenancy_id.into(),
            ..Self::default()
        }
    }

    /// 检查信任根租户；去空白只用于判空，返回原值
    pub fn require_home_tenancy(&self) -> Result<&str> {
        if self.home_tenancy_id.trim().is_empty() {
            return Err(BackendError::missing_field("home_tenancy_id"));
        }
        Ok(&self.home_tenancy_id)
    }

    /// 解析认证模式
    pub fn auth_mode(&self) -> Result<AuthMode> {
        AuthMode::parse(self.auth_mode.as_deref().unwrap_or_default())
    }

    /// 校验并生成新的配置实体（整体替换，不与旧配置合并）
    ///
    /// `instance` 模式下忽略所有 API 密钥字段。
    pub fn into_entry(self) -> Result<ConfigEntry> {
        let home_tenancy_id = self.require_home_tenancy()?.to_string();

        match self.auth_mode()? {
            AuthMode::Instance => Ok(ConfigEntry::instance(home_tenancy_id)),
            AuthMode::ApiKey => {
                let credentials = ApiKeyCredentials {
                    tenancy_ocid: self.tenancy_ocid,
                    user_ocid: self.user_ocid,
                    fingerprint: self.fingerprint,
                    private_key: self.private_key,
                    private_key_passphrase: Some(self.private_key_passphrase)
                        .filter(|passphrase| !passphrase.trim().is_empty()),
                    region: self.region,
                };
                credentials.validate()?;
                Ok(ConfigEntry::api_key(home_tenancy_id, credentials))
            }
        }
    }
}

impl fmt::Debug for ConfigRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRequest")
            .field("home_tenancy_id", &self.home_tenancy_id)
            .field("auth_mode", &self.auth_mode)
            .field("tenancy_ocid", &self.tenancy_ocid)
            .field("user_ocid", &self.user_ocid)
            .field("fingerprint", &self.fingerprint)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
