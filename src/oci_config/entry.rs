//! # 信任配置实体
//!
//! 每个挂载点唯一的一条配置记录，以及其持久化格式和只读视图。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{API_KEY_REQUIRED_FIELDS, BackendError, Result};

/// 认证模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthMode {
    /// 实例主体：凭据来自运行环境
    #[default]
    #[serde(rename = "instance")]
    Instance,
    /// API 密钥：凭据由用户提供
    #[serde(rename = "apikey")]
    ApiKey,
}

impl AuthMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::ApiKey => "apikey",
        }
    }

    /// 解析模式字符串，仅空字符串视为默认的 `instance`，不做去空白处理
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "" | "instance" => Ok(Self::Instance),
            "apikey" => Ok(Self::ApiKey),
            other => Err(BackendError::invalid_auth_mode(other)),
        }
    }
}

impl FromStr for AuthMode {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API 密钥凭据
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ApiKeyCredentials {
    pub tenancy_ocid: String,
    pub user_ocid: String,
    pub fingerprint: String,
    /// PEM 编码的私钥
    pub private_key: String,
    /// 私钥口令，仅加密私钥需要
    pub private_key_passphrase: Option<String>,
    pub region: String,
}

impl ApiKeyCredentials {
    /// 为空（或仅含空白）的必填字段
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let values = [
            &self.tenancy_ocid,
            &self.user_ocid,
            &self.fingerprint,
            &self.private_key,
            &self.region,
        ];
        API_KEY_REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect()
    }

    /// 五个必填字段必须全部提供
    pub fn ensure_complete(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BackendError::MissingApiKeyFields { missing })
        }
    }

    /// 私钥需要包含 PEM 起始标记和私钥块标识
    pub fn ensure_pem(&self) -> Result<()> {
        if self.private_key.contains("BEGIN") && self.private_key.contains("PRIVATE KEY") {
            Ok(())
        } else {
            Err(BackendError::InvalidPemFormat)
        }
    }

    /// 写入前的完整校验
    pub fn validate(&self) -> Result<()> {
        self.ensure_complete()?;
        self.ensure_pem()
    }

    /// 非空口令；空白口令等同于未设置
    #[must_use]
    pub fn passphrase(&self) -> Option<&str> {
        self.private_key_passphrase
            .as_deref()
            .filter(|passphrase| !passphrase.trim().is_empty())
    }
}

impl fmt::Debug for ApiKeyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyCredentials")
            .field("tenancy_ocid", &self.tenancy_ocid)
            .field("user_ocid", &self.user_ocid)
            .field("fingerprint", &self.fingerprint)
            .field("private_key", &"<redacted>")
            .field(
                "private_key_passphrase",
                &self.private_key_passphrase.as_ref().map(|_| "<redacted>"),
            )
            .field("region", &self.region)
            .finish()
    }
}

/// 凭据来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Instance,
    ApiKey(ApiKeyCredentials),
}

/// 信任配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// 信任根租户；只接受该租户内主体的登录
    pub home_tenancy_id: String,
    pub credentials: Credentials,
}

impl ConfigEntry {
    pub fn instance(home_tenancy_id: impl Into<String>) -> Self {
        Self {
            home_tenancy_id: home_tenancy_id.into(),
            credentials: Credentials::Instance,
        }
    }

    pub fn api_key(home_tenancy_id: impl Into<String>, credentials: ApiKeyCredentials) -> Self {
        Self {
            home_tenancy_id: home_tenancy_id.into(),
            credentials: Credentials::ApiKey(credentials),
        }
    }

    #[must_use]
    pub const fn auth_mode(&self) -> AuthMode {
        match self.credentials {
            Credentials::Instance => AuthMode::Instance,
            Credentials::ApiKey(_) => AuthMode::ApiKey,
        }
    }

    #[must_use]
    pub const fn api_key_credentials(&self) -> Option<&ApiKeyCredentials> {
        match &self.credentials {
            Credentials::ApiKey(credentials) => Some(credentials),
            Credentials::Instance => None,
        }
    }

    /// 对外的只读视图，私钥和口令始终不返回
    #[must_use]
    pub fn to_response(&self) -> ConfigResponse {
        let api_key = self.api_key_credentials();
        ConfigResponse {
            home_tenancy_id: self.home_tenancy_id.clone(),
            auth_mode: Some(self.auth_mode()),
            tenancy_ocid: api_key.map(|c| c.tenancy_ocid.clone()),
            user_ocid: api_key.map(|c| c.user_ocid.clone()),
            fingerprint: api_key.map(|c| c.fingerprint.clone()),
            region: api_key.map(|c| c.region.clone()),
        }
    }
}

/// 读取配置的响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub home_tenancy_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<AuthMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenancy_ocid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ocid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// 持久化格式
///
/// 字段名与已有存储兼容；缺少 `auth_mode` 的旧记录按 `instance` 处理。
#[derive(Default, Serialize, Deserialize)]
pub(crate) struct ConfigRecord {
    pub home_tenancy_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub auth_mode: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tenancy_ocid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_ocid: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fingerprint: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub private_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub private_key_passphrase: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
}

impl From<&ConfigEntry> for ConfigRecord {
    fn from(entry: &ConfigEntry) -> Self {
        let mut record = Self {
            home_tenancy_id: entry.home_tenancy_id.clone(),
            auth_mode: entry.auth_mode().as_str().to_string(),
            ..Self::default()
        };
        if let Credentials::ApiKey(credentials) = &entry.credentials {
            record.tenancy_ocid.clone_from(&credentials.tenancy_ocid);
            record.user_ocid.clone_from(&credentials.user_ocid);
            record.fingerprint.clone_from(&credentials.fingerprint);
            record.private_key.clone_from(&credentials.private_key);
            record.private_key_passphrase = credentials
                .private_key_passphrase
                .clone()
                .unwrap_or_default();
            record.region.clone_from(&credentials.region);
        }
        record
    }
}

impl TryFrom<ConfigRecord> for ConfigEntry {
    type Error = BackendError;

    /// 不做字段校验；API 密钥字段的完整性在构建凭据时检查
    fn try_from(record: ConfigRecord) -> Result<Self> {
        let mode = AuthMode::parse(&record.auth_mode).map_err(|e| {
            BackendError::persistence_with_source(
                format!("stored config has an unrecognised auth_mode '{}'", record.auth_mode),
                e,
            )
        })?;
        let credentials = match mode {
            AuthMode::Instance => Credentials::Instance,
            AuthMode::ApiKey => Credentials::ApiKey(ApiKeyCredentials {
                tenancy_ocid: record.tenancy_ocid,
                user_ocid: record.user_ocid,
                fingerprint: record.fingerprint,
                private_key: record.private_key,
                private_key_passphrase: Some(record.private_key_passphrase)
                    .filter(|passphrase| !passphrase.is_empty()),
                region: record.region,
            }),
        };
        Ok(Self {
            home_tenancy_id: record.home_tenancy_id,
            credentials,
        })
    }
}
