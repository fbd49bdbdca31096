//! # 应用配置结构定义

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// 应用主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP 服务配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 实例元数据服务配置
    pub metadata: MetadataConfig,
    /// OCI 身份服务配置
    pub identity: IdentityConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub listen: String,
    /// 后端挂载路径
    pub mount_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8200".to_string(),
            mount_path: "/v1/auth/oci".to_string(),
        }
    }
}

impl ServerConfig {
    /// 解析监听地址
    pub fn listen_addr(&self) -> Result<SocketAddr, String> {
        self.listen
            .parse()
            .map_err(|e| format!("invalid listen address '{}': {e}", self.listen))
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// 实例元数据服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// 元数据服务基础地址
    pub endpoint: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://169.254.169.254/opc/v2".to_string(),
            timeout_secs: 5,
        }
    }
}

impl MetadataConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// OCI 身份服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// 身份服务地址模板，`{region}` 会被替换为实际区域
    pub endpoint_template: String,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            endpoint_template: "https://auth.{region}.oraclecloud.com".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl IdentityConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 根据区域生成身份服务地址
    #[must_use]
    pub fn endpoint_for(&self, region: &str) -> String {
        self.endpoint_template.replace("{region}", region)
    }
}

impl AppConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), String> {
        self.server.listen_addr()?;

        let mount_path = &self.server.mount_path;
        if !mount_path.starts_with('/') || mount_path.ends_with('/') {
            return Err(format!(
                "server.mount_path must start with '/' and must not end with '/': {mount_path}"
            ));
        }

        let endpoint = url::Url::parse(&self.metadata.endpoint)
            .map_err(|e| format!("invalid metadata endpoint '{}': {e}", self.metadata.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(format!(
                "metadata endpoint must be http(s): {}",
                self.metadata.endpoint
            ));
        }
        if self.metadata.timeout_secs == 0 {
            return Err("metadata.timeout_secs must be greater than 0".to_string());
        }

        if !self.identity.endpoint_template.contains("{region}") {
            return Err(format!(
                "identity.endpoint_template must contain {{region}}: {}",
                self.identity.endpoint_template
            ));
        }
        if self.identity.request_timeout_secs == 0 {
            return Err("identity.request_timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
