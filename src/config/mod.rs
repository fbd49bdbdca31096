//! # 配置管理模块
//!
//! 处理进程配置加载与验证

mod app_config;

pub use app_config::{AppConfig, IdentityConfig, LoggingConfig, MetadataConfig, ServerConfig};

use crate::error::{BackendError, Result};
use std::env;
use std::path::Path;

/// 按 `RUST_ENV` 加载配置文件 `config/config.{env}.toml`
pub fn load_config() -> Result<AppConfig> {
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
    let config_file = format!("config/config.{env}.toml");

    if !Path::new(&config_file).exists() {
        return Err(BackendError::config(format!(
            "config file does not exist: {config_file}"
        )));
    }

    load_config_from(&config_file)
}

/// 从指定路径加载配置文件
pub fn load_config_from(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    let config_content = std::fs::read_to_string(path).map_err(|e| {
        BackendError::config_with_source(
            format!("failed to read config file: {}", path.display()),
            e,
        )
    })?;

    parse_config(&config_content)
}

/// 解析并验证 TOML 配置
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate().map_err(BackendError::config)?;
    Ok(config)
}
