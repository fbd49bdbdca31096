//! # 日志配置模块
//!
//! 提供日志初始化以及带有阶段/组件字段的结构化日志宏

use std::env;
use std::fmt;
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// 日志所处的处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStage {
    Startup,
    Shutdown,
    Request,
    Validation,
    Storage,
    Build,
    Cache,
}

impl LogStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Shutdown => "shutdown",
            Self::Request => "request",
            Self::Validation => "validation",
            Self::Storage => "storage",
            Self::Build => "build",
            Self::Cache => "cache",
        }
    }
}

impl fmt::Display for LogStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 产生日志的组件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogComponent {
    Main,
    Config,
    ConfigStore,
    ProviderFactory,
    Metadata,
    ClientManager,
    Handlers,
    Backend,
}

impl LogComponent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Config => "config",
            Self::ConfigStore => "config_store",
            Self::ProviderFactory => "provider_factory",
            Self::Metadata => "metadata",
            Self::ClientManager => "client_manager",
            Self::Handlers => "handlers",
            Self::Backend => "backend",
        }
    }
}

impl fmt::Display for LogComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 结构化 info 日志
#[macro_export]
macro_rules! linfo {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr) => {
        ::tracing::info!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = $operation,
            "{}",
            $message
        )
    };
}

/// 结构化 debug 日志
#[macro_export]
macro_rules! ldebug {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr) => {
        ::tracing::debug!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = $operation,
            "{}",
            $message
        )
    };
}

/// 结构化 warn 日志
#[macro_export]
macro_rules! lwarn {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr) => {
        ::tracing::warn!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = $operation,
            "{}",
            $message
        )
    };
}

/// 结构化 error 日志
#[macro_export]
macro_rules! lerror {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr) => {
        ::tracing::error!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = $operation,
            "{}",
            $message
        )
    };
}

/// 默认的过滤规则：应用自身 debug，HTTP 客户端只输出告警
#[must_use]
pub fn default_filter(level: &str) -> String {
    format!("{level},oci_auth_backend=debug,hyper=warn,reqwest=warn")
}

/// 初始化日志系统
///
/// `RUST_LOG` 优先于配置文件中的级别。重复初始化时静默忽略。
pub fn init_logging(log_level: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| default_filter(level));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter.into()))
        .with(
            tracing_fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_keeps_level() {
        let filter = default_filter("warn");
        assert!(filter.starts_with("warn,"));
        assert!(filter.contains("oci_auth_backend=debug"));
    }

    #[test]
    fn test_stage_and_component_display() {
        assert_eq!(LogStage::Cache.to_string(), "cache");
        assert_eq!(LogComponent::ClientManager.to_string(), "client_manager");
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(Some("debug"));
        init_logging(None);
        crate::linfo!(
            "test",
            LogStage::Startup,
            LogComponent::Main,
            "init_twice",
            "logging initialised twice"
        );
    }
}
