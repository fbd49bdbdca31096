//! # 错误类型定义

use axum::http::StatusCode;
use thiserror::Error;

use super::ErrorCategory;

/// API 密钥模式下必须同时提供的字段
pub const API_KEY_REQUIRED_FIELDS: [&str; 5] = [
    "tenancy_ocid",
    "user_ocid",
    "fingerprint",
    "private_key",
    "region",
];

/// 后端主要错误类型
#[derive(Debug, Error)]
pub enum BackendError {
    /// 写入时缺少必填字段
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// `auth_mode` 不在支持的集合内
    #[error("auth_mode must be 'instance' or 'apikey', got '{mode}'")]
    InvalidAuthMode { mode: String },

    /// API 密钥模式下缺少一个或多个必填字段
    #[error(
        "API key authentication requires tenancy_ocid, user_ocid, fingerprint, private_key, and region (missing: {})",
        .missing.join(", ")
    )]
    MissingApiKeyFields { missing: Vec<&'static str> },

    /// 私钥不是 PEM 格式
    #[error("private_key must be in PEM format")]
    InvalidPemFormat,

    /// 更新时配置不存在
    #[error("the specified config does not exist")]
    NotFound,

    /// 存储层读写失败
    #[error("persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 实例主体（运行环境）不可用
    #[error("{message}")]
    Environment {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 认证客户端构建失败
    #[error("unable to create authentication client: {message}")]
    ClientConstruction {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 进程配置错误
    #[error("configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 附加上下文的错误
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<BackendError>,
    },
}

impl BackendError {
    /// Environment error hint shown when the ambient platform identity is unavailable.
    pub const INSTANCE_PRINCIPAL_HINT: &'static str = "unable to create Instance Principal provider. \
This error typically occurs when the backend is not running on an OCI instance. \
To run outside OCI, configure API key authentication: write config auth_mode=apikey \
tenancy_ocid=... user_ocid=... fingerprint=... region=... private_key=@key.pem";

    #[must_use]
    pub const fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid_auth_mode<T: Into<String>>(mode: T) -> Self {
        Self::InvalidAuthMode { mode: mode.into() }
    }

    pub fn persistence<T: Into<String>>(message: T) -> Self {
        Self::Persistence {
            message: message.into(),
            source: None,
        }
    }

    pub fn persistence_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Persistence {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 实例主体不可用，消息中总是带有改用 API 密钥的提示
    pub fn environment<E: Into<anyhow::Error>>(source: E) -> Self {
        let source = source.into();
        Self::Environment {
            message: format!(
                "{}. Original error: {source}",
                Self::INSTANCE_PRINCIPAL_HINT
            ),
            source: Some(source),
        }
    }

    pub fn client_construction<T: Into<String>>(message: T) -> Self {
        Self::ClientConstruction {
            message: message.into(),
            source: None,
        }
    }

    pub fn client_construction_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::ClientConstruction {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn config<T: Into<String>>(message: T) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 去掉所有上下文包装，返回最内层的错误
    #[must_use]
    pub fn root(&self) -> &Self {
        let mut current = self;
        while let Self::Context { source, .. } = current {
            current = source;
        }
        current
    }

    /// 是否为用户可修正的校验错误
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidAuthMode { .. }
                | Self::MissingApiKeyFields { .. }
                | Self::InvalidPemFormat
                | Self::NotFound
        )
    }

    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        if self.root().is_validation() {
            ErrorCategory::Client
        } else {
            ErrorCategory::Server
        }
    }

    /// 转换为 HTTP 状态码
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.root() {
            Self::NotFound => StatusCode::NOT_FOUND,
            err if err.is_validation() => StatusCode::BAD_REQUEST,
            Self::Environment { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::persistence_with_source("JSON encoding failed", err)
    }
}

impl From<toml::de::Error> for BackendError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parse failed", err)
    }
}
