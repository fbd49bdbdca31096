//! # 错误处理模块
//!
//! 后端统一的错误类型。校验类错误在任何写入之前返回，其余错误原样向上传递，不在本层重试。

mod types;

pub use types::{API_KEY_REQUIRED_FIELDS, BackendError};

use std::fmt::Display;

/// 后端统一的 `Result`
pub type Result<T> = std::result::Result<T, BackendError>;

/// 为错误附加上下文
pub trait Context<T> {
    fn context<C: Display>(self, context: C) -> Result<T>;

    fn with_context<C: Display, F: FnOnce() -> C>(self, context: F) -> Result<T>;
}

impl<T, E: Into<BackendError>> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|error| wrap(error.into(), &context))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, context: F) -> Result<T> {
        self.map_err(|error| wrap(error.into(), &context()))
    }
}

fn wrap(source: BackendError, context: &dyn Display) -> BackendError {
    BackendError::Context {
        context: context.to_string(),
        source: Box::new(source),
    }
}

/// 直接构造一个带上下文的错误结果
pub fn context_error<T>(err: impl Into<BackendError>, context: impl Display) -> Result<T> {
    Err(wrap(err.into(), &context))
}

/// 错误归属：调用方可修正（4xx）或服务端/依赖故障（5xx）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Client,
    Server,
}

impl ErrorCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}
