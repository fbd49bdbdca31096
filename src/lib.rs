//! # OCI Auth Backend Library
//!
//! OCI 身份认证后端核心库：信任配置的持久化，以及认证客户端的构建、缓存与失效。

pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod oci_config;
pub mod storage;

// Re-export commonly used types
pub use backend::{OciAuthBackend, Operation};
pub use config::AppConfig;
pub use error::{BackendError, Result};
