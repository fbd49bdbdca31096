//! # OCI 信任配置模块
//!
//! 配置实体、持久化与写入请求校验

mod entry;
mod request;
mod store;

pub use entry::{ApiKeyCredentials, AuthMode, ConfigEntry, ConfigResponse, Credentials};
pub use request::ConfigRequest;
pub use store::{CONFIG_KEY, ConfigStore};
