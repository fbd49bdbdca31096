//! # 存储接口模块
//!
//! 后端持久化依赖的外部键值存储接口：按键读写原始字节，键不存在时返回 `None`。
//! 领域对象的编解码由上层（如 [`ConfigStore`](crate::oci_config::ConfigStore)）负责。

mod memory;

pub use memory::MemoryStorage;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{BackendError, Result};

/// 存储条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    /// 逻辑键
    pub key: String,
    /// 原始值
    pub value: Vec<u8>,
}

impl StorageEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// 以 JSON 编码构建条目
    pub fn json<T: Serialize>(key: impl Into<String>, value: &T) -> Result<Self> {
        let key = key.into();
        let value = serde_json::to_vec(value).map_err(|e| {
            BackendError::persistence_with_source(format!("failed to encode entry '{key}'"), e)
        })?;
        Ok(Self { key, value })
    }

    /// 将条目值按 JSON 解码
    pub fn decode_json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.value).map_err(|e| {
            BackendError::persistence_with_source(
                format!("failed to decode entry '{}'", self.key),
                e,
            )
        })
    }
}

/// 外部键值存储
///
/// 实现需要自行保证一致性；本 crate 不会在其上额外加锁。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    /// 读取条目，不存在时返回 `None`
    async fn get(&self, key: &str) -> Result<Option<StorageEntry>>;

    /// 写入条目，覆盖已有值
    async fn put(&self, entry: StorageEntry) -> Result<()>;

    /// 删除条目，不存在时不报错
    async fn delete(&self, key: &str) -> Result<()>;
}
