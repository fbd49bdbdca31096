//! # 配置存储
//!
//! 通过外部存储读写唯一的 [`ConfigEntry`]。

use std::fmt;
use std::sync::Arc;

use super::entry::{ConfigEntry, ConfigRecord};
use crate::error::{Context, Result};
use crate::ldebug;
use crate::logging::{LogComponent, LogStage};
use crate::storage::{Storage, StorageEntry};

/// 配置在挂载点存储命名空间内的固定键
pub const CONFIG_KEY: &str = "config";

/// 配置存储
#[derive(Clone)]
pub struct ConfigStore {
    storage: Arc<dyn Storage>,
}

impl ConfigStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 写入配置，完整覆盖已有记录
    pub async fn put(&self, entry: &ConfigEntry) -> Result<()> {
        let record = StorageEntry::json(CONFIG_KEY, &ConfigRecord::from(entry))?;
        self.storage
            .put(record)
            .await
            .context("failed to write config")?;

        ldebug!(
            "system",
            LogStage::Storage,
            LogComponent::ConfigStore,
            "put_config",
            &format!("config written: auth_mode={}", entry.auth_mode())
        );
        Ok(())
    }

    /// 读取配置，从未写入时返回 `None`
    ///
    /// 这里不做旧记录升级检查；是否需要升级由调用方判断。
    pub async fn get(&self) -> Result<Option<ConfigEntry>> {
        let Some(stored) = self
            .storage
            .get(CONFIG_KEY)
            .await
            .context("failed to read config")?
        else {
            return Ok(None);
        };

        let record: ConfigRecord = stored.decode_json()?;
        ConfigEntry::try_from(record).map(Some)
    }

    /// 删除配置，不存在时不报错
    pub async fn delete(&self) -> Result<()> {
        self.storage
            .delete(CONFIG_KEY)
            .await
            .context("failed to delete config")
    }

    /// 是否已有配置；只检查记录是否存在，不解码
    pub async fn exists(&self) -> Result<bool> {
        Ok(self
            .storage
            .get(CONFIG_KEY)
            .await
            .context("failed to read config")?
            .is_some())
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("key", &CONFIG_KEY)
            .finish()
    }
}
