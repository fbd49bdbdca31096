//! # 信任配置请求处理
//!
//! `config` 路径的增删改查。所有校验在写入之前完成；只有写入成功后才使缓存的认证客户端失效。

use std::sync::Arc;

use crate::auth::AuthClientManager;
use crate::error::{BackendError, Result};
use crate::logging::{LogComponent, LogStage};
use crate::oci_config::{ConfigRequest, ConfigResponse, ConfigStore};
use crate::{ldebug, linfo};

/// 配置请求处理器
#[derive(Debug, Clone)]
pub struct ConfigHandlers {
    store: ConfigStore,
    clients: Arc<AuthClientManager>,
}

impl ConfigHandlers {
    #[must_use]
    pub const fn new(store: ConfigStore, clients: Arc<AuthClientManager>) -> Self {
        Self { store, clients }
    }

    /// 创建配置
    pub async fn create(&self, request: ConfigRequest) -> Result<()> {
        self.write(request, false).await
    }

    /// 更新配置，配置不存在时返回 `NotFound`
    pub async fn update(&self, request: ConfigRequest) -> Result<()> {
        self.write(request, true).await
    }

    async fn write(&self, request: ConfigRequest, require_existing: bool) -> Result<()> {
        let operation = if require_existing { "update" } else { "create" };

        request.require_home_tenancy().inspect_err(|e| log_rejected(operation, e))?;
        if require_existing && !self.store.exists().await? {
            log_rejected(operation, &BackendError::NotFound);
            return Err(BackendError::NotFound);
        }
        let entry = request.into_entry().inspect_err(|e| log_rejected(operation, e))?;

        self.store.put(&entry).await?;
        self.clients.invalidate().await;

        linfo!(
            "system",
            LogStage::Request,
            LogComponent::Handlers,
            operation,
            &format!(
                "config saved: home_tenancy_id={}, auth_mode={}",
                entry.home_tenancy_id,
                entry.auth_mode()
            )
        );
        Ok(())
    }

    /// 读取脱敏后的配置，没有配置时返回 `None`
    pub async fn read(&self) -> Result<Option<ConfigResponse>> {
        Ok(self.store.get().await?.map(|entry| entry.to_response()))
    }

    /// 删除配置并使缓存的客户端失效
    pub async fn delete(&self) -> Result<()> {
        self.store.delete().await?;
        self.clients.invalidate().await;

        linfo!(
            "system",
            LogStage::Request,
            LogComponent::Handlers,
            "delete",
            "config deleted"
        );
        Ok(())
    }

    /// 是否已有配置，用于在创建与更新之间选择
    pub async fn exists(&self) -> Result<bool> {
        self.store.exists().await
    }
}

fn log_rejected(operation: &str, error: &BackendError) {
    ldebug!(
        "system",
        LogStage::Validation,
        LogComponent::Handlers,
        operation,
        &format!("config write rejected: {error}")
    );
}
