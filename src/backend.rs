//! # OCI 认证后端
//!
//! 组装配置存储、凭据提供者工厂与客户端生命周期管理，并按操作分发 `config` 路径的请求。

use std::fmt;
use std::sync::Arc;

use crate::auth::{
    AuthClientManager, AuthenticationClient, HttpMetadataProbe, InstanceMetadataProbe,
    ProviderFactory,
};
use crate::config::{AppConfig, IdentityConfig};
use crate::error::{BackendError, Result};
use crate::ldebug;
use crate::logging::{LogComponent, LogStage};
use crate::management::ConfigHandlers;
use crate::oci_config::{CONFIG_KEY, ConfigRequest, ConfigResponse, ConfigStore};
use crate::storage::Storage;

/// 后端帮助信息
pub const BACKEND_HELP: &str = "\
The OCI auth backend verifies login claims made with OCI identity credentials.

Only principals that belong to the configured home tenancy are accepted. The backend
talks to the OCI identity service either as the instance it runs on (auth_mode=instance)
or with an explicit API signing key (auth_mode=apikey) when running outside OCI.";

/// `config` 路径的简要说明
pub const PATH_CONFIG_SYN: &str = "Manage the trust configuration of the OCI auth backend.";

/// `config` 路径的详细说明
pub const PATH_CONFIG_DESC: &str = "\
Writes replace the whole configuration; fields left out fall back to their defaults.

  home_tenancy_id         tenancy OCID whose principals may log in (required)
  auth_mode               'instance' (default) or 'apikey'
  tenancy_ocid            tenancy OCID of the API key user (apikey)
  user_ocid               user OCID that owns the API key (apikey)
  fingerprint             fingerprint of the API signing key (apikey)
  private_key             PEM encoded private key (apikey)
  private_key_passphrase  passphrase of an encrypted private key (optional)
  region                  OCI region, e.g. us-phoenix-1 (apikey)

Reads never return private_key or private_key_passphrase.";

/// `config` 路径上的操作
#[derive(Debug, Clone)]
pub enum Operation {
    Create(ConfigRequest),
    Update(ConfigRequest),
    Read,
    Delete,
}

impl Operation {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::Read => "read",
            Self::Delete => "delete",
        }
    }
}

/// OCI 认证后端
pub struct OciAuthBackend {
    handlers: ConfigHandlers,
    clients: Arc<AuthClientManager>,
}

impl OciAuthBackend {
    #[must_use]
    pub fn new(
        storage: Arc<dyn Storage>,
        probe: Arc<dyn InstanceMetadataProbe>,
        identity: IdentityConfig,
    ) -> Self {
        let store = ConfigStore::new(storage);
        let clients = Arc::new(AuthClientManager::new(
            store.clone(),
            ProviderFactory::new(probe),
            identity,
        ));
        Self {
            handlers: ConfigHandlers::new(store, Arc::clone(&clients)),
            clients,
        }
    }

    /// 按进程配置构建，实例元数据通过 HTTP 探测
    pub fn from_config(storage: Arc<dyn Storage>, config: &AppConfig) -> Result<Self> {
        let probe = HttpMetadataProbe::from_config(&config.metadata).map_err(|e| {
            BackendError::config_with_source("failed to build instance metadata client", e)
        })?;
        Ok(Self::new(
            storage,
            Arc::new(probe),
            config.identity.clone(),
        ))
    }

    /// 分发请求；只有读取且配置存在时返回数据
    pub async fn handle(&self, operation: Operation) -> Result<Option<ConfigResponse>> {
        ldebug!(
            "system",
            LogStage::Request,
            LogComponent::Backend,
            operation.name(),
            "handling config request"
        );

        match operation {
            Operation::Create(request) => self.handlers.create(request).await.map(|()| None),
            Operation::Update(request) => self.handlers.update(request).await.map(|()| None),
            Operation::Read => self.handlers.read().await,
            Operation::Delete => self.handlers.delete().await.map(|()| None),
        }
    }

    /// 写入配置：已有配置时按更新处理，否则按创建处理
    pub async fn write(&self, request: ConfigRequest) -> Result<()> {
        let operation = if self.handlers.exists().await? {
            Operation::Update(request)
        } else {
            Operation::Create(request)
        };
        self.handle(operation).await.map(|_| ())
    }

    /// 存储中某个键被外部修改时调用；只有配置键会使客户端失效
    pub async fn invalidate_key(&self, key: &str) {
        if key == CONFIG_KEY {
            self.clients.invalidate().await;
        }
    }

    /// 供登录校验使用的认证客户端
    pub async fn authentication_client(&self) -> Result<Arc<AuthenticationClient>> {
        self.clients.get_or_create().await
    }

    #[must_use]
    pub const fn handlers(&self) -> &ConfigHandlers {
        &self.handlers
    }

    #[must_use]
    pub fn clients(&self) -> &AuthClientManager {
        &self.clients
    }

    /// 路径帮助：`(简要说明, 详细说明)`，未知路径返回 `None`
    #[must_use]
    pub fn path_help(path: &str) -> Option<(&'static str, &'static str)> {
        match path.trim_matches('/') {
            "" => Some(("OCI auth backend", BACKEND_HELP)),
            CONFIG_KEY => Some((PATH_CONFIG_SYN, PATH_CONFIG_DESC)),
            _ => None,
        }
    }
}

impl fmt::Debug for OciAuthBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OciAuthBackend")
            .field("clients", &self.clients)
            .finish_non_exhaustive()
    }
}
