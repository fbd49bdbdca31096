//! # 身份服务认证客户端
//!
//! 包装一个凭据提供者，供登录校验方调用 OCI 身份服务。

use reqwest::Client;
use std::fmt;
use std::sync::Arc;

use super::strategies::CredentialProvider;
use crate::config::IdentityConfig;
use crate::error::{BackendError, Result};
use crate::oci_config::AuthMode;

/// 认证客户端
///
/// 同一时刻每个后端实例只缓存一个，由所有请求共享。
pub struct AuthenticationClient {
    provider: Arc<dyn CredentialProvider>,
    endpoint: String,
    http_client: Client,
    epoch: u64,
}

impl AuthenticationClient {
    /// 用凭据提供者构建客户端；区域为空时失败
    pub fn new(
        provider: Arc<dyn CredentialProvider>,
        identity: &IdentityConfig,
        epoch: u64,
    ) -> Result<Self> {
        let region = provider.region().trim();
        if region.is_empty() {
            return Err(BackendError::client_construction(
                "credential provider has no region",
            ));
        }

        let endpoint = identity.endpoint_for(region);
        url::Url::parse(&endpoint).map_err(|e| {
            BackendError::client_construction_with_source(
                format!("invalid identity endpoint: {endpoint}"),
                e,
            )
        })?;

        let http_client = Client::builder()
            .timeout(identity.request_timeout())
            .build()
            .map_err(|e| {
                BackendError::client_construction_with_source("failed to build HTTP client", e)
            })?;

        Ok(Self {
            provider,
            endpoint,
            http_client,
            epoch,
        })
    }

    #[must_use]
    pub fn provider(&self) -> &dyn CredentialProvider {
        self.provider.as_ref()
    }

    #[must_use]
    pub fn auth_mode(&self) -> AuthMode {
        self.provider.auth_mode()
    }

    /// 身份服务地址
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub const fn http_client(&self) -> &Client {
        &self.http_client
    }

    /// 构建时所处的配置版本
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl fmt::Debug for AuthenticationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationClient")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}
