//! # 凭据提供者工厂
//!
//! 根据信任配置选择并构建凭据提供者。除探测运行环境外不做任何 I/O，也不缓存结果。

use std::sync::Arc;

use super::metadata::InstanceMetadataProbe;
use super::strategies::{ApiKeyProvider, CredentialProvider, InstancePrincipalProvider};
use crate::error::Result;
use crate::logging::{LogComponent, LogStage};
use crate::oci_config::{ConfigEntry, Credentials};
use crate::{ldebug, lwarn};

/// 凭据提供者工厂
#[derive(Clone)]
pub struct ProviderFactory {
    probe: Arc<dyn InstanceMetadataProbe>,
}

impl ProviderFactory {
    #[must_use]
    pub fn new(probe: Arc<dyn InstanceMetadataProbe>) -> Self {
        Self { probe }
    }

    /// 构建凭据提供者
    ///
    /// 没有配置或 `instance` 模式时使用实例主体，`apikey` 模式使用 API 密钥。
    pub async fn build(&self, entry: Option<&ConfigEntry>) -> Result<Arc<dyn CredentialProvider>> {
        match entry.map(|entry| &entry.credentials) {
            None | Some(Credentials::Instance) => {
                let provider = InstancePrincipalProvider::from_environment(self.probe.as_ref())
                    .await
                    .inspect_err(|e| {
                        lwarn!(
                            "system",
                            LogStage::Build,
                            LogComponent::ProviderFactory,
                            "instance_principal",
                            &format!("unable to create instance principal provider: {e}")
                        );
                    })?;
                ldebug!(
                    "system",
                    LogStage::Build,
                    LogComponent::ProviderFactory,
                    "instance_principal",
                    &format!("instance principal provider built: region={}", provider.region())
                );
                Ok(Arc::new(provider))
            }
            Some(Credentials::ApiKey(credentials)) => {
                let provider = ApiKeyProvider::new(credentials)?;
                ldebug!(
                    "system",
                    LogStage::Build,
                    LogComponent::ProviderFactory,
                    "api_key",
                    &format!("api key provider built: key_id={}", provider.key_id())
                );
                Ok(Arc::new(provider))
            }
        }
    }
}
