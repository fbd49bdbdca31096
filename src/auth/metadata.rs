//! # 实例元数据探测
//!
//! 实例主体凭据来自 OCI 实例元数据服务。探测接口独立成 trait，便于在非 OCI 环境中替换。

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::MetadataConfig;
use crate::ldebug;
use crate::logging::{LogComponent, LogStage};

/// 当前实例的身份信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceIdentity {
    /// 实例 OCID
    pub instance_id: String,
    /// 所在区间 OCID
    pub compartment_id: String,
    /// 完整区域名，如 `us-ashburn-1`
    pub region: String,
}

/// 实例元数据探测接口
#[async_trait]
pub trait InstanceMetadataProbe: Send + Sync {
    /// 读取当前实例身份；不在 OCI 实例上运行时返回错误
    async fn instance_identity(&self) -> anyhow::Result<InstanceIdentity>;
}

/// `GET {endpoint}/instance/` 的响应
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstanceDocument {
    id: String,
    compartment_id: String,
    region: String,
    #[serde(default)]
    canonical_region_name: Option<String>,
}

/// 基于 HTTP 的元数据探测
#[derive(Debug, Clone)]
pub struct HttpMetadataProbe {
    http_client: Client,
    endpoint: String,
}

impl HttpMetadataProbe {
    /// 元数据服务 v2 要求的认证头
    pub const AUTHORIZATION_HEADER: &'static str = "Bearer Oracle";

    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &MetadataConfig) -> anyhow::Result<Self> {
        Self::new(config.endpoint.clone(), config.timeout())
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InstanceMetadataProbe for HttpMetadataProbe {
    async fn instance_identity(&self) -> anyhow::Result<InstanceIdentity> {
        let url = format!("{}/instance/", self.endpoint);

        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, Self::AUTHORIZATION_HEADER)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("failed to call instance metadata service: {e}"))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "instance metadata service returned status: {}",
                response.status()
            );
        }

        let document: InstanceDocument = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("failed to parse instance metadata: {e}"))?;

        ldebug!(
            "system",
            LogStage::Build,
            LogComponent::Metadata,
            "instance_identity",
            &format!("instance metadata loaded: instance_id={}", document.id)
        );

        Ok(InstanceIdentity {
            instance_id: document.id,
            compartment_id: document.compartment_id,
            region: document
                .canonical_region_name
                .filter(|name| !name.is_empty())
                .unwrap_or(document.region),
        })
    }
}
