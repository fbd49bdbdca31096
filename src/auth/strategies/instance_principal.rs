//! # 实例主体凭据
//!
//! 凭据来自运行环境，不保存任何密钥

use super::traits::CredentialProvider;
use crate::auth::metadata::{InstanceIdentity, InstanceMetadataProbe};
use crate::error::{BackendError, Result};
use crate::oci_config::AuthMode;

/// 实例主体凭据提供者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstancePrincipalProvider {
    identity: InstanceIdentity,
}

impl InstancePrincipalProvider {
    /// 探测运行环境并构建提供者；不在 OCI 实例上时返回带修复提示的环境错误
    pub async fn from_environment(probe: &dyn InstanceMetadataProbe) -> Result<Self> {
        let identity = probe
            .instance_identity()
            .await
            .map_err(BackendError::environment)?;
        Ok(Self { identity })
    }

    #[must_use]
    pub const fn identity(&self) -> &InstanceIdentity {
        &self.identity
    }

    #[must_use]
    pub fn compartment_id(&self) -> &str {
        &self.identity.compartment_id
    }
}

impl CredentialProvider for InstancePrincipalProvider {
    fn auth_mode(&self) -> AuthMode {
        AuthMode::Instance
    }

    fn region(&self) -> &str {
        &self.identity.region
    }

    fn principal_id(&self) -> &str {
        &self.identity.instance_id
    }

    fn tenancy_id(&self) -> Option<&str> {
        None
    }
}
