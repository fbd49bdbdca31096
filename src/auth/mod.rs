//! # 认证模块
//!
//! 凭据提供者的选择与构建，以及认证客户端的缓存与失效。

pub mod client;
pub mod client_manager;
pub mod metadata;
pub mod provider_factory;
pub mod strategies;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::AuthenticationClient;
pub use client_manager::{AuthClientManager, ClientState};
pub use metadata::{HttpMetadataProbe, InstanceIdentity, InstanceMetadataProbe};
pub use provider_factory::ProviderFactory;
pub use strategies::{ApiKeyProvider, CredentialProvider, InstancePrincipalProvider};
