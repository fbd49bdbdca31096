//! # 凭据策略模块
//!
//! 两种互斥的凭据证明方式：实例主体与 API 密钥

pub mod api_key;
pub mod instance_principal;
pub mod traits;

// 导出核心trait
pub use traits::CredentialProvider;

// 导出具体策略实现
pub use api_key::ApiKeyProvider;
pub use instance_principal::InstancePrincipalProvider;
