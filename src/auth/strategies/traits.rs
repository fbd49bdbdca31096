//! # 凭据提供者特质
//!
//! 定义两种凭据证明方式必须实现的基础接口

use std::fmt::Debug;

use crate::oci_config::AuthMode;

/// 凭据提供者
///
/// 构建完成后即不可变，可在并发请求之间共享。
pub trait CredentialProvider: Send + Sync + Debug {
    /// 提供者对应的认证模式
    fn auth_mode(&self) -> AuthMode;

    /// 身份服务所在区域
    fn region(&self) -> &str;

    /// 主体 OCID（用户或实例）
    fn principal_id(&self) -> &str;

    /// 主体所属租户，实例主体在联合认证前未知
    fn tenancy_id(&self) -> Option<&str>;
}
