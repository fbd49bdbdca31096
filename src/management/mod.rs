//! # 管理API模块
//!
//! `config` 路径的请求处理，以及开发用的 HTTP 接口。

pub mod handlers;
pub mod response;
pub mod routes;

pub use handlers::ConfigHandlers;
pub use routes::create_routes;
