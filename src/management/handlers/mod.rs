//! # 请求处理器

pub mod config;

pub use config::ConfigHandlers;
