//! # OCI Auth Backend 主程序
//!
//! 基于内存存储的开发服务，在挂载点下提供 `config` 路径。

use axum::Router;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use oci_auth_backend::{
    AppConfig, BackendError, OciAuthBackend, Result,
    config::{load_config, load_config_from},
    lerror, linfo, lwarn,
    logging::{self, LogComponent, LogStage},
    management::create_routes,
    storage::MemoryStorage,
};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "oci-auth-backend", version, about = "OCI auth backend dev server")]
struct Args {
    /// 配置文件路径，缺省时按 RUST_ENV 读取 config/config.{env}.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖监听地址
    #[arg(long)]
    listen: Option<String>,

    /// 覆盖日志级别
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (mut app_config, fallback) = match &args.config {
        Some(path) => (load_config_from(path)?, None),
        None => match load_config() {
            Ok(app_config) => (app_config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
    };
    if let Some(listen) = args.listen {
        app_config.server.listen = listen;
    }
    if let Some(level) = args.log_level {
        app_config.logging.level = level;
    }
    app_config.validate().map_err(BackendError::config)?;

    logging::init_logging(Some(&app_config.logging.level));
    if let Some(e) = fallback {
        lwarn!(
            "system",
            LogStage::Startup,
            LogComponent::Config,
            "load_config",
            &format!("{e}, using default configuration")
        );
    }

    if let Err(e) = run(&app_config).await {
        lerror!(
            "system",
            LogStage::Startup,
            LogComponent::Main,
            "service_start_failed",
            &format!("service failed: {e}")
        );
        return Err(e);
    }

    linfo!(
        "system",
        LogStage::Shutdown,
        LogComponent::Main,
        "service_shutdown",
        "service stopped"
    );
    Ok(())
}

async fn run(app_config: &AppConfig) -> Result<()> {
    let backend = Arc::new(OciAuthBackend::from_config(
        Arc::new(MemoryStorage::new()),
        app_config,
    )?);
    let app = Router::new().nest(&app_config.server.mount_path, create_routes(backend));

    let addr = app_config
        .server
        .listen_addr()
        .map_err(BackendError::config)?;
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        BackendError::config_with_source(format!("failed to bind {addr}"), e)
    })?;

    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Main,
        "service_starting",
        &format!(
            "listening on {addr}, config path {}/config",
            app_config.server.mount_path
        )
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BackendError::config_with_source("HTTP server error", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        lerror!(
            "system",
            LogStage::Shutdown,
            LogComponent::Main,
            "signal",
            &format!("failed to listen for shutdown signal: {e}")
        );
        std::future::pending::<()>().await;
    }
    linfo!(
        "system",
        LogStage::Shutdown,
        LogComponent::Main,
        "signal",
        "shutdown signal received"
    );
}
