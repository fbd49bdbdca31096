//! # 路由配置
//!
//! 挂载点下的路由；`POST` 与 `PUT` 都先做存在性检查再决定创建或更新。

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

use super::response::{self, ApiResponse};
use crate::backend::{OciAuthBackend, Operation};
use crate::oci_config::ConfigRequest;

/// 路由共享状态
pub type AppState = Arc<OciAuthBackend>;

/// 创建所有路由
pub fn create_routes(backend: AppState) -> Router {
    Router::new()
        .route(
            "/config",
            get(read_config)
                .post(write_config)
                .put(write_config)
                .delete(delete_config),
        )
        .route("/help", get(backend_help))
        .route("/help/{path}", get(path_help))
        .with_state(backend)
}

async fn read_config(State(backend): State<AppState>) -> Response {
    ApiResponse::from(backend.handle(Operation::Read).await).into_response()
}

async fn write_config(
    State(backend): State<AppState>,
    Json(request): Json<ConfigRequest>,
) -> Response {
    match backend.write(request).await {
        Ok(()) => response::no_content(),
        Err(error) => response::app_error(error),
    }
}

async fn delete_config(State(backend): State<AppState>) -> Response {
    match backend.handle(Operation::Delete).await {
        Ok(_) => response::no_content(),
        Err(error) => response::app_error(error),
    }
}

#[derive(Debug, Serialize)]
struct HelpResponse {
    synopsis: &'static str,
    description: &'static str,
}

async fn backend_help() -> Response {
    help_response("")
}

async fn path_help(Path(path): Path<String>) -> Response {
    help_response(&path)
}

fn help_response(path: &str) -> Response {
    match OciAuthBackend::path_help(path) {
        Some((synopsis, description)) => ApiResponse::Data(HelpResponse {
            synopsis,
            description,
        })
        .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
