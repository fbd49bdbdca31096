//! # API 响应结构
//!
//! 成功时返回 `{"data": ...}` 或无内容，失败时返回 `{"errors": [...]}`。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::BackendError;
use crate::lwarn;
use crate::logging::{LogComponent, LogStage};

#[derive(Debug, Serialize)]
struct DataResponse<T: Serialize> {
    data: T,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    errors: Vec<String>,
}

/// API 响应枚举
///
/// 统一所有出口，方便转换为 `axum::response::Response`
#[derive(Debug)]
pub enum ApiResponse<T: Serialize> {
    /// 200，带数据
    Data(T),
    /// 204，无响应体
    NoContent,
    /// 按错误类型映射状态码
    Error(BackendError),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Data(data) => (StatusCode::OK, Json(DataResponse { data })).into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
            Self::Error(error) => {
                let status = error.status_code();
                if status.is_server_error() {
                    lwarn!(
                        "system",
                        LogStage::Request,
                        LogComponent::Handlers,
                        "error_response",
                        &format!("request failed with {status}: {error}")
                    );
                }
                let body = ErrorResponse {
                    errors: vec![error.to_string()],
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<crate::error::Result<Option<T>>> for ApiResponse<T> {
    fn from(result: crate::error::Result<Option<T>>) -> Self {
        match result {
            Ok(Some(data)) => Self::Data(data),
            Ok(None) => Self::NoContent,
            Err(error) => Self::Error(error),
        }
    }
}

/// 便捷函数：无内容响应
#[must_use]
pub fn no_content() -> Response {
    ApiResponse::<()>::NoContent.into_response()
}

/// 便捷函数：错误响应
#[must_use]
pub fn app_error(error: BackendError) -> Response {
    ApiResponse::<()>::Error(error).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_data_envelope() {
        let response = ApiResponse::Data(serde_json::json!({"home_tenancy_id": "t1"})).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"data": {"home_tenancy_id": "t1"}})
        );
    }

    #[tokio::test]
    async fn test_none_is_no_content() {
        let response = ApiResponse::<()>::from(Ok(None)).into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_error_envelope_and_status() {
        let response = app_error(BackendError::NotFound);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"errors": ["the specified config does not exist"]})
        );

        let response = app_error(BackendError::InvalidPemFormat);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app_error(BackendError::persistence("offline"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
