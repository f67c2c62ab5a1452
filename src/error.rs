//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::ApiError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Page not found")]
    NotFound,

    #[error("Rental API error: {0}")]
    Api(#[from] ApiError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Api(_) => StatusCode::BAD_GATEWAY,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show to the customer
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::NotFound => "Page not found",
            AppError::Api(_) => "The booking service is unavailable",
            AppError::Template(_) => "Template error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::NotFound => {}
            AppError::Api(e) => tracing::error!("Rental API error: {}", e),
            AppError::Template(e) => tracing::error!("Template error: {}", e),
        }
        let message = self.public_message();

        // Return simple HTML error page
        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head><title>{} - Carhire</title></head>
<body style="font-family: sans-serif; text-align: center; padding: 50px;">
    <h1>{}</h1>
    <p>{}</p>
    <a href="/">Back to Home</a>
</body>
</html>"#,
            status.as_u16(),
            status.as_u16(),
            message
        );

        (status, axum::response::Html(html)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        let api = AppError::from(ApiError::Status {
            status: 500,
            detail: None,
        });
        assert_eq!(api.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::from(askama::Error::Fmt(std::fmt::Error)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_upstream_details_stay_private() {
        let error = AppError::from(ApiError::Status {
            status: 500,
            detail: Some("db password leaked".to_string()),
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("The booking service is unavailable"));
        assert!(!html.contains("password"));
    }
}
