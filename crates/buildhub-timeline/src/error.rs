use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::batch::TimelineImportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("import error: {0}")]
    Import(#[from] TimelineImportError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Import(TimelineImportError::Csv(_)) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Import(TimelineImportError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::batch::TimelineBatchImporter;
    use std::io::Cursor;

    #[test]
    fn malformed_csv_maps_to_bad_request() {
        let mut csv = b"plot_size\n".to_vec();
        csv.extend_from_slice(&[0xff, b'\n']);
        let error: AppError = TimelineBatchImporter::default()
            .import_reader(Cursor::new(csv))
            .expect_err("csv error")
            .into();

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert!(error.to_string().starts_with("import error:"));
    }

    #[test]
    fn configuration_errors_are_internal() {
        let error = AppError::from(ConfigError::InvalidPort);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
