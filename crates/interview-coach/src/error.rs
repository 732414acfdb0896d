use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::critique::CritiqueError;
use crate::practice::{PracticeServiceError, RepositoryError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Catalog(CatalogError),
    Critique(CritiqueError),
    Practice(PracticeServiceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Practice(err) => practice_status(err),
            AppError::Critique(err) => critique_status(err),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn practice_status(err: &PracticeServiceError) -> StatusCode {
    match err {
        PracticeServiceError::UnknownQuestion(_) => StatusCode::NOT_FOUND,
        PracticeServiceError::EmptyAnswer(_) => StatusCode::BAD_REQUEST,
        PracticeServiceError::CritiqueUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        PracticeServiceError::Critique(err) => critique_status(err),
        PracticeServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PracticeServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PracticeServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn critique_status(err: &CritiqueError) -> StatusCode {
    match err {
        CritiqueError::EmptyAnswer => StatusCode::BAD_REQUEST,
        CritiqueError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
        CritiqueError::Transport(_)
        | CritiqueError::Upstream { .. }
        | CritiqueError::EmptyResponse
        | CritiqueError::Malformed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Critique(err) => write!(f, "{}", err),
            AppError::Practice(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Critique(err) => Some(err),
            AppError::Practice(err) => Some(err),
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

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<CritiqueError> for AppError {
    fn from(value: CritiqueError) -> Self {
        Self::Critique(value)
    }
}

impl From<PracticeServiceError> for AppError {
    fn from(value: PracticeServiceError) -> Self {
        Self::Practice(value)
    }
}
