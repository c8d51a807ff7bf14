use std::collections::BTreeMap;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::backend::BackendError;
use crate::handlers::shared::ApiResponse;
use crate::invoice::{AllocationError, InvoiceError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Backend error: {0}")]
    Backend(BackendError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Blocking validation warning; nothing was committed
    #[error("{message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal server error{}", .0.as_ref().map_or("".to_string(), |s| format!(": {}", s)))]
    InternalServerError(Option<String>),
}

pub type AppResult<T> = Result<T, AppError>;

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        log::error!(
            "Request failed with status {}: {}",
            status_code,
            error_message
        );

        match self {
            AppError::Validation { fields, .. } if !fields.is_empty() => {
                HttpResponse::build(status_code)
                    .json(ApiResponse::error_with_data(fields, &error_message))
            }
            _ => HttpResponse::build(status_code).json(ApiResponse::<()>::error(&error_message)),
        }
    }
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn internal_server_error_message(message: impl Into<String>) -> Self {
        AppError::InternalServerError(Some(message.into()))
    }
}

impl From<BackendError> for AppError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::Validation { message, fields } => AppError::Validation { message, fields },
            BackendError::NotFound(message) => AppError::NotFound(message),
            BackendError::Unauthorized(message) => {
                log::warn!("Backend refused credentials: {}", message);
                AppError::Unauthorized
            }
            other => {
                log::error!("Backend error: {}", other);
                AppError::Backend(other)
            }
        }
    }
}

impl From<InvoiceError> for AppError {
    fn from(error: InvoiceError) -> Self {
        match error {
            InvoiceError::InvalidTransition { .. } | InvoiceError::PaymentMismatch { .. } => {
                AppError::Conflict(error.to_string())
            }
            other => AppError::validation(other.to_string()),
        }
    }
}

impl From<AllocationError> for AppError {
    fn from(error: AllocationError) -> Self {
        match error {
            AllocationError::RowOutOfRange { .. } => AppError::BadRequest(error.to_string()),
            other => AppError::validation(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        log::error!("Anyhow error: {}", error);

        match error.downcast::<BackendError>() {
            Ok(backend_error) => backend_error.into(),
            Err(original_error) => AppError::InternalServerError(Some(original_error.to_string())),
        }
    }
}
