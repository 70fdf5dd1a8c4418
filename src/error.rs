//! Error types for the Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::repository::StoreError;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{entity} not found.")]
    NotFound { entity: String },

    #[error("{entity} with that identifier already exists.")]
    Conflict {
        entity: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("{0}")]
    Validation(String),

    #[error("{entity} doesn't have such an attribute.")]
    BadAttribute { entity: String, attribute: String },

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn not_found(entity: &str) -> Self {
        AppError::NotFound {
            entity: capitalize(entity),
        }
    }

    /// Translate a tagged store error into its API-facing counterpart.
    ///
    /// This is the single conversion point between the store layer and the
    /// HTTP surface; handlers never see raw store errors.
    pub fn from_store(err: StoreError, entity: &str) -> Self {
        match err {
            StoreError::Duplicate(source) => AppError::Conflict {
                entity: capitalize(entity),
                source,
            },
            StoreError::UnknownColumn(attribute) => AppError::BadAttribute {
                entity: capitalize(entity),
                attribute,
            },
            StoreError::Driver(source) => AppError::Database(source),
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Conflict { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::BadAttribute { attribute, .. } => {
                tracing::debug!("Rejected unknown attribute: {}", attribute);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
