//! API handlers for the REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::SERIAL_NUMBER,
};

/// Validate a request body, substituting the declared friendly message for
/// the raw pattern-mismatch text.
pub(crate) fn check_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|errors| {
        let detail = errors
            .field_errors()
            .into_values()
            .flat_map(|field| field.iter())
            .find_map(|error| error.message.as_ref().map(|msg| msg.to_string()))
            .unwrap_or_else(|| errors.to_string());
        AppError::Validation(detail)
    })
}

/// Validate a serial number taken from the request path.
pub(crate) fn check_serial(id: &str) -> AppResult<()> {
    if SERIAL_NUMBER.is_match(id) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Serial number should be 6 digits long.".to_string(),
        ))
    }
}
