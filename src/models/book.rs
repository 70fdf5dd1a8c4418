//! Book model and request schemas.
//!
//! A book is either free (`reader` and `borrowing_time` both null) or
//! borrowed (both set); the borrow/return operations keep that pairing.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::repository::EntityModel;

/// Six-digit serial number pattern shared by book and reader identifiers.
pub static SERIAL_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("serial number pattern is valid"));

/// One catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Six-digit serial number, immutable after creation
    pub id: String,
    pub title: String,
    pub author: String,
    /// Serial number of the current borrower, if any
    pub reader: Option<String>,
    /// When the book was borrowed, if it currently is
    pub borrowing_time: Option<DateTime<Utc>>,
}

impl Book {
    /// Columns accepted as filter or sort targets.
    pub const COLUMNS: [&'static str; 5] = ["id", "title", "author", "reader", "borrowing_time"];
}

impl EntityModel for Book {
    const NAME: &'static str = "book";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for creating a book
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(regex(
        path = *SERIAL_NUMBER,
        message = "Serial number should be 6 digits long."
    ))]
    pub id: String,
    pub title: String,
    pub author: String,
}

/// Payload for borrowing a book
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BorrowBook {
    #[validate(regex(
        path = *SERIAL_NUMBER,
        message = "Serial number should be 6 digits long."
    ))]
    pub reader: String,
    /// Defaults to the current time when omitted
    pub borrowing_time: Option<DateTime<Utc>>,
}
