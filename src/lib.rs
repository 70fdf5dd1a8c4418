//! Libris - Library Catalog REST API
//!
//! A small library-catalog web API: clients create, read, list, borrow and
//! return book records, with every response enriched with HATEOAS-style
//! navigation links.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod hateoas;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
