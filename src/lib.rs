//! Library records server
//!
//! REST JSON API over books, authors, book categories, loans and users. Record
//! updates go through [`patch`], which turns loosely typed PATCH bodies and
//! full PUT payloads into validated, typed field changes.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod patch;
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
