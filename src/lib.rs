//! Resume parsing function
//!
//! Sends resume documents to a third-party parsing service and flattens the
//! HR-XML structured resume it returns into contact, employment and
//! education records.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
