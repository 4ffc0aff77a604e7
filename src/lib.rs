//! PDF Relay Service
//!
//! Fetches PDF documents from a Supabase Storage bucket, extracts their text
//! and serves a public link alongside the text, plus an embeddable viewer.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod viewer;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
