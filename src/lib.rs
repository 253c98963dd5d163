#![forbid(unsafe_code)]

pub mod card;
pub mod config;
pub mod dialog;
pub mod display;
pub mod errors;
pub mod models;
pub mod persistence;
pub mod views;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
