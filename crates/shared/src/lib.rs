//! Shared errors and configuration for Ledgerline.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error taxonomy with stable machine codes
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{ActualConfig, AppConfig, ServerConfig};
pub use error::{AppError, AppResult};
