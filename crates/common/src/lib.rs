//! Shared configuration and database wiring for the shipping service.

pub mod config;
pub mod db;
pub mod error;

pub use config::{AppConfig, ConnectionConfig, EnvSource, ProcessEnv};
pub use db::{ConnectionSource, build_connection_source, create_pool};
pub use error::AppError;
