//! Shared configuration for Blobgate.
//!
//! This crate provides the process-wide configuration types consumed by the
//! gateway, the API layer, and the server binary.

pub mod config;

pub use config::{AppConfig, ServerConfig, StorageSettings};
