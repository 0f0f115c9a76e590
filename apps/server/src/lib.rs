//! Metadata Editor server
//!
//! A REST service for bibliographic metadata records with:
//! - CRUD over free-form records with validated known fields
//! - Field-based search driven by a runtime-extensible field registry
//! - In-memory or PostgreSQL (JSONB) storage
//! - Reloadable select option lists

#![allow(
    clippy::type_complexity,         // Complex types are acceptable when they represent domain concepts
    clippy::large_enum_variant,      // Large enum variants acceptable; boxing may impact performance
)]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
