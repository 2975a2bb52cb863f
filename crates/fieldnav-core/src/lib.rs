//! FieldNav Core - Domain models, error taxonomy, and configuration
//!
//! This crate contains the domain types shared by every FieldNav crate: workers, jobs,
//! job sites with their geofences, attendance and expense records, notifications and
//! audit events.

pub mod config;
pub mod error;
pub mod models;

pub use error::{FieldnavError, Result};
