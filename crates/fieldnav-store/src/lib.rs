//! FieldNav Store - Storage ports and adapters
//!
//! This crate defines the directory ports the dispatch core mutates (workers, jobs,
//! job sites, attendance, tracking, expenses, notifications) and provides the in-memory
//! adapter plus demo seed data.

pub mod memory;
pub mod ports;
pub mod seed;

pub use ports::Stores;
pub use seed::SeedData;
