//! FieldNav Notify - Audit and notification ports
//!
//! This crate defines the ports the dispatch core calls after a state change has
//! committed, along with adapter implementations.

pub mod demo;
pub mod http;
pub mod ports;
pub mod sink;

// Re-export main types
pub use demo::DemoAuditNotifier;
pub use http::HttpAuditNotifier;
pub use ports::{AuditNotifier, NotificationSink};
pub use sink::StoreNotificationSink;
