//! FieldNav Dispatch - Assignment, attendance and expense use cases
//!
//! This crate implements the dispatch core: proximity ranking, the job lifecycle,
//! the geofence attendance state machine, the attendance and expense ledger, and the
//! post-commit dispatch of notifications and audit events.

pub mod directory;
pub mod effects;
pub mod geofence;
pub mod inbox;
pub mod jobs;
pub mod ledger;
pub mod models;
pub mod proximity;
pub mod service;
pub mod tracking;

pub use effects::{EffectDispatcher, SideEffect};
pub use geofence::{EvaluationOutcome, GeofenceEngine};
pub use models::{
    AssignmentOutcome, CheckInStatus, CheckInView, JobView, LocationOutcome, ManualCheck,
    OptimalWorkers, RankedWorker, SiteVisit, TransitionOutcome,
};
pub use service::DispatchService;
