use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Coordinates, JobId, SiteId};

/// Unique identifier for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub Uuid);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    JobAssignment,
    CheckIn,
    CheckOut,
    JobCompletion,
    System,
}

/// Structured payload attached to a notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationData {
    JobAssignment {
        job_id: JobId,
        job_title: String,
        location: Coordinates,
    },
    SiteVisit {
        site_id: SiteId,
        site_name: String,
        location: Coordinates,
    },
    #[default]
    None,
}

/// Message addressed to a user's inbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default)]
    pub data: NotificationData,
}

/// Notification contents before the sink assigns identity and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub data: NotificationData,
}

impl NewNotification {
    pub fn new(
        user_id: impl Into<String>,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            data: NotificationData::None,
        }
    }

    pub fn with_data(mut self, data: NotificationData) -> Self {
        self.data = data;
        self
    }

    /// Materialize as an unread notification
    pub fn into_notification(self, timestamp: DateTime<Utc>) -> Notification {
        Notification {
            id: NotificationId(Uuid::new_v4()),
            user_id: self.user_id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            timestamp,
            read: false,
            data: self.data,
        }
    }
}
