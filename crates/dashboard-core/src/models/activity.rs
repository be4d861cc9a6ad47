//! Activity feed types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity severity, used by the feed to pick a colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Success,
    #[default]
    Info,
    Warning,
    Danger,
    #[serde(other)]
    Unknown,
}

/// An entry in the user's activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: ActivityKind,
    /// Icon name (`check`, `user`, `alert`, `x`, `message`).
    #[serde(default)]
    pub icon: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub time_ago: String,
}
