//! Wire models for the dashboard REST API.
//!
//! Field names follow the server's snake_case JSON. The core does not
//! validate business data; these types only give the JSON a shape.

mod activity;
mod notification;
mod statistics;
mod task;
mod user;

use serde::{Deserialize, Deserializer, Serialize};

pub use activity::{Activity, ActivityKind};
pub use notification::{Notification, NotificationKind, UnreadCount};
pub use statistics::{ChartData, ChartDataset, ChartPeriod, DashboardStats, SalesDistribution};
pub use task::{Priority, Task, TaskId, TaskInput, TaskProgress};
pub use user::{AuthResponse, User};

/// A plain `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Decimal fields arrive either as JSON numbers or as decimal strings.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
