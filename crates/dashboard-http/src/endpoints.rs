//! Endpoint paths and request/response bodies.

use serde::{Deserialize, Serialize};

use dashboard_core::AccessToken;
use dashboard_core::models::{ChartPeriod, TaskId};

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const AUTH_REGISTER: &str = "/auth/register/";
pub const AUTH_LOGIN: &str = "/auth/login/";
pub const AUTH_LOGOUT: &str = "/auth/logout/";
pub const AUTH_TOKEN_REFRESH: &str = "/auth/token/refresh/";
pub const AUTH_ME: &str = "/auth/me/";

pub const TASKS: &str = "/tasks/";
pub const TASK_PROGRESS: &str = "/tasks/progress/";

pub const NOTIFICATIONS: &str = "/notifications/";
pub const NOTIFICATIONS_MARK_ALL_READ: &str = "/notifications/mark_all_read/";
pub const NOTIFICATIONS_UNREAD_COUNT: &str = "/notifications/unread_count/";

pub const ACTIVITIES: &str = "/activities/";

pub const STATISTICS_DASHBOARD: &str = "/statistics/dashboard/";

/// Development-only data seeding.
pub const SEED: &str = "/seed/";

pub fn task(id: TaskId) -> String {
    format!("/tasks/{}/", id)
}

pub fn task_toggle(id: TaskId) -> String {
    format!("/tasks/{}/toggle/", id)
}

pub fn notification(id: i64) -> String {
    format!("/notifications/{}/", id)
}

pub fn notification_mark_read(id: i64) -> String {
    format!("/notifications/{}/mark_read/", id)
}

pub fn statistics_chart(period: ChartPeriod) -> String {
    format!("/statistics/chart/?period={}", period)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body for the token-refresh and logout endpoints.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: Option<&'a str>,
}

/// Response from the token-refresh endpoint.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: AccessToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templated_paths() {
        assert_eq!(task(12), "/tasks/12/");
        assert_eq!(task_toggle(12), "/tasks/12/toggle/");
        assert_eq!(notification_mark_read(3), "/notifications/3/mark_read/");
        assert_eq!(
            statistics_chart(ChartPeriod::default()),
            "/statistics/chart/?period=week"
        );
    }

    #[test]
    fn logout_body_sends_null_without_token() {
        let body = serde_json::to_value(RefreshRequest { refresh: None }).unwrap();
        assert_eq!(body, serde_json::json!({"refresh": null}));
    }
}
