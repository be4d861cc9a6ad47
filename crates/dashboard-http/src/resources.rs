//! Task, notification, activity and statistics operations.

use tracing::{debug, instrument};

use dashboard_core::Result;
use dashboard_core::models::{
    Activity, ChartData, ChartPeriod, DashboardStats, MessageResponse, Notification, Task, TaskId,
    TaskInput, TaskProgress, UnreadCount,
};

use crate::client::ApiClient;
use crate::endpoints::{self, *};
use crate::request::RequestOptions;

impl ApiClient {
    // ========================================================================
    // Tasks
    // ========================================================================

    /// List the user's tasks, newest first.
    pub async fn tasks(&self) -> Result<Vec<Task>> {
        self.request_json(TASKS, RequestOptions::get()).await
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_task(&self, input: &TaskInput) -> Result<Task> {
        debug!("Creating task");
        let options = RequestOptions::post().json(input)?;
        self.request_json(TASKS, options).await
    }

    /// Replace a task's fields.
    #[instrument(skip(self, input))]
    pub async fn update_task(&self, id: TaskId, input: &TaskInput) -> Result<Task> {
        debug!("Updating task");
        let options = RequestOptions::put().json(input)?;
        self.request_json(&endpoints::task(id), options).await
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: TaskId) -> Result<()> {
        debug!("Deleting task");
        self.request(&endpoints::task(id), RequestOptions::delete())
            .await?;
        Ok(())
    }

    /// Flip a task's completion flag and return the updated task.
    #[instrument(skip(self))]
    pub async fn toggle_task(&self, id: TaskId) -> Result<Task> {
        self.request_json(&task_toggle(id), RequestOptions::patch())
            .await
    }

    pub async fn task_progress(&self) -> Result<TaskProgress> {
        self.request_json(TASK_PROGRESS, RequestOptions::get()).await
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub async fn notifications(&self) -> Result<Vec<Notification>> {
        self.request_json(NOTIFICATIONS, RequestOptions::get()).await
    }

    #[instrument(skip(self))]
    pub async fn mark_notification_read(&self, id: i64) -> Result<Notification> {
        self.request_json(&notification_mark_read(id), RequestOptions::patch())
            .await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<MessageResponse> {
        self.request_json(NOTIFICATIONS_MARK_ALL_READ, RequestOptions::patch())
            .await
    }

    pub async fn unread_count(&self) -> Result<UnreadCount> {
        self.request_json(NOTIFICATIONS_UNREAD_COUNT, RequestOptions::get())
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_notification(&self, id: i64) -> Result<()> {
        self.request(&notification(id), RequestOptions::delete())
            .await?;
        Ok(())
    }

    // ========================================================================
    // Activities & Statistics
    // ========================================================================

    /// The most recent entries of the activity feed.
    pub async fn activities(&self) -> Result<Vec<Activity>> {
        self.request_json(ACTIVITIES, RequestOptions::get()).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.request_json(STATISTICS_DASHBOARD, RequestOptions::get())
            .await
    }

    /// Revenue and expense series for `period` (the server default is a week).
    #[instrument(skip(self))]
    pub async fn chart_data(&self, period: ChartPeriod) -> Result<ChartData> {
        self.request_json(&statistics_chart(period), RequestOptions::get())
            .await
    }
}
