use contracts::shared::api::{ApiError, Page};
use contracts::system::notifications::{Notification, NotificationQuery};

use crate::shared::http;

pub async fn fetch_notifications(
    query: &NotificationQuery,
) -> Result<Page<Notification>, ApiError> {
    http::get_query("/notifications", query).await
}

pub async fn mark_read(id: i64) -> Result<(), ApiError> {
    http::put_unit::<()>(&format!("/notifications/{}/read", id), None).await
}

pub async fn delete_notification(id: i64) -> Result<(), ApiError> {
    http::delete(&format!("/notifications/{}", id)).await
}
