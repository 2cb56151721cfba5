use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod store;

pub use store::{MarkAllReport, NotificationStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationType {
    pub const ALL: [NotificationType; 4] = [
        NotificationType::Info,
        NotificationType::Success,
        NotificationType::Warning,
        NotificationType::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Info => "info",
            NotificationType::Success => "success",
            NotificationType::Warning => "warning",
            NotificationType::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            NotificationType::Info => "Info",
            NotificationType::Success => "Success",
            NotificationType::Warning => "Warning",
            NotificationType::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

/// Read-status filter for the list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFilter {
    Read,
    Unread,
}

/// Query string of `GET /notifications`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<NotificationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<ReadFilter>,
}

impl NotificationQuery {
    pub fn first_page(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            notification_type: None,
            read: None,
        }
    }
}

impl Default for NotificationQuery {
    fn default() -> Self {
        Self::first_page(25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_wire_shape() {
        let n: Notification = serde_json::from_value(json!({
            "id": 12,
            "title": "New order",
            "message": "Order #1001 placed",
            "type": "success",
            "created_at": "2024-03-15T14:02:26Z",
            "read_at": null
        }))
        .unwrap();
        assert_eq!(n.notification_type, NotificationType::Success);
        assert!(!n.is_read());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let res = serde_json::from_value::<Notification>(json!({
            "id": 1,
            "title": "t",
            "message": "m",
            "type": "critical",
            "created_at": "2024-03-15T14:02:26Z"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn test_type_parse_roundtrip() {
        for t in NotificationType::ALL {
            assert_eq!(NotificationType::parse(t.as_str()), Some(t));
        }
        assert_eq!(NotificationType::parse("debug"), None);
    }

    #[test]
    fn test_query_skips_empty_filters() {
        let q = serde_json::to_value(NotificationQuery::first_page(10)).unwrap();
        assert_eq!(q, json!({ "page": 1, "per_page": 10 }));

        let q = NotificationQuery {
            notification_type: Some(NotificationType::Warning),
            read: Some(ReadFilter::Unread),
            ..NotificationQuery::default()
        };
        let v = serde_json::to_value(q).unwrap();
        assert_eq!(v["type"], "warning");
        assert_eq!(v["read"], "unread");
    }
}
