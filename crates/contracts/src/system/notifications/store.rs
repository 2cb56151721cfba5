//! Local copy of the notification list.
//!
//! Every fetch replaces the whole list. Marking as read is applied locally
//! first and is not reverted if the API call later fails.

use super::Notification;
use crate::shared::api::ApiError;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationStore {
    items: Vec<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Replaces the whole list with the server's version
    pub fn replace(&mut self, items: Vec<Notification>) {
        self.items = items;
    }

    /// Sets `read_at` on exactly one notification.
    ///
    /// Returns `false` (and changes nothing) if the id is unknown or the
    /// notification was already read.
    pub fn mark_read(&mut self, id: i64, now: DateTime<Utc>) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) if n.read_at.is_none() => {
                n.read_at = Some(now);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read()).count()
    }

    /// Ids to send for "mark all as read", in list order
    pub fn unread_ids(&self) -> Vec<i64> {
        self.items
            .iter()
            .filter(|n| !n.is_read())
            .map(|n| n.id)
            .collect()
    }

    /// Newest first, at most `limit`
    pub fn latest(&self, limit: usize) -> Vec<Notification> {
        let mut sorted = self.items.clone();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted.truncate(limit);
        sorted
    }
}

/// Outcome of a "mark all as read" run.
///
/// Requests go out one by one. Each failure stands on its own and nothing
/// already marked locally is reverted. A 401 ends the run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkAllReport {
    pub confirmed: Vec<i64>,
    pub failed: Vec<(i64, ApiError)>,
    pub stopped: bool,
}

impl MarkAllReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one response. Returns `false` when no further request should be sent.
    pub fn record(&mut self, id: i64, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => self.confirmed.push(id),
            Err(err) => {
                let unauthorized = err.is_unauthorized();
                self.failed.push((id, err));
                if unauthorized {
                    self.stopped = true;
                    return false;
                }
            }
        }
        true
    }

    pub fn failed_ids(&self) -> Vec<i64> {
        self.failed.iter().map(|(id, _)| *id).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Folds responses in order, ignoring whatever follows a stop
    pub fn collect(outcomes: impl IntoIterator<Item = (i64, Result<(), ApiError>)>) -> Self {
        let mut report = Self::new();
        for (id, result) in outcomes {
            if !report.record(id, result) {
                break;
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::notifications::NotificationType;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 14, minute, 0).unwrap()
    }

    fn notification(id: i64, minute: u32, read: bool) -> Notification {
        Notification {
            id,
            title: format!("n{}", id),
            message: String::new(),
            notification_type: NotificationType::Info,
            created_at: at(minute),
            read_at: if read { Some(at(minute + 1)) } else { None },
        }
    }

    fn store() -> NotificationStore {
        let mut s = NotificationStore::new();
        s.replace(vec![
            notification(1, 0, false),
            notification(2, 10, true),
            notification(3, 20, false),
        ]);
        s
    }

    #[test]
    fn test_mark_read_touches_only_target() {
        let mut s = store();
        let before = s.clone();
        assert!(s.mark_read(3, at(30)));
        for (old, new) in before.items().iter().zip(s.items()) {
            if new.id == 3 {
                assert_eq!(new.read_at, Some(at(30)));
            } else {
                assert_eq!(old, new);
            }
        }
        assert_eq!(s.unread_count(), 1);
    }

    #[test]
    fn test_mark_read_is_once() {
        let mut s = store();
        assert!(!s.mark_read(2, at(45)));
        assert_eq!(s.items()[1].read_at, Some(at(11)));
        assert!(s.mark_read(1, at(45)));
        assert!(!s.mark_read(1, at(50)));
        assert_eq!(s.items()[0].read_at, Some(at(45)));
        assert!(!s.mark_read(404, at(50)));
    }

    #[test]
    fn test_replace_discards_local_state() {
        let mut s = store();
        s.mark_read(1, at(30));
        s.replace(vec![notification(9, 0, false)]);
        assert_eq!(s.items().len(), 1);
        assert_eq!(s.unread_ids(), vec![9]);
    }

    #[test]
    fn test_unread_ids_and_latest() {
        let s = store();
        assert_eq!(s.unread_ids(), vec![1, 3]);
        let latest: Vec<i64> = s.latest(2).iter().map(|n| n.id).collect();
        assert_eq!(latest, vec![3, 2]);
    }

    fn rejected() -> ApiError {
        ApiError::Rejected {
            status: 500,
            message: "boom".to_string(),
            field_errors: Default::default(),
        }
    }

    #[test]
    fn test_mark_all_failures_are_independent() {
        let mut s = NotificationStore::new();
        s.replace(vec![
            notification(1, 0, false),
            notification(2, 10, false),
            notification(3, 20, false),
        ]);
        let ids = s.unread_ids();
        for id in &ids {
            s.mark_read(*id, at(30));
        }

        let report = MarkAllReport::collect(vec![(1, Ok(())), (2, Err(rejected())), (3, Ok(()))]);

        assert_eq!(report.failed_ids(), vec![2]);
        assert_eq!(report.confirmed, vec![1, 3]);
        assert!(!report.stopped);
        assert!(!report.is_clean());
        assert_eq!(s.unread_count(), 0);
        assert!(s.items().iter().all(|n| n.read_at == Some(at(30))));
    }

    #[test]
    fn test_mark_all_stops_on_unauthorized() {
        let report = MarkAllReport::collect(vec![
            (1, Ok(())),
            (2, Err(ApiError::Unauthorized)),
            (3, Ok(())),
        ]);
        assert!(report.stopped);
        assert_eq!(report.confirmed, vec![1]);
        assert_eq!(report.failed_ids(), vec![2]);

        assert!(MarkAllReport::collect(vec![(5, Ok(()))]).is_clean());
    }

    #[test]
    fn test_remove() {
        let mut s = store();
        assert!(s.remove(2));
        assert!(!s.remove(2));
        assert_eq!(s.items().len(), 2);
    }
}
