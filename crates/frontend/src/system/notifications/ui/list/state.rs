use contracts::shared::api::Page;
use contracts::system::notifications::{
    Notification, NotificationQuery, NotificationType, ReadFilter,
};
use leptos::prelude::*;

use crate::shared::config::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationListState {
    pub query: NotificationQuery,
    pub last_page: u32,
    pub total: u64,
    pub is_loaded: bool,
}

impl Default for NotificationListState {
    fn default() -> Self {
        Self {
            query: NotificationQuery::first_page(DEFAULT_PAGE_SIZE),
            last_page: 1,
            total: 0,
            is_loaded: false,
        }
    }
}

impl NotificationListState {
    /// Filter changes start again from page 1
    pub fn set_type(&mut self, value: Option<NotificationType>) {
        self.query.notification_type = value;
        self.query.page = 1;
    }

    pub fn set_read(&mut self, value: Option<ReadFilter>) {
        self.query.read = value;
        self.query.page = 1;
    }

    pub fn set_page_size(&mut self, per_page: u32) {
        self.query.per_page = per_page;
        self.query.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.query.page = page.clamp(1, self.last_page.max(1));
    }

    /// Takes the paging numbers from a response; the items go to the center
    pub fn apply_page(&mut self, page: &Page<Notification>) {
        self.query.page = page.current_page.max(1);
        self.last_page = page.last_page.max(1);
        self.total = page.total;
        self.is_loaded = true;
    }
}

/// `<select>` value for the read filter
pub fn read_filter_value(filter: Option<ReadFilter>) -> &'static str {
    match filter {
        None => "",
        Some(ReadFilter::Read) => "read",
        Some(ReadFilter::Unread) => "unread",
    }
}

pub fn parse_read_filter(value: &str) -> Option<ReadFilter> {
    match value {
        "read" => Some(ReadFilter::Read),
        "unread" => Some(ReadFilter::Unread),
        _ => None,
    }
}

pub fn create_state() -> RwSignal<NotificationListState> {
    RwSignal::new(NotificationListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_reset_page() {
        let mut s = NotificationListState {
            last_page: 9,
            ..Default::default()
        };
        s.set_page(4);
        assert_eq!(s.query.page, 4);
        s.set_type(Some(NotificationType::Warning));
        assert_eq!(s.query.page, 1);
        s.set_page(4);
        s.set_read(Some(ReadFilter::Unread));
        assert_eq!(s.query.page, 1);
    }

    #[test]
    fn test_page_is_clamped() {
        let mut s = NotificationListState {
            last_page: 3,
            ..Default::default()
        };
        s.set_page(10);
        assert_eq!(s.query.page, 3);
        s.set_page(0);
        assert_eq!(s.query.page, 1);
    }

    #[test]
    fn test_apply_page() {
        let mut s = NotificationListState::default();
        s.apply_page(&Page {
            data: vec![],
            current_page: 2,
            last_page: 5,
            per_page: 25,
            total: 110,
        });
        assert_eq!((s.query.page, s.last_page, s.total), (2, 5, 110));
        assert!(s.is_loaded);
    }

    #[test]
    fn test_read_filter_select_values() {
        for f in [None, Some(ReadFilter::Read), Some(ReadFilter::Unread)] {
            assert_eq!(parse_read_filter(read_filter_value(f)), f);
        }
    }
}
