//! Shared notification state.
//!
//! Two local lists exist: `recent` (refreshed by the site monitor, shown in
//! the header bell) and `page` (whatever the notifications page has loaded).
//! Actions apply to both so the bell and the page never disagree.

use contracts::system::notifications::{MarkAllReport, Notification, NotificationStore};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::date_utils::now;
use crate::shared::toast::ToastService;

#[derive(Clone, Copy)]
pub struct NotificationCenter {
    recent: RwSignal<NotificationStore>,
    page: RwSignal<NotificationStore>,
    toasts: ToastService,
}

impl NotificationCenter {
    pub fn new(toasts: ToastService) -> Self {
        Self {
            recent: RwSignal::new(NotificationStore::new()),
            page: RwSignal::new(NotificationStore::new()),
            toasts,
        }
    }

    pub fn recent(&self) -> RwSignal<NotificationStore> {
        self.recent
    }

    pub fn page(&self) -> RwSignal<NotificationStore> {
        self.page
    }

    /// Poll result: replaces the bell list wholesale
    pub fn replace_recent(&self, items: Vec<Notification>) {
        let _ = self.recent.try_update(|store| store.replace(items));
    }

    pub fn replace_page(&self, items: Vec<Notification>) {
        let _ = self.page.try_update(|store| store.replace(items));
    }

    pub fn unread_count(&self) -> usize {
        self.recent.with(|store| store.unread_count())
    }

    /// Unread ids across both lists, bell first, without duplicates
    fn unread_ids(&self) -> Vec<i64> {
        let mut ids = self.recent.with_untracked(|s| s.unread_ids());
        for id in self.page.with_untracked(|s| s.unread_ids()) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    fn apply_read(&self, id: i64) -> bool {
        let at = now();
        let in_recent = self.recent.try_update(|s| s.mark_read(id, at)).unwrap_or(false);
        let in_page = self.page.try_update(|s| s.mark_read(id, at)).unwrap_or(false);
        in_recent || in_page
    }

    /// Marks locally first, then tells the server. A failed request is
    /// reported but the local mark stays.
    pub fn mark_read(&self, id: i64) {
        if !self.apply_read(id) {
            return;
        }
        let this = *self;
        spawn_local(async move {
            if let Err(e) = api::mark_read(id).await {
                this.toasts.api_error("Marking notification as read failed", &e);
            }
        });
    }

    /// One request per unread notification. Each failure is reported on its
    /// own; successful marks are kept.
    pub fn mark_all_read(&self) {
        let ids = self.unread_ids();
        if ids.is_empty() {
            return;
        }
        for id in &ids {
            self.apply_read(*id);
        }
        let this = *self;
        spawn_local(async move {
            let mut report = MarkAllReport::new();
            for id in ids {
                let result = api::mark_read(id).await;
                if let Err(e) = &result {
                    this.toasts
                        .api_error(&format!("Marking notification #{} as read failed", id), e);
                }
                if !report.record(id, result) {
                    break;
                }
            }
            if report.is_clean() {
                this.toasts.success("All notifications marked as read");
            } else {
                log::warn!("mark all: failed for {:?}", report.failed_ids());
            }
        });
    }

    /// Removed locally only after the server confirms
    pub fn delete(&self, id: i64) {
        let this = *self;
        spawn_local(async move {
            match api::delete_notification(id).await {
                Ok(()) => {
                    let _ = this.recent.try_update(|s| s.remove(id));
                    let _ = this.page.try_update(|s| s.remove(id));
                    this.toasts.info("Notification deleted");
                }
                Err(e) => this.toasts.api_error("Deleting notification failed", &e),
            }
        });
    }
}

pub fn use_notifications() -> NotificationCenter {
    use_context::<NotificationCenter>().expect("NotificationCenter not provided in context")
}
