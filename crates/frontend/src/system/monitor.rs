//! Background refresh of settings and notifications.
//!
//! While the signed-in shell is mounted, the monitor polls every 30 s:
//! settings first (maintenance flag), then the first page of notifications.
//! A maintenance flip produces exactly one toast.

use chrono::{DateTime, Utc};
use contracts::shared::api::ApiError;
use contracts::system::notifications::NotificationQuery;
use contracts::system::settings::{
    MaintenanceAlert, MaintenanceState, MaintenanceWatch, Setting,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::config::DEFAULT_PAGE_SIZE;
use crate::shared::date_utils::now;
use crate::shared::polling::{use_polling, PollGuard};
use crate::shared::toast::ToastService;
use crate::system::auth::context::AuthContext;
use crate::system::notifications::api as notifications_api;
use crate::system::notifications::center::NotificationCenter;
use crate::system::settings::api as settings_api;

#[derive(Clone, Copy)]
pub struct SiteMonitor {
    watch: StoredValue<MaintenanceWatch>,
    maintenance: RwSignal<MaintenanceState>,
    last_poll: RwSignal<Option<DateTime<Utc>>>,
    center: NotificationCenter,
    toasts: ToastService,
    auth: AuthContext,
    interval_ms: u32,
}

impl SiteMonitor {
    pub fn new(
        center: NotificationCenter,
        toasts: ToastService,
        auth: AuthContext,
        interval_ms: u32,
    ) -> Self {
        Self {
            watch: StoredValue::new(MaintenanceWatch::new()),
            maintenance: RwSignal::new(MaintenanceState::Unknown),
            last_poll: RwSignal::new(None),
            center,
            toasts,
            auth,
            interval_ms,
        }
    }

    pub fn maintenance(&self) -> MaintenanceState {
        self.maintenance.get()
    }

    pub fn last_poll(&self) -> Option<DateTime<Utc>> {
        self.last_poll.get()
    }

    /// Feeds a settings list to the watch and announces a transition
    pub fn observe_settings(&self, settings: &[Setting]) {
        let alert = self
            .watch
            .try_update_value(|w| w.observe_settings(settings))
            .flatten();
        if let Some(state) = self.watch.try_with_value(|w| w.state()) {
            if self.maintenance.get_untracked() != state {
                let _ = self.maintenance.try_set(state);
            }
        }
        match alert {
            Some(alert @ MaintenanceAlert::Enabled) => {
                log::warn!("maintenance mode switched ON");
                self.toasts.warning(alert.message());
            }
            Some(alert @ MaintenanceAlert::Disabled) => {
                log::info!("maintenance mode switched OFF");
                self.toasts.info(alert.message());
            }
            None => {}
        }
    }

    /// `true` when the poll should stop here
    fn handle_error(&self, what: &str, err: &ApiError) -> bool {
        if err.is_unauthorized() {
            self.auth.expire();
            return true;
        }
        log::warn!("poll: {} failed: {}", what, err);
        false
    }

    /// One settings + notifications round. With a guard, results that
    /// arrive after the task stopped are dropped.
    pub async fn poll_once(self, guard: Option<PollGuard>) {
        let live = |guard: &Option<PollGuard>| guard.as_ref().map_or(true, |g| g.is_live());

        if !self.auth.is_authenticated_untracked() {
            return;
        }
        log::debug!("poll: tick");

        let settings = settings_api::fetch_all_settings().await;
        if !live(&guard) {
            return;
        }
        match settings {
            Ok(list) => self.observe_settings(&list),
            Err(e) => {
                if self.handle_error("settings", &e) {
                    return;
                }
            }
        }

        let page = notifications_api::fetch_notifications(&NotificationQuery::first_page(
            DEFAULT_PAGE_SIZE,
        ))
        .await;
        if !live(&guard) {
            return;
        }
        match page {
            Ok(page) => self.center.replace_recent(page.data),
            Err(e) => {
                if self.handle_error("notifications", &e) {
                    return;
                }
            }
        }

        let _ = self.last_poll.try_set(Some(now()));
    }

    /// Poll right away, outside the regular schedule
    pub fn refresh_now(&self) {
        spawn_local(self.poll_once(None));
    }
}

pub fn use_monitor() -> SiteMonitor {
    use_context::<SiteMonitor>().expect("SiteMonitor not provided in context")
}

/// Runs the monitor for as long as it is mounted
#[component]
pub fn MonitorHost() -> impl IntoView {
    let monitor = use_monitor();
    use_polling(monitor.interval_ms, move |guard| monitor.poll_once(Some(guard)));
}
