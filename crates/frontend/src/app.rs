use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::config::AppConfig;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::{use_auth, AuthProvider};
use crate::system::monitor::SiteMonitor;
use crate::system::notifications::center::NotificationCenter;
use leptos::prelude::*;

/// Services that need the auth context
#[component]
fn AppServices() -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig not provided in context");
    let auth = use_auth();

    let toasts = ToastService::new(auth, config.toast_ttl_ms);
    let center = NotificationCenter::new(toasts);
    let monitor = SiteMonitor::new(center, toasts, auth, config.poll_interval_ms);

    provide_context(toasts);
    provide_context(center);
    provide_context(monitor);

    view! {
        <AppRoutes />
        <ToastHost />
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppConfig::load());
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <AppServices />
        </AuthProvider>
    }
}
