//! TopHeader component - application top navigation bar.
//!
//! Contains the sidebar toggle, the brand, the maintenance badge, the
//! notification bell and the signed-in user with logout.

use crate::layout::global_context::use_global_context;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::monitor::use_monitor;
use crate::system::notifications::ui::bell::NotificationBell;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let auth = use_auth();
    let monitor = use_monitor();

    let toggle_sidebar = move |_| {
        ctx.toggle_left();
    };

    let logout = move |_| {
        spawn_local(auth.logout());
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Store Admin"</span>
            </div>

            <div class="top-header__actions">
                <Show when=move || monitor.maintenance().is_on()>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>
                        "Maintenance mode"
                    </Badge>
                </Show>

                <NotificationBell />

                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth
                            .user()
                            .map(|u| u.display_name().to_string())
                            .unwrap_or_else(|| "Admin".to_string())}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
