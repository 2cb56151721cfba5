use crate::domain::a001_category::ui::tree::CategoryTree;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireAuth;
use crate::system::monitor::MonitorHost;
use crate::system::notifications::ui::list::NotificationList;
use crate::system::pages::home::HomePage;
use crate::system::pages::login::LoginPage;
use crate::system::settings::ui::list::SettingsPage;
use contracts::system::auth::gate::{self, GateDecision};
use leptos::prelude::*;
use leptos_router::components::{Outlet, ParentRoute, Route, Router, Routes};
use leptos_router::hooks::{use_location, use_navigate, use_query_map};
use leptos_router::path;

/// Keeps the current URL consistent with the session: anonymous visitors
/// of protected sections go to login, signed-in admins leave the login page.
#[component]
fn RouteGate() -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let query = use_query_map();
    let navigate = use_navigate();

    Effect::new(move |_| {
        let path = location.pathname.get();
        let signed_in = auth.is_authenticated();
        match gate::decide(&path, signed_in) {
            GateDecision::Allow => {}
            GateDecision::RedirectToLogin { redirect } => {
                log::info!("gate: {} needs a session", redirect);
                navigate(&gate::login_url(&redirect), Default::default());
            }
            GateDecision::RedirectHome => {
                let redirect = query.with_untracked(|q| q.get("redirect"));
                navigate(&gate::post_login_target(redirect.as_deref()), Default::default());
            }
        }
    });
}

#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <RequireAuth>
            <MonitorHost />
            <Shell
                left=|| view! { <Sidebar /> }.into_any()
                center=|| view! { <Outlet /> }.into_any()
            />
        </RequireAuth>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--not-found">
            <h2>"Page not found"</h2>
            <a href="/">"Back to the dashboard"</a>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <RouteGate />
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/login") view=LoginPage />
                <ParentRoute path=path!("") view=MainLayout>
                    <Route path=path!("") view=HomePage />
                    <Route path=path!("categories") view=CategoryTree />
                    <Route path=path!("notifications") view=NotificationList />
                    <Route path=path!("settings") view=SettingsPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
