use leptos::prelude::*;

use super::context::use_auth;

/// Renders children only while a session exists.
/// Redirection itself is done by the route gate.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.is_authenticated()
            fallback=|| view! { <div class="auth-pending">"Redirecting to sign in..."</div> }
        >
            {children()}
        </Show>
    }
}
