use contracts::shared::api::ApiError;
use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::session::browser_session;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

/// Reactive view of the session. The stored token is the source of truth;
/// this mirrors it for the UI.
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
}

impl AuthContext {
    /// Starts from whatever token the browser already holds
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(AuthState {
                token: browser_session().token(),
                user: None,
            }),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.token.is_some())
    }

    pub fn is_authenticated_untracked(&self) -> bool {
        self.state.with_untracked(|s| s.token.is_some())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.with(|s| s.user.clone())
    }

    pub fn sign_in(&self, response: LoginResponse) {
        browser_session().set_token(&response.token);
        log::info!("signed in as {}", response.user.display_name());
        self.state.set(AuthState {
            token: Some(response.token),
            user: Some(response.user),
        });
    }

    /// Drops the session locally (401 or logout)
    pub fn expire(&self) {
        browser_session().clear();
        if self.is_authenticated_untracked() {
            log::warn!("session ended");
        }
        self.state.set(AuthState::default());
    }

    fn set_user(&self, user: UserInfo) {
        self.state.update(|s| s.user = Some(user));
    }

    /// Validates a restored token by fetching the current user
    pub fn restore(&self) {
        if !self.is_authenticated_untracked() {
            return;
        }
        let this = *self;
        spawn_local(async move {
            match api::me().await {
                Ok(user) => this.set_user(user),
                Err(ApiError::Unauthorized) => this.expire(),
                Err(e) => log::warn!("could not load current user: {}", e),
            }
        });
    }

    /// Best-effort server logout, then local clear
    pub async fn logout(self) {
        if let Err(e) = api::logout().await {
            log::warn!("logout request failed: {}", e);
        }
        self.expire();
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new();
    provide_context(auth);
    auth.restore();

    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}
