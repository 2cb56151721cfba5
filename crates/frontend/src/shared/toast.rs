//! Transient messages stacked in the corner of the screen.

use contracts::shared::api::ApiError;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::shared::icons::icon;
use crate::system::auth::context::AuthContext;

/// Oldest toasts drop off beyond this
pub const MAX_VISIBLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "toast toast--info",
            ToastLevel::Success => "toast toast--success",
            ToastLevel::Warning => "toast toast--warning",
            ToastLevel::Error => "toast toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(Toast {
            id,
            level,
            message: message.into(),
        });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.items.retain(|t| t.id != id);
    }
}

#[derive(Clone, Copy)]
pub struct ToastService {
    queue: RwSignal<ToastQueue>,
    auth: AuthContext,
    ttl_ms: u32,
}

impl ToastService {
    pub fn new(auth: AuthContext, ttl_ms: u32) -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
            auth,
            ttl_ms,
        }
    }

    pub fn show(&self, level: ToastLevel, message: impl Into<String>) {
        let message = message.into();
        let Some(id) = self.queue.try_update(|q| q.push(level, message)) else {
            return;
        };

        let queue = self.queue;
        let ttl = self.ttl_ms;
        spawn_local(async move {
            TimeoutFuture::new(ttl).await;
            let _ = queue.try_update(|q| q.dismiss(id));
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastLevel::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(ToastLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastLevel::Error, message);
    }

    /// Reports a failed call. An expired session also signs the user out.
    pub fn api_error(&self, context: &str, err: &ApiError) {
        log::warn!("{}: {}", context, err);
        if err.is_unauthorized() {
            self.auth.expire();
        }
        self.error(format!("{}: {}", context, err));
    }

    pub fn dismiss(&self, id: Uuid) {
        self.queue.update(|q| q.dismiss(id));
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided in context")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.queue.get().items().to_vec()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.level.class() role="status">
                            <span class="toast__message">{toast.message}</span>
                            <button
                                class="toast__close"
                                title="Dismiss"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_caps_visible() {
        let mut q = ToastQueue::default();
        for i in 0..(MAX_VISIBLE + 2) {
            q.push(ToastLevel::Info, format!("m{}", i));
        }
        assert_eq!(q.items().len(), MAX_VISIBLE);
        assert_eq!(q.items()[0].message, "m2");
    }

    #[test]
    fn test_dismiss_by_id() {
        let mut q = ToastQueue::default();
        let a = q.push(ToastLevel::Success, "saved");
        let b = q.push(ToastLevel::Error, "failed");
        q.dismiss(a);
        assert_eq!(q.items().len(), 1);
        assert_eq!(q.items()[0].id, b);
        q.dismiss(a);
        assert_eq!(q.items().len(), 1);
    }
}
