use contracts::system::notifications::Notification;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::config::BELL_PREVIEW_LIMIT;
use crate::shared::date_utils::{format_relative, now};
use crate::shared::icons::icon;
use crate::system::notifications::center::use_notifications;

/// Text on the bell badge; large counts are capped
pub fn badge_label(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        1..=99 => Some(unread.to_string()),
        _ => Some("99+".to_string()),
    }
}

/// Header bell: unread count plus a dropdown with the latest items
#[component]
pub fn NotificationBell() -> impl IntoView {
    let center = use_notifications();
    let (open, set_open) = signal(false);

    let latest = move || -> Vec<Notification> {
        center.recent().with(|store| store.latest(BELL_PREVIEW_LIMIT))
    };

    view! {
        <div class="bell">
            <button
                class="top-header__icon-btn"
                title="Notifications"
                on:click=move |_| set_open.update(|v| *v = !*v)
            >
                {icon("bell")}
                {move || badge_label(center.unread_count()).map(|label| view! {
                    <span class="bell__badge">{label}</span>
                })}
            </button>

            <Show when=move || open.get()>
                <div class="bell__dropdown">
                    <div class="bell__header">
                        <span>"Notifications"</span>
                        <button
                            class="btn-link"
                            disabled=move || center.unread_count() == 0
                            on:click=move |_| center.mark_all_read()
                        >
                            "Mark all as read"
                        </button>
                    </div>
                    {move || {
                        let items = latest();
                        if items.is_empty() {
                            return view! { <div class="bell__empty">"No notifications"</div> }.into_any();
                        }
                        let current = now();
                        items
                            .into_iter()
                            .map(|n| {
                                let id = n.id;
                                let class = format!(
                                    "bell__item bell__item--{}{}",
                                    n.notification_type.as_str(),
                                    if n.is_read() { "" } else { " bell__item--unread" },
                                );
                                view! {
                                    <div class=class on:click=move |_| center.mark_read(id)>
                                        <div class="bell__title">{n.title.clone()}</div>
                                        <div class="bell__message">{n.message.clone()}</div>
                                        <div class="bell__time">{format_relative(&n.created_at, &current)}</div>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                    <div class="bell__footer" on:click=move |_| set_open.set(false)>
                        <A href="/notifications">"View all"</A>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_label() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(7), Some("7".to_string()));
        assert_eq!(badge_label(150), Some("99+".to_string()));
    }
}
