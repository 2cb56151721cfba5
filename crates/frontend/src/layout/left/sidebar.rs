//! Sidebar navigation.

use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[derive(Clone, Copy, Debug, PartialEq)]
struct MenuItem {
    href: &'static str,
    label: &'static str,
    icon: &'static str,
}

const MENU: &[MenuItem] = &[
    MenuItem { href: "/", label: "Dashboard", icon: "dashboard" },
    MenuItem { href: "/categories", label: "Categories", icon: "categories" },
    MenuItem { href: "/notifications", label: "Notifications", icon: "bell" },
    MenuItem { href: "/settings", label: "Settings", icon: "settings" },
];

/// `/` only matches itself, every other item matches its section
fn is_active(href: &str, path: &str) -> bool {
    if href == "/" {
        path == "/"
    } else {
        path == href || path.starts_with(&format!("{}/", href))
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();

    view! {
        <nav class="app-sidebar__content">
            {MENU
                .iter()
                .map(|item| {
                    let item = *item;
                    view! {
                        <A href=item.href>
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=move || {
                                    location.pathname.with(|p| is_active(item.href, p))
                                }
                                style:padding-left="12px"
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(item.icon)}
                                    <span>{item.label}</span>
                                </div>
                            </div>
                        </A>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/settings"));
        assert!(is_active("/settings", "/settings"));
        assert!(is_active("/categories", "/categories/12"));
        assert!(!is_active("/settings", "/settingsx"));
    }
}
