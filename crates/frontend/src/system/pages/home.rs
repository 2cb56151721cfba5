use crate::domain::a001_category::api as categories_api;
use crate::shared::date_utils::{format_datetime, format_relative, now};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::system::monitor::use_monitor;
use crate::system::notifications::center::use_notifications;
use contracts::system::settings::MaintenanceState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

fn maintenance_label(state: MaintenanceState) -> (&'static str, BadgeColor) {
    match state {
        MaintenanceState::Unknown => ("Unknown", BadgeColor::Subtle),
        MaintenanceState::Off => ("Storefront open", BadgeColor::Success),
        MaintenanceState::On => ("Maintenance mode", BadgeColor::Warning),
    }
}

#[component]
fn SummaryCard(title: &'static str, icon_name: &'static str, href: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="summary-card">
            <div class="summary-card__header">
                {icon(icon_name)}
                <span>{title}</span>
            </div>
            <div class="summary-card__body">{children()}</div>
            <A href=href>"Open"</A>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let monitor = use_monitor();
    let center = use_notifications();
    let (category_count, set_category_count) = signal::<Option<usize>>(None);

    spawn_local(async move {
        match categories_api::fetch_categories().await {
            Ok(list) => {
                let _ = set_category_count.try_set(Some(list.len()));
            }
            Err(e) => log::warn!("dashboard: categories failed: {}", e),
        }
    });

    view! {
        <PageFrame page_id="home--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h2 class="page__title">"Dashboard"</h2>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| monitor.refresh_now()>
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content summary-grid">
                <SummaryCard title="Categories" icon_name="categories" href="/categories">
                    <span class="summary-card__value">
                        {move || category_count.get().map(|n| n.to_string()).unwrap_or_else(|| "…".to_string())}
                    </span>
                </SummaryCard>

                <SummaryCard title="Unread notifications" icon_name="bell" href="/notifications">
                    <span class="summary-card__value">{move || center.unread_count()}</span>
                </SummaryCard>

                <SummaryCard title="Storefront" icon_name="settings" href="/settings">
                    {move || {
                        let (label, color) = maintenance_label(monitor.maintenance());
                        view! {
                            <Badge appearance=BadgeAppearance::Tint color=color>{label}</Badge>
                        }
                    }}
                    <div class="summary-card__hint">
                        {move || match monitor.last_poll() {
                            Some(at) => view! {
                                <span title=format_datetime(&at)>
                                    "Checked " {format_relative(&at, &now())}
                                </span>
                            }
                            .into_any(),
                            None => view! { <span>"Not checked yet"</span> }.into_any(),
                        }}
                    </div>
                </SummaryCard>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maintenance_label() {
        assert_eq!(maintenance_label(MaintenanceState::On).0, "Maintenance mode");
        assert_eq!(maintenance_label(MaintenanceState::Off).0, "Storefront open");
        assert_eq!(maintenance_label(MaintenanceState::Unknown).0, "Unknown");
    }
}
