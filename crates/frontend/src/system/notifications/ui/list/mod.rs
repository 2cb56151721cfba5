pub mod state;

use self::state::{create_state, parse_read_filter, read_filter_value};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_toasts;
use crate::system::notifications::api;
use crate::system::notifications::center::use_notifications;
use contracts::system::notifications::{NotificationQuery, NotificationType};
use leptos::ev;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn type_badge(t: NotificationType) -> AnyView {
    let color = match t {
        NotificationType::Info => BadgeColor::Informative,
        NotificationType::Success => BadgeColor::Success,
        NotificationType::Warning => BadgeColor::Warning,
        NotificationType::Error => BadgeColor::Danger,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{t.label()}</Badge> }.into_any()
}

#[component]
pub fn NotificationList() -> impl IntoView {
    let center = use_notifications();
    let toasts = use_toasts();

    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    // Only the latest request may write results
    let seq = StoredValue::new(0u64);

    let load = move |query: NotificationQuery| {
        let ticket = seq.with_value(|n| n + 1);
        seq.set_value(ticket);
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_notifications(&query).await;
            if seq.try_with_value(|n| *n != ticket).unwrap_or(true) {
                return;
            }
            match result {
                Ok(page) => {
                    log!("🔔 notifications page {}/{}", page.current_page, page.last_page);
                    let _ = state.try_update(|s| s.apply_page(&page));
                    center.replace_page(page.data);
                }
                Err(e) => {
                    if e.is_unauthorized() {
                        toasts.api_error("Loading notifications failed", &e);
                    }
                    let _ = set_error.try_set(Some(e.to_string()));
                }
            }
            let _ = set_loading.try_set(false);
        });
    };

    let query = Memo::new(move |_| state.with(|s| s.query.clone()));
    Effect::new(move |_| load(query.get()));

    let unread_on_page = move || center.page().with(|s| s.unread_count());

    view! {
        <PageFrame page_id="notifications--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h2 class="page__title">"Notifications"</h2>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| center.mark_all_read()
                        disabled=Signal::derive(move || unread_on_page() == 0 && center.unread_count() == 0)
                    >
                        {icon("check-all")}
                        " Mark all as read"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load(query.get_untracked())
                        disabled=loading
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-bar">
                    <label>
                        "Type "
                        <select
                            prop:value=move || state.with(|s| s.query.notification_type.map(|t| t.as_str()).unwrap_or(""))
                            on:change=move |ev| {
                                let value = NotificationType::parse(&event_target_value(&ev));
                                state.update(|s| s.set_type(value));
                            }
                        >
                            <option value="">"All"</option>
                            {NotificationType::ALL.iter().map(|t| view! {
                                <option value=t.as_str()>{t.label()}</option>
                            }).collect_view()}
                        </select>
                    </label>
                    <label>
                        "Status "
                        <select
                            prop:value=move || state.with(|s| read_filter_value(s.query.read))
                            on:change=move |ev| {
                                let value = parse_read_filter(&event_target_value(&ev));
                                state.update(|s| s.set_read(value));
                            }
                        >
                            <option value="">"All"</option>
                            <option value="unread">"Unread"</option>
                            <option value="read">"Read"</option>
                        </select>
                    </label>
                    <PaginationControls
                        current_page=Signal::derive(move || state.with(|s| s.query.page))
                        last_page=Signal::derive(move || state.with(|s| s.last_page))
                        total_count=Signal::derive(move || state.with(|s| s.total))
                        page_size=Signal::derive(move || state.with(|s| s.query.per_page))
                        on_page_change=Callback::new(move |page| state.update(|s| s.set_page(page)))
                        on_page_size_change=Callback::new(move |size| state.update(|s| s.set_page_size(size)))
                    />
                </div>

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{icon("alert")}<span>{err}</span></div>
                })}

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell attr:style="width: 110px;">"Type"</TableHeaderCell>
                            <TableHeaderCell>"Title"</TableHeaderCell>
                            <TableHeaderCell>"Message"</TableHeaderCell>
                            <TableHeaderCell attr:style="width: 170px;">"Created"</TableHeaderCell>
                            <TableHeaderCell attr:style="width: 100px; text-align: center;">"Actions"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            if loading.get() && !state.with(|s| s.is_loaded) {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="5" attr:style="padding: 40px; text-align: center;">
                                            <Spinner />
                                        </TableCell>
                                    </TableRow>
                                }.into_any();
                            }
                            let items = center.page().with(|s| s.items().to_vec());
                            if items.is_empty() {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan="5" attr:style="padding: 40px; text-align: center;">
                                            "No notifications"
                                        </TableCell>
                                    </TableRow>
                                }.into_any();
                            }
                            items.into_iter().map(|n| {
                                let id = n.id;
                                let is_read = n.is_read();
                                let row_class = if is_read { "notification-row" } else { "notification-row notification-row--unread" };
                                view! {
                                    <TableRow attr:class=row_class>
                                        <TableCell>{type_badge(n.notification_type)}</TableCell>
                                        <TableCell>{n.title}</TableCell>
                                        <TableCell>{n.message}</TableCell>
                                        <TableCell>{format_datetime(&n.created_at)}</TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {(!is_read).then(|| view! {
                                                    <Button
                                                        appearance=ButtonAppearance::Transparent
                                                        on_click=move |e: ev::MouseEvent| {
                                                            e.stop_propagation();
                                                            center.mark_read(id);
                                                        }
                                                    >
                                                        {icon("check")}
                                                    </Button>
                                                })}
                                                <Button
                                                    appearance=ButtonAppearance::Transparent
                                                    on_click=move |e: ev::MouseEvent| {
                                                        e.stop_propagation();
                                                        center.delete(id);
                                                    }
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view().into_any()
                        }}
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}
