use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::shared::toast::use_toasts;
use crate::system::monitor::use_monitor;
use crate::system::settings::api;
use contracts::system::settings::{
    bool_value, maintenance_flag, parse_bool, Setting, SettingType, MAINTENANCE_MODE_KEY,
};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Checks an edited value against the setting's type and returns what to send
pub fn prepare_value(setting_type: SettingType, draft: &str) -> Result<String, String> {
    match setting_type {
        SettingType::Text | SettingType::Html => Ok(draft.to_string()),
        SettingType::Float => draft
            .trim()
            .parse::<f64>()
            .map(|_| draft.trim().to_string())
            .map_err(|_| "Enter a number".to_string()),
        SettingType::Bool => parse_bool(draft)
            .map(bool_value)
            .ok_or_else(|| "Expected on or off".to_string()),
    }
}

fn type_label(t: SettingType) -> &'static str {
    match t {
        SettingType::Text => "text",
        SettingType::Html => "html",
        SettingType::Float => "number",
        SettingType::Bool => "switch",
    }
}

#[component]
fn SettingRow(setting: Setting, on_saved: Callback<(String, String)>) -> impl IntoView {
    let toasts = use_toasts();
    let key = StoredValue::new(setting.key.clone());
    let setting_type = setting.setting_type;
    let original = RwSignal::new(setting.value.clone());
    let draft = RwSignal::new(setting.value.clone());
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let dirty = move || draft.with(|d| original.with(|o| d != o));

    let save = move |_: leptos::ev::MouseEvent| {
        let value = match prepare_value(setting_type, &draft.get_untracked()) {
            Ok(v) => v,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        set_error.set(None);
        set_saving.set(true);
        let key = key.get_value();
        spawn_local(async move {
            match api::update_setting(&key, value.clone()).await {
                Ok(()) => {
                    let _ = original.try_set(value.clone());
                    let _ = draft.try_set(value.clone());
                    toasts.success(format!("Saved {}", key));
                    on_saved.run((key, value));
                }
                Err(e) => toasts.api_error(&format!("Saving {} failed", key), &e),
            }
            let _ = set_saving.try_set(false);
        });
    };

    let editor = match setting_type {
        SettingType::Bool => view! {
            <input
                type="checkbox"
                prop:checked=move || draft.with(|d| parse_bool(d).unwrap_or(false))
                on:change=move |ev| draft.set(bool_value(event_target_checked(&ev)))
            />
        }
        .into_any(),
        SettingType::Float => view! {
            <input
                type="number"
                step="any"
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
        }
        .into_any(),
        SettingType::Text | SettingType::Html => view! {
            <textarea
                rows=if setting_type == SettingType::Html { "4" } else { "1" }
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
    };

    view! {
        <TableRow>
            <TableCell>
                <code>{setting.key.clone()}</code>
            </TableCell>
            <TableCell>{type_label(setting_type)}</TableCell>
            <TableCell>
                {editor}
                {move || error.get().map(|e| view! { <div class="field-error">{e}</div> })}
            </TableCell>
            <TableCell>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=save
                    disabled=Signal::derive(move || saving.get() || !dirty())
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </TableCell>
        </TableRow>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let toasts = use_toasts();
    let monitor = use_monitor();

    let settings = RwSignal::new(Vec::<Setting>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (filter_text, set_filter_text) = signal(String::new());
    let (toggling, set_toggling) = signal(false);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_all_settings().await {
                Ok(list) => {
                    log!("⚙️ settings loaded: {}", list.len());
                    monitor.observe_settings(&list);
                    let _ = settings.try_set(list);
                }
                Err(e) => {
                    if e.is_unauthorized() {
                        toasts.api_error("Loading settings failed", &e);
                    }
                    let _ = set_error.try_set(Some(e.to_string()));
                }
            }
            let _ = set_loading.try_set(false);
        });
    };

    let on_saved = Callback::new(move |(key, value): (String, String)| {
        settings.update(|list| {
            if let Some(s) = list.iter_mut().find(|s| s.key == key) {
                s.value = value;
            }
        });
        if key == MAINTENANCE_MODE_KEY {
            monitor.refresh_now();
        }
    });

    let maintenance_on = move || settings.with(|list| maintenance_flag(list));

    let toggle_maintenance = move |_: leptos::ev::MouseEvent| {
        let next = !maintenance_on().unwrap_or(false);
        set_toggling.set(true);
        spawn_local(async move {
            match api::update_setting(MAINTENANCE_MODE_KEY, bool_value(next)).await {
                Ok(()) => on_saved.run((MAINTENANCE_MODE_KEY.to_string(), bool_value(next))),
                Err(e) => toasts.api_error("Switching maintenance mode failed", &e),
            }
            let _ = set_toggling.try_set(false);
        });
    };

    let visible = move || {
        let needle = filter_text.get().trim().to_lowercase();
        settings.with(|list| {
            list.iter()
                .filter(|s| needle.is_empty() || s.key.to_lowercase().contains(&needle))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    load();

    view! {
        <PageFrame page_id="settings--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h2 class="page__title">"Settings"</h2>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=loading
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{icon("alert")}<span>{err}</span></div>
                })}

                {move || maintenance_on().map(|on| view! {
                    <div class=if on { "maintenance-card maintenance-card--on" } else { "maintenance-card" }>
                        <div>
                            <strong>"Maintenance mode"</strong>
                            <div class="maintenance-card__hint">
                                {if on {
                                    "The storefront is closed to customers."
                                } else {
                                    "The storefront is open."
                                }}
                            </div>
                        </div>
                        <Button
                            appearance=if on { ButtonAppearance::Secondary } else { ButtonAppearance::Primary }
                            on_click=toggle_maintenance
                            disabled=toggling
                        >
                            {if on { "Turn off" } else { "Turn on" }}
                        </Button>
                    </div>
                })}

                <div class="search-box">
                    <input
                        type="text"
                        placeholder="Filter by key..."
                        prop:value=move || filter_text.get()
                        on:input=move |ev| set_filter_text.set(event_target_value(&ev))
                    />
                </div>

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell attr:style="width: 30%;">"Key"</TableHeaderCell>
                            <TableHeaderCell attr:style="width: 90px;">"Type"</TableHeaderCell>
                            <TableHeaderCell>"Value"</TableHeaderCell>
                            <TableHeaderCell attr:style="width: 110px;"></TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=visible
                            key=|s| (s.key.clone(), s.value.clone())
                            children=move |s| view! { <SettingRow setting=s on_saved=on_saved /> }
                        />
                    </TableBody>
                </Table>

                <Show when=move || loading.get() && settings.with(|l| l.is_empty())>
                    <div class="table-empty"><Spinner /></div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_value() {
        assert_eq!(prepare_value(SettingType::Float, " 12.5 "), Ok("12.5".to_string()));
        assert!(prepare_value(SettingType::Float, "12,5").is_err());
        assert_eq!(prepare_value(SettingType::Bool, "true"), Ok("1".to_string()));
        assert_eq!(prepare_value(SettingType::Bool, "off"), Ok("0".to_string()));
        assert!(prepare_value(SettingType::Bool, "maybe").is_err());
        assert_eq!(
            prepare_value(SettingType::Html, " <p>x</p> "),
            Ok(" <p>x</p> ".to_string())
        );
    }
}
