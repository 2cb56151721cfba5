use super::super::details::{CategoryForm, FormMode};
use crate::domain::a001_category::api;
use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_TREE;
use crate::shared::toast::use_toasts;
use contracts::domain::a001_category::aggregate::CategoryId;
use contracts::domain::a001_category::reorder::{ReorderController, ReorderOutcome};
use contracts::domain::a001_category::tree::{
    build_tree, count, filter_tree, find, sort_by_orders, CategoryNode,
};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;
use thaw::*;
use web_sys::DragEvent;

/// Signals and callbacks shared by every row
#[derive(Clone, Copy)]
struct RowCtx {
    tree: RwSignal<Vec<CategoryNode>>,
    controller: RwSignal<ReorderController>,
    expanded: RwSignal<HashSet<CategoryId>>,
    drag_enabled: Signal<bool>,
    on_drop: Callback<CategoryId>,
    on_add_child: Callback<CategoryId>,
    on_edit: Callback<CategoryId>,
    on_delete: Callback<CategoryId>,
}

impl RowCtx {
    fn row_class(&self, id: CategoryId) -> String {
        let mut class = String::from("tree-row");
        self.controller.with(|c| {
            if c.dragging() == Some(id) {
                class.push_str(" tree-row--dragging");
            }
            if c.hovering() == Some(id) {
                class.push_str(" tree-row--drop-target");
            }
            if c.is_reordering(id) {
                class.push_str(" tree-row--saving");
            }
        });
        class
    }
}

fn render_rows(node: CategoryNode, level: usize, ctx: RowCtx, filter: String) -> Vec<AnyView> {
    let mut rows: Vec<AnyView> = Vec::new();

    let id = node.id();
    let has_children = node.has_children();
    let filtering = !filter.trim().is_empty();
    let expanded = filtering || ctx.expanded.with_untracked(|set| set.contains(&id));
    let category = node.category.clone();

    // Toggle button
    let toggle: AnyView = if has_children && !filtering {
        view! {
            <button
                class="tree-toggle"
                on:click=move |_| ctx.expanded.update(|set| {
                    if !set.remove(&id) {
                        set.insert(id);
                    }
                })
            >
                {if expanded { icon("chevron-down") } else { icon("chevron-right") }}
            </button>
        }
        .into_any()
    } else {
        view! { <span class="tree-toggle-placeholder"></span> }.into_any()
    };

    let node_icon = if has_children && expanded {
        icon("folder-open")
    } else if has_children {
        icon("folder-closed")
    } else {
        icon("item")
    };

    let ar_view = highlight_matches(&category.name.ar, &filter);
    let en_view = highlight_matches(category.name.en.as_deref().unwrap_or(""), &filter);

    let on_dragstart = move |ev: DragEvent| {
        let started = ctx.controller.try_update(|c| c.start_drag(id)).unwrap_or(false);
        if !started {
            ev.prevent_default();
            return;
        }
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data("text/plain", &id.to_string());
            dt.set_effect_allowed("move");
        }
    };
    let on_dragover = move |ev: DragEvent| {
        let allowed = ctx
            .tree
            .with_untracked(|tree| ctx.controller.with_untracked(|c| c.can_drop(id, tree)));
        if allowed {
            ev.prevent_default();
            if ctx.controller.with_untracked(|c| c.hovering() != Some(id)) {
                ctx.controller.update(|c| c.hover(id));
            }
        }
    };
    let on_dragleave = move |_: DragEvent| {
        if ctx.controller.with_untracked(|c| c.hovering() == Some(id)) {
            ctx.controller.update(|c| c.leave(id));
        }
    };
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ctx.on_drop.run(id);
    };
    let on_dragend = move |_: DragEvent| {
        if ctx.controller.with_untracked(|c| c.dragging().is_some()) {
            ctx.controller.update(|c| c.cancel_drag());
        }
    };

    let row = view! {
        <tr
            class=move || ctx.row_class(id)
            draggable=move || {
                let locked = ctx.controller.with(|c| c.is_reordering(id));
                if ctx.drag_enabled.get() && !locked { "true" } else { "false" }
            }
            on:dragstart=on_dragstart
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
            on:dragend=on_dragend
        >
            <td class="tree-grip" title="Drag to reorder">{icon("grip")}</td>
            <td class="cell-truncate">
                <div class="tree-cell" style=format!("padding-left: {}px;", level * 16)>
                    {toggle}
                    <span class="tree-icon">{node_icon}</span>
                    <span class="tree-label" on:click=move |_| ctx.on_edit.run(id)>
                        {ar_view}
                    </span>
                </div>
            </td>
            <td class="cell-truncate">{en_view}</td>
            <td class="text-right">{category.products_count}</td>
            <td class="text-center">
                {if category.is_active {
                    view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Active"</Badge> }.into_any()
                } else {
                    view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"Hidden"</Badge> }.into_any()
                }}
            </td>
            <td class="tree-actions">
                {move || ctx.controller.with(|c| c.is_reordering(id)).then(|| view! {
                    <span class="tree-saving">"saving…"</span>
                })}
                <button class="icon-btn" title="Add subcategory" on:click=move |_| ctx.on_add_child.run(id)>
                    {icon("plus")}
                </button>
                <button class="icon-btn" title="Edit" on:click=move |_| ctx.on_edit.run(id)>
                    {icon("edit")}
                </button>
                <button class="icon-btn icon-btn--danger" title="Delete" on:click=move |_| ctx.on_delete.run(id)>
                    {icon("trash")}
                </button>
            </td>
        </tr>
    }
    .into_any();

    rows.push(row);

    if expanded {
        for child in node.children.into_iter() {
            rows.append(&mut render_rows(child, level + 1, ctx, filter.clone()));
        }
    }

    rows
}

#[component]
pub fn CategoryTree() -> impl IntoView {
    let toasts = use_toasts();

    let tree = RwSignal::new(Vec::<CategoryNode>::new());
    let controller = RwSignal::new(ReorderController::new());
    let expanded = RwSignal::new(HashSet::<CategoryId>::new());
    let (filter_text, set_filter_text) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (is_loading, set_is_loading) = signal(false);
    let form = RwSignal::new(Option::<FormMode>::None);

    let load = Callback::new(move |_: ()| {
        set_is_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_categories().await {
                Ok(mut list) => {
                    sort_by_orders(&mut list);
                    let roots = build_tree(list);
                    log!("📂 categories loaded: {} nodes", count(&roots));
                    // First load: open the top level
                    let _ = expanded.try_update(|set| {
                        if set.is_empty() {
                            set.extend(roots.iter().filter(|n| n.has_children()).map(|n| n.id()));
                        }
                    });
                    let _ = tree.try_set(roots);
                }
                Err(e) => {
                    if e.is_unauthorized() {
                        toasts.api_error("Loading categories failed", &e);
                    }
                    let _ = set_error.try_set(Some(format!("Loading failed: {}", e)));
                }
            }
            let _ = set_is_loading.try_set(false);
        });
    });

    let on_drop = Callback::new(move |target: CategoryId| {
        let command = tree
            .try_update(|nodes| controller.try_update(|c| c.drop_on(target, nodes)))
            .flatten()
            .flatten();
        let Some(command) = command else {
            return;
        };
        spawn_local(async move {
            let result = api::reorder(command).await;
            let outcome = tree
                .try_update(|nodes| {
                    controller.try_update(|c| c.complete(command.category_id, result, nodes))
                })
                .flatten();
            match outcome {
                Some(ReorderOutcome::RolledBack { error }) => {
                    log::warn!("reorder of {} rolled back: {}", command.category_id, error);
                    toasts.api_error("Reorder failed", &error);
                    load.run(());
                }
                Some(ReorderOutcome::Confirmed) => {
                    log::info!("reorder of {} confirmed", command.category_id);
                }
                _ => {}
            }
        });
    });

    let on_delete = Callback::new(move |id: CategoryId| {
        let name = tree.with_untracked(|nodes| {
            find(nodes, id)
                .map(|n| n.category.name.display().to_string())
        });
        let Some(name) = name else { return };
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Delete category \"{}\"?", name))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_category(id).await {
                Ok(()) => {
                    toasts.success(format!("Category \"{}\" deleted", name));
                    load.run(());
                }
                Err(e) => toasts.api_error("Delete failed", &e),
            }
        });
    });

    let ctx = RowCtx {
        tree,
        controller,
        expanded,
        drag_enabled: Signal::derive(move || filter_text.get().trim().is_empty()),
        on_drop,
        on_add_child: Callback::new(move |parent: CategoryId| {
            form.set(Some(FormMode::Create { parent: Some(parent) }))
        }),
        on_edit: Callback::new(move |id: CategoryId| {
            let found = tree.with_untracked(|nodes| {
                find(nodes, id).map(|n| n.category.clone())
            });
            if let Some(category) = found {
                form.set(Some(FormMode::Edit(category)));
            }
        }),
        on_delete,
    };

    let saving_count = move || controller.with(|c| c.in_flight_count());

    load.run(());

    view! {
        <PageFrame page_id="a001_category--tree" category=PAGE_CAT_TREE>
            <div class="page__header">
                <div class="page__header-left">
                    <h2 class="page__title">"Categories"</h2>
                    {move || (saving_count() > 0).then(|| view! {
                        <span class="page__status">
                            <Spinner />
                            {format!(" saving {} change(s)…", saving_count())}
                        </span>
                    })}
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| form.set(Some(FormMode::Create { parent: None }))
                    >
                        {icon("plus")}
                        "New"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load.run(())
                        disabled=Signal::derive(move || is_loading.get())
                    >
                        {icon("refresh")}
                        "Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="search-box">
                    <input
                        type="text"
                        placeholder="Search by Arabic or English name..."
                        prop:value=move || filter_text.get()
                        on:input=move |ev| set_filter_text.set(event_target_value(&ev))
                    />
                    {move || (!filter_text.get().is_empty()).then(|| view! {
                        <button class="search-box__clear" title="Clear" on:click=move |_| set_filter_text.set(String::new())>
                            {icon("x")}
                        </button>
                    })}
                </div>

                <div class="table-container">
                    <table class="tree-table">
                        <thead>
                            <tr>
                                <th class="tree-grip"></th>
                                <th>"Name (AR)"</th>
                                <th>"Name (EN)"</th>
                                <th class="text-right">"Products"</th>
                                <th class="text-center">"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                // re-render on expand/collapse
                                expanded.track();
                                let current_filter = filter_text.get();
                                let roots = tree.with(|nodes| filter_tree(nodes, &current_filter));
                                if roots.is_empty() {
                                    let msg = if is_loading.get() {
                                        "Loading..."
                                    } else if tree.with(|nodes| nodes.is_empty()) {
                                        "No categories yet. Click 'New' to create one."
                                    } else {
                                        "Nothing matches the filter"
                                    };
                                    view! { <tr><td colspan="6" class="table-empty">{msg}</td></tr> }.into_any()
                                } else {
                                    roots
                                        .into_iter()
                                        .flat_map(|n| render_rows(n, 0, ctx, current_filter.clone()))
                                        .collect::<Vec<_>>()
                                        .into_view()
                                        .into_any()
                                }
                            }}
                        </tbody>
                    </table>
                </div>
            </div>

            {move || form.get().map(|mode| view! {
                <div class="modal-overlay" on:click=move |_| form.set(None)>
                    <div class="modal-content" on:click=|e| e.stop_propagation()>
                        <CategoryForm
                            mode=mode
                            tree=Signal::derive(move || tree.get())
                            on_saved=Callback::new(move |_| {
                                form.set(None);
                                load.run(());
                            })
                            on_cancel=Callback::new(move |_| form.set(None))
                        />
                    </div>
                </div>
            })}
        </PageFrame>
    }
}
