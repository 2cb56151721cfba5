use crate::domain::a001_category::api;
use crate::shared::toast::use_toasts;
use contracts::domain::a001_category::aggregate::{
    Category, CategoryDto, CategoryId, LocalizedText,
};
use contracts::domain::a001_category::tree::{outline, subtree_ids, CategoryNode};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create { parent: Option<CategoryId> },
    Edit(Category),
}

impl FormMode {
    fn editing(&self) -> Option<CategoryId> {
        match self {
            FormMode::Create { .. } => None,
            FormMode::Edit(category) => Some(category.id),
        }
    }

    fn initial(&self) -> CategoryDto {
        match self {
            FormMode::Create { parent } => CategoryDto {
                parent_id: *parent,
                is_active: true,
                ..CategoryDto::default()
            },
            FormMode::Edit(category) => CategoryDto::from_category(category),
        }
    }
}

/// `(id, indented label)` of every category that may become the parent.
/// The edited category and its descendants are left out.
fn parent_options(nodes: &[CategoryNode], editing: Option<CategoryId>) -> Vec<(CategoryId, String)> {
    let excluded = editing
        .map(|id| subtree_ids(nodes, id))
        .unwrap_or_default();
    outline(nodes)
        .into_iter()
        .filter(|(_, c)| !excluded.contains(&c.id))
        .map(|(depth, c)| (c.id, format!("{}{}", "— ".repeat(depth), c.name.display())))
        .collect()
}

#[component]
pub fn CategoryForm(
    mode: FormMode,
    #[prop(into)] tree: Signal<Vec<CategoryNode>>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let toasts = use_toasts();
    let editing = mode.editing();
    let initial = mode.initial();

    let name_ar = RwSignal::new(initial.name.ar.clone());
    let name_en = RwSignal::new(initial.name.en.clone().unwrap_or_default());
    let parent_id = RwSignal::new(initial.parent_id);
    let is_active = RwSignal::new(initial.is_active);
    let field_errors = RwSignal::new(ValidationErrors::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let title = if editing.is_some() { "Edit category" } else { "New category" };

    let field_error = move |field: &'static str| {
        move || {
            field_errors
                .with(|errs| errs.first(field).map(str::to_string))
                .map(|msg| view! { <div class="field-error">{msg}</div> })
        }
    };

    let submit = move |_: leptos::ev::MouseEvent| {
        let dto = CategoryDto {
            name: LocalizedText::new(name_ar.get_untracked(), Some(name_en.get_untracked())),
            parent_id: parent_id.get_untracked(),
            is_active: is_active.get_untracked(),
        }
        .normalized();

        set_error.set(None);
        if let Err(errs) = dto.validate(editing) {
            field_errors.set(errs);
            return;
        }
        field_errors.set(ValidationErrors::new());
        set_saving.set(true);

        spawn_local(async move {
            let result = match editing {
                Some(id) => api::update_category(id, dto).await,
                None => api::create_category(dto).await,
            };
            let _ = set_saving.try_set(false);
            match result {
                Ok(_) => {
                    toasts.success(if editing.is_some() {
                        "Category updated"
                    } else {
                        "Category created"
                    });
                    on_saved.run(());
                }
                Err(e) => {
                    if let Some(errs) = e.field_errors() {
                        let _ = field_errors.try_set(errs.clone());
                    }
                    if e.is_unauthorized() {
                        toasts.api_error("Saving category failed", &e);
                    } else {
                        let _ = set_error.try_set(Some(e.to_string()));
                    }
                }
            }
        });
    };

    view! {
        <div class="details-form">
            <div class="details-form__header">
                <h3>{title}</h3>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="form-group">
                <label for="category-name-ar">"Name (Arabic) *"</label>
                <input
                    id="category-name-ar"
                    type="text"
                    dir="rtl"
                    prop:value=move || name_ar.get()
                    on:input=move |ev| name_ar.set(event_target_value(&ev))
                />
                {field_error("name.ar")}
            </div>

            <div class="form-group">
                <label for="category-name-en">"Name (English)"</label>
                <input
                    id="category-name-en"
                    type="text"
                    prop:value=move || name_en.get()
                    on:input=move |ev| name_en.set(event_target_value(&ev))
                />
                {field_error("name.en")}
            </div>

            <div class="form-group">
                <label for="category-parent">"Parent"</label>
                <select
                    id="category-parent"
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        parent_id.set(CategoryId::from_string(&raw).ok());
                    }
                >
                    <option value="" selected=move || parent_id.get().is_none()>"— none (top level) —"</option>
                    {move || {
                        tree.with(|nodes| parent_options(nodes, editing))
                            .into_iter()
                            .map(|(id, label)| view! {
                                <option
                                    value=id.to_string()
                                    selected=move || parent_id.get() == Some(id)
                                >
                                    {label}
                                </option>
                            })
                            .collect_view()
                    }}
                </select>
                {field_error("parent_id")}
            </div>

            <div class="form-group form-group--inline">
                <input
                    id="category-active"
                    type="checkbox"
                    prop:checked=move || is_active.get()
                    on:change=move |ev| is_active.set(event_target_checked(&ev))
                />
                <label for="category-active">"Visible in the storefront"</label>
            </div>

            <div class="details-form__actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=submit
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_category::tree::build_tree;

    fn cat(id: i64, parent: Option<i64>) -> Category {
        Category {
            id: CategoryId(id),
            name: LocalizedText::new(format!("ق{}", id), Some(format!("Cat {}", id))),
            parent_id: parent.map(CategoryId),
            orders: id as i32,
            products_count: 0,
            is_active: true,
            image: None,
        }
    }

    #[test]
    fn test_parent_options_exclude_own_subtree() {
        let nodes = build_tree(vec![cat(1, None), cat(2, Some(1)), cat(3, Some(2)), cat(4, None)]);
        let ids: Vec<i64> = parent_options(&nodes, Some(CategoryId(2)))
            .into_iter()
            .map(|(id, _)| id.value())
            .collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_parent_options_are_indented() {
        let nodes = build_tree(vec![cat(1, None), cat(2, Some(1))]);
        let options = parent_options(&nodes, None);
        assert_eq!(options[0].1, "Cat 1");
        assert_eq!(options[1].1, "— Cat 2");
    }

    #[test]
    fn test_create_mode_defaults() {
        let dto = FormMode::Create { parent: Some(CategoryId(7)) }.initial();
        assert_eq!(dto.parent_id, Some(CategoryId(7)));
        assert!(dto.is_active);
        assert!(dto.name.ar.is_empty());
    }
}
