use contracts::domain::a001_category::aggregate::{
    Category, CategoryDto, CategoryId, ReorderCategoryDto,
};
use contracts::shared::api::ApiError;

use crate::shared::http;

/// Flat list; the tree is built client-side
pub async fn fetch_categories() -> Result<Vec<Category>, ApiError> {
    http::get("/categories").await
}

/// Validates first; nothing is sent when validation fails
pub async fn create_category(dto: CategoryDto) -> Result<Option<Category>, ApiError> {
    let dto = dto.normalized();
    dto.validate(None)?;
    http::post("/categories", &dto).await
}

pub async fn update_category(
    id: CategoryId,
    dto: CategoryDto,
) -> Result<Option<Category>, ApiError> {
    let dto = dto.normalized();
    dto.validate(Some(id))?;
    http::put(&format!("/categories/{}", id), &dto).await
}

pub async fn delete_category(id: CategoryId) -> Result<(), ApiError> {
    http::delete(&format!("/categories/{}", id)).await
}

/// Moves `category_id` into the sibling slot holding `target_order`
pub async fn reorder(command: ReorderCategoryDto) -> Result<(), ApiError> {
    log::info!(
        "reorder: category {} -> order {}",
        command.category_id,
        command.target_order
    );
    http::post_unit("/categories/reorder", Some(&command)).await
}
