use contracts::shared::api::{ApiError, Page, PageQuery};
use contracts::system::settings::{Setting, UpdateSettingDto};

use crate::shared::config::SETTINGS_PAGE_SIZE;
use crate::shared::http;

/// Hard stop for a misbehaving `last_page`
const MAX_PAGES: u32 = 50;

pub async fn fetch_settings_page(query: PageQuery) -> Result<Page<Setting>, ApiError> {
    http::get_query("/settings", &query).await
}

/// Walks every page and returns the concatenated list
pub async fn fetch_all_settings() -> Result<Vec<Setting>, ApiError> {
    let mut query = PageQuery::first(SETTINGS_PAGE_SIZE);
    let mut all = Vec::new();
    loop {
        let page = fetch_settings_page(query).await?;
        let more = page.has_more() && !page.data.is_empty();
        all.extend(page.data);
        if !more || query.page >= MAX_PAGES {
            break;
        }
        query = query.next();
    }
    Ok(all)
}

pub async fn update_setting(key: &str, value: String) -> Result<(), ApiError> {
    let path = format!("/settings/{}", urlencoding::encode(key));
    http::put_unit(&path, Some(&UpdateSettingDto { value })).await
}
