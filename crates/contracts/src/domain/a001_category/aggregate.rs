use crate::shared::validation::{max_chars, require_text, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NAME_MAX_CHARS: usize = 255;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl CategoryId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(CategoryId)
            .map_err(|e| format!("Invalid category id '{}': {}", s, e))
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Bilingual text
// ============================================================================

/// Arabic is the primary storefront language and is mandatory; English is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub ar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

impl LocalizedText {
    pub fn new(ar: impl Into<String>, en: Option<String>) -> Self {
        Self { ar: ar.into(), en }
    }

    /// English when present and non-blank, otherwise Arabic
    pub fn display(&self) -> &str {
        match self.en.as_deref() {
            Some(en) if !en.trim().is_empty() => en,
            _ => &self.ar,
        }
    }

    /// Case-insensitive match against either language
    pub fn contains_ci(&self, needle_lower: &str) -> bool {
        self.ar.to_lowercase().contains(needle_lower)
            || self
                .en
                .as_deref()
                .map(|en| en.to_lowercase().contains(needle_lower))
                .unwrap_or(false)
    }
}

// ============================================================================
// Aggregate
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: LocalizedText,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default)]
    pub orders: i32,
    #[serde(default)]
    pub products_count: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub image: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Create / update payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub name: LocalizedText,
    pub parent_id: Option<CategoryId>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CategoryDto {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            parent_id: category.parent_id,
            is_active: category.is_active,
        }
    }

    /// Blank English is sent as absent
    pub fn normalized(mut self) -> Self {
        self.name.ar = self.name.ar.trim().to_string();
        self.name.en = self
            .name
            .en
            .map(|en| en.trim().to_string())
            .filter(|en| !en.is_empty());
        self
    }

    /// Runs before any request is sent.
    ///
    /// `editing` is the id of the category being updated, if any; a category
    /// cannot become its own parent.
    pub fn validate(&self, editing: Option<CategoryId>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "name.ar", &self.name.ar, "Arabic name");
        max_chars(&mut errors, "name.ar", &self.name.ar, NAME_MAX_CHARS, "Arabic name");
        if let Some(en) = &self.name.en {
            max_chars(&mut errors, "name.en", en, NAME_MAX_CHARS, "English name");
        }
        if let (Some(id), Some(parent)) = (editing, self.parent_id) {
            if id == parent {
                errors.add("parent_id", "A category cannot be its own parent");
            }
        }
        errors.into_result()
    }
}

/// Body of the reorder endpoint: move `category_id` to the sibling slot
/// currently holding `target_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderCategoryDto {
    pub category_id: CategoryId,
    pub target_order: i32,
}
