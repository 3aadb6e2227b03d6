//! Vocabulary items as served by the word catalog.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub item_id: String,
    pub word: String,
    pub category: Option<String>,
    pub level: Option<String>,
}

impl CatalogItem {
    pub fn new(item_id: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            word: word.into(),
            category: None,
            level: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }
}

/// Difficulty level buckets used by the statistics screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// Accepts the English labels and the catalog's 初級/中級/高級 labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "beginner" | "初級" => Some(Self::Beginner),
            "intermediate" | "中級" => Some(Self::Intermediate),
            "advanced" | "高級" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Catalog query parameters. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemFilters {
    pub category: Option<String>,
    pub level: Option<String>,
    /// Case-insensitive substring match on the word. Both sides are folded
    /// with Unicode `to_lowercase`, so "ÜBUNG" matches "übung". No other
    /// normalisation is done: "Straße" does not match "strasse".
    pub search: Option<String>,
}

impl ItemFilters {
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(category) = &self.category {
            if item.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(level) = &self.level {
            if item.level.as_deref() != Some(level.as_str()) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !item.word.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}
