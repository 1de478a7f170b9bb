//! Task categories and the seeded farm defaults.

use serde::{Deserialize, Serialize};

/// A task category. `key` is the stable identifier tasks reference; the
/// rest is presentation metadata.
///
/// Removing a category does not cascade to tasks: dangling references are
/// tolerated and rendered as "unknown category" by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    #[serde(rename = "cor")]
    pub color: String,
    pub label: String,
    #[serde(rename = "icone")]
    pub icon: String,
}

impl Category {
    pub fn new(
        key: impl Into<String>,
        color: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Category {
            key: key.into(),
            color: color.into(),
            label: label.into(),
            icon: icon.into(),
        }
    }
}

/// The category set seeded on first use. The set itself is mutable
/// afterwards (categories can be added and removed).
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("alimentacao", "#f59e0b", "Alimentação", "feed"),
        Category::new("saude", "#ef4444", "Saúde animal", "health"),
        Category::new("reproducao", "#ec4899", "Reprodução", "breeding"),
        Category::new("manejo", "#10b981", "Manejo", "herd"),
        Category::new("financeiro", "#3b82f6", "Financeiro", "finance"),
        Category::new("geral", "#6b7280", "Geral", "note"),
    ]
}
