use crate::persistence::{DEFAULT_FRESHNESS_WINDOW_MS, SESSION_KEY};
use serde::{Deserialize, Serialize};

/// Editor session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Cache key the session's lesson is stored under
    pub cache_key: String,

    /// Cached lessons younger than this are restored on open
    pub freshness_window_ms: i64,

    /// Save automatically once the document has been dirty this long.
    /// `None` leaves saving to explicit `save()` calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosave_debounce_ms: Option<i64>,

    /// Undo levels kept (0 = unlimited)
    pub undo_levels: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cache_key: SESSION_KEY.to_string(),
            freshness_window_ms: DEFAULT_FRESHNESS_WINDOW_MS,
            autosave_debounce_ms: None,
            undo_levels: 100,
        }
    }
}
