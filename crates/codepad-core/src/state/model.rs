//! Durable state domain models.
//!
//! Contains the slice of the session that persists across restarts.

use serde::{Deserialize, Serialize};

use crate::session::UserProfile;
use crate::session::model::{DEFAULT_FONT, DEFAULT_FONT_SIZE};

/// Table key the projection is stored under.
pub const STORAGE_KEY: &str = "codepad";

/// Session fields that survive a restart.
///
/// Everything else in the session resets to its initial value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub show_in_out_box: bool,
    #[serde(default)]
    pub show_settings: bool,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

fn default_font() -> String {
    DEFAULT_FONT.to_string()
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            user: None,
            show_in_out_box: false,
            show_settings: false,
            font: default_font(),
            font_size: default_font_size(),
        }
    }
}
