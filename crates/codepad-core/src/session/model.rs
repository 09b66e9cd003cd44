//! Session state domain model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::language::{self, LanguageSpec};
use crate::route::Route;
use crate::samples;
use crate::state::model::PersistedState;

pub const DEFAULT_LANGUAGE: &str = "C++";
pub const DEFAULT_THEME: &str = "vs-dark";
pub const DEFAULT_FONT: &str = "Ubuntu Mono";
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// Opaque identifier of a persisted document.
///
/// The server hands out numeric ids, but string ids are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodeId {
    Number(u64),
    Text(String),
}

impl fmt::Display for CodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeId::Number(n) => write!(f, "{}", n),
            CodeId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for CodeId {
    fn from(value: u64) -> Self {
        CodeId::Number(value)
    }
}

impl From<&str> for CodeId {
    fn from(value: &str) -> Self {
        match value.parse::<u64>() {
            Ok(n) => CodeId::Number(n),
            Err(_) => CodeId::Text(value.to_string()),
        }
    }
}

/// Signed-in user, kept across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Everything the editor currently shows.
///
/// Only [`Transition`](super::Transition)s change it; go through
/// [`SessionStore::commit`](super::SessionStore::commit) so hooks see every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Source text per language display name.
    pub code: BTreeMap<String, String>,
    /// Active language; always a registry key.
    pub language: String,
    /// Editor mode derived from `language`.
    pub runtime_id: String,
    pub theme: String,
    pub font: String,
    pub font_size: u32,
    pub show_in_out_box: bool,
    pub show_settings: bool,
    pub custom_input: String,
    /// Holds `custom_input` while the input panel is hidden.
    pub custom_input_buf: String,
    pub output: String,
    pub file_name: String,
    pub is_changed: bool,
    pub auto_save: bool,
    /// Digest of the last saved or loaded code.
    pub check_data: String,
    pub code_id: Option<CodeId>,
    pub code_title: String,
    pub user: Option<UserProfile>,
    pub route: Route,
}

impl SessionState {
    /// Fresh session seeded with the sample program of every language.
    pub fn new() -> Self {
        let mut state = Self {
            code: samples::seeded_code_map(),
            language: String::new(),
            runtime_id: String::new(),
            theme: DEFAULT_THEME.to_string(),
            font: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            show_in_out_box: false,
            show_settings: false,
            custom_input: String::new(),
            custom_input_buf: String::new(),
            output: String::new(),
            file_name: String::new(),
            is_changed: false,
            auto_save: true,
            check_data: String::new(),
            code_id: None,
            code_title: String::new(),
            user: None,
            route: Route::default(),
        };
        state.select_language(
            language::find(DEFAULT_LANGUAGE).unwrap_or(&language::all()[0]),
        );
        state
    }

    /// Code of the active language.
    pub fn active_code(&self) -> &str {
        self.code.get(&self.language).map(String::as_str).unwrap_or("")
    }

    /// Registry entry of the active language.
    pub fn active_language(&self) -> Result<&'static LanguageSpec> {
        language::lookup(&self.language)
    }

    /// The subset of state that survives restarts.
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            user: self.user.clone(),
            show_in_out_box: self.show_in_out_box,
            show_settings: self.show_settings,
            font: self.font.clone(),
            font_size: self.font_size,
        }
    }

    pub(crate) fn select_language(&mut self, spec: &LanguageSpec) {
        self.language = spec.name.to_string();
        self.runtime_id = spec.mode.to_string();
        self.file_name = spec.default_file_name();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
