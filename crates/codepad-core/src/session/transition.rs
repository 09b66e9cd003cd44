//! Named state transitions.
//!
//! Every change to [`SessionState`] is one of these. Applying a transition is
//! synchronous and performs no I/O.

use serde::Serialize;

use super::model::{
    CodeId, DEFAULT_FONT, DEFAULT_FONT_SIZE, DEFAULT_THEME, SessionState, UserProfile,
};
use crate::digest::content_digest;
use crate::error::Result;
use crate::language;
use crate::route::Route;
use crate::samples;
use crate::state::model::PersistedState;

/// A state transition with its input value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Transition {
    ToggleInOutBox,
    ToggleSettings,
    /// Selects a registry language; recomputes `runtime_id` and `file_name`.
    ChangeLanguage(String),
    /// Overwrites the code of the active language.
    SetCode(String),
    UpdateOutput(String),
    SetFileName(String),
    SetCustomInput(String),
    /// Moves `custom_input` into the shadow buffer.
    StashCustomInput,
    /// Moves the shadow buffer back into `custom_input`.
    RestoreCustomInput,
    SetTheme(String),
    SetFont(String),
    SetFontSize(u32),
    /// Stores the digest of the given text as `check_data`.
    SetCheckData(String),
    ResetEditor,
    /// Restores the sample of the active language and detaches from the saved document.
    ResetCode,
    SetIsChanged(bool),
    SetAutoSave(bool),
    SetCodeId(Option<CodeId>),
    SetCodeTitle(String),
    SetUser(UserProfile),
    ClearUser,
    SetRoute(Route),
    /// Rehydrates the persisted projection at startup.
    RestorePersisted(PersistedState),
}

impl Transition {
    /// Editor keystroke. Same effect as [`Transition::SetCode`].
    pub fn update_code(text: impl Into<String>) -> Self {
        Self::SetCode(text.into())
    }

    /// File upload. Same effect as [`Transition::SetCode`].
    pub fn upload_code(text: impl Into<String>) -> Self {
        Self::SetCode(text.into())
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ToggleInOutBox => "toggle_in_out_box",
            Self::ToggleSettings => "toggle_settings",
            Self::ChangeLanguage(_) => "change_language",
            Self::SetCode(_) => "set_code",
            Self::UpdateOutput(_) => "update_output",
            Self::SetFileName(_) => "set_file_name",
            Self::SetCustomInput(_) => "set_custom_input",
            Self::StashCustomInput => "stash_custom_input",
            Self::RestoreCustomInput => "restore_custom_input",
            Self::SetTheme(_) => "set_theme",
            Self::SetFont(_) => "set_font",
            Self::SetFontSize(_) => "set_font_size",
            Self::SetCheckData(_) => "set_check_data",
            Self::ResetEditor => "reset_editor",
            Self::ResetCode => "reset_code",
            Self::SetIsChanged(_) => "set_is_changed",
            Self::SetAutoSave(_) => "set_auto_save",
            Self::SetCodeId(_) => "set_code_id",
            Self::SetCodeTitle(_) => "set_code_title",
            Self::SetUser(_) => "set_user",
            Self::ClearUser => "clear_user",
            Self::SetRoute(_) => "set_route",
            Self::RestorePersisted(_) => "restore_persisted",
        }
    }

    /// Applies the transition to `state`.
    ///
    /// Only `ChangeLanguage` can fail (unknown name); the state is left
    /// untouched in that case.
    pub fn apply(self, state: &mut SessionState) -> Result<()> {
        match self {
            Self::ToggleInOutBox => state.show_in_out_box = !state.show_in_out_box,
            Self::ToggleSettings => state.show_settings = !state.show_settings,
            Self::ChangeLanguage(name) => {
                let spec = language::lookup(&name)?;
                state.select_language(spec);
            }
            Self::SetCode(text) => {
                state.code.insert(state.language.clone(), text);
            }
            Self::UpdateOutput(text) => state.output = text,
            Self::SetFileName(name) => state.file_name = name,
            Self::SetCustomInput(text) => state.custom_input = text,
            Self::StashCustomInput => {
                state.custom_input_buf = std::mem::take(&mut state.custom_input);
            }
            Self::RestoreCustomInput => {
                state.custom_input = std::mem::take(&mut state.custom_input_buf);
            }
            Self::SetTheme(theme) => state.theme = theme,
            Self::SetFont(font) => state.font = font,
            Self::SetFontSize(size) => state.font_size = size,
            Self::SetCheckData(text) => state.check_data = content_digest(&text),
            Self::ResetEditor => {
                state.theme = DEFAULT_THEME.to_string();
                state.font = DEFAULT_FONT.to_string();
                state.font_size = DEFAULT_FONT_SIZE;
            }
            Self::ResetCode => {
                let sample = samples::sample_code(&state.language).unwrap_or_default();
                state.code.insert(state.language.clone(), sample.to_string());
                state.code_id = None;
            }
            Self::SetIsChanged(changed) => state.is_changed = changed,
            Self::SetAutoSave(enabled) => state.auto_save = enabled,
            Self::SetCodeId(id) => state.code_id = id,
            Self::SetCodeTitle(title) => state.code_title = title,
            Self::SetUser(user) => state.user = Some(user),
            Self::ClearUser => state.user = None,
            Self::SetRoute(route) => state.route = route,
            Self::RestorePersisted(persisted) => {
                state.user = persisted.user;
                state.show_in_out_box = persisted.show_in_out_box;
                state.show_settings = persisted.show_settings;
                state.font = persisted.font;
                state.font_size = persisted.font_size;
            }
        }
        Ok(())
    }
}
