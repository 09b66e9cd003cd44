use anyhow::Result;
use clap::Subcommand;
use codepad_core::session::{Transition, UserProfile};

use super::context::AppContext;

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Print the saved preferences
    Show,
    /// Set the editor font
    Font { name: String },
    /// Set the editor font size
    FontSize { size: u32 },
    /// Toggle the input/output panel
    ToggleInOut,
    /// Toggle the settings panel
    ToggleSettings,
    /// Restore the default font and size
    Reset,
    /// Remember a signed-in user
    Login {
        login: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Forget the signed-in user
    Logout,
}

impl PrefsAction {
    fn transition(self) -> Option<Transition> {
        match self {
            Self::Show => None,
            Self::Font { name } => Some(Transition::SetFont(name)),
            Self::FontSize { size } => Some(Transition::SetFontSize(size)),
            Self::ToggleInOut => Some(Transition::ToggleInOutBox),
            Self::ToggleSettings => Some(Transition::ToggleSettings),
            Self::Reset => Some(Transition::ResetEditor),
            Self::Login { login, name } => Some(Transition::SetUser(UserProfile {
                login,
                display_name: name,
                token: None,
            })),
            Self::Logout => Some(Transition::ClearUser),
        }
    }
}

pub async fn apply(ctx: &AppContext, action: PrefsAction) -> Result<()> {
    if let Some(transition) = action.transition() {
        ctx.usecase.commit(transition).await?;
    }

    let persisted = ctx.usecase.snapshot().await.persisted();
    println!("{}", serde_json::to_string_pretty(&persisted)?);
    Ok(())
}
