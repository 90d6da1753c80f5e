//! Progress commands.

use super::CommandError;
use crate::state::AppState;
use crate::view;

pub fn show_stats(state: &AppState) -> String {
    view::stats(&state.session.stats())
}

/// Wipes all progress, but only once the user typed the confirmation word.
pub fn reset_progress(state: &mut AppState, confirmed: bool) -> Result<String, CommandError> {
    if !confirmed {
        return Ok("This erases every learned and difficult word. Type `reset confirm` to proceed.".into());
    }
    state.session.reset_progress()?;
    Ok("Progress reset.".into())
}
