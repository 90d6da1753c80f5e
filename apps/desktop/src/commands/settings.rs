//! Settings commands.

use super::CommandError;
use crate::db::SettingsRepository;
use crate::state::AppState;
use serde_json::Value;
use vocab_core::SessionSettings;

pub fn show_settings(state: &AppState) -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(state.session.settings())?)
}

/// Apply one `name value` change on top of `settings`.
fn apply(settings: &SessionSettings, name: &str, value: &str) -> Result<SessionSettings, CommandError> {
    let mut json = serde_json::to_value(settings)?;
    let Some(slot) = json.get_mut(name) else {
        return Err(CommandError::new(format!("unknown setting `{name}`")));
    };
    // numbers parse as JSON, anything else is taken as text
    *slot = if slot.is_string() {
        Value::String(value.to_string())
    } else {
        serde_json::from_str(value)
            .map_err(|_| CommandError::new(format!("`{value}` is not a valid {name}")))?
    };
    let updated: SessionSettings = serde_json::from_value(json)
        .map_err(|e| CommandError::new(format!("invalid {name}: {e}")))?;
    updated.validate()?;
    Ok(updated)
}

pub fn set_setting(state: &mut AppState, name: &str, value: &str) -> Result<String, CommandError> {
    let updated = apply(state.session.settings(), name, value)?;
    state.session.progress().store().save_settings(&updated)?;
    state.session.set_settings(updated)?;
    tracing::info!(setting = name, value, "setting changed");
    Ok(format!("{name} = {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn updates_numbers_and_text() {
        let settings = SessionSettings::default();
        let updated = apply(&settings, "matching_pairs", "4").unwrap();
        assert_eq!(updated.matching_pairs, 4);

        let updated = apply(&updated, "speech_locale", "en-GB").unwrap();
        assert_eq!(updated.speech_locale, "en-GB");
        assert_eq!(updated.matching_pairs, 4);
    }

    #[test]
    fn rejects_unknown_or_mistyped() {
        let settings = SessionSettings::default();
        assert_eq!(
            apply(&settings, "colour", "red").unwrap_err().message,
            "unknown setting `colour`"
        );
        assert!(apply(&settings, "matching_pairs", "six").is_err());
        assert!(apply(&settings, "matching_pairs", "-1").is_err());
    }

    #[test]
    fn rejects_values_games_cannot_run_with() {
        let settings = SessionSettings::default();
        assert_eq!(
            apply(&settings, "min_game_items", "3").unwrap_err().message,
            "invalid setting min_game_items: must be at least 4"
        );
        assert_eq!(
            apply(&settings, "matching_pairs", "0").unwrap_err().message,
            "invalid setting matching_pairs: must be at least 1"
        );
        assert_eq!(apply(&settings, "min_game_items", "5").unwrap().min_game_items, 5);
    }

    #[test]
    fn rejected_setting_is_neither_applied_nor_saved() {
        let mut state = AppState::with_words(&["cat", "dog", "bird", "fish"]).0;
        assert!(set_setting(&mut state, "matching_pairs", "0").is_err());
        assert_eq!(state.session.settings().matching_pairs, 6);
        assert_eq!(
            state.session.progress().store().get_settings().unwrap(),
            SessionSettings::default()
        );

        set_setting(&mut state, "answer_reward", "4294967295").unwrap();
        assert_eq!(state.session.settings().answer_reward, u32::MAX);
    }
}
