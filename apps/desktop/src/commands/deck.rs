//! Topic and flashcard commands.

use super::CommandError;
use crate::state::AppState;
use crate::view;
use vocab_core::{Advance, Topic};

/// Fetch the catalog and remember it for `load <n>`.
pub async fn list_topics(state: &mut AppState) -> Result<String, CommandError> {
    state.topics = state.session.list_topics(&state.catalog).await?;
    Ok(view::topics(&state.topics))
}

/// Resolve `load` input: a listed number, a listed display name, or a raw id.
fn resolve_topic(topics: &[Topic], input: &str) -> String {
    if let Some(topic) = input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| topics.get(i))
    {
        return topic.id.clone();
    }
    topics
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(input))
        .map(|t| t.id.clone())
        .unwrap_or_else(|| input.to_string())
}

pub async fn load_topic(state: &mut AppState, input: &str) -> Result<String, CommandError> {
    let topic_id = resolve_topic(&state.topics, input);
    // a failed load keeps the running game, so its timers must survive too
    let deck = state.session.load_topic(&state.catalog, &topic_id).await?;
    let loaded = format!("Loaded {} words.", deck.len());
    state.timers.cancel_all();
    Ok(format!("{loaded}\n{}", show_card(state)))
}

pub fn show_card(state: &AppState) -> String {
    let session = &state.session;
    let (learned, difficult) = session
        .current_card()
        .map(|item| {
            (
                session.progress().is_learned(&item.word),
                session.progress().is_difficult(&item.word),
            )
        })
        .unwrap_or_default();
    view::card(session.deck(), learned, difficult)
}

fn after_advance(state: &AppState, advance: Advance) -> String {
    match advance {
        Advance::Advanced => show_card(state),
        Advance::AtEnd => format!("{}\n{}", show_card(state), view::end_of_deck()),
    }
}

pub fn next_card(state: &mut AppState) -> Result<String, CommandError> {
    let advance = state.session.next_card()?;
    Ok(after_advance(state, advance))
}

pub fn previous_card(state: &mut AppState) -> Result<String, CommandError> {
    state.session.previous_card()?;
    Ok(show_card(state))
}

pub fn shuffle(state: &mut AppState) -> Result<String, CommandError> {
    state.session.shuffle()?;
    Ok(format!("Shuffled.\n{}", show_card(state)))
}

pub fn speak(state: &mut AppState) -> Result<String, CommandError> {
    state.session.speak_current()?;
    if state.session.speaker().is_enabled() {
        Ok("Speaking.".into())
    } else {
        Ok("No speech command configured (set VOCAB_TTS_COMMAND).".into())
    }
}

pub fn mark_learned(state: &mut AppState) -> Result<String, CommandError> {
    let advance = state.session.mark_learned()?;
    Ok(format!("Marked as learned.\n{}", after_advance(state, advance)))
}

pub fn mark_difficult(state: &mut AppState) -> Result<String, CommandError> {
    if state.session.mark_difficult()? {
        Ok("Added to difficult words.".into())
    } else {
        Ok("Already in difficult words.".into())
    }
}
