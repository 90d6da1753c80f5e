//! Game commands and timer delivery.

use super::CommandError;
use crate::state::AppState;
use crate::view;
use vocab_core::games::{FillBlankFeedback, PlaceOutcome, Selection};
use vocab_core::{ActiveGame, GameKind, Timer, TimerEffect};

fn current_game(state: &AppState) -> String {
    state
        .session
        .game()
        .map(view::game)
        .unwrap_or_else(|| "No game running. Use `play <game>`.".into())
}

pub fn start_game(state: &mut AppState, kind: GameKind) -> Result<String, CommandError> {
    state.timers.cancel_all();
    let game = state.session.start_game(kind)?;
    Ok(view::game(game))
}

pub fn leave_game(state: &mut AppState) -> String {
    state.timers.cancel_all();
    state.session.leave_game();
    "Back to the menu.".into()
}

/// Answer a quiz or fill-in-the-blank round by option number.
pub fn pick(state: &mut AppState, option: usize) -> Result<String, CommandError> {
    let word = match state.session.game() {
        Some(ActiveGame::Quiz(engine)) => engine
            .round()
            .and_then(|r| r.options.get(option))
            .map(|o| o.word.clone()),
        Some(ActiveGame::FillBlank(engine)) => engine
            .round()
            .and_then(|r| r.options.get(option))
            .map(|o| o.word.clone()),
        _ => return Err(CommandError::new("pick works in quiz and fill-in-the-blank")),
    }
    .ok_or_else(|| CommandError::new("no such option"))?;

    if matches!(state.session.game(), Some(ActiveGame::Quiz(_))) {
        let Some(feedback) = state.session.submit_quiz(&word)? else {
            return Ok("Already answered.".into());
        };
        state.timers.schedule(feedback.timer);
        return Ok(if feedback.correct {
            format!("Correct! Score: {}", feedback.score)
        } else {
            format!("Wrong. The answer was {}.", feedback.correct_word)
        });
    }

    match state.session.submit_fill_blank(&word)? {
        None => Ok("Already answered.".into()),
        Some(FillBlankFeedback::Correct { example, timer }) => {
            state.timers.schedule(timer);
            Ok(format!("Correct!\n  {}", view::plain(&example)))
        }
        Some(FillBlankFeedback::Wrong { chosen, target }) => {
            let mut out = String::from("Wrong.");
            if let Some(chosen) = chosen {
                out.push_str(&format!("\n  {} means: {}", chosen.word, chosen.meaning));
            }
            out.push_str(&format!(
                "\n  Answer: {} ({})\n  {}\nType `go` to continue.",
                target.word,
                target.meaning,
                view::plain(&target.example)
            ));
            Ok(out)
        }
    }
}

pub fn proceed(state: &mut AppState) -> Result<String, CommandError> {
    if !state.session.proceed_fill_blank()? {
        return Err(CommandError::new("nothing to continue from"));
    }
    Ok(current_game(state))
}

pub fn place_tile(state: &mut AppState, tile: usize) -> Result<String, CommandError> {
    match state.session.place_tile(tile)? {
        None => Err(CommandError::new("that letter is not in the pool")),
        Some(PlaceOutcome::Placed) => Ok(current_game(state)),
        Some(PlaceOutcome::Solved { timer }) => {
            state.timers.schedule(timer);
            Ok(format!("{}\nSolved!", current_game(state)))
        }
    }
}

pub fn remove_tile(state: &mut AppState, tile: usize) -> Result<String, CommandError> {
    if !state.session.remove_tile(tile)? {
        return Err(CommandError::new("that letter is not placed"));
    }
    Ok(current_game(state))
}

pub fn skip(state: &mut AppState) -> Result<String, CommandError> {
    state.timers.cancel_all();
    state.session.skip_scramble()?;
    Ok(current_game(state))
}

pub fn flip(state: &mut AppState, card: usize) -> Result<String, CommandError> {
    let note = match state.session.select_card(card)? {
        Selection::Ignored => return Ok("Ignored.".into()),
        Selection::Held => None,
        Selection::Matched { victory, .. } => {
            if let Some(timer) = victory {
                state.timers.schedule(timer);
            }
            Some("Match!")
        }
        Selection::Mismatched { timer } => {
            state.timers.schedule(timer);
            Some("No match.")
        }
    };
    let board = current_game(state);
    Ok(match note {
        Some(note) => format!("{board}\n{note}"),
        None => board,
    })
}

/// Hand an elapsed timer to the session. `None` when it was stale.
pub fn on_timer(state: &mut AppState, timer: Timer) -> Option<String> {
    let text = match state.session.fire(timer)? {
        TimerEffect::NextRound | TimerEffect::MismatchCleared => current_game(state),
        TimerEffect::QuizFinished { score, total } => {
            format!("Quiz finished! Score {score} over {total} words. `play quiz` to go again.")
        }
        TimerEffect::Victory { then } => {
            state.timers.schedule(then);
            "All pairs matched, you win!".into()
        }
        TimerEffect::ReturnToMenu => {
            state.timers.cancel_all();
            "Back to the menu.".into()
        }
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vocab_core::{Topic, VocabularyItem};

    fn state(words: &[&str]) -> AppState {
        AppState::with_words(words).0
    }

    fn quiz_target_option(state: &AppState) -> (usize, String) {
        let Some(ActiveGame::Quiz(engine)) = state.session.game() else {
            panic!("quiz expected");
        };
        let round = engine.round().unwrap();
        let index = round
            .options
            .iter()
            .position(|o| o.word == round.target.word)
            .unwrap();
        (index, round.target.word.clone())
    }

    #[tokio::test]
    async fn quiz_answer_schedules_advance() {
        let mut state = state(&["cat", "dog", "bird", "fish"]);
        let board = start_game(&mut state, GameKind::Quiz).unwrap();
        assert!(board.starts_with("Quiz (3 of 4 left, score 0)"));

        let (index, _) = quiz_target_option(&state);
        assert_eq!(pick(&mut state, index).unwrap(), "Correct! Score: 10");
        assert_eq!(pick(&mut state, index).unwrap(), "Already answered.");
        assert_eq!(state.timers.pending(), 1);

        assert!(leave_game(&mut state).contains("menu"));
        assert_eq!(state.timers.pending(), 0);
        assert!(pick(&mut state, 0).is_err());
    }

    #[tokio::test]
    async fn quiz_runs_to_completion_through_timers() {
        let mut state = state(&["cat", "dog", "bird", "fish"]);
        start_game(&mut state, GameKind::Quiz).unwrap();

        let mut last = None;
        for _ in 0..4 {
            let (_, word) = quiz_target_option(&state);
            let feedback = state.session.submit_quiz(&word).unwrap().unwrap();
            last = on_timer(&mut state, feedback.timer);
        }
        assert_eq!(
            last.as_deref(),
            Some("Quiz finished! Score 40 over 4 words. `play quiz` to go again.")
        );
    }

    #[tokio::test]
    async fn fill_blank_needs_real_sentences() {
        let mut state = state(&["cat", "dog", "bird", "fish"]);
        let err = start_game(&mut state, GameKind::FillBlank).unwrap_err();
        assert_eq!(
            err.message,
            "fill-in-the-blank needs at least 4 words, only 0 available"
        );
    }

    #[tokio::test]
    async fn fill_blank_header_counts_usable_sentences() {
        let mut state = state(&["cat"]);
        let mut items: Vec<VocabularyItem> = ["cat", "dog", "bird", "fish", "owl"]
            .iter()
            .map(|w| VocabularyItem {
                word: w.to_string(),
                meaning: format!("meaning of {w}"),
                example: format!("Yesterday the {w} was seen near the old house."),
                synthetic: false,
            })
            .collect();
        items[4].example = "Too short.".into();
        state.session.load_items(Topic::from_id("animals.csv"), items).unwrap();

        let board = start_game(&mut state, GameKind::FillBlank).unwrap();
        assert!(board.starts_with("Fill in the blank (4 sentences):\n  Yesterday the _____ was seen"));
    }

    #[tokio::test]
    async fn stale_timers_print_nothing() {
        let mut state = state(&["cat", "dog", "bird", "fish"]);
        start_game(&mut state, GameKind::Scramble).unwrap();
        let stale = Timer {
            game: GameKind::Quiz,
            round: 1,
            kind: vocab_core::TimerKind::Advance,
            delay: std::time::Duration::ZERO,
        };
        assert_eq!(on_timer(&mut state, stale), None);
    }
}
