//! Plain-text rendering of session state.

use std::fmt::Write;
use vocab_core::games::{
    CardFace, CardMark, FillBlankEngine, MatchingEngine, QuizEngine, ScrambleEngine, Tile,
};
use vocab_core::{ActiveGame, Deck, ProgressStats, Topic};

/// Drop the emphasis markup carried by example sentences.
pub fn plain(text: &str) -> String {
    text.replace("<strong>", "").replace("</strong>", "")
}

pub fn topics(topics: &[Topic]) -> String {
    if topics.is_empty() {
        return "No topics available.".into();
    }
    let mut out = String::from("Topics:");
    for (i, topic) in topics.iter().enumerate() {
        let _ = write!(out, "\n  {:>2}. {}", i + 1, topic.name);
    }
    out
}

pub fn card(deck: &Deck, learned: bool, difficult: bool) -> String {
    let Some(item) = deck.current() else {
        return "No topic loaded. Use `topics` and `load <n>`.".into();
    };
    let mut marks = String::new();
    if learned {
        marks.push_str(" [learned]");
    }
    if difficult {
        marks.push_str(" [difficult]");
    }
    format!(
        "[{}/{}] {:.0}%{marks}\n  {}\n  meaning: {}\n  example: {}",
        deck.cursor() + 1,
        deck.len(),
        deck.progress() * 100.0,
        item.word,
        item.meaning,
        plain(&item.example),
    )
}

pub fn end_of_deck() -> &'static str {
    "End of the topic. Try a game: play quiz | fill | scramble | match"
}

pub fn stats(stats: &ProgressStats) -> String {
    let mut out = format!(
        "Learned: {}\nDifficult: {}",
        stats.learned_count, stats.difficult_count
    );
    for item in &stats.difficult {
        let _ = write!(out, "\n  {}: {}", item.word, item.meaning);
    }
    out
}

pub fn game(game: &ActiveGame) -> String {
    match game {
        ActiveGame::Quiz(engine) => quiz(engine),
        ActiveGame::FillBlank(engine) => fill_blank(engine),
        ActiveGame::Scramble(engine) => scramble(engine),
        ActiveGame::Matching(engine) => matching(engine),
    }
}

fn quiz(engine: &QuizEngine) -> String {
    let Some(round) = engine.round() else {
        return format!("Quiz finished. Score: {}", engine.score());
    };
    let mut out = format!(
        "Quiz ({} of {} left, score {})\nChoose the meaning of: {}",
        engine.remaining(),
        engine.total(),
        engine.score(),
        round.target.word
    );
    for (i, option) in round.options.iter().enumerate() {
        let _ = write!(out, "\n  {}. {}", i + 1, option.meaning);
    }
    out
}

fn fill_blank(engine: &FillBlankEngine) -> String {
    let Some(round) = engine.round() else {
        return "No sentence available.".into();
    };
    let mut out = format!(
        "Fill in the blank ({} sentences):\n  {}",
        engine.eligible_count(),
        plain(&round.sentence)
    );
    for (i, option) in round.options.iter().enumerate() {
        let _ = write!(out, "\n  {}. {}", i + 1, option.word);
    }
    out
}

fn tiles(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(|t| format!("{}({})", t.letter, t.id + 1))
        .collect::<Vec<_>>()
        .join(" ")
}

fn scramble(engine: &ScrambleEngine) -> String {
    let Some(round) = engine.round() else {
        return "Nothing to scramble.".into();
    };
    format!(
        "Scramble: {}\n  answer: {}\n  letters: {}",
        round.target.meaning,
        tiles(&round.placed),
        tiles(&round.pool)
    )
}

fn matching(engine: &MatchingEngine) -> String {
    let mut out = format!("Matching ({} pairs left)", engine.pairs_remaining());
    for card in engine.cards() {
        let face = match card.face {
            CardFace::Prompt => "word",
            CardFace::Answer => "meaning",
        };
        let mark = match card.mark {
            CardMark::Idle => "",
            CardMark::Selected => " <",
            CardMark::Wrong => " x",
            CardMark::Matched => " ok",
        };
        let _ = write!(out, "\n  {:>2}. [{face}] {}{mark}", card.id + 1, card.text);
    }
    out
}
