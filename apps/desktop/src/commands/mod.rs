//! Line commands understood by the shell.

pub mod deck;
pub mod settings;
pub mod stats;
pub mod study;

use crate::state::AppState;
use vocab_core::GameKind;

#[derive(Debug)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<vocab_core::VocabError> for CommandError {
    fn from(e: vocab_core::VocabError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        Self { message: e.to_string() }
    }
}

pub const HELP: &str = "\
Flashcards:  topics | load <n|file> | card | next | prev | shuffle | speak | learned | hard
Games:       play <quiz|fill|scramble|match> | menu
  quiz/fill: pick <n> | go (after a wrong fill-in answer)
  scramble:  tile <n> | undo <n> | skip
  matching:  flip <n>
Progress:    stats | reset confirm
Settings:    settings | set <name> <value>
Other:       help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Topics,
    Load(String),
    Card,
    Next,
    Prev,
    Shuffle,
    Speak,
    Learned,
    Difficult,
    Play(GameKind),
    Pick(usize),
    Continue,
    Tile(usize),
    Undo(usize),
    Skip,
    Flip(usize),
    Menu,
    Stats,
    Reset { confirmed: bool },
    Settings,
    Set { name: String, value: String },
}

/// 1-based number as typed by the user, returned 0-based.
fn index(arg: Option<&str>, what: &str) -> Result<usize, CommandError> {
    arg.and_then(|a| a.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| CommandError::new(format!("{what} needs a number from the list")))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(CommandError::new("empty command"));
        };
        let arg = parts.next();

        let command = match name.to_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "topics" => Self::Topics,
            "load" => {
                let rest: Vec<&str> = arg.into_iter().chain(parts.by_ref()).collect();
                if rest.is_empty() {
                    return Err(CommandError::new("load needs a topic number or file name"));
                }
                Self::Load(rest.join(" "))
            }
            "card" => Self::Card,
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "shuffle" => Self::Shuffle,
            "speak" | "say" => Self::Speak,
            "learned" | "know" => Self::Learned,
            "hard" | "difficult" => Self::Difficult,
            "play" => {
                let game = arg
                    .and_then(GameKind::from_str)
                    .ok_or_else(|| CommandError::new("play quiz | fill | scramble | match"))?;
                Self::Play(game)
            }
            "pick" => Self::Pick(index(arg, "pick")?),
            "go" | "continue" => Self::Continue,
            "tile" => Self::Tile(index(arg, "tile")?),
            "undo" => Self::Undo(index(arg, "undo")?),
            "skip" => Self::Skip,
            "flip" => Self::Flip(index(arg, "flip")?),
            "menu" | "back" => Self::Menu,
            "stats" => Self::Stats,
            "reset" => Self::Reset {
                confirmed: arg == Some("confirm"),
            },
            "settings" => Self::Settings,
            "set" => {
                let (Some(name), Some(value)) = (arg, parts.next()) else {
                    return Err(CommandError::new("set <name> <value>"));
                };
                let value = std::iter::once(value).chain(parts.by_ref()).collect::<Vec<_>>().join(" ");
                Self::Set {
                    name: name.to_string(),
                    value,
                }
            }
            other => return Err(CommandError::new(format!("unknown command `{other}`, try `help`"))),
        };
        Ok(command)
    }
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Print(String),
    Quit,
}

pub async fn execute(state: &mut AppState, command: Command) -> Result<Outcome, CommandError> {
    let text = match command {
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
        Command::Topics => deck::list_topics(state).await?,
        Command::Load(topic) => deck::load_topic(state, &topic).await?,
        Command::Card => deck::show_card(state),
        Command::Next => deck::next_card(state)?,
        Command::Prev => deck::previous_card(state)?,
        Command::Shuffle => deck::shuffle(state)?,
        Command::Speak => deck::speak(state)?,
        Command::Learned => deck::mark_learned(state)?,
        Command::Difficult => deck::mark_difficult(state)?,
        Command::Play(game) => study::start_game(state, game)?,
        Command::Pick(option) => study::pick(state, option)?,
        Command::Continue => study::proceed(state)?,
        Command::Tile(tile) => study::place_tile(state, tile)?,
        Command::Undo(tile) => study::remove_tile(state, tile)?,
        Command::Skip => study::skip(state)?,
        Command::Flip(card) => study::flip(state, card)?,
        Command::Menu => study::leave_game(state),
        Command::Stats => stats::show_stats(state),
        Command::Reset { confirmed } => stats::reset_progress(state, confirmed)?,
        Command::Settings => settings::show_settings(state)?,
        Command::Set { name, value } => settings::set_setting(state, &name, &value)?,
    };
    Ok(Outcome::Print(text))
}
