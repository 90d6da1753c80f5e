mod catalog;
mod commands;
mod config;
mod db;
mod speech;
mod state;
mod timers;
mod view;
mod workbook;

use anyhow::Context;
use catalog::Catalog;
use commands::{Command, Outcome};
use config::AppConfig;
use db::{SettingsRepository, SqliteRepository};
use speech::CommandSpeaker;
use state::AppState;
use timers::TimerScheduler;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::Session;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_repository(config: &AppConfig) -> anyhow::Result<SqliteRepository> {
    // Ensure data directory exists
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    SqliteRepository::open(&config.db_path)
        .with_context(|| format!("opening {}", config.db_path.display()))
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env();
    tracing::info!(data = ?config.data, db = %config.db_path.display(), "starting");

    let repository = open_repository(&config)?;
    let mut settings = repository.get_settings()?;
    if let Err(e) = settings.validate() {
        tracing::warn!(error = %e, "stored settings rejected, using defaults");
        settings = vocab_core::SessionSettings::default();
    }
    let speaker = CommandSpeaker::new(config.tts_command.as_deref());
    let session = Session::new(repository, speaker, settings)?;

    let (timers, mut elapsed) = TimerScheduler::new();
    let mut state = AppState::new(session, Catalog::new(&config.data), timers);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print(&mut stdout, "Vocabulary trainer. Type `help` for commands.").await?;
    match commands::deck::list_topics(&mut state).await {
        Ok(text) => print(&mut stdout, &text).await?,
        Err(e) => print(&mut stdout, &format!("Could not load the topic list: {e}")).await?,
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                let result = match Command::parse(&line) {
                    Ok(command) => commands::execute(&mut state, command).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(Outcome::Print(text)) => print(&mut stdout, &text).await?,
                    Ok(Outcome::Quit) => break,
                    Err(e) => print(&mut stdout, &format!("! {e}")).await?,
                }
            }
            Some(timer) = elapsed.recv() => {
                if let Some(text) = commands::study::on_timer(&mut state, timer) {
                    print(&mut stdout, &text).await?;
                }
            }
        }
    }

    state.timers.cancel_all();
    tracing::info!("bye");
    Ok(())
}

async fn print(stdout: &mut tokio::io::Stdout, text: &str) -> std::io::Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
