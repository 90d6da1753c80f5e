//! Pronunciation through an external text-to-speech program.

use std::process::Stdio;
use tokio::process::Command;
use vocab_core::Speaker;

/// Runs the configured program with the word as its last argument and the
/// locale in `VOCAB_SPEECH_LOCALE`. Without a program it stays silent.
#[derive(Debug, Clone, Default)]
pub struct CommandSpeaker {
    program: Option<(String, Vec<String>)>,
}

impl CommandSpeaker {
    pub fn new(command: Option<&str>) -> Self {
        let program = command.and_then(|c| {
            let mut parts = c.split_whitespace().map(str::to_string);
            let program = parts.next()?;
            Some((program, parts.collect()))
        });
        Self { program }
    }

    pub fn is_enabled(&self) -> bool {
        self.program.is_some()
    }
}

impl Speaker for CommandSpeaker {
    fn pronounce(&self, word: &str, locale: &str) {
        let Some((program, args)) = &self.program else {
            tracing::trace!(word, "no speech command configured");
            return;
        };
        let spawned = Command::new(program)
            .args(args)
            .arg(word)
            .env("VOCAB_SPEECH_LOCALE", locale)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        // the child is never awaited; tokio reaps it in the background
        if let Err(e) = spawned {
            tracing::warn!(program, error = %e, "speech command failed to start");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_program_and_arguments() {
        let speaker = CommandSpeaker::new(Some("espeak -v en-us"));
        assert_eq!(
            speaker.program,
            Some(("espeak".to_string(), vec!["-v".to_string(), "en-us".to_string()]))
        );
        assert!(!CommandSpeaker::new(None).is_enabled());
        assert!(!CommandSpeaker::new(Some("   ")).is_enabled());
    }

    #[tokio::test]
    async fn missing_program_is_swallowed() {
        let speaker = CommandSpeaker::new(Some("definitely-not-a-real-tts-binary"));
        speaker.pronounce("apple", "en-US");
    }
}
