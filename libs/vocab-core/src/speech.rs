//! Pronunciation collaborator.

/// Fire-and-forget text-to-speech.
///
/// Implementations must return promptly and swallow their own failures;
/// the session never waits on or retries a pronunciation.
pub trait Speaker {
    fn pronounce(&self, word: &str, locale: &str);
}

impl<T: Speaker + ?Sized> Speaker for &T {
    fn pronounce(&self, word: &str, locale: &str) {
        (**self).pronounce(word, locale)
    }
}
