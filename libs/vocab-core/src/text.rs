//! Word-boundary aware text helpers shared by the games.

use regex::{NoExpand, Regex};

/// Placeholder substituted for the hidden word in fill-in-the-blank.
pub const BLANK: &str = "_____";

/// Case-insensitive whole-word pattern for `word`.
///
/// `\b` is only anchored on sides where the word itself starts or ends with
/// a word character, so entries like `C++` still match.
fn whole_word_pattern(word: &str) -> Option<Regex> {
    let word = word.trim();
    let first = word.chars().next()?;
    let last = word.chars().next_back()?;
    let is_word_char = |c: char| c.is_alphanumeric() || c == '_';

    let mut pattern = String::from("(?i)");
    if is_word_char(first) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(word));
    if is_word_char(last) {
        pattern.push_str(r"\b");
    }
    Regex::new(&pattern).ok()
}

/// Whether `text` contains `word` as a whole word, ignoring case.
/// `cat` matches "The cat sat" but not "category".
pub fn contains_whole_word(text: &str, word: &str) -> bool {
    whole_word_pattern(word).is_some_and(|re| re.is_match(text))
}

/// Replace every whole-word occurrence of `word` with [`BLANK`].
pub fn blank_whole_word(text: &str, word: &str) -> String {
    match whole_word_pattern(word) {
        Some(re) => re.replace_all(text, NoExpand(BLANK)).into_owned(),
        None => text.to_string(),
    }
}

/// Upper-cased letters of `word` with everything else dropped.
pub fn letters_only(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .collect()
}
