//! Target-mirroring word formatting.
//!
//! Recognition engines are inconsistent about casing and punctuation, so
//! spoken words are reshaped to the orthography of the target token at the
//! same position before display or comparison.

/// Characters that form the core of a word token.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '\''
}

/// Strip a token to its alphabetic/apostrophe core.
fn word_core(token: &str) -> String {
    token.chars().filter(|c| is_word_char(*c)).collect()
}

/// Everything outside the core, in order. In practice this is the
/// punctuation attached to the token ("down." yields ".").
fn attached_punctuation(token: &str) -> String {
    token.chars().filter(|c| !is_word_char(*c)).collect()
}

/// Whether a core starts with an uppercase (or caseless) character.
///
/// An empty core (a purely-non-alphabetic token) counts as not capitalized.
fn is_capitalized(core: &str) -> bool {
    core.chars().next().map(|c| !c.is_lowercase()).unwrap_or(false)
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reshape spoken words to mirror the target tokens position by position.
///
/// Each spoken word is lowercased, stripped to its `[a-z']` core,
/// re-capitalized when the target token at the same position is capitalized,
/// and suffixed with that token's attached punctuation. A spoken word with no
/// corresponding target token passes through unmodified.
pub fn format_words_to_match<S: AsRef<str>>(spoken: &[S], target_tokens: &[&str]) -> Vec<String> {
    spoken
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let word = word.as_ref();
            let Some(token) = target_tokens.get(i) else {
                return word.to_string();
            };

            let core = word_core(token);
            let punctuation = attached_punctuation(token);

            let mut formatted: String = word
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_lowercase() || *c == '\'')
                .collect();

            if is_capitalized(&core) && !formatted.is_empty() {
                formatted = capitalize_first(&formatted);
            }

            formatted.push_str(&punctuation);
            formatted
        })
        .collect()
}
