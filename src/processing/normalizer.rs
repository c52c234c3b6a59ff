//! Text normalization shared by every scoring stage

use serde::Serialize;
use std::fmt;

/// Punctuation that survives normalization. Needed for contact details
/// (`@`, `.`, `+`, `-`) and for symbol-bearing skills such as `c++`, `c#`,
/// `node.js` and `ci/cd`.
pub const ALLOWED_PUNCTUATION: [char; 6] = ['@', '.', '+', '-', '#', '/'];

/// Lower-cased text with collapsed whitespace and only alphanumerics,
/// single spaces and [`ALLOWED_PUNCTUATION`] left in it.
///
/// The only way to build one is [`normalize`], so every value upholds that
/// shape and normalizing it again is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Whitespace-separated token count.
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

enum CharClass {
    Keep(char),
    Separator,
    Drop,
}

fn classify(c: char) -> CharClass {
    match c {
        // Soft hyphen, zero-width characters and BOM show up in PDF extractions
        '\u{00AD}' | '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}' => CharClass::Drop,
        '\u{2010}'..='\u{2015}' | '\u{2212}' => CharClass::Keep('-'),
        c if c.is_whitespace() => CharClass::Separator,
        c if c.is_control() => CharClass::Drop,
        c if c.is_alphanumeric() || ALLOWED_PUNCTUATION.contains(&c) => CharClass::Keep(c),
        _ => CharClass::Separator,
    }
}

/// Normalize raw extracted text.
///
/// Total over any input: characters outside the permitted set act as word
/// separators, control characters vanish, and whitespace runs collapse to a
/// single space with no leading or trailing space.
pub fn normalize(raw: &str) -> NormalizedText {
    let mut normalized = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars().flat_map(char::to_lowercase) {
        match classify(c) {
            CharClass::Keep(kept) => {
                if pending_space && !normalized.is_empty() {
                    normalized.push(' ');
                }
                pending_space = false;
                normalized.push(kept);
            }
            CharClass::Separator => pending_space = true,
            CharClass::Drop => {}
        }
    }

    NormalizedText(normalized)
}
