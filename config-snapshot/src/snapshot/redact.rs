//! Sensitive keys and embedded secret tokens.

use std::{borrow::Cow, fmt};

use regex::Captures;

use super::policy::KeepConfig;
use crate::{classification::KeyClass, options::SnapshotOptions};

/// Why a key was judged sensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyMatch<'a> {
    /// One of the built-in classes.
    Builtin(KeyClass),
    /// A configured fragment.
    Custom(&'a str),
}

impl fmt::Display for KeyMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(class) => write!(f, "{class}"),
            Self::Custom(fragment) => write!(f, "custom:{fragment}"),
        }
    }
}

/// Decides what is sensitive and how it is hidden.
///
/// ```rust
/// use config_snapshot::{Redactor, SnapshotOptions};
///
/// let options = SnapshotOptions::default();
/// let redactor = Redactor::new(&options);
/// assert!(redactor.is_sensitive_key("DbPassword"));
/// assert_eq!(redactor.mask_value(), "********");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Redactor<'a> {
    options: &'a SnapshotOptions,
}

impl<'a> Redactor<'a> {
    /// Creates a redactor over `options`.
    pub fn new(options: &'a SnapshotOptions) -> Self {
        Self { options }
    }

    /// Classifies `key`, ignoring case. Built-in classes are tried first.
    pub fn classify_key(&self, key: &str) -> Option<KeyMatch<'a>> {
        if let Some(class) = KeyClass::classify(key) {
            return Some(KeyMatch::Builtin(class));
        }
        if self.options.key_fragments().is_empty() {
            return None;
        }
        let lowered = key.to_lowercase();
        self.options
            .key_fragments()
            .iter()
            .find(|fragment| lowered.contains(fragment.as_str()))
            .map(|fragment| KeyMatch::Custom(fragment.as_str()))
    }

    /// Whether the value under `key` must be masked entirely.
    pub fn is_sensitive_key(&self, key: &str) -> bool {
        self.classify_key(key).is_some()
    }

    /// The full replacement for a sensitive value.
    pub fn mask_value(&self) -> &'a str {
        self.options.mask()
    }

    /// Masks the secret part of every recognised token in `text`.
    ///
    /// Text outside the `secret` group of each match is left as it was.
    /// Returns the input unchanged (borrowed) when nothing matches.
    pub fn mask_tokens<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mask_char = self.options.mask_char();
        let mut text = Cow::Borrowed(text);
        for pattern in self.options.token_patterns() {
            let replaced = match pattern
                .regex()
                .replace_all(&text, |caps: &Captures<'_>| mask_match(caps, mask_char))
            {
                Cow::Owned(masked) => Some(masked),
                Cow::Borrowed(_) => None,
            };
            if let Some(masked) = replaced {
                text = Cow::Owned(masked);
            }
        }
        text
    }
}

fn mask_match(caps: &Captures<'_>, mask_char: char) -> String {
    let Some(whole) = caps.get(0) else {
        return String::new();
    };
    let Some(secret) = caps.name("secret") else {
        return whole.as_str().to_owned();
    };
    let text = whole.as_str();
    let before = text[..secret.start() - whole.start()].chars().count();
    let after = text[secret.end() - whole.start()..].chars().count();
    KeepConfig::both(before, after)
        .with_mask_char(mask_char)
        .apply_to(text)
}
