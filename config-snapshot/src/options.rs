//! Engine settings: traversal bounds, masking, and the sensitive vocabulary.
//!
//! Defaults match what diagnostics exports have always produced. Every bound is
//! adjustable through the `with_*` builders, and with the `serde` feature the
//! whole set deserializes from a settings document.

use std::{borrow::Cow, num::NonZeroUsize, sync::LazyLock};

use regex::Regex;

use crate::error::ConfigError;

/// Deepest container level captured before a `[MaxDepth]` marker is emitted.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Sequence items captured before a `[Truncated]` marker is appended.
pub const DEFAULT_SEQUENCE_LIMIT: usize = 500;

/// Replacement for the value of a sensitive key.
pub const MASK: &str = "********";

/// Spaces per nesting level in the encoded text.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Built-in secret-token shape: a four-character prefix ending in `_`
/// followed by twenty or more alphanumerics (`ghp_…`, `gho_…`, `xox_…`).
///
/// The pattern is not anchored to a word boundary, so a token glued to a
/// name (`GH_ghp_…`, `github_pat_…`) is still found.
pub const DEFAULT_TOKEN_PATTERN: &str =
    r"(?P<prefix>[A-Za-z0-9]{3}_)(?P<secret>[A-Za-z0-9]{20,})";

static BUILTIN_TOKEN_PATTERN: LazyLock<Option<TokenPattern>> =
    LazyLock::new(|| TokenPattern::new(DEFAULT_TOKEN_PATTERN).ok());

/// A compiled secret-token pattern.
///
/// The pattern must define a `prefix` and a `secret` named group. Only the
/// `secret` span is masked; everything else in the match stays readable.
#[derive(Clone, Debug)]
pub struct TokenPattern {
    regex: Regex,
}

impl TokenPattern {
    /// Compiles and validates a pattern.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidTokenPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        for group in ["prefix", "secret"] {
            if !regex.capture_names().flatten().any(|name| name == group) {
                return Err(ConfigError::MissingCaptureGroup {
                    pattern: pattern.to_owned(),
                    group,
                });
            }
        }
        Ok(Self { regex })
    }

    /// The built-in pattern, [`DEFAULT_TOKEN_PATTERN`].
    ///
    /// `None` only if the constant fails to compile, which the unit tests
    /// rule out.
    pub fn builtin() -> Option<Self> {
        BUILTIN_TOKEN_PATTERN.clone()
    }

    /// The source text of the pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Settings for one exporter.
///
/// ```rust
/// use std::num::NonZeroUsize;
///
/// use config_snapshot::SnapshotOptions;
///
/// let options = SnapshotOptions::default()
///     .with_max_depth(NonZeroUsize::new(8).unwrap())
///     .with_sensitive_fragment("connectionstring")
///     .unwrap();
/// assert_eq!(options.max_depth(), 8);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "SnapshotSettings")
)]
pub struct SnapshotOptions {
    max_depth: usize,
    sequence_limit: usize,
    mask: Cow<'static, str>,
    mask_char: char,
    /// Extra lowercase fragments on top of the built-in key classes.
    key_fragments: Vec<String>,
    token_patterns: Vec<TokenPattern>,
    indent_width: usize,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            sequence_limit: DEFAULT_SEQUENCE_LIMIT,
            mask: Cow::Borrowed(MASK),
            mask_char: '*',
            key_fragments: Vec::new(),
            token_patterns: TokenPattern::builtin().into_iter().collect(),
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl SnapshotOptions {
    /// Sets the deepest container level that is captured.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: NonZeroUsize) -> Self {
        self.max_depth = max_depth.get();
        self
    }

    /// Sets how many items of a sequence are captured.
    #[must_use]
    pub fn with_sequence_limit(mut self, limit: NonZeroUsize) -> Self {
        self.sequence_limit = limit.get();
        self
    }

    /// Replaces the text substituted for sensitive values.
    #[must_use]
    pub fn with_mask<M>(mut self, mask: M) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        self.mask = mask.into();
        self
    }

    /// Uses a specific character when masking token secrets.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Marks keys containing `fragment` (any case) as sensitive.
    pub fn with_sensitive_fragment(mut self, fragment: &str) -> Result<Self, ConfigError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(ConfigError::EmptyKeyFragment);
        }
        let lowered = fragment.to_lowercase();
        if !self.key_fragments.contains(&lowered) {
            self.key_fragments.push(lowered);
        }
        Ok(self)
    }

    /// Adds a token pattern; see [`TokenPattern`].
    pub fn with_token_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.token_patterns.push(TokenPattern::new(pattern)?);
        Ok(self)
    }

    /// Drops every token pattern, including the built-in one.
    #[must_use]
    pub fn without_token_patterns(mut self) -> Self {
        self.token_patterns.clear();
        self
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Deepest container level captured.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sequence items captured before truncation.
    pub fn sequence_limit(&self) -> usize {
        self.sequence_limit
    }

    /// Text substituted for sensitive values.
    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// Character used to mask token secrets.
    pub fn mask_char(&self) -> char {
        self.mask_char
    }

    /// Custom sensitive key fragments, lowercased.
    pub fn key_fragments(&self) -> &[String] {
        &self.key_fragments
    }

    /// Active token patterns.
    pub fn token_patterns(&self) -> &[TokenPattern] {
        &self.token_patterns
    }

    /// Spaces per nesting level.
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }
}

/// Raw settings document accepted by `SnapshotOptions`' `Deserialize` impl.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotSettings {
    max_depth: Option<NonZeroUsize>,
    sequence_limit: Option<NonZeroUsize>,
    mask: Option<String>,
    mask_char: Option<char>,
    #[serde(default)]
    sensitive_keys: Vec<String>,
    #[serde(default)]
    token_patterns: Vec<String>,
    #[serde(default = "default_true")]
    builtin_token_pattern: bool,
    indent_width: Option<usize>,
}

#[cfg(feature = "serde")]
const fn default_true() -> bool {
    true
}

#[cfg(feature = "serde")]
impl TryFrom<SnapshotSettings> for SnapshotOptions {
    type Error = ConfigError;

    fn try_from(settings: SnapshotSettings) -> Result<Self, Self::Error> {
        let mut options = Self::default();
        if !settings.builtin_token_pattern {
            options = options.without_token_patterns();
        }
        if let Some(max_depth) = settings.max_depth {
            options = options.with_max_depth(max_depth);
        }
        if let Some(limit) = settings.sequence_limit {
            options = options.with_sequence_limit(limit);
        }
        if let Some(mask) = settings.mask {
            options = options.with_mask(mask);
        }
        if let Some(mask_char) = settings.mask_char {
            options = options.with_mask_char(mask_char);
        }
        if let Some(width) = settings.indent_width {
            options = options.with_indent_width(width);
        }
        for fragment in &settings.sensitive_keys {
            options = options.with_sensitive_fragment(fragment)?;
        }
        for pattern in &settings.token_patterns {
            options = options.with_token_pattern(pattern)?;
        }
        Ok(options)
    }
}
