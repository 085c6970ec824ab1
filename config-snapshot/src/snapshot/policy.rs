//! Character-level masking of token matches.
//!
//! Masking is a pure string transformation. It does not decide what is
//! sensitive; the redactor finds the spans and hands them here.

/// Keeps selected segments visible while masking the remainder.
///
/// The policy operates on Unicode scalar values. If the configuration keeps the
/// entire value visible, the output is unchanged.
#[derive(Clone, Copy, Debug)]
pub(crate) struct KeepConfig {
    /// Number of leading characters to keep visible.
    visible_prefix: usize,
    /// Number of trailing characters to keep visible.
    visible_suffix: usize,
    /// Symbol used to mask the middle.
    mask_char: char,
}

impl KeepConfig {
    /// Keeps `visible_prefix` leading and `visible_suffix` trailing characters.
    pub(crate) fn both(visible_prefix: usize, visible_suffix: usize) -> Self {
        Self {
            visible_prefix,
            visible_suffix,
            mask_char: '*',
        }
    }

    /// Uses a specific masking character.
    pub(crate) fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Applies the policy to `value`.
    ///
    /// If `visible_prefix + visible_suffix >= total_length`, the value is
    /// returned unchanged.
    pub(crate) fn apply_to(&self, value: &str) -> String {
        let mut chars: Vec<char> = value.chars().collect();
        let total = chars.len();
        if self.visible_prefix + self.visible_suffix >= total {
            return value.to_owned();
        }

        for ch in &mut chars[self.visible_prefix..(total - self.visible_suffix)] {
            *ch = self.mask_char;
        }
        chars.into_iter().collect()
    }
}
