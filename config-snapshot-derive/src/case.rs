//! Case conventions for `rename_all`.

use proc_macro2::Ident;
use syn::ext::IdentExt;

/// A case convention applied to member and variant names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RenameRule {
    PascalCase,
    CamelCase,
    SnakeCase,
    KebabCase,
    ScreamingSnakeCase,
    LowerCase,
    UpperCase,
}

impl RenameRule {
    /// Accepted spellings, for error messages.
    pub(crate) const NAMES: [&'static str; 7] = [
        "PascalCase",
        "camelCase",
        "snake_case",
        "kebab-case",
        "SCREAMING_SNAKE_CASE",
        "lowercase",
        "UPPERCASE",
    ];

    pub(crate) fn parse(name: &str) -> Option<Self> {
        let rule = match name {
            "PascalCase" => Self::PascalCase,
            "camelCase" => Self::CamelCase,
            "snake_case" => Self::SnakeCase,
            "kebab-case" => Self::KebabCase,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnakeCase,
            "lowercase" => Self::LowerCase,
            "UPPERCASE" => Self::UpperCase,
            _ => return None,
        };
        Some(rule)
    }

    /// Applies the rule to a `snake_case` field or `PascalCase` variant name.
    pub(crate) fn apply(self, name: &str) -> String {
        let words = split_words(name);
        match self {
            Self::PascalCase => words.iter().map(|word| capitalize(word)).collect(),
            Self::CamelCase => words
                .iter()
                .enumerate()
                .map(|(index, word)| {
                    if index == 0 {
                        word.to_lowercase()
                    } else {
                        capitalize(word)
                    }
                })
                .collect(),
            Self::SnakeCase => join_lower(&words, "_"),
            Self::KebabCase => join_lower(&words, "-"),
            Self::ScreamingSnakeCase => join_lower(&words, "_").to_uppercase(),
            Self::LowerCase => words.concat().to_lowercase(),
            Self::UpperCase => words.concat().to_uppercase(),
        }
    }
}

/// The member name for `ident`: explicit rename first, then the rule, then
/// the identifier itself without any `r#` prefix.
pub(crate) fn member_name(ident: &Ident, rename: Option<String>, rule: Option<RenameRule>) -> String {
    if let Some(rename) = rename {
        return rename;
    }
    let plain = ident.unraw().to_string();
    match rule {
        Some(rule) => rule.apply(&plain),
        None => plain,
    }
}

fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous_lower = false;
    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous_lower = false;
            continue;
        }
        if ch.is_uppercase() && previous_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        previous_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

fn join_lower(words: &[String], separator: &str) -> String {
    words
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use proc_macro2::Span;
    use syn::Ident;

    use super::{member_name, RenameRule};

    #[test]
    fn every_name_parses() {
        for name in RenameRule::NAMES {
            assert!(RenameRule::parse(name).is_some(), "{name}");
        }
        assert!(RenameRule::parse("Snake").is_none());
    }

    #[test]
    fn fields_convert_from_snake_case() {
        assert_eq!(RenameRule::PascalCase.apply("api_key"), "ApiKey");
        assert_eq!(RenameRule::CamelCase.apply("max_pool_size"), "maxPoolSize");
        assert_eq!(RenameRule::KebabCase.apply("retry_after"), "retry-after");
        assert_eq!(RenameRule::ScreamingSnakeCase.apply("log_level"), "LOG_LEVEL");
        assert_eq!(RenameRule::UpperCase.apply("host"), "HOST");
    }

    #[test]
    fn variants_convert_from_pascal_case() {
        assert_eq!(RenameRule::SnakeCase.apply("HttpServer"), "http_server");
        assert_eq!(RenameRule::KebabCase.apply("ReadOnly"), "read-only");
        assert_eq!(RenameRule::PascalCase.apply("Verbose"), "Verbose");
        assert_eq!(RenameRule::LowerCase.apply("ReadOnly"), "readonly");
    }

    #[test]
    fn digits_stay_with_their_word() {
        assert_eq!(RenameRule::PascalCase.apply("ipv4_address"), "Ipv4Address");
        assert_eq!(RenameRule::SnakeCase.apply("Level20Limit"), "level20_limit");
    }

    #[test]
    fn member_name_prefers_explicit_rename() {
        let ident = Ident::new_raw("type", Span::call_site());
        assert_eq!(member_name(&ident, None, None), "type");
        assert_eq!(
            member_name(&ident, None, Some(RenameRule::PascalCase)),
            "Type"
        );
        assert_eq!(
            member_name(&ident, Some("Kind".into()), Some(RenameRule::PascalCase)),
            "Kind"
        );
    }
}
