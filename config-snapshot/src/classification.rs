//! Built-in classes of sensitive configuration keys.
//!
//! A key is sensitive when its name contains one of these fragments anywhere,
//! compared case-insensitively. `DbPassword`, `password_hash` and
//! `GITHUB_TOKEN` are all sensitive.

use std::fmt;

/// A class of sensitive key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyClass {
    /// Authentication and access tokens.
    Token,
    /// Passwords.
    Password,
    /// Generic secrets and private material.
    Secret,
    /// API keys.
    ApiKey,
    /// Credentials of any kind.
    Credential,
    /// Abbreviated password fields.
    Pwd,
}

impl KeyClass {
    /// Every built-in class, in matching order.
    pub const ALL: [Self; 6] = [
        Self::Token,
        Self::Password,
        Self::Secret,
        Self::ApiKey,
        Self::Credential,
        Self::Pwd,
    ];

    /// The lowercase fragment that marks a key as belonging to this class.
    pub const fn fragment(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Password => "password",
            Self::Secret => "secret",
            Self::ApiKey => "apikey",
            Self::Credential => "credential",
            Self::Pwd => "pwd",
        }
    }

    /// Returns the first class whose fragment occurs in `key`, ignoring case.
    pub fn classify(key: &str) -> Option<Self> {
        let lowered = key.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|class| lowered.contains(class.fragment()))
    }
}

impl fmt::Display for KeyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Token => "Token",
            Self::Password => "Password",
            Self::Secret => "Secret",
            Self::ApiKey => "ApiKey",
            Self::Credential => "Credential",
            Self::Pwd => "Pwd",
        };
        f.write_str(name)
    }
}
