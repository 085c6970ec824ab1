//! The snapshot tree.

use std::fmt;

/// Marker substituted for content that was not captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// A container that is already being captured further up the path.
    CyclicRef,
    /// A container nested deeper than the configured limit.
    MaxDepth,
    /// Items of a sequence past the configured limit.
    Truncated,
}

impl Sentinel {
    /// The literal marker text written in place of the content.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::CyclicRef => "[CyclicRef]",
            Self::MaxDepth => "[MaxDepth]",
            Self::Truncated => "[Truncated]",
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// A finite, acyclic, redacted copy of a configuration graph.
///
/// Every leaf is already normalized text, so nothing in this tree can leak a
/// sensitive value or recurse forever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SafeValue {
    /// Normalized, masked leaf text.
    Scalar(String),
    /// Entries in emission order.
    Mapping(Vec<(String, SafeValue)>),
    /// Items in order.
    Sequence(Vec<SafeValue>),
    /// A marker for content that was not captured.
    Sentinel(Sentinel),
}

impl SafeValue {
    /// An empty mapping.
    pub const fn empty_mapping() -> Self {
        Self::Mapping(Vec::new())
    }

    /// Looks up a mapping entry by key.
    pub fn get(&self, key: &str) -> Option<&SafeValue> {
        match self {
            Self::Mapping(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// The text of a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// The items of a sequence.
    pub fn as_sequence(&self) -> Option<&[SafeValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The marker, if this is a sentinel.
    pub fn as_sentinel(&self) -> Option<Sentinel> {
        match self {
            Self::Sentinel(sentinel) => Some(*sentinel),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SafeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Self::Scalar(text) => serializer.serialize_str(text),
            Self::Sentinel(sentinel) => serializer.serialize_str(sentinel.marker()),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SafeValue, Sentinel};

    #[test]
    fn markers_are_bracketed_names() {
        assert_eq!(Sentinel::CyclicRef.marker(), "[CyclicRef]");
        assert_eq!(Sentinel::MaxDepth.to_string(), "[MaxDepth]");
        assert_eq!(Sentinel::Truncated.marker(), "[Truncated]");
    }

    #[test]
    fn get_finds_entries_by_key() {
        let tree = SafeValue::Mapping(vec![
            ("Host".to_owned(), SafeValue::Scalar("db".to_owned())),
            ("Self".to_owned(), SafeValue::Sentinel(Sentinel::CyclicRef)),
        ]);
        assert_eq!(tree.get("Host").and_then(SafeValue::as_scalar), Some("db"));
        assert_eq!(
            tree.get("Self").and_then(SafeValue::as_sentinel),
            Some(Sentinel::CyclicRef)
        );
        assert!(tree.get("Missing").is_none());
        assert!(SafeValue::Scalar(String::new()).get("Host").is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_plain_json() {
        let tree = SafeValue::Mapping(vec![
            ("Password".to_owned(), SafeValue::Scalar("********".to_owned())),
            (
                "Items".to_owned(),
                SafeValue::Sequence(vec![
                    SafeValue::Scalar("1".to_owned()),
                    SafeValue::Sentinel(Sentinel::Truncated),
                ]),
            ),
        ]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(
            json,
            r#"{"Password":"********","Items":["1","[Truncated]"]}"#
        );
    }
}
