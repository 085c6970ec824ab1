//! Adapters for emitting configuration snapshots through `slog`.
//!
//! This module connects [`Describe`] with `slog` by providing a `slog::Value`
//! that serializes the *safe* snapshot of a value as structured JSON via
//! `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is the redacted, bounded snapshot,
//!   never the original value.
//! - Avoiding fallible logging APIs: serialization failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog` or decide what is sensitive; that is the job
//! of [`SnapshotOptions`].

use serde_json::Value as JsonValue;
use slog::{o, Discard, Key, Logger, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{describe::Describe, options::SnapshotOptions, snapshot::Traversal};

/// A `slog::Value` that emits a captured snapshot as structured JSON.
///
/// The payload is stored as a `serde_json::Value` and emitted via
/// `slog`'s nested-value support.
pub struct SnapshotJson {
    value: JsonValue,
}

impl SnapshotJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }
}

impl SlogValue for SnapshotJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their snapshot as JSON.
///
/// The original value is never serialized: sensitive keys are masked, tokens
/// are partially masked, and cycles or oversized parts are replaced by
/// markers exactly as in an exported document.
///
/// ## Example
/// ```ignore
/// use config_snapshot::slog::IntoSnapshotJson;
///
/// info!(logger, "settings loaded"; "settings" => settings.snapshot_json());
/// ```
pub trait IntoSnapshotJson: Describe + Sized {
    /// Captures `self` with default options.
    ///
    /// If converting the snapshot into `serde_json::Value` fails, the
    /// returned value stores a JSON string with the message
    /// `"Failed to serialize snapshot"`.
    fn snapshot_json(&self) -> SnapshotJson {
        self.snapshot_json_with(&SnapshotOptions::default())
    }

    /// Captures `self` with `options`.
    fn snapshot_json_with(&self, options: &SnapshotOptions) -> SnapshotJson {
        let logger = Logger::root(Discard, o!());
        let tree = Traversal::new(options, &logger).run(self);
        let json_value = serde_json::to_value(tree)
            .unwrap_or_else(|_| JsonValue::String("Failed to serialize snapshot".to_string()));
        SnapshotJson::new(json_value)
    }
}

impl<T> IntoSnapshotJson for T where T: Describe {}
