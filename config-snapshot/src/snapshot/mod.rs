//! Snapshot engine: traversal, redaction, normalization and encoding.
//!
//! Data flows one way. The traversal asks the redactor about every key and
//! the normalizer about every leaf, and the encoder renders what it built.

mod clone;
mod encode;
mod normalize;
mod policy;
mod redact;
mod safe;

pub(crate) use clone::Traversal;
pub use encode::{encode, Encoder};
pub use normalize::normalize;
pub use redact::{KeyMatch, Redactor};
pub use safe::{SafeValue, Sentinel};
