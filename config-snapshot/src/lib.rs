//! Safe, bounded snapshots of configuration graphs.
//!
//! A snapshot is a redacted copy of a configuration that can be handed to
//! support or attached to a bug report. Capturing one never fails and never
//! leaks a secret:
//! - Values under sensitive keys (`Password`, `ApiKey`, `GITHUB_TOKEN`, ...)
//!   are replaced by `********` without being read.
//! - Secret tokens embedded in text keep their prefix and lose the rest.
//! - Cycles, excessive nesting and oversized sequences become
//!   `[CyclicRef]`, `[MaxDepth]` and `[Truncated]` markers.
//! - A member that cannot be read is left out; the rest is still captured.
//!
//! The result is rendered as a `@{ }` / `@( )` document with single-quoted
//! leaves and written to disk by an [`Exporter`].
//!
//! Inputs implement [`Describe`]. Standard collections, primitives, `chrono`
//! and `rust_decimal` types, [`Value`] and (with the `serde` feature)
//! `serde_json::Value` already do. Your own types get it from
//! `#[derive(Snapshot)]`:
//!
//! ```rust
//! use config_snapshot::Snapshot;
//!
//! #[derive(Snapshot)]
//! #[snapshot(rename_all = "PascalCase")]
//! struct Database {
//!     host: String,
//!     port: u16,
//!     password: String,
//! }
//!
//! let db = Database { host: "db".into(), port: 5432, password: "hunter2".into() };
//! let text = config_snapshot::render(&db);
//! assert!(text.contains("Port = '5432'"));
//! assert!(text.contains("Password = '********'"));
//! ```
//!
//! What this crate does not do:
//! - parse configuration files or read the environment
//! - decide where snapshots are stored
//!
//! The `Snapshot` derive macro lives in `config-snapshot-derive` and is
//! re-exported when the `derive` feature is enabled.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[cfg(feature = "derive")]
pub use config_snapshot_derive::Snapshot;

#[allow(unused_extern_crates)]
extern crate self as config_snapshot;

// Module declarations
mod adapters;
mod classification;
mod describe;
mod error;
mod export;
#[cfg(feature = "serde")]
mod json;
mod options;
#[cfg(feature = "serde")]
pub mod slog;
mod snapshot;
mod value;

// Re-exports
pub use classification::KeyClass;
pub use describe::{
    Describe, Entries, Guard, Guarded, Items, Mapping, Member, Record, Scalar, Sequence, Shape,
};
pub use error::{AccessError, ConfigError, ExportError};
pub use export::{export, render, snapshot, Exporter, FileSystem, LocalFileSystem};
pub use options::{
    SnapshotOptions, TokenPattern, DEFAULT_INDENT_WIDTH, DEFAULT_MAX_DEPTH,
    DEFAULT_SEQUENCE_LIMIT, DEFAULT_TOKEN_PATTERN, MASK,
};
pub use snapshot::{encode, normalize, Encoder, KeyMatch, Redactor, SafeValue, Sentinel};
pub use value::Value;
