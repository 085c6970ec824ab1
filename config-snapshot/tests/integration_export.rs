//! Integration tests for writing snapshot documents.
//!
//! These tests verify that:
//! - exports create missing directories and overwrite earlier snapshots,
//! - file-system failures surface as `ExportError` and are logged, and
//! - nothing is written when the destination cannot be prepared.

use std::{
    cell::RefCell,
    fs, io,
    path::Path,
    sync::{Arc, Mutex},
};

use config_snapshot::{export, ExportError, Exporter, FileSystem, SnapshotOptions, Value};
use slog::{o, Drain, Level, Logger, Never, OwnedKVList, Record};

fn settings() -> Value {
    let mut settings = Value::map();
    settings.insert("Host", "db.internal");
    settings.insert("Password", "hunter2");
    settings.insert("Retries", 3);
    settings
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedLogs {
    fn logger(&self) -> Logger {
        Logger::root(self.clone().fuse(), o!())
    }

    fn messages(&self) -> Vec<(Level, String)> {
        self.0.lock().unwrap().clone()
    }
}

impl Drain for CapturedLogs {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record<'_>, _values: &OwnedKVList) -> Result<(), Never> {
        self.0
            .lock()
            .unwrap()
            .push((record.level(), record.msg().to_string()));
        Ok(())
    }
}

#[test]
fn test_export_creates_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagnostics").join("2024").join("settings.psd1");

    let written = export(&settings(), &path).unwrap();

    assert_eq!(written, path);
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "@{\n    Host = 'db.internal'\n    Password = '********'\n    Retries = '3'\n}\n"
    );
}

#[test]
fn test_export_overwrites_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.psd1");
    fs::write(&path, "stale contents that are much longer than the new snapshot\n".repeat(20))
        .unwrap();

    let mut small = Value::map();
    small.insert("Mode", "fast");
    export(&small, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "@{\n    Mode = 'fast'\n}\n");
}

#[test]
fn test_repeated_exports_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.psd1");
    let second = dir.path().join("b.psd1");
    let exporter = Exporter::new();

    exporter.export(&settings(), &first).unwrap();
    exporter.export(&settings(), &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_export_into_a_file_path_fails_to_create_directory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, "not a directory").unwrap();
    let logs = CapturedLogs::default();

    let err = Exporter::new()
        .with_logger(logs.logger())
        .export(&settings(), blocker.join("settings.psd1"))
        .unwrap_err();

    assert!(matches!(err, ExportError::CreateDir { .. }));
    assert!(logs
        .messages()
        .iter()
        .any(|(level, msg)| *level == Level::Error && msg.contains("directory")));
}

#[test]
fn test_successful_export_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let logs = CapturedLogs::default();

    Exporter::new()
        .with_logger(logs.logger())
        .export(&settings(), dir.path().join("settings.psd1"))
        .unwrap();

    let messages = logs.messages();
    assert!(messages
        .iter()
        .any(|(level, msg)| *level == Level::Info && msg == "configuration snapshot exported"));
    assert!(messages.iter().all(|(level, _)| *level != Level::Error));
}

/// Records every call and fails writes on demand.
#[derive(Default)]
struct ScriptedFileSystem {
    fail_write: bool,
    calls: RefCell<Vec<String>>,
}

impl FileSystem for ScriptedFileSystem {
    fn ensure_parent_dir(&self, path: &Path) -> io::Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("mkdir {}", path.display()));
        Ok(())
    }

    fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
        self.calls
            .borrow_mut()
            .push(format!("write {} ({} bytes)", path.display(), text.len()));
        if self.fail_write {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume"))
        } else {
            Ok(())
        }
    }
}

#[test]
fn test_write_failure_is_reported_with_path() {
    let file_system = ScriptedFileSystem {
        fail_write: true,
        ..ScriptedFileSystem::default()
    };

    let err = Exporter::new()
        .with_file_system(&file_system)
        .export(&settings(), "out/settings.psd1")
        .unwrap_err();

    match &err {
        ExportError::Write { path, source } => {
            assert_eq!(path, Path::new("out/settings.psd1"));
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(file_system.calls.borrow().len(), 2);
}

#[test]
fn test_directory_is_prepared_before_writing() {
    let file_system = ScriptedFileSystem::default();
    let options = SnapshotOptions::default().with_indent_width(2);

    Exporter::new()
        .with_options(options)
        .with_file_system(&file_system)
        .export(&settings(), "out/settings.psd1")
        .unwrap();

    let calls = file_system.calls.borrow();
    assert_eq!(calls[0], "mkdir out/settings.psd1");
    assert!(calls[1].starts_with("write out/settings.psd1"));
}
