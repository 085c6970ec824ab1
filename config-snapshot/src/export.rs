//! The public entry point: capture, render, write.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use slog::{error, info, o, Discard, Logger};

use crate::{
    describe::Describe,
    error::ExportError,
    options::SnapshotOptions,
    snapshot::{Encoder, SafeValue, Traversal},
};

/// The file-system operations an export needs.
pub trait FileSystem {
    /// Creates the parent directory of `path` and any missing ancestors.
    fn ensure_parent_dir(&self, path: &Path) -> io::Result<()>;

    /// Replaces the contents of `path` with `text`.
    fn write_text(&self, path: &Path, text: &str) -> io::Result<()>;
}

impl<F> FileSystem for &F
where
    F: FileSystem + ?Sized,
{
    fn ensure_parent_dir(&self, path: &Path) -> io::Result<()> {
        (**self).ensure_parent_dir(path)
    }

    fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
        (**self).write_text(path, text)
    }
}

/// The process's own file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn ensure_parent_dir(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)
    }
}

/// Captures configuration graphs and writes them as snapshot documents.
///
/// ```rust,no_run
/// use config_snapshot::{Exporter, Value};
///
/// let mut settings = Value::map();
/// settings.insert("Host", "db.internal");
/// settings.insert("Password", "hunter2");
///
/// let written = Exporter::new().export(&settings, "diagnostics/settings.psd1")?;
/// println!("snapshot written to {}", written.display());
/// # Ok::<(), config_snapshot::ExportError>(())
/// ```
#[derive(Clone)]
pub struct Exporter<F = LocalFileSystem> {
    options: SnapshotOptions,
    logger: Logger,
    file_system: F,
}

impl Exporter<LocalFileSystem> {
    /// An exporter with default options, writing to the local file system and
    /// discarding its log output.
    pub fn new() -> Self {
        Self {
            options: SnapshotOptions::default(),
            logger: Logger::root(Discard, o!()),
            file_system: LocalFileSystem,
        }
    }
}

impl Default for Exporter<LocalFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Exporter<F> {
    /// Replaces the engine options.
    #[must_use]
    pub fn with_options(mut self, options: SnapshotOptions) -> Self {
        self.options = options;
        self
    }

    /// Logs through `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Writes through `file_system` instead.
    pub fn with_file_system<G>(self, file_system: G) -> Exporter<G>
    where
        G: FileSystem,
    {
        Exporter {
            options: self.options,
            logger: self.logger,
            file_system,
        }
    }

    /// The active options.
    pub fn options(&self) -> &SnapshotOptions {
        &self.options
    }

    /// Captures `value` as a finite, redacted tree.
    pub fn snapshot(&self, value: &dyn Describe) -> SafeValue {
        Traversal::new(&self.options, &self.logger).run(value)
    }

    /// Captures and renders `value` without touching the file system.
    pub fn render(&self, value: &dyn Describe) -> String {
        Encoder::new(self.options.indent_width()).encode(&self.snapshot(value))
    }
}

impl<F> Exporter<F>
where
    F: FileSystem,
{
    /// Writes the snapshot of `value` to `path` and returns the path.
    ///
    /// The document is fully rendered before anything is written, so a
    /// failure never leaves a partial file behind from the traversal. Only
    /// directory creation and the write itself can fail.
    pub fn export<P>(&self, value: &dyn Describe, path: P) -> Result<PathBuf, ExportError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let mut text = self.render(value);
        text.push('\n');

        self.file_system.ensure_parent_dir(path).map_err(|source| {
            error!(self.logger, "failed to create snapshot directory";
                "path" => %path.display(), "error" => %source);
            ExportError::CreateDir {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.file_system.write_text(path, &text).map_err(|source| {
            error!(self.logger, "failed to write snapshot";
                "path" => %path.display(), "error" => %source);
            ExportError::Write {
                path: path.to_path_buf(),
                source,
            }
        })?;

        info!(self.logger, "configuration snapshot exported";
            "path" => %path.display(), "bytes" => text.len());
        Ok(path.to_path_buf())
    }
}

/// Captures `value` with default options.
pub fn snapshot(value: &dyn Describe) -> SafeValue {
    Exporter::new().snapshot(value)
}

/// Captures and renders `value` with default options.
pub fn render(value: &dyn Describe) -> String {
    Exporter::new().render(value)
}

/// Writes the snapshot of `value` to `path` with default options.
pub fn export<P>(value: &dyn Describe, path: P) -> Result<PathBuf, ExportError>
where
    P: AsRef<Path>,
{
    Exporter::new().export(value, path)
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        io,
        path::{Path, PathBuf},
    };

    use super::{Exporter, FileSystem};
    use crate::{error::ExportError, value::Value};

    #[derive(Default)]
    struct RecordingFileSystem {
        created: RefCell<Vec<PathBuf>>,
        written: RefCell<Vec<(PathBuf, String)>>,
        fail_write: bool,
    }

    impl FileSystem for RecordingFileSystem {
        fn ensure_parent_dir(&self, path: &Path) -> io::Result<()> {
            self.created.borrow_mut().push(path.to_path_buf());
            Ok(())
        }

        fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
            if self.fail_write {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.written
                .borrow_mut()
                .push((path.to_path_buf(), text.to_owned()));
            Ok(())
        }
    }

    #[test]
    fn export_creates_parent_then_writes_once() {
        let fs = RecordingFileSystem::default();
        let mut value = Value::map();
        value.insert("Name", "O'Hare");

        let exporter = Exporter::new().with_file_system(&fs);
        let written = exporter.export(&value, "out/settings.psd1").unwrap();

        assert_eq!(written, PathBuf::from("out/settings.psd1"));
        assert_eq!(*fs.created.borrow(), [PathBuf::from("out/settings.psd1")]);
        let writes = fs.written.borrow();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1, "@{\n    Name = 'O''Hare'\n}\n");
    }

    #[test]
    fn write_failure_is_returned() {
        let fs = RecordingFileSystem {
            fail_write: true,
            ..RecordingFileSystem::default()
        };
        let exporter = Exporter::new().with_file_system(&fs);
        let err = exporter.export(&Value::map(), "out/settings.psd1").unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }

    #[test]
    fn render_matches_written_text() {
        let mut value = Value::map();
        value.insert("Flag", true);
        assert_eq!(super::render(&value), "@{\n    Flag = 'True'\n}");
    }
}
