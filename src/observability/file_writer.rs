//! Size-rotated append-only file.
//!
//! Used twice: by the OTLP exporter for JSON span batches and, when a log file
//! is configured, as the writer behind the plain-text `fmt` layer. When the
//! file grows past the policy limit it is renamed with a `chrono` timestamp
//! suffix and a fresh file is started; only the newest backups are kept.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Default rotation threshold (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated backups kept.
pub const MAX_BACKUP_FILES: usize = 3;

/// When to rotate and how many backups to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_FILE_SIZE_BYTES,
            max_backups: MAX_BACKUP_FILES,
        }
    }
}

/// Thread-safe rotating file.
///
/// The handle is opened lazily on the first write, so construction never
/// fails.
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self::with_policy(path, RotationPolicy::default())
    }

    #[must_use]
    pub const fn with_policy(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be rotated, opened or written, or if the
    /// lock was poisoned by a panicking writer.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        self.write_bytes(&bytes)
    }

    /// Appends raw bytes, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// See [`write_line`](Self::write_line).
    pub fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::other(format!("rotating file lock poisoned: {e}")))?;

        if self.is_full() {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            *handle = Some(file);
        }

        let file = handle
            .as_mut()
            .ok_or_else(|| io::Error::other("no file handle available"))?;
        file.write_all(bytes)?;
        file.flush()
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() > self.policy.max_bytes)
    }

    /// Renames the current file to `<name>.<timestamp>` and prunes backups.
    fn rotate(&self) -> io::Result<()> {
        let file_name = self.file_name()?;
        let suffix = Local::now().format("%Y%m%dT%H%M%S%.3f");
        let backup = self.path.with_file_name(format!("{file_name}.{suffix}"));

        if self.path.exists() {
            fs::rename(&self.path, backup)?;
        }

        self.prune_backups(&file_name)
    }

    fn file_name(&self) -> io::Result<String> {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| io::Error::other("log path has no file name"))
    }

    /// Removes all but the newest `max_backups` rotated files.
    fn prune_backups(&self, file_name: &str) -> io::Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| io::Error::other("log path has no parent directory"))?;
        let prefix = format!("{file_name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamp suffixes sort chronologically.
        backups.sort();
        backups.reverse();

        for stale in backups.iter().skip(self.policy.max_backups) {
            let _ = fs::remove_file(stale);
        }

        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Buffers one formatted event and appends it when dropped.
pub struct EventWriter<'a> {
    file: &'a RotatingFile,
    buffer: Vec<u8>,
}

impl Write for EventWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let result = self.file.write_bytes(&self.buffer);
        self.buffer.clear();
        result
    }
}

impl Drop for EventWriter<'_> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = EventWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            file: self,
            buffer: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups(dir: &Path, name: &str) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(std::result::Result::ok)
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .is_some_and(|n| n.starts_with(&format!("{name}.")))
            })
            .count()
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("trace.json"));
        file.write_line("{\"a\":1}").unwrap();
        file.write_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_and_keeps_limited_backups() {
        let dir = tempfile::tempdir().unwrap();
        let policy = RotationPolicy {
            max_bytes: 8,
            max_backups: 2,
        };
        let file = RotatingFile::with_policy(dir.path().join("log.txt"), policy);

        for i in 0..6 {
            file.write_line(&format!("line number {i}")).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        assert!(backups(dir.path(), "log.txt") <= 2);
        let current = fs::read_to_string(file.path()).unwrap();
        assert_eq!(current, "line number 5\n");
    }

    #[test]
    fn event_writer_flushes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("events.log"));
        {
            let mut writer = file.make_writer();
            write!(writer, "hello ").unwrap();
            writeln!(writer, "world").unwrap();
        }
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "hello world\n");
    }
}
