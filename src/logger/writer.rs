//! Log writer module
//!
//! Process-wide log sink with separate access and error targets, each either
//! a standard stream or an append-mode file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

enum LogTarget {
    Stdout,
    Stderr,
    File(File),
}

/// Thread-safe log writer
pub struct LogWriter {
    access: Mutex<LogTarget>,
    error: Mutex<LogTarget>,
}

impl LogWriter {
    fn new(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<Self> {
        let access = match access_log_file {
            Some(path) => LogTarget::File(open_log_file(path)?),
            None => LogTarget::Stdout,
        };

        let error = match error_log_file {
            Some(path) => LogTarget::File(open_log_file(path)?),
            None => LogTarget::Stderr,
        };

        Ok(Self {
            access: Mutex::new(access),
            error: Mutex::new(error),
        })
    }

    /// Write to the access/info target
    pub fn write_access(&self, message: &str) {
        let mut target = self.access.lock().unwrap_or_else(PoisonError::into_inner);
        write_to_target(&mut target, message);
    }

    /// Write to the error target
    pub fn write_error(&self, message: &str) {
        let mut target = self.error.lock().unwrap_or_else(PoisonError::into_inner);
        write_to_target(&mut target, message);
    }
}

/// Open or create a log file for appending, creating parent directories.
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

fn write_to_target(target: &mut LogTarget, message: &str) {
    match target {
        LogTarget::Stdout => write_stdout(message),
        LogTarget::Stderr => write_stderr(message),
        LogTarget::File(file) => write_line(file, message),
    }
}

/// Write a line to stdout, ignoring a closed or broken pipe.
pub(crate) fn write_stdout(message: &str) {
    write_line(io::stdout().lock(), message);
}

pub(crate) fn write_stderr(message: &str) {
    write_line(io::stderr().lock(), message);
}

fn write_line(mut out: impl Write, message: &str) {
    // Nowhere left to report a failed log write.
    let _ = writeln!(out, "{message}");
}

/// Initialize the global log writer.
///
/// Call once at startup; a second call fails with `AlreadyExists`.
pub fn init(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(access_log_file, error_log_file)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// The global writer, if `init` has run.
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_log_path(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("httpdrone-log-{}", std::process::id()));
        dir.join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_file_targets_append() {
        let access = temp_log_path("access.log");
        let error = temp_log_path("nested/error.log");
        let _ = fs::remove_file(&access);
        let _ = fs::remove_file(&error);

        let writer = LogWriter::new(Some(&access), Some(&error)).unwrap();
        writer.write_access("first");
        writer.write_access("second");
        writer.write_error("boom");

        assert_eq!(fs::read_to_string(&access).unwrap(), "first\nsecond\n");
        assert_eq!(fs::read_to_string(&error).unwrap(), "boom\n");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_write_to_closed_pipe_is_ignored() {
        write_line(ClosedPipe, "dropped on the floor");
        write_line(&mut ClosedPipe, "and again");
    }

    #[test]
    fn test_default_targets_are_streams() {
        let writer = LogWriter::new(None, None).unwrap();
        assert!(matches!(*writer.access.lock().unwrap(), LogTarget::Stdout));
        assert!(matches!(*writer.error.lock().unwrap(), LogTarget::Stderr));
    }
}
