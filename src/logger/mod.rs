//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

/// Initialize the logger with optional log file paths.
///
/// Without it (or before it), messages go to stdout/stderr.
pub fn init(access_log_file: Option<&str>, error_log_file: Option<&str>) -> std::io::Result<()> {
    writer::init(access_log_file, error_log_file)
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => writer::write_stdout(message),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => writer::write_stderr(message),
    }
}

pub fn log_server_start(addr: &SocketAddr, methods: &[&str], has_fallback: bool) {
    write_info("======================================");
    write_info(&format!("httpdrone listening on: http://{addr}"));
    if methods.is_empty() {
        write_info("Methods: (none)");
    } else {
        write_info(&format!("Methods: {}", methods.join(", ")));
    }
    if has_fallback {
        write_info("Fallback handler: yes");
    }
    write_info(&format!("Process ID: {}", std::process::id()));
    write_info("Send SIGTERM (or Ctrl+C) to stop");
    write_info("======================================");
}

pub fn log_signal_received(name: &str) {
    write_info(&format!("[SIGNAL] {name} received, stopping after current connection"));
}

pub fn log_shutdown(addr: &SocketAddr) {
    write_info(&format!("[Shutdown] Listener on {addr} closed"));
}

pub fn log_connection_error(peer_addr: &SocketAddr, err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Connection from {peer_addr} failed: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
