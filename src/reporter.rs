use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Utc;
use teloxide::types::ChatId;
use tracing::{error, info, warn};

use crate::providers::telegram::Messenger;

pub const LOG_MAX_BYTES: u64 = 1024 * 1024;
pub const LOG_BACKUP_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        })
    }
}

/// Size-capped log file with numbered backups: once a line would push the
/// live file past `max_bytes`, `log.N` shifts to `log.N+1` (the oldest backup
/// is dropped), the live file becomes `log.1` and a fresh one is started.
pub struct RollingLog {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
}

impl RollingLog {
    pub fn new(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> Self {
        RollingLog {
            path: path.into(),
            max_bytes,
            backups,
        }
    }

    pub fn append(&self, severity: Severity, message: &str) -> io::Result<()> {
        let line = format!(
            "{} - {} - {} - {}\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            env!("CARGO_PKG_NAME"),
            severity,
            message.replace('\n', " "),
        );
        self.rotate_if_needed(line.len() as u64)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())
    }

    fn rotate_if_needed(&self, incoming: u64) -> io::Result<()> {
        let current = match fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        // A single line larger than the cap still gets written to a fresh file.
        if current == 0 || current + incoming <= self.max_bytes {
            return Ok(());
        }
        if self.backups == 0 {
            return fs::remove_file(&self.path);
        }
        let oldest = self.backup_path(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        PathBuf::from(format!("{}.{index}", self.path.display()))
    }
}

/// Owns the rotating log and mirrors error lines to the admin chat. Built in
/// `main` and handed to the runtime; nothing here registers global state.
pub struct Reporter {
    log: RollingLog,
}

impl Reporter {
    pub fn new(log: RollingLog) -> Self {
        Reporter { log }
    }

    pub fn info(&self, message: &str) {
        info!("{message}");
        self.write(Severity::Info, message);
    }

    /// Records the message at error severity and sends the same text to the
    /// admin chat. Failure to reach the admin is itself only logged, never
    /// propagated.
    pub async fn alert<M: Messenger>(&self, messenger: &M, admin: ChatId, message: &str) {
        error!("{message}");
        self.write(Severity::Error, message);
        if let Err(e) = messenger.send_text(admin, message).await {
            let note = format!("could not deliver error report to admin chat {}: {e}", admin.0);
            warn!("{note}");
            self.write(Severity::Warning, &note);
        }
    }

    fn write(&self, severity: Severity, message: &str) {
        if let Err(e) = self.log.append(severity, message) {
            warn!("failed to write log file: {e}");
        }
    }
}
