//! Logging utilities: keep user text single-line and keep credentials out of logs.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

const MAX_PREVIEW: usize = 200;

/// Log target whose lines also go to the security log.
pub const SECURITY_TARGET: &str = "security";

/// Warn on the `security` log target (routed to the security log file when configured).
macro_rules! sec_log {
    ($($arg:tt)*) => { log::warn!(target: $crate::logutil::SECURITY_TARGET, $($arg)*); };
}
pub(crate) use sec_log;

/// Escape a string for single-line logging.
///
/// Newlines, carriage returns, tabs and backslashes are escaped; other control
/// characters become `\xNN`. Input longer than 200 characters is cut with an
/// ellipsis.
pub fn escape_log(s: &str) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Replace every occurrence of `secret` in `text` with `***`.
///
/// Used for Bot API URLs and errors, which embed the bot token in the path.
pub fn redact(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, "***")
}

/// File sinks written by the log formatter. The main log file and the
/// security log are independent; either may be absent.
pub struct LogSinks {
    file: Option<Mutex<File>>,
    security_path: Option<PathBuf>,
}

impl LogSinks {
    /// Open the main log for appending. A file that cannot be opened is
    /// treated as not configured.
    pub fn open(file: Option<&str>, security_file: Option<&str>) -> Self {
        let file = file
            .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok())
            .map(Mutex::new);
        Self {
            file,
            security_path: security_file.map(PathBuf::from),
        }
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    /// Append `line` to the main log, and to the security log for the
    /// security target.
    pub fn write(&self, target: &str, line: &str) {
        if let Some(file) = &self.file {
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
        }
        if target != SECURITY_TARGET {
            return;
        }
        if let Some(path) = &self.security_path {
            if let Ok(mut sf) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(sf, "{}", line);
            }
        }
    }
}
