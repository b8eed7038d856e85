//! Wall-clock timestamps
//!
//! One format, shared by the rendered page and the access log. Local
//! time zone of the host process, recomputed on every call.

use chrono::Local;

/// Timestamp layout: `YYYY-MM-DD HH:MM:SS`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time, formatted
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
