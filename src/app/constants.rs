use std::time::Duration;

pub(crate) const STATUS_READY: &str = "Ready";
pub(crate) const STATUS_COPY_CANCELLED: &str = "Copy cancelled";
pub(crate) const STATUS_NOTHING_TO_COPY: &str = "Nothing to copy";

pub(crate) const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub(crate) const LOG_SEPARATOR: &str = " | ";

pub(crate) const LOG_RETENTION_DAYS: i64 = 7;
pub(crate) const LOG_MAX_ENTRIES: usize = 10_000;

/// Rows reserved at the bottom of the browser for the status and help lines.
pub(crate) const BROWSER_FOOTER_ROWS: u16 = 2;

/// Header row at the top of the live tail and of the paged log viewer.
pub(crate) const LOG_HEADER_ROWS: u16 = 1;

/// Bounded wait used while draining a child's output, so process exit is
/// noticed even when no line arrives.
pub(crate) const STREAM_POLL_INTERVAL: Duration = Duration::from_millis(100);
