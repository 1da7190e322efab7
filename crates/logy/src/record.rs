//! On-disk record layout.
//!
//! Every record is a single line:
//!
//! ```text
//! [2025-03-14 09:26:53.589] [INFO]: message text
//! ```
//!
//! The timestamp is local time with millisecond precision, the level is one of
//! the [`LogLevel`] names and the message is written verbatim.
//!
//! Newlines inside a message are not escaped. Everything after the first one
//! lands on continuation lines that [`parse_line`] rejects, so readers that
//! need whole records should keep messages on one line.

use std::collections::TryReserveError;

use core::fmt::{self, Write};

use chrono::{DateTime, Local};

use crate::*;

/// `chrono` format string of the record timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

const TIMESTAMP_LEN: usize = "2025-03-14 09:26:53.589".len();

/// Bytes a record needs beyond its message: brackets, separators, level name
/// and newline.
const RECORD_OVERHEAD: usize = TIMESTAMP_LEN + "[] []: \n".len() + "FATAL".len();

/// `fmt::Write` into a `String` that never grows it infallibly.
///
/// A failed reservation stops formatting and is kept for the caller.
struct ReservedWriter<'a> {
    buf: &'a mut String,
    err: Option<TryReserveError>,
}

impl Write for ReservedWriter<'_> {

    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Err(err) = self.buf.try_reserve(s.len()) {
            self.err = Some(err);
            return Err(fmt::Error)
        }
        self.buf.push_str(s);
        Ok(())
    }
}

impl ReservedWriter<'_> {

    fn finish(self, res: fmt::Result) -> Result<()> {
        match (res, self.err) {
            (_, Some(err)) => Err(LogError::AllocError(err)),
            (Err(err), None) => Err(LogError::FmtError(err)),
            (Ok(()), None) => Ok(()),
        }
    }
}

/// Renders one record, newline included, into `buf`.
///
/// `buf` is cleared first and only ever grows through `try_reserve`, so an
/// allocation failure is reported as [`LogError::AllocError`] before anything
/// is written.
pub fn format_record(
    buf: &mut String,
    time: &DateTime<Local>,
    level: LogLevel,
    message: fmt::Arguments,
) -> Result<()>
{
    buf.clear();
    let hint = message.as_str().map(str::len).unwrap_or(64);
    buf.try_reserve(RECORD_OVERHEAD + hint)?;
    let mut writer = ReservedWriter {
        buf,
        err: None,
    };
    let res = writeln!(writer, "[{}] [{}]: {}", time.format(TIMESTAMP_FORMAT), level, message);
    writer.finish(res)
}

/// A record line split into its parts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RecordLine<'a> {
    pub timestamp: &'a str,
    pub level: LogLevel,
    pub message: &'a str,
}

/// Splits a line written by a sink back into its parts.
///
/// Returns `None` if the line does not follow the record layout.
pub fn parse_line(line: &str) -> Option<RecordLine<'_>> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let rest = line.strip_prefix('[')?;
    let (timestamp, rest) = rest.split_once("] [")?;
    let (level, message) = rest.split_once("]: ")?;
    Some(RecordLine {
        timestamp,
        level: level.parse().ok()?,
        message,
    })
}
