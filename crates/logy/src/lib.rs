//! Severity filtered file logger.
//!
//! A [`Logger`] owns a [`Filter`] and a [`Sink`]. Records the filter admits are
//! appended to `log.txt` inside the directory given to [`Logger::open`], in the
//! layout described in [`record`]. Fallible operations report a closed
//! [`LogyResult`] instead of panicking.
//!
//! ```no_run
//! use logy::{LogLevel, Logger, info};
//!
//! let mut logger = Logger::create("logs", LogLevel::Info, true)?;
//! info!(logger, "listening on port {}", 8080).into_result()?;
//! # Ok::<(), logy::LogyResult>(())
//! ```

#[macro_use]

mod log;
mod error;
mod level;
mod result;
pub mod filter;
pub mod fmt;
pub mod record;
pub mod sink;

pub use error::LogError;
pub use level::LogLevel;
pub use result::LogyResult;
pub use filter::Filter;
pub use sink::Sink;
pub use fmt::{LogFmt, LogFmtBuilder, LogSpec};
pub use termcolor::{Color, ColorSpec};

pub type Result<T> = core::result::Result<T, LogError>;

pub use log::*;
