mod shared;

use std::{
    io::Write,
    path::Path,
};

use core::fmt::Arguments;

use termcolor::{ColorChoice, StandardStream};

use chrono::{DateTime, Local};

use crate::*;

pub use shared::SharedLogger;

/// Filters records by severity, appends them to a [`Sink`] and optionally echoes
/// them to stdout.
///
/// The logger is a plain owned value. Share it between threads through
/// [`SharedLogger`].
pub struct Logger {
    filter: Filter,
    sink: Sink,
    log_to_stdout: bool,
    stdout: StandardStream,
    console_fmts: [LogFmt; LogLevel::COUNT],
}

impl Logger {

    /// Creates a logger whose sink is not open yet.
    pub fn new(level: LogLevel, log_to_stdout: bool) -> Self {
        Self::with_filter(Filter::new(level), log_to_stdout)
    }

    pub fn with_filter(filter: Filter, log_to_stdout: bool) -> Self {
        Self::with_sink(filter, Sink::new(), log_to_stdout)
    }

    pub fn with_sink(filter: Filter, sink: Sink, log_to_stdout: bool) -> Self {
        Self {
            filter,
            sink,
            log_to_stdout,
            stdout: StandardStream::stdout(ColorChoice::Auto),
            console_fmts: LogLevel::LEVELS.map(LogFmt::for_level),
        }
    }

    /// Creates a logger with a filter read from `LOGY_LOG`.
    pub fn from_env(log_to_stdout: bool) -> Self {
        Self::with_filter(Filter::from_env(), log_to_stdout)
    }

    /// Creates a logger writing into `directory`.
    pub fn create(
        directory: impl AsRef<Path>,
        level: LogLevel,
        log_to_stdout: bool,
    ) -> core::result::Result<Self, LogyResult>
    {
        let mut logger = Self::new(level, log_to_stdout);
        logger.open(directory).into_result()?;
        Ok(logger)
    }

    #[inline(always)]
    pub fn open(&mut self, directory: impl AsRef<Path>) -> LogyResult {
        self.sink.open(directory)
    }

    #[inline(always)]
    pub fn open_data_dir(&mut self, app: &str) -> LogyResult {
        self.sink.open_data_dir(app)
    }

    #[inline(always)]
    pub fn close(&mut self) {
        self.sink.close()
    }

    #[inline(always)]
    pub fn is_open(&self) -> bool {
        self.sink.is_open()
    }

    #[inline(always)]
    pub fn directory_path(&self) -> Option<&Path> {
        self.sink.directory_path()
    }

    #[inline(always)]
    pub fn file_path(&self) -> Option<&Path> {
        self.sink.file_path()
    }

    #[inline(always)]
    pub fn level(&self) -> LogLevel {
        self.filter.level()
    }

    #[inline(always)]
    pub fn set_level(&mut self, level: LogLevel) {
        self.filter.configure(level)
    }

    #[inline(always)]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    #[inline(always)]
    pub fn filter_mut(&mut self) -> &mut Filter {
        &mut self.filter
    }

    #[inline(always)]
    pub fn log_to_stdout(&self) -> bool {
        self.log_to_stdout
    }

    #[inline(always)]
    pub fn set_log_to_stdout(&mut self, log_to_stdout: bool) {
        self.log_to_stdout = log_to_stdout
    }

    /// Rebuilds the stdout format of `level`.
    pub fn console_fmt(&mut self, level: LogLevel, mut f: impl FnMut(&mut LogFmtBuilder)) {
        let mut builder = LogFmtBuilder::new(&mut self.console_fmts[level.index()]);
        f(&mut builder);
    }

    #[inline(always)]
    pub fn enabled(&self, target: &str, level: LogLevel) -> bool {
        self.filter.admits_target(target, level)
    }

    /// Logs one record from `target`.
    ///
    /// Records the filter drops, and records tagged with the threshold-only
    /// levels [`LogLevel::Off`] or [`LogLevel::All`], return
    /// [`LogyResult::Success`] untouched. Admitted
    /// records are appended to the log file and echoed to stdout if enabled; the
    /// result reflects the file write only, so a closed sink reports
    /// [`LogyResult::FailedToOpenFile`] even when the record reached stdout.
    pub fn log(&mut self, target: &str, level: LogLevel, message: Arguments) -> LogyResult {
        if !level.is_record_level() || !self.enabled(target, level) {
            return LogyResult::Success
        }
        let time = Local::now();
        let result: LogyResult = self.sink.write_record(&time, level, message).into();
        if self.log_to_stdout {
            self.echo(&time, level, message).ok();
        }
        result
    }

    fn echo(&self, time: &DateTime<Local>, level: LogLevel, message: Arguments) -> std::io::Result<()> {
        let mut stdout = self.stdout.lock();
        self.console_fmts[level.index()].render(&mut stdout, time, level, message)?;
        stdout.write_all(b"\n")?;
        stdout.flush()
    }
}

/// Logs through any value with a `log(target, level, args)` method, such as
/// [`Logger`] or [`SharedLogger`]. Evaluates to the [`LogyResult`].
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.log(module_path!(), $level, format_args!($fmt, $($arg),*))
    };
}

#[macro_export]
macro_rules! fatal {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $fmt $(, $arg)*)
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $fmt $(, $arg)*)
    };
}
