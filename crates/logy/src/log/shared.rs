use std::{
    path::Path,
    sync::Arc,
};

use core::fmt::Arguments;

use parking_lot::Mutex;

use crate::*;

/// Cloneable handle to one [`Logger`] guarded by a mutex.
///
/// Every call locks for its whole duration, so records logged from different
/// threads never interleave.
#[derive(Clone)]
pub struct SharedLogger {
    inner: Arc<Mutex<Logger>>,
}

impl SharedLogger {

    pub fn new(logger: Logger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(logger)),
        }
    }

    /// Runs `f` on the locked logger.
    pub fn with<R>(&self, f: impl FnOnce(&mut Logger) -> R) -> R {
        f(&mut self.inner.lock())
    }

    #[inline(always)]
    pub fn log(&self, target: &str, level: LogLevel, message: Arguments) -> LogyResult {
        self.inner.lock().log(target, level, message)
    }

    #[inline(always)]
    pub fn enabled(&self, target: &str, level: LogLevel) -> bool {
        self.inner.lock().enabled(target, level)
    }

    #[inline(always)]
    pub fn open(&self, directory: impl AsRef<Path>) -> LogyResult {
        self.inner.lock().open(directory)
    }

    #[inline(always)]
    pub fn close(&self) {
        self.inner.lock().close()
    }

    #[inline(always)]
    pub fn level(&self) -> LogLevel {
        self.inner.lock().level()
    }

    #[inline(always)]
    pub fn set_level(&self, level: LogLevel) {
        self.inner.lock().set_level(level)
    }

    #[inline(always)]
    pub fn log_to_stdout(&self) -> bool {
        self.inner.lock().log_to_stdout()
    }

    #[inline(always)]
    pub fn set_log_to_stdout(&self, log_to_stdout: bool) {
        self.inner.lock().set_log_to_stdout(log_to_stdout)
    }
}

impl From<Logger> for SharedLogger {

    fn from(value: Logger) -> Self {
        Self::new(value)
    }
}
