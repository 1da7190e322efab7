use std::{
    collections::TryReserveError,
    io,
};

use crate::LogyResult;

#[derive(Debug)]
pub enum LogError {
    AllocError(TryReserveError),
    FmtError(core::fmt::Error),
    DirectoryError(io::Error),
    OpenError(io::Error),
    IoError(io::Error),
    NotOpen,
}

impl LogError {

    /// Result code reported for this error.
    pub fn result(&self) -> LogyResult {
        match self {
            Self::AllocError(_) | Self::FmtError(_) => LogyResult::FailedToAllocate,
            Self::DirectoryError(_) => LogyResult::FailedToGetDirectory,
            Self::OpenError(_) | Self::IoError(_) | Self::NotOpen => LogyResult::FailedToOpenFile,
        }
    }
}

impl core::fmt::Display for LogError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AllocError(_) => write!(f, "failed to reserve record buffer"),
            Self::FmtError(_) => write!(f, "failed to format record"),
            Self::DirectoryError(_) => write!(f, "failed to get log directory"),
            Self::OpenError(_) => write!(f, "failed to open log file"),
            Self::IoError(_) => write!(f, "IO error"),
            Self::NotOpen => write!(f, "log sink is not open"),
        }
    }
}

impl core::error::Error for LogError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::AllocError(err) => Some(err),
            Self::FmtError(err) => Some(err),
            Self::DirectoryError(err) | Self::OpenError(err) | Self::IoError(err) => Some(err),
            Self::NotOpen => None,
        }
    }
}

impl From<TryReserveError> for LogError {

    fn from(value: TryReserveError) -> Self {
        Self::AllocError(value)
    }
}

impl From<core::fmt::Error> for LogError {

    fn from(value: core::fmt::Error) -> Self {
        Self::FmtError(value)
    }
}

impl From<io::Error> for LogError {

    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}
