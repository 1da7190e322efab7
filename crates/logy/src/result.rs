use core::fmt::{self, Display, Formatter};

/// Outcome of a fallible logy operation.
///
/// Carries no payload so callers can branch on it without allocating. Use
/// [`LogyResult::into_result`] to propagate failures with `?`.
#[must_use]
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LogyResult {
    Success = 0,
    FailedToAllocate = 1,
    FailedToOpenFile = 2,
    FailedToGetDirectory = 3,
}

impl LogyResult {

    /// Number of result codes.
    pub const COUNT: usize = 4;

    #[inline(always)]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::FailedToAllocate),
            2 => Some(Self::FailedToOpenFile),
            3 => Some(Self::FailedToGetDirectory),
            _ => None,
        }
    }

    #[inline(always)]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::FailedToAllocate => "Failed to allocate",
            Self::FailedToOpenFile => "Failed to open file",
            Self::FailedToGetDirectory => "Failed to get directory",
        }
    }

    #[inline(always)]
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for LogyResult {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::error::Error for LogyResult {}

impl<T> From<crate::Result<T>> for LogyResult {

    fn from(value: crate::Result<T>) -> Self {
        match value {
            Ok(_) => Self::Success,
            Err(err) => err.result(),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn codes_match_declaration_order() {
        for code in 0..LogyResult::COUNT as u8 {
            assert_eq!(LogyResult::from_code(code).map(LogyResult::code), Some(code));
        }
        assert_eq!(LogyResult::from_code(LogyResult::COUNT as u8), None);
    }

    #[test]
    fn strings() {
        assert_eq!(LogyResult::Success.to_string(), "Success");
        assert_eq!(LogyResult::FailedToAllocate.to_string(), "Failed to allocate");
        assert_eq!(LogyResult::FailedToOpenFile.to_string(), "Failed to open file");
        assert_eq!(LogyResult::FailedToGetDirectory.to_string(), "Failed to get directory");
    }

    #[test]
    fn into_result() {
        assert_eq!(LogyResult::Success.into_result(), Ok(()));
        assert_eq!(
            LogyResult::FailedToOpenFile.into_result(),
            Err(LogyResult::FailedToOpenFile),
        );
        assert!(!LogyResult::FailedToGetDirectory.is_success());
    }
}
