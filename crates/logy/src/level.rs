use core::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Record severity and filter threshold.
///
/// Levels are ordered from the most restrictive ([`LogLevel::Off`]) to the least
/// restrictive ([`LogLevel::All`]). A threshold admits every record whose level
/// compares less than or equal to it.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum LogLevel {
    Off = 0,
    Fatal = 1,
    Error = 2,
    Warn = 3,
    Info = 4,
    Debug = 5,
    Trace = 6,
    All = 7,
}

impl LogLevel {

    /// Number of real levels.
    pub const COUNT: usize = 8;

    /// Every level in ordinal order.
    pub const LEVELS: [Self; Self::COUNT] = [
        Self::Off,
        Self::Fatal,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
        Self::All,
    ];

    #[inline(always)]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// True for the levels a record can carry. [`LogLevel::Off`] and
    /// [`LogLevel::All`] only make sense as thresholds.
    #[inline(always)]
    pub const fn is_record_level(self) -> bool {
        !matches!(self, Self::Off | Self::All)
    }

    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        if (ordinal as usize) < Self::COUNT {
            Some(Self::LEVELS[ordinal as usize])
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
            Self::All => "ALL",
        }
    }
}

impl Display for LogLevel {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for LogLevel {

    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("warning") {
            return Ok(Self::Warn)
        }
        Self::LEVELS
            .into_iter()
            .find(|level| s.eq_ignore_ascii_case(level.as_str()))
            .ok_or(())
    }
}

impl TryFrom<u8> for LogLevel {

    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Self::from_ordinal(value).ok_or(value)
    }
}

impl From<LogLevel> for u8 {

    #[inline(always)]
    fn from(value: LogLevel) -> Self {
        value.ordinal()
    }
}
