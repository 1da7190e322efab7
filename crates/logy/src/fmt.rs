//! Console formats used when a [`Logger`](crate::Logger) echoes records to stdout.

use std::io;

use compact_str::CompactString;

use chrono::{DateTime, Local};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::{LogLevel, record::TIMESTAMP_FORMAT};

/// Ordered list of segments rendered for one console line.
#[derive(Default, Clone)]
pub struct LogFmt {
    segments: Vec<SegmentSpec>,
}

impl LogFmt {

    /// Same layout as a file record, with the level name colored.
    pub fn for_level(level: LogLevel) -> Self {
        let mut fmt = Self::default();
        LogFmtBuilder::new(&mut fmt)
            .text("[", |spec| spec)
            .timestamp(|spec| spec)
            .text("] [", |spec| spec)
            .level(|spec| spec.with_color_spec(|color| level_color(level, color)))
            .text("]: ", |spec| spec)
            .message(|spec| spec);
        fmt
    }

    fn clear(&mut self) {
        self.segments.clear();
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Writes the segments to `out`, without a trailing newline.
    pub fn render<W: WriteColor>(
        &self,
        out: &mut W,
        time: &DateTime<Local>,
        level: LogLevel,
        message: core::fmt::Arguments,
    ) -> io::Result<()>
    {
        for segment in self {
            let log_spec = segment.log_spec();
            if let Some(color_spec) = &log_spec.color_spec {
                out.set_color(color_spec)?;
            }
            match segment {
                SegmentSpec::Timestamp(_) => write!(out, "{}", time.format(TIMESTAMP_FORMAT))?,
                SegmentSpec::Level(_) => write!(out, "{}", level)?,
                SegmentSpec::Message(_) => out.write_fmt(message)?,
                SegmentSpec::Text(text, _) => out.write_all(text.as_bytes())?,
            }
            if log_spec.color_spec.is_some() {
                out.reset()?;
            }
        }
        Ok(())
    }
}

fn level_color(level: LogLevel, spec: &mut ColorSpec) {
    match level {
        LogLevel::Fatal => spec.set_fg(Some(Color::Red)).set_bold(true),
        LogLevel::Error => spec.set_fg(Some(Color::Red)),
        LogLevel::Warn => spec.set_fg(Some(Color::Yellow)),
        LogLevel::Info => spec.set_fg(Some(Color::Green)),
        LogLevel::Debug => spec.set_fg(Some(Color::Cyan)),
        LogLevel::Off | LogLevel::Trace | LogLevel::All => spec.set_dimmed(true),
    };
}

impl<'a> IntoIterator for &'a LogFmt {

    type Item = &'a SegmentSpec;
    type IntoIter = core::slice::Iter<'a, SegmentSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[derive(Default, Clone, Debug)]
pub struct LogSpec {
    pub color_spec: Option<ColorSpec>,
}

impl LogSpec {

    #[inline(always)]
    pub fn with_color_spec(mut self, mut f: impl FnMut(&mut ColorSpec)) -> Self {
        let color_spec = self.color_spec.insert(ColorSpec::new());
        f(color_spec);
        self
    }

    #[inline(always)]
    pub fn with_fg(self, color: Color) -> Self {
        self.with_color_spec(|spec| { spec.set_fg(Some(color)); })
    }
}

#[derive(Clone, Debug)]
pub enum SegmentSpec {
    Timestamp(LogSpec),
    Level(LogSpec),
    Message(LogSpec),
    Text(CompactString, LogSpec),
}

impl SegmentSpec {

    pub fn log_spec(&self) -> &LogSpec {
        match self {
            Self::Timestamp(spec) | Self::Level(spec) | Self::Message(spec) => spec,
            Self::Text(_, spec) => spec,
        }
    }
}

/// Rebuilds a [`LogFmt`] from scratch.
pub struct LogFmtBuilder<'a> {
    fmt: &'a mut LogFmt,
}

impl<'a> LogFmtBuilder<'a> {

    #[inline(always)]
    pub fn new(fmt: &'a mut LogFmt) -> Self {
        fmt.clear();
        Self {
            fmt,
        }
    }

    #[inline(always)]
    pub fn timestamp(&mut self, mut f: impl FnMut(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Timestamp(f(Default::default())));
        self
    }

    #[inline(always)]
    pub fn level(&mut self, mut f: impl FnMut(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Level(f(Default::default())));
        self
    }

    #[inline(always)]
    pub fn message(&mut self, mut f: impl FnMut(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Message(f(Default::default())));
        self
    }

    #[inline(always)]
    pub fn text(&mut self, text: &str, mut f: impl FnMut(LogSpec) -> LogSpec) -> &mut Self {
        self.fmt.segments.push(SegmentSpec::Text(CompactString::new(text), f(Default::default())));
        self
    }
}
