use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use compact_str::CompactString;

use chrono::{DateTime, Local};

use crate::{
    *,
    record::format_record,
};

/// Name of the log file created inside the sink directory.
pub const DEFAULT_FILE_NAME: &str = "log.txt";

struct OpenFile {
    directory: PathBuf,
    path: PathBuf,
    file: File,
}

/// Destination that can be cut back to an earlier length.
trait Truncate: Write {

    fn end(&self) -> io::Result<u64>;

    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl Truncate for File {

    fn end(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Appends `bytes` whole or not at all.
///
/// On a failed write the destination is cut back to its previous length.
fn append_whole<F: Truncate>(file: &mut F, bytes: &[u8]) -> io::Result<()> {
    let len = file.end()?;
    if let Err(err) = file.write_all(bytes).and_then(|_| file.flush()) {
        file.truncate(len).ok();
        return Err(err)
    }
    Ok(())
}

/// `app` under the per-user data directory, or `None` if the platform has
/// none.
pub fn data_directory(app: &str) -> Option<PathBuf> {
    dirs::data_dir().map(|base| base.join(app))
}

/// Owns the log file and appends formatted records to it.
///
/// A sink starts closed. [`Sink::open`] resolves a directory and opens the log
/// file inside it for append, [`Sink::close`] releases it again.
pub struct Sink {
    file_name: CompactString,
    open: Option<OpenFile>,
    buf: String,
}

impl Sink {

    pub fn new() -> Self {
        Self::with_file_name(DEFAULT_FILE_NAME)
    }

    pub fn with_file_name(file_name: &str) -> Self {
        Self {
            file_name: CompactString::new(file_name),
            open: None,
            buf: String::new(),
        }
    }

    #[inline(always)]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline(always)]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Canonical directory of the open log file.
    pub fn directory_path(&self) -> Option<&Path> {
        self.open.as_ref().map(|open| open.directory.as_path())
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.open.as_ref().map(|open| open.path.as_path())
    }

    /// Creates `directory` if needed and opens the log file inside it.
    ///
    /// Any previously open file is released first. On failure the sink stays
    /// closed.
    pub fn open(&mut self, directory: impl AsRef<Path>) -> LogyResult {
        self.try_open(directory).into()
    }

    /// Opens the log file in `app` under the per-user data directory, such as
    /// `~/.local/share/app` on Linux.
    pub fn open_data_dir(&mut self, app: &str) -> LogyResult {
        self.try_open_under(dirs::data_dir(), app).into()
    }

    fn try_open_under(&mut self, base: Option<PathBuf>, app: &str) -> Result<()> {
        let Some(base) = base else {
            self.close();
            return Err(LogError::DirectoryError(io::ErrorKind::NotFound.into()))
        };
        self.try_open(base.join(app))
    }

    pub fn try_open(&mut self, directory: impl AsRef<Path>) -> Result<()> {
        self.close();
        let directory = directory.as_ref();
        fs::create_dir_all(directory)
            .map_err(LogError::DirectoryError)?;
        let resolved = fs::canonicalize(directory)
            .map_err(LogError::DirectoryError)?;
        if !resolved.is_dir() {
            return Err(LogError::DirectoryError(io::ErrorKind::NotADirectory.into()))
        }
        let mut path = PathBuf::new();
        path.try_reserve(resolved.as_os_str().len() + self.file_name.len() + 1)?;
        path.push(&resolved);
        path.push(self.file_name.as_str());
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(LogError::OpenError)?;
        self.open = Some(OpenFile {
            directory: resolved,
            path,
            file,
        });
        Ok(())
    }

    pub fn write(&mut self, level: LogLevel, message: &str) -> LogyResult {
        self.try_write(level, format_args!("{}", message)).into()
    }

    pub fn write_fmt(&mut self, level: LogLevel, message: core::fmt::Arguments) -> LogyResult {
        self.try_write(level, message).into()
    }

    /// Formats one record and appends it to the log file.
    ///
    /// The record is rendered in full before any byte reaches the file, and a
    /// failed append is rolled back. The sink stays open when the append fails.
    /// [`LogLevel::Off`] and [`LogLevel::All`] are thresholds, so records tagged
    /// with them are discarded without touching the file.
    pub fn try_write(&mut self, level: LogLevel, message: core::fmt::Arguments) -> Result<()> {
        self.write_record(&Local::now(), level, message)
    }

    /// [`Sink::try_write`] with a caller supplied timestamp.
    pub fn write_record(
        &mut self,
        time: &DateTime<Local>,
        level: LogLevel,
        message: core::fmt::Arguments,
    ) -> Result<()>
    {
        let Some(open) = &mut self.open else {
            return Err(LogError::NotOpen)
        };
        if !level.is_record_level() {
            return Ok(())
        }
        format_record(&mut self.buf, time, level, message)?;
        append_whole(&mut open.file, self.buf.as_bytes())?;
        Ok(())
    }

    /// Releases the log file. Does nothing if the sink is closed.
    pub fn close(&mut self) {
        if let Some(mut open) = self.open.take() {
            open.file.flush().ok();
        }
    }
}

impl Default for Sink {

    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use crate::record::parse_line;

    use super::*;

    fn read_log(sink: &Sink) -> String {
        fs::read_to_string(sink.file_path().unwrap()).unwrap()
    }

    #[test]
    fn open_write_close() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = Sink::new();
        assert_eq!(sink.open(dir.path()), LogyResult::Success);
        assert!(sink.is_open());
        assert_eq!(sink.file_path().unwrap().file_name().unwrap(), DEFAULT_FILE_NAME);
        assert_eq!(sink.write(LogLevel::Info, "hello"), LogyResult::Success);

        let log = read_log(&sink);
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines.len(), 1);
        let record = parse_line(lines[0]).unwrap();
        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.message, "hello");

        sink.close();
        sink.close();
        assert!(!sink.is_open());
        assert_eq!(sink.file_path(), None);
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut sink = Sink::with_file_name("app.log");
        assert_eq!(sink.open(&nested), LogyResult::Success);
        assert!(nested.join("app.log").is_file());
        assert_eq!(sink.directory_path().unwrap(), fs::canonicalize(&nested).unwrap());
    }

    #[test]
    fn appends_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = Sink::new();
        assert!(sink.open(dir.path()).is_success());
        assert!(sink.write(LogLevel::Warn, "first").is_success());
        assert!(sink.open(dir.path()).is_success());
        assert!(sink.write_fmt(LogLevel::Error, format_args!("second {}", 2)).is_success());
        let log = read_log(&sink);
        let messages: Vec<_> = log.lines().filter_map(parse_line).map(|r| r.message).collect();
        assert_eq!(messages, ["first", "second 2"]);
    }

    #[test]
    fn directory_under_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, b"").unwrap();
        let mut sink = Sink::new();
        assert_eq!(sink.open(&file), LogyResult::FailedToGetDirectory);
        assert_eq!(sink.open(file.join("sub")), LogyResult::FailedToGetDirectory);
        assert!(!sink.is_open());
    }

    #[test]
    fn log_file_name_taken_by_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(DEFAULT_FILE_NAME)).unwrap();
        let mut sink = Sink::new();
        assert_eq!(sink.open(dir.path()), LogyResult::FailedToOpenFile);
        assert!(!sink.is_open());
    }

    #[test]
    fn failed_open_closes_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, b"").unwrap();
        let mut sink = Sink::new();
        assert!(sink.open(dir.path()).is_success());
        assert_eq!(sink.open(file.join("sub")), LogyResult::FailedToGetDirectory);
        assert_eq!(sink.write(LogLevel::Info, "dropped"), LogyResult::FailedToOpenFile);
    }

    struct ShortFile {
        data: Vec<u8>,
        capacity: usize,
    }

    impl Write for ShortFile {

        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.capacity.saturating_sub(self.data.len());
            if room == 0 {
                return Err(io::Error::from(io::ErrorKind::StorageFull))
            }
            let n = room.min(buf.len());
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Truncate for ShortFile {

        fn end(&self) -> io::Result<u64> {
            Ok(self.data.len() as u64)
        }

        fn truncate(&mut self, len: u64) -> io::Result<()> {
            self.data.truncate(len as usize);
            Ok(())
        }
    }

    #[test]
    fn failed_append_is_rolled_back() {
        let mut file = ShortFile {
            data: b"[2024-01-01 00:00:00.000] [INFO]: kept\n".to_vec(),
            capacity: 64,
        };
        let before = file.data.clone();
        let err = append_whole(&mut file, "y".repeat(200).as_bytes()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::StorageFull);
        assert_eq!(file.data, before);

        append_whole(&mut file, b"short\n").unwrap();
        assert!(file.data.ends_with(b"kept\nshort\n"));
    }

    #[test]
    fn append_to_file_keeps_length_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw");
        let mut file = OpenOptions::new().create(true).append(true).open(&path).unwrap();
        append_whole(&mut file, b"one\n").unwrap();
        append_whole(&mut file, b"two\n").unwrap();
        assert_eq!(file.end().unwrap(), 8);
        assert_eq!(fs::read(&path).unwrap(), b"one\ntwo\n");
    }

    #[test]
    fn threshold_levels_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = Sink::new();
        assert!(sink.open(dir.path()).is_success());
        assert_eq!(sink.write(LogLevel::Off, "off"), LogyResult::Success);
        assert_eq!(sink.write(LogLevel::All, "all"), LogyResult::Success);
        assert!(sink.write(LogLevel::Trace, "trace").is_success());
        let log = read_log(&sink);
        let levels: Vec<_> = log.lines().filter_map(parse_line).map(|r| r.level).collect();
        assert_eq!(levels, [LogLevel::Trace]);
    }

    #[test]
    fn data_directory_under_base() {
        let base = tempfile::tempdir().unwrap();
        let mut sink = Sink::new();
        sink.try_open_under(Some(base.path().to_owned()), "logy-app").unwrap();
        assert!(base.path().join("logy-app").join(DEFAULT_FILE_NAME).is_file());
        assert!(sink.write(LogLevel::Info, "in data dir").is_success());
    }

    #[test]
    fn missing_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = Sink::new();
        assert!(sink.open(dir.path()).is_success());
        let result: LogyResult = sink.try_open_under(None, "logy-app").into();
        assert_eq!(result, LogyResult::FailedToGetDirectory);
        assert!(!sink.is_open());
        assert_eq!(
            data_directory("logy-app").map(|path| path.ends_with("logy-app")),
            dirs::data_dir().map(|_| true),
        );
    }

    #[test]
    fn write_without_open() {
        let mut sink = Sink::new();
        assert_eq!(sink.write(LogLevel::Info, "nowhere"), LogyResult::FailedToOpenFile);
        assert!(matches!(
            sink.try_write(LogLevel::Info, format_args!("nowhere")),
            Err(LogError::NotOpen),
        ));
        sink.close();
    }
}
