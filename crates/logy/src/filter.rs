use rustc_hash::FxHashMap;

use compact_str::CompactString;

use crate::LogLevel;

/// Environment variable read by [`Filter::from_env`].
pub const ENV_VAR: &str = "LOGY_LOG";

/// Returns true if `threshold` lets a record of `level` through.
///
/// [`LogLevel::Off`] admits nothing, otherwise a record passes when its ordinal is
/// less than or equal to the threshold's.
#[inline(always)]
pub const fn threshold_admits(threshold: LogLevel, level: LogLevel) -> bool {
    !matches!(threshold, LogLevel::Off) && level.ordinal() <= threshold.ordinal()
}

/// Severity filter with optional per-target overrides.
///
/// Targets are module paths such as `app::net::tcp`. An override set for
/// `app::net` also applies to every path below it.
#[derive(Clone, Debug)]
pub struct Filter {
    base_level: LogLevel,
    target_levels: FxHashMap<CompactString, LogLevel>,
}

impl Filter {

    pub fn new(level: LogLevel) -> Self {
        Self {
            base_level: level,
            target_levels: FxHashMap::default(),
        }
    }

    /// Parses a directive list such as `"warn,app::net=trace"`.
    ///
    /// Items without `=` set the base level, `target=level` items add overrides.
    /// Unknown levels and empty items are skipped, and a target given twice keeps
    /// the more restrictive level. The base level defaults to [`LogLevel::All`].
    pub fn parse(directives: &str) -> Self {
        let mut filter = Self::default();
        filter.apply_directives(directives);
        filter
    }

    /// Builds a filter from the `LOGY_LOG` environment variable.
    pub fn from_env() -> Self {
        std::env::var(ENV_VAR)
            .map(|env| Self::parse(&env))
            .unwrap_or_default()
    }

    pub fn apply_directives(&mut self, directives: &str) {
        let mut seen = FxHashMap::<&str, LogLevel>::default();
        for item in directives.split(',') {
            let (target, level) = match item.split_once('=') {
                Some((target, level)) => (Some(target.trim()), level),
                None => (None, item),
            };
            let Ok(level) = level.parse::<LogLevel>() else {
                continue
            };
            match target {
                Some("") => {},
                Some(target) => {
                    let entry = seen.entry(target).or_insert(level);
                    *entry = (*entry).min(level);
                },
                None => self.base_level = level,
            }
        }
        for (target, level) in seen {
            self.set_target(target, level);
        }
    }

    #[inline(always)]
    pub fn level(&self) -> LogLevel {
        self.base_level
    }

    /// Sets the base threshold.
    #[inline(always)]
    pub fn configure(&mut self, level: LogLevel) {
        self.base_level = level;
    }

    pub fn set_target(&mut self, target: &str, level: LogLevel) {
        self.target_levels.insert(CompactString::new(target), level);
    }

    pub fn clear_target(&mut self, target: &str) -> Option<LogLevel> {
        self.target_levels.remove(target)
    }

    pub fn clear_targets(&mut self) {
        self.target_levels.clear();
    }

    /// Resolves the threshold for `target`, walking up its module path.
    pub fn target_level(&self, target: &str) -> LogLevel {
        if self.target_levels.is_empty() {
            return self.base_level
        }
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        self.base_level
    }

    #[inline(always)]
    pub fn admits(&self, level: LogLevel) -> bool {
        threshold_admits(self.base_level, level)
    }

    #[inline(always)]
    pub fn admits_target(&self, target: &str, level: LogLevel) -> bool {
        threshold_admits(self.target_level(target), level)
    }
}

impl Default for Filter {

    fn default() -> Self {
        Self::new(LogLevel::All)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use LogLevel::*;

    #[test]
    fn admits_matches_ordinal_order() {
        for configured in LogLevel::LEVELS {
            let filter = Filter::new(configured);
            for level in LogLevel::LEVELS {
                let expected = configured != Off && level.ordinal() <= configured.ordinal();
                assert_eq!(filter.admits(level), expected, "{configured} vs {level}");
            }
        }
    }

    #[test]
    fn off_admits_nothing_and_all_admits_everything() {
        let off = Filter::new(Off);
        let all = Filter::new(All);
        assert!(LogLevel::LEVELS.iter().all(|&l| !off.admits(l)));
        assert!(LogLevel::LEVELS.iter().all(|&l| all.admits(l)));
    }

    #[test]
    fn warn_threshold() {
        let mut filter = Filter::default();
        filter.configure(Warn);
        assert!(filter.admits(Error));
        assert!(filter.admits(Warn));
        assert!(!filter.admits(Info));
        assert_eq!(filter.level(), Warn);
    }

    #[test]
    fn target_levels_walk_module_path() {
        let mut filter = Filter::new(Error);
        filter.set_target("app::net", Trace);
        filter.set_target("app::net::tls", Off);
        assert_eq!(filter.target_level("app::net::tcp"), Trace);
        assert_eq!(filter.target_level("app::net"), Trace);
        assert_eq!(filter.target_level("app::net::tls::handshake"), Off);
        assert_eq!(filter.target_level("app::db"), Error);
        assert_eq!(filter.target_level("app::network"), Error);
        assert!(filter.admits_target("app::net::tcp", Debug));
        assert!(!filter.admits_target("app::db", Debug));
        assert_eq!(filter.clear_target("app::net"), Some(Trace));
        assert_eq!(filter.target_level("app::net::tcp"), Error);
    }

    #[test]
    fn parse_directives() {
        let filter = Filter::parse("warn, app::net = trace,app::db=info,app::db=error");
        assert_eq!(filter.level(), Warn);
        assert_eq!(filter.target_level("app::net::tcp"), Trace);
        assert_eq!(filter.target_level("app::db"), Error);
        assert_eq!(filter.target_level("other"), Warn);
    }

    #[test]
    fn parse_skips_junk() {
        let filter = Filter::parse(",,loud,=debug,app=noisy");
        assert_eq!(filter.level(), All);
        assert_eq!(filter.target_level("app"), All);
        assert_eq!(Filter::parse("").level(), All);
    }
}
