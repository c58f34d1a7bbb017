use std::fmt;

use thiserror::Error;

/// Log severity, ordered `Verbose < Debug < Info < Warn < Error < Assert`.
///
/// The discriminants match the Android priority constants so a `Priority` can
/// round-trip through the integer side of liblog.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(i32)]
pub enum Priority {
    Verbose = 2,
    Debug = 3,
    Info = 4,
    Warn = 5,
    Error = 6,
    /// "What a terrible failure": conditions that should never happen.
    ///
    /// Sinks without a dedicated assert entry log these at [`Priority::Error`]
    /// instead.
    Assert = 7,
}

/// A raw priority value outside the `VERBOSE..=ASSERT` range.
///
/// An out-of-range priority is a programmer error, surfaced at the conversion
/// boundary instead of being mapped to some arbitrary level.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("invalid log priority: {0}")]
pub struct InvalidPriority(pub i32);

impl Priority {
    /// Converts an Android priority constant back into a `Priority`.
    pub const fn from_raw(raw: i32) -> Result<Priority, InvalidPriority> {
        match raw {
            2 => Ok(Priority::Verbose),
            3 => Ok(Priority::Debug),
            4 => Ok(Priority::Info),
            5 => Ok(Priority::Warn),
            6 => Ok(Priority::Error),
            7 => Ok(Priority::Assert),
            other => Err(InvalidPriority(other)),
        }
    }

    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    /// Single-letter marker, as printed by logcat.
    pub const fn letter(self) -> char {
        match self {
            Priority::Verbose => 'V',
            Priority::Debug => 'D',
            Priority::Info => 'I',
            Priority::Warn => 'W',
            Priority::Error => 'E',
            Priority::Assert => 'A',
        }
    }

    /// The closest `log` crate level. `Assert` maps to [`log::Level::Error`],
    /// the highest severity the `log` crate knows.
    pub(crate) const fn to_level(self) -> log::Level {
        match self {
            Priority::Verbose => log::Level::Trace,
            Priority::Debug => log::Level::Debug,
            Priority::Info => log::Level::Info,
            Priority::Warn => log::Level::Warn,
            Priority::Error | Priority::Assert => log::Level::Error,
        }
    }

    #[cfg(target_os = "android")]
    pub(crate) const fn to_native(self) -> android_log_sys::LogPriority {
        match self {
            Priority::Verbose => android_log_sys::LogPriority::VERBOSE,
            Priority::Debug => android_log_sys::LogPriority::DEBUG,
            Priority::Info => android_log_sys::LogPriority::INFO,
            Priority::Warn => android_log_sys::LogPriority::WARN,
            Priority::Error => android_log_sys::LogPriority::ERROR,
            Priority::Assert => android_log_sys::LogPriority::FATAL,
        }
    }
}

impl From<log::Level> for Priority {
    fn from(level: log::Level) -> Priority {
        match level {
            log::Level::Trace => Priority::Verbose,
            log::Level::Debug => Priority::Debug,
            log::Level::Info => Priority::Info,
            log::Level::Warn => Priority::Warn,
            log::Level::Error => Priority::Error,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Verbose => "VERBOSE",
            Priority::Debug => "DEBUG",
            Priority::Info => "INFO",
            Priority::Warn => "WARN",
            Priority::Error => "ERROR",
            Priority::Assert => "ASSERT",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_are_ordered_by_severity() {
        assert!(Priority::Verbose < Priority::Debug);
        assert!(Priority::Debug < Priority::Info);
        assert!(Priority::Info < Priority::Warn);
        assert!(Priority::Warn < Priority::Error);
        assert!(Priority::Error < Priority::Assert);
    }

    #[test]
    fn from_raw_round_trips() {
        for priority in [
            Priority::Verbose,
            Priority::Debug,
            Priority::Info,
            Priority::Warn,
            Priority::Error,
            Priority::Assert,
        ] {
            assert_eq!(Priority::from_raw(priority.as_raw()), Ok(priority));
        }
    }

    #[test]
    fn from_raw_rejects_out_of_range() {
        assert_eq!(Priority::from_raw(0), Err(InvalidPriority(0)));
        assert_eq!(Priority::from_raw(1), Err(InvalidPriority(1)));
        assert_eq!(Priority::from_raw(8), Err(InvalidPriority(8)));
        assert_eq!(Priority::from_raw(-1), Err(InvalidPriority(-1)));
    }

    #[test]
    fn assert_downgrades_to_error_level() {
        assert_eq!(Priority::Assert.to_level(), log::Level::Error);
    }
}
