// Copyright 2024 The taglog Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! A tag-based logging facade over the Android system log.
//!
//! Records carry an explicit tag, a message template and a runtime argument
//! list; the dispatcher substitutes printf-style placeholders, peels a
//! trailing error off the argument list and forwards the result to liblog
//! (or a no-op sink off-device). A bad template never fails the call: the
//! dispatcher falls back to appending the arguments verbatim.
//!
//! ## Example
//!
//! ```
//! use taglog::{logd, loge, Arg};
//!
//! taglog::init_once(
//!     taglog::Config::default().with_max_level(log::LevelFilter::Trace),
//! );
//!
//! logd!("MyActivity", "loaded %d items", 42);
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! loge!("MyActivity", "save failed", Arg::error(&err));
//! ```
//!
//! ## Example with module path filter
//!
//! It is possible to limit log messages to output from a specific crate,
//! and override the tag on every record:
//!
//! ```
//! use taglog::{Config, FilterBuilder};
//!
//! taglog::init_once(
//!     Config::default()
//!         .with_max_level(log::LevelFilter::Trace)
//!         .with_tag("mytag")
//!         .with_filter(FilterBuilder::new().parse("debug,hello::crate=trace").build()),
//! );
//! ```
//!
//! ## Collecting logs
//!
//! [`Collector`] dumps the device log into a timestamped file that can be
//! attached to a bug report:
//!
//! ```no_run
//! let path = taglog::Collector::new()
//!     .with_prefix("my_app")
//!     .collect_into(std::path::Path::new("/sdcard"))?;
//! # Ok::<(), taglog::CollectError>(())
//! ```

use std::borrow::Cow;
use std::fmt::{self, Write};
use std::sync::OnceLock;

use log::{Log, Metadata, Record};

pub use crate::args::Arg;
pub use crate::collector::{CollectError, Collector};
pub use crate::config::Config;
pub use crate::format::FormatError;
pub use crate::priority::{InvalidPriority, Priority};
pub use crate::sink::LogId;
pub use env_filter::{Builder as FilterBuilder, Filter};

pub(crate) type FormatFn = Box<dyn Fn(&mut dyn fmt::Write, &Record) -> fmt::Result + Sync + Send>;

mod args;
mod collector;
mod config;
mod format;
mod macros;
mod priority;
mod sink;

/// The dispatcher behind the global entry points.
///
/// Also implements [`log::Log`], so `log::info!`-style records reach the same
/// sink once [`init_once`] has installed it.
#[derive(Debug, Default)]
pub struct TagLogger {
    config: OnceLock<Config>,
}

impl TagLogger {
    /// Create new logger instance from config
    pub fn new(config: Config) -> TagLogger {
        TagLogger {
            config: OnceLock::from(config),
        }
    }

    fn config(&self) -> &Config {
        self.config.get_or_init(Config::default)
    }

    /// Formats and forwards one record.
    ///
    /// The trailing error, if any, is rendered on its own line after the
    /// message and never takes part in template substitution.
    fn dispatch(&self, priority: Priority, tag: &str, message: &str, args: &[Arg]) -> i32 {
        let config = self.config();
        if !config.is_loggable(tag, priority) {
            return 0;
        }

        let (fargs, trailing_error) = args::split_trailing_error(args);
        let tag = config.tag.as_deref().unwrap_or(tag);

        let text: Cow<'_, str> = if fargs.is_empty() {
            Cow::Borrowed(message)
        } else {
            // A malformed template degrades to concatenation; call sites
            // depend on logging never failing.
            Cow::Owned(match format::substitute(message, fargs) {
                Ok(formatted) => formatted,
                Err(_) => format::concat(message, fargs),
            })
        };

        match trailing_error {
            Some(err) => sink::write(config.buf_id, priority, tag, &format!("{text}\n{err}")),
            None => sink::write(config.buf_id, priority, tag, &text),
        }
    }
}

static LOGGER: OnceLock<TagLogger> = OnceLock::new();

impl Log for TagLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.config()
            .is_loggable(metadata.target(), Priority::from(metadata.level()))
    }

    fn log(&self, record: &Record) {
        let config = self.config();

        if !self.enabled(record.metadata()) {
            return;
        }

        // this also checks the level, but only if a filter was
        // installed.
        if !config.filter_matches(record) {
            return;
        }

        let module_path = record.module_path().unwrap_or_default();
        let tag = config.tag.as_deref().unwrap_or(module_path);

        // If a custom tag is used, add the module path to the message.
        let mut text = String::new();
        let _ = match (&config.tag, &config.custom_format) {
            (_, Some(custom_format)) => custom_format(&mut text, record),
            (Some(_), _) => write!(text, "{}: {}", module_path, record.args()),
            _ => write!(text, "{}", record.args()),
        };

        sink::write(config.buf_id, Priority::from(record.level()), tag, &text);
    }

    fn flush(&self) {}
}

/// Sends a record through the global dispatcher, returning the sink status.
///
/// This does not require initialization. However, without initialization it
/// uses the default configuration, which lets every record through.
pub fn log(priority: Priority, tag: &str, message: &str, args: &[Arg]) -> i32 {
    LOGGER
        .get_or_init(TagLogger::default)
        .dispatch(priority, tag, message, args)
}

/// Sends a [`Priority::Verbose`] message. Use [`logv!`](crate::logv) for
/// formatted records.
pub fn v(tag: &str, message: &str) -> i32 {
    log(Priority::Verbose, tag, message, &[])
}

/// Sends a [`Priority::Debug`] message.
pub fn d(tag: &str, message: &str) -> i32 {
    log(Priority::Debug, tag, message, &[])
}

/// Sends a [`Priority::Info`] message.
pub fn i(tag: &str, message: &str) -> i32 {
    log(Priority::Info, tag, message, &[])
}

/// Sends a [`Priority::Warn`] message.
pub fn w(tag: &str, message: &str) -> i32 {
    log(Priority::Warn, tag, message, &[])
}

/// Sends a [`Priority::Error`] message.
pub fn e(tag: &str, message: &str) -> i32 {
    log(Priority::Error, tag, message, &[])
}

/// What a Terrible Failure: reports a condition that should never happen at
/// [`Priority::Assert`]. Sinks without a dedicated assert entry log it at
/// [`Priority::Error`] instead.
pub fn wtf(tag: &str, message: &str) -> i32 {
    log(Priority::Assert, tag, message, &[])
}

/// Applies printf-style template substitution without logging.
///
/// This is the same substitution the dispatcher performs, surfacing the
/// [`FormatError`] instead of falling back to concatenation:
///
/// ```
/// assert_eq!(taglog::format_message("val=%d", &[5.into()]).unwrap(), "val=5");
/// assert!(taglog::format_message("val=%d", &["notanumber".into()]).is_err());
/// ```
pub fn format_message(message: &str, args: &[Arg]) -> Result<String, FormatError> {
    format::substitute(message, args)
}

/// Checks whether a record under `tag` at `priority` would currently be
/// forwarded to the sink.
pub fn is_loggable(tag: &str, priority: Priority) -> bool {
    LOGGER
        .get_or_init(TagLogger::default)
        .config()
        .is_loggable(tag, priority)
}

/// Initializes the global logger with the tag logger.
///
/// This can be called many times, but will only initialize logging once,
/// and will not replace any other previously initialized logger.
///
/// It is ok to call this at the activity creation, and it will be
/// repeatedly called on every lifecycle restart (i.e. screen rotation).
pub fn init_once(config: Config) {
    // The `log` macros consult `log::max_level()` before reaching any
    // logger, so mirror the configured ceiling there. With no explicit
    // ceiling, pass everything down and let the dispatcher decide.
    let max_level = config
        .max_level
        .or_else(|| config.filter.as_ref().map(|filter| filter.filter()))
        .unwrap_or(log::LevelFilter::Trace);
    let logger = LOGGER.get_or_init(|| TagLogger::new(config));

    if let Err(err) = log::set_logger(logger) {
        log::debug!("taglog: log::set_logger failed: {err}");
    } else {
        log::set_max_level(max_level);
    }
}
