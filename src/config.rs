use std::fmt;

use log::{LevelFilter, Record};

use crate::{FormatFn, LogId, Priority};

/// Configuration for the global dispatcher.
#[derive(Default)]
pub struct Config {
    pub(crate) buf_id: Option<LogId>,
    pub(crate) max_level: Option<LevelFilter>,
    pub(crate) filter: Option<env_filter::Filter>,
    pub(crate) tag: Option<String>,
    pub(crate) custom_format: Option<FormatFn>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("buf_id", &self.buf_id)
            .field("max_level", &self.max_level)
            .field("filter", &self.filter)
            .field("tag", &self.tag)
            .field(
                "custom_format",
                match &self.custom_format {
                    Some(_) => &"Some(_)",
                    None => &"None",
                },
            )
            .finish()
    }
}

impl Config {
    /// Changes the maximum log level.
    ///
    /// Note, that `Trace` is the maximum level, because it provides the
    /// maximum amount of detail in the emitted logs.
    ///
    /// If `Off` level is provided, then nothing is logged at all.
    pub fn with_max_level(mut self, level: LevelFilter) -> Self {
        self.max_level = Some(level);
        self
    }

    /// Changes the Android logging system buffer to be used.
    ///
    /// By default, logs are sent to the [`Main`] log. Other logging buffers may
    /// only be accessible to certain processes.
    ///
    /// [`Main`]: LogId::Main
    pub fn with_log_buffer(mut self, buf_id: LogId) -> Self {
        self.buf_id = Some(buf_id);
        self
    }

    pub fn with_filter(mut self, filter: env_filter::Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Overrides the tag of every record with a fixed one.
    ///
    /// Records routed through the `log` crate bridge then carry the module
    /// path in the message body instead.
    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the format function for formatting the log output.
    /// ```
    /// # use taglog::Config;
    /// taglog::init_once(
    ///     Config::default()
    ///         .with_max_level(log::LevelFilter::Trace)
    ///         .format(|f, record| write!(f, "my_app: {}", record.args()))
    /// )
    /// ```
    pub fn format<F>(mut self, format: F) -> Self
    where
        F: Fn(&mut dyn fmt::Write, &Record) -> fmt::Result + Sync + Send + 'static,
    {
        self.custom_format = Some(Box::new(format));
        self
    }

    /// Whether a record under `tag` at `priority` passes the configured
    /// level ceiling and filter.
    ///
    /// Under the `android-api-30` feature the ceiling is only liblog's
    /// default, so system property overrides (`setprop log.tag.<TAG>
    /// <LEVEL>`) can raise the verbosity past it.
    pub(crate) fn is_loggable(&self, tag: &str, priority: Priority) -> bool {
        #[cfg(all(target_os = "android", feature = "android-api-30"))]
        if !liblog_is_loggable(tag, priority, self.max_level) {
            return false;
        }
        #[cfg(not(all(target_os = "android", feature = "android-api-30")))]
        if let Some(max_level) = self.max_level {
            if priority.to_level() > max_level {
                return false;
            }
        }
        if let Some(ref filter) = self.filter {
            let metadata = log::MetadataBuilder::new()
                .level(priority.to_level())
                .target(tag)
                .build();
            if !filter.enabled(&metadata) {
                return false;
            }
        }
        true
    }

    pub(crate) fn filter_matches(&self, record: &Record) -> bool {
        if let Some(ref filter) = self.filter {
            filter.matches(record)
        } else {
            true
        }
    }
}

/// Asks Android liblog if a message with given `tag` and `priority` should be
/// logged, using the configured ceiling (or the process-wide maximum) as the
/// level filter in case no system- or process-wide overrides are set.
#[cfg(all(target_os = "android", feature = "android-api-30"))]
fn liblog_is_loggable(tag: &str, priority: Priority, ceiling: Option<LevelFilter>) -> bool {
    use android_log_sys as log_ffi;

    let default_prio = match ceiling.unwrap_or_else(log::max_level).to_level() {
        Some(level) => Priority::from(level).to_native(),
        // LevelFilter::to_level() returns None only for LevelFilter::Off
        None => log_ffi::LogPriority::SILENT,
    };
    // SAFETY: tag points to a valid string tag.len() bytes long.
    unsafe {
        log_ffi::__android_log_is_loggable_len(
            priority.to_native() as log_ffi::c_int,
            tag.as_ptr() as *const log_ffi::c_char,
            tag.len() as log_ffi::c_size_t,
            default_prio as log_ffi::c_int,
        ) != 0
    }
}
