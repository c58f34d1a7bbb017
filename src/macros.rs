//! Variadic front ends for the dispatcher.
//!
//! Each macro packages its trailing expressions into an [`Arg`](crate::Arg)
//! slice, so a single dispatch path serves every arity. Pass
//! [`Arg::error`](crate::Arg::error) as the last argument to attach an error
//! to the record.

/// Logs at [`Priority::Verbose`](crate::Priority::Verbose).
#[macro_export]
macro_rules! logv {
    ($tag:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(
            $crate::Priority::Verbose,
            $tag,
            $message,
            &[$($crate::Arg::from($arg)),*],
        )
    };
}

/// Logs at [`Priority::Debug`](crate::Priority::Debug).
///
/// ```
/// taglog::logd!("MyActivity", "clicked %d times", 3);
/// ```
#[macro_export]
macro_rules! logd {
    ($tag:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(
            $crate::Priority::Debug,
            $tag,
            $message,
            &[$($crate::Arg::from($arg)),*],
        )
    };
}

/// Logs at [`Priority::Info`](crate::Priority::Info).
#[macro_export]
macro_rules! logi {
    ($tag:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(
            $crate::Priority::Info,
            $tag,
            $message,
            &[$($crate::Arg::from($arg)),*],
        )
    };
}

/// Logs at [`Priority::Warn`](crate::Priority::Warn).
#[macro_export]
macro_rules! logw {
    ($tag:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(
            $crate::Priority::Warn,
            $tag,
            $message,
            &[$($crate::Arg::from($arg)),*],
        )
    };
}

/// Logs at [`Priority::Error`](crate::Priority::Error).
///
/// ```
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
/// taglog::loge!("MyActivity", "save failed", taglog::Arg::error(&err));
/// ```
#[macro_export]
macro_rules! loge {
    ($tag:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(
            $crate::Priority::Error,
            $tag,
            $message,
            &[$($crate::Arg::from($arg)),*],
        )
    };
}

/// Logs at [`Priority::Assert`](crate::Priority::Assert): "what a terrible
/// failure", for conditions that should never happen.
#[macro_export]
macro_rules! logwtf {
    ($tag:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(
            $crate::Priority::Assert,
            $tag,
            $message,
            &[$($crate::Arg::from($arg)),*],
        )
    };
}
