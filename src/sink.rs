//! The platform log sink: liblog on Android, a capture/no-op sink elsewhere.

use std::ffi::{CStr, CString};
use std::mem;
use std::sync::OnceLock;

#[cfg(target_os = "android")]
use android_log_sys as log_ffi;

use crate::Priority;

/// liblog truncates messages around 4k; longer payloads are split here.
pub(crate) const MSG_MAX_LEN: usize = 4000;
/// Tags longer than this are ellipsized before crossing the FFI boundary.
pub(crate) const TAG_MAX_LEN: usize = 127;

/// Identifier of an Android log buffer to write to.
///
/// Apps can normally only reach [`LogId::Main`]; the other buffers are
/// restricted to privileged processes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogId {
    /// Main log buffer, the default.
    Main,
    /// Radio log buffer.
    Radio,
    /// Event log buffer.
    Events,
    /// System log buffer.
    System,
    /// Crash log buffer.
    Crash,
    /// Kernel log buffer.
    Kernel,
    /// Security log buffer.
    Security,
    /// Statistics log buffer.
    Stats,
}

#[cfg(target_os = "android")]
impl LogId {
    pub(crate) const fn to_native(log_id: Option<Self>) -> Option<log_ffi::log_id_t> {
        match log_id {
            Some(Self::Main) => Some(log_ffi::log_id_t::MAIN),
            Some(Self::Radio) => Some(log_ffi::log_id_t::RADIO),
            Some(Self::Events) => Some(log_ffi::log_id_t::EVENTS),
            Some(Self::System) => Some(log_ffi::log_id_t::SYSTEM),
            Some(Self::Crash) => Some(log_ffi::log_id_t::CRASH),
            Some(Self::Kernel) => Some(log_ffi::log_id_t::KERNEL),
            Some(Self::Security) => Some(log_ffi::log_id_t::SECURITY),
            Some(Self::Stats) => Some(log_ffi::log_id_t::STATS),
            None => None,
        }
    }
}

/// What the sink can do, resolved once instead of branching per call.
pub(crate) struct SinkCaps {
    /// Whether the sink has a dedicated assert/fatal entry. Without one,
    /// [`Priority::Assert`] records go to the error entry.
    pub(crate) dedicated_assert: bool,
}

pub(crate) fn caps() -> &'static SinkCaps {
    static CAPS: OnceLock<SinkCaps> = OnceLock::new();
    CAPS.get_or_init(probe_caps)
}

#[cfg(target_os = "android")]
fn probe_caps() -> SinkCaps {
    // liblog has carried LogPriority::FATAL since the beginning.
    SinkCaps {
        dedicated_assert: true,
    }
}

#[cfg(not(target_os = "android"))]
fn probe_caps() -> SinkCaps {
    // The host sink speaks `log::Level`, which tops out at Error.
    SinkCaps {
        dedicated_assert: false,
    }
}

fn effective_priority(priority: Priority) -> Priority {
    if priority == Priority::Assert && !caps().dedicated_assert {
        Priority::Error
    } else {
        priority
    }
}

/// Writes `message` under `tag` to the platform log, chunking oversized
/// payloads at the last contained newline.
///
/// Returns the number of bytes handed to the sink, which callers pass through
/// uninterpreted.
pub(crate) fn write(buf_id: Option<LogId>, priority: Priority, tag: &str, message: &str) -> i32 {
    let priority = effective_priority(priority);
    let tag = render_tag(tag);
    let mut written: i32 = 0;
    for chunk in Chunks::new(message.as_bytes()) {
        let payload = sanitize(chunk);
        platform_write(buf_id, priority, &tag, &payload);
        written = written.saturating_add(chunk.len() as i32);
    }
    written
}

/// Truncates `tag` to [`TAG_MAX_LEN`] with a `..` ellipsis and replaces NUL
/// bytes so it can be handed to the C API.
pub(crate) fn render_tag(tag: &str) -> CString {
    let mut bytes = if tag.len() > TAG_MAX_LEN {
        // Back off to a char boundary so the truncation cannot emit
        // invalid UTF-8.
        let mut cut = TAG_MAX_LEN - 2;
        while !tag.is_char_boundary(cut) {
            cut -= 1;
        }
        let mut truncated = tag.as_bytes()[..cut].to_vec();
        truncated.extend_from_slice(b"..");
        truncated
    } else {
        tag.as_bytes().to_vec()
    };
    for b in &mut bytes {
        if *b == 0 {
            *b = b' ';
        }
    }
    CString::new(bytes).expect("Unreachable: nul bytes were replaced")
}

/// Replaces interior NUL bytes with spaces so the chunk survives the trip
/// through a `const char*`.
fn sanitize(chunk: &[u8]) -> CString {
    let mut bytes = chunk.to_vec();
    for b in &mut bytes {
        if *b == 0 {
            *b = b' ';
        }
    }
    CString::new(bytes).expect("Unreachable: nul bytes were replaced")
}

/// Splits a message into sink-sized chunks.
///
/// A chunk never exceeds [`MSG_MAX_LEN`] bytes; when a split is needed it is
/// placed after the last newline inside the window, so lines stay together
/// where possible.
pub(crate) struct Chunks<'a> {
    rest: &'a [u8],
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(message: &'a [u8]) -> Chunks<'a> {
        Chunks { rest: message }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.rest.is_empty() {
            return None;
        }
        if self.rest.len() <= MSG_MAX_LEN {
            return Some(mem::take(&mut self.rest));
        }
        let window = &self.rest[..MSG_MAX_LEN];
        let split = window
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(MSG_MAX_LEN);
        let (chunk, rest) = self.rest.split_at(split);
        self.rest = rest;
        Some(chunk)
    }
}

#[cfg(target_os = "android")]
fn platform_write(buf_id: Option<LogId>, priority: Priority, tag: &CStr, msg: &CStr) {
    let prio = priority.to_native() as log_ffi::c_int;
    match LogId::to_native(buf_id) {
        Some(buf_id) => unsafe {
            log_ffi::__android_log_buf_write(
                buf_id as log_ffi::c_int,
                prio,
                tag.as_ptr() as *const log_ffi::c_char,
                msg.as_ptr() as *const log_ffi::c_char,
            );
        },
        None => unsafe {
            log_ffi::__android_log_write(
                prio,
                tag.as_ptr() as *const log_ffi::c_char,
                msg.as_ptr() as *const log_ffi::c_char,
            );
        },
    }
}

/// Off-device there is no logcat; tests observe writes through [`capture`].
#[cfg(not(target_os = "android"))]
fn platform_write(_buf_id: Option<LogId>, _priority: Priority, _tag: &CStr, _msg: &CStr) {
    #[cfg(test)]
    capture::record(_priority, _tag, _msg);
}

#[cfg(all(test, not(target_os = "android")))]
pub(crate) mod capture {
    use std::ffi::CStr;
    use std::sync::Mutex;

    use crate::Priority;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct Entry {
        pub(crate) priority: Priority,
        pub(crate) tag: String,
        pub(crate) message: String,
    }

    static CAPTURED: Mutex<Vec<Entry>> = Mutex::new(Vec::new());

    pub(crate) fn record(priority: Priority, tag: &CStr, msg: &CStr) {
        CAPTURED.lock().unwrap().push(Entry {
            priority,
            tag: tag.to_string_lossy().into_owned(),
            message: msg.to_string_lossy().into_owned(),
        });
    }

    /// Removes and returns the entries written under `tag`.
    ///
    /// Tests run in parallel against the same process-wide sink; keying the
    /// takeout by a per-test tag keeps them from draining each other.
    pub(crate) fn take(tag: &str) -> Vec<Entry> {
        let mut captured = CAPTURED.lock().unwrap();
        let (taken, kept): (Vec<Entry>, Vec<Entry>) =
            captured.drain(..).partition(|entry| entry.tag == tag);
        *captured = kept;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_is_a_single_chunk() {
        let chunks: Vec<_> = Chunks::new(b"hello").collect();
        assert_eq!(chunks, vec![&b"hello"[..]]);
    }

    #[test]
    fn empty_message_yields_no_chunk() {
        assert_eq!(Chunks::new(b"").count(), 0);
    }

    #[test]
    fn oversized_message_splits_after_last_newline() {
        let mut message = vec![b'a'; MSG_MAX_LEN - 10];
        message.push(b'\n');
        message.extend_from_slice(&[b'b'; 100]);

        let chunks: Vec<_> = Chunks::new(&message).collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), MSG_MAX_LEN - 9);
        assert_eq!(*chunks[0].last().unwrap(), b'\n');
        assert_eq!(chunks[1], &[b'b'; 100]);
    }

    #[test]
    fn oversized_message_without_newline_splits_at_limit() {
        let message = vec![b'a'; MSG_MAX_LEN + 7];
        let chunks: Vec<_> = Chunks::new(&message).collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), MSG_MAX_LEN);
        assert_eq!(chunks[1].len(), 7);
    }

    #[test]
    fn write_reports_total_bytes() {
        let written = write(None, Priority::Info, "chunk_total", "hello\nworld");
        assert_eq!(written, 11);
    }

    #[test]
    fn render_tag_keeps_short_tag() {
        assert_eq!(render_tag("my_app").as_bytes(), b"my_app");
    }

    #[test]
    fn render_tag_ellipsizes_long_tag() {
        let long_tag = "a".repeat(TAG_MAX_LEN + 20);
        let rendered = render_tag(&long_tag);
        let mut expected = vec![b'a'; TAG_MAX_LEN - 2];
        expected.extend_from_slice(b"..");
        assert_eq!(rendered.as_bytes(), expected.as_slice());
    }

    #[test]
    fn render_tag_truncates_at_char_boundary() {
        // 70 two-byte chars exceed the limit, and the cut point lands in
        // the middle of one of them.
        let long_tag = "é".repeat(70);
        let rendered = render_tag(&long_tag);
        assert!(rendered.as_bytes().len() <= TAG_MAX_LEN);
        let text = std::str::from_utf8(rendered.as_bytes()).unwrap();
        assert!(text.ends_with(".."));
        assert_eq!(text.trim_end_matches(".."), "é".repeat(62));
    }

    #[test]
    fn sanitize_replaces_nul_bytes_with_spaces() {
        let payload = sanitize(b"null\0in\0between");
        assert_eq!(payload.as_bytes(), b"null in between");
    }

    #[test]
    #[cfg(not(target_os = "android"))]
    fn assert_downgrades_without_dedicated_entry() {
        write(None, Priority::Assert, "assert_downgrade", "boom");
        let entries = capture::take("assert_downgrade");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].priority, Priority::Error);
    }
}
