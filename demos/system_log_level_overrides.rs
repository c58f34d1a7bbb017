//! An utility for testing the behavior of the `taglog` crate on a device.
//!
//! ## Build
//!
//! 1. Setup [`cargo-ndk`](https://github.com/bbqsrc/cargo-ndk)
//!
//!    ```
//!    cargo install cargo-ndk
//!    rustup target add x86_64-linux-android
//!    ```
//!
//! 2. Build with `cargo ndk`:
//!
//!    ```
//!    cargo ndk -t x86_64 build --release --features android-api-30 \
//!        --example system_log_level_overrides
//!    ```
//!
//! ## Run on emulator
//!
//! ```
//! adb push ./target/x86_64-linux-android/release/examples/system_log_level_overrides /data/local/tmp/
//! adb shell /data/local/tmp/system_log_level_overrides
//! ```
//!
//! ## Test interaction with Android system properties
//!
//! See the [`logd` README](https://cs.android.com/android/platform/superproject/main/+/main:system/logging/logd/README.property)
//! in AOSP for details.
//!
//! ```
//! # default: should print info+ logs in `adb logcat -s log_test`
//! adb shell /data/local/tmp/system_log_level_overrides
//!
//! # should print trace+ logs in `adb logcat -s log_test`
//! adb shell setprop log.tag V
//! adb shell /data/local/tmp/system_log_level_overrides
//!
//! # should print warn+ logs in `adb logcat -s log_test`
//! adb shell setprop log.tag.log_test W
//! adb shell /data/local/tmp/system_log_level_overrides
//! ```

use taglog::{logd, loge, logi, logv, logw, logwtf};

fn main() {
    taglog::init_once(
        taglog::Config::default()
            // If set, this is the highest level to log unless overridden by
            // the system. Note the verbosity can be *increased* through
            // system properties.
            .with_max_level(log::LevelFilter::Info),
    );
    // The log crate applies its filtering before records reach the
    // dispatcher. Pass everything down so that Android's liblog can
    // determine the log level instead.
    log::set_max_level(log::LevelFilter::Trace);

    logv!("log_test", "verbose");
    logd!("log_test", "debug");
    logi!("log_test", "info, %d of %d", 1, 2);
    logw!("log_test", "warn");
    loge!("log_test", "error");
    logwtf!("log_test", "wtf");

    // Records sent through the `log` macros land in the same sink.
    log::info!("info via the log crate");
}
