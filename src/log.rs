//! Debug output for the spotlight service.
//!
//! Lines are printed through `esp-println` when the `esp32-log` feature is
//! enabled. Without it the macro expands to dead code, so arguments are
//! still type-checked but nothing is emitted.

#[cfg(feature = "esp32-log")]
macro_rules! debug {
    ($($arg:tt)*) => {
        esp_println::println!("Spotlight {}", ::core::format_args!($($arg)*))
    };
}

#[cfg(not(feature = "esp32-log"))]
macro_rules! debug {
    ($($arg:tt)*) => {{
        if false {
            ::core::format_args!($($arg)*);
        }
    }};
}

pub(crate) use debug;
