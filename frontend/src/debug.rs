//! Flag-gated debug logging

/// Log every event the driver handles and every effect it applies.
pub const DEBUG_CHOREOGRAPHY: bool = false;
/// Log projects renderer mounts and frame loop starts/stops.
pub const DEBUG_GALLERY: bool = false;

macro_rules! debug_log {
    ($flag:expr, $($arg:tt)*) => {
        if $flag {
            zoon::println!($($arg)*);
        }
    };
}

pub(crate) use debug_log;
