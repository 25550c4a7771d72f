//! Log target used for the `Critical` level.
//!
//! The `log` facade stops at `Error`, so critical conditions are emitted at
//! error level on a dedicated target that subscribers can filter or style.

/// Target carried by every record emitted through [`critical!`](crate::critical).
pub const CRITICAL_TARGET: &str = "spacewarp::critical";

/// Logs at the `Critical` level.
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        ::log::error!(target: $crate::kernel::logging::CRITICAL_TARGET, $($arg)+)
    };
}
