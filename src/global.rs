use std::{fmt, sync::RwLock};

use crate::logger::{LogOptions, Syslog, facility};

/// The process-wide logger behind the convenience API. Constructed lazily,
/// replaced by `openlog`, torn down by `closelog`.
static GLOBAL: RwLock<Option<Syslog>> = RwLock::new(None);

fn with_global<R>(f: impl FnOnce(&Syslog) -> R) -> R {
    {
        let global = GLOBAL.read().unwrap();
        if let Some(logger) = &*global {
            return f(logger);
        }
    }
    let mut global = GLOBAL.write().unwrap();
    let logger = global
        .get_or_insert_with(|| Syslog::open(None, LogOptions::empty(), facility::USER));
    f(logger)
}

/// (Re)configures the process-wide logger.
pub fn openlog(ident: Option<&str>, opts: LogOptions, facility: u32) {
    *GLOBAL.write().unwrap() = Some(Syslog::open(ident, opts, facility));
}

/// Logs through the process-wide logger, opening it with defaults if
/// `openlog` has not run yet. Format-string callers will usually prefer
/// the `syslog!` macro.
pub fn syslog(prio: u32, msg: fmt::Arguments<'_>) {
    with_global(|logger| logger.log(prio, msg));
}

/// Swaps the process-wide severity mask, returning the previous one.
pub fn setlogmask(mask: u32) -> u32 {
    with_global(|logger| logger.set_mask(mask))
}

/// Tears down the process-wide logger. A later call re-opens it lazily.
pub fn closelog() {
    GLOBAL.write().unwrap().take();
}

/// Logs a formatted message through the process-wide logger.
///
/// ```rust
/// uslog::syslog!(uslog::LOG_INFO, "listening on port {}", 8080);
/// ```
#[macro_export]
macro_rules! syslog {
    ($prio:expr, $($arg:tt)+) => {
        $crate::syslog($prio, format_args!($($arg)+))
    };
}
