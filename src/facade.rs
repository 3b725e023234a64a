use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::logger::{LOG_DEBUG, LOG_ERR, LOG_INFO, LOG_WARNING};

/// Bridge from the `log` crate facade into the process-wide logger, so
/// code written against `log::info!` and friends flows through the same
/// destination and mask.
struct SyslogFacade;

impl Log for SyslogFacade {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let prio = match record.level() {
            Level::Error => LOG_ERR,
            Level::Warn => LOG_WARNING,
            Level::Info => LOG_INFO,
            Level::Debug | Level::Trace => LOG_DEBUG,
        };
        crate::global::syslog(prio, *record.args());
    }

    fn flush(&self) {}
}

/// Installs the facade as the `log` crate's logger. Fails if another
/// logger was installed first.
pub fn init_log_facade() -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(SyslogFacade))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_routes_records() {
        init_log_facade().unwrap();
        log::info!("via the log facade");
        log::error!("error via the facade: {}", 7);
    }
}
