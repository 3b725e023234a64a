//! # uslog
//! User-space syslog emulation: reentrant loggers, per-thread line
//! buffers, and a single atomic write per log line. No syslog daemon is
//! involved; lines go to stderr or to the file named by the `USLOG_FILE`
//! environment variable.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! uslog = "0.1.0"
//! ```
//!
//! ```rust
//! use uslog::{LOG_INFO, LOG_WARNING, LogOptions, Syslog, facility};
//!
//! let logger = Syslog::open(Some("myapp"), LogOptions::PID, facility::USER);
//! logger.log(LOG_INFO, format_args!("service started"));
//! logger.log(LOG_WARNING, format_args!("retry {}", 3));
//! logger.close();
//! ```
//!
//! ## Process-wide logging
//! The classic `openlog`/`syslog`/`setlogmask`/`closelog` surface binds
//! one implicit logger per process:
//!
//! ```rust
//! uslog::openlog(Some("myapp"), uslog::LogOptions::empty(), uslog::facility::DAEMON);
//! uslog::syslog!(uslog::LOG_INFO, "hello from {}", "main");
//! let prev = uslog::setlogmask(uslog::LOG_ERR | uslog::LOG_WARNING);
//! assert_eq!(prev, uslog::LOG_PRIO_ALL);
//! uslog::closelog();
//! ```
//!
//! ## Logging to files
//! An explicit logger can write to its own file. The file is created if
//! it does not exist and appended to if it does.
//!
//! ```rust
//! use uslog::{LOG_INFO, LogOptions, Syslog, facility};
//!
//! let logger = Syslog::open_to("/tmp/uslog-doc.log", Some("svc"), LogOptions::empty(), facility::AUTH)
//!     .expect("unable to create log file");
//! logger.log(LOG_INFO, format_args!("written to the file"));
//! assert!(std::fs::read_to_string("/tmp/uslog-doc.log").unwrap().ends_with("written to the file\n"));
//! ```
//!
//! ## `log` crate interop
//! ```rust
//! uslog::init_log_facade().unwrap();
//! log::info!("Hello, world!");
//! ```

mod buffer;
mod config;
mod datetime;
mod facade;
mod global;
mod logger;
mod sink;
mod thread_buf;
mod utils;

pub use buffer::{Error, LineBuf};
pub use config::{USLOG_CONFIG, UslogConfig};
pub use datetime::Datetime;
pub use facade::init_log_facade;
pub use global::{closelog, openlog, setlogmask, syslog};
pub use logger::{
    LOG_ALERT, LOG_CRIT, LOG_DEBUG, LOG_EMERG, LOG_ERR, LOG_INFO, LOG_NOTICE, LOG_PRIO_ALL,
    LOG_WARNING, LogOptions, Syslog, facility,
};
