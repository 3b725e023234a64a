use std::{
    fmt, mem,
    path::Path,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};

use uuid::Uuid;

use crate::{
    buffer::{Error, LineBuf},
    datetime::Datetime,
    sink::{Sink, process_sink},
    thread_buf,
    utils::{default_ident, hostname},
};

pub const LOG_EMERG: u32 = 1 << 0;
pub const LOG_ALERT: u32 = 1 << 1;
pub const LOG_CRIT: u32 = 1 << 2;
pub const LOG_ERR: u32 = 1 << 3;
pub const LOG_WARNING: u32 = 1 << 4;
pub const LOG_NOTICE: u32 = 1 << 5;
pub const LOG_INFO: u32 = 1 << 6;
pub const LOG_DEBUG: u32 = 1 << 7;

/// Severity mask with all eight priorities enabled, the state every
/// freshly opened logger starts in.
pub const LOG_PRIO_ALL: u32 = LOG_EMERG
    | LOG_ALERT
    | LOG_CRIT
    | LOG_ERR
    | LOG_WARNING
    | LOG_NOTICE
    | LOG_INFO
    | LOG_DEBUG;

bitflags::bitflags! {
    /// Per-logger output options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LogOptions: u32 {
        /// Append the process id to the identity in every line.
        const PID = 1 << 0;
    }
}

/// Facility codes. Stored on the logger and available through
/// [`Syslog::facility`]; the line format does not render them.
pub mod facility {
    pub const KERN: u32 = 0;
    pub const USER: u32 = 1;
    pub const MAIL: u32 = 2;
    pub const DAEMON: u32 = 3;
    pub const AUTH: u32 = 4;
    pub const SYSLOG: u32 = 5;
    pub const LPR: u32 = 6;
    pub const NEWS: u32 = 7;
    pub const UUCP: u32 = 8;
    pub const CRON: u32 = 9;
    pub const AUTHPRIV: u32 = 10;
    pub const FTP: u32 = 11;
    pub const LOCAL0: u32 = 16;
    pub const LOCAL1: u32 = 17;
    pub const LOCAL2: u32 = 18;
    pub const LOCAL3: u32 = 19;
    pub const LOCAL4: u32 = 20;
    pub const LOCAL5: u32 = 21;
    pub const LOCAL6: u32 = 22;
    pub const LOCAL7: u32 = 23;
}

fn prio_tag(prio: u32) -> &'static str {
    match prio & LOG_PRIO_ALL {
        LOG_EMERG => "EMERG",
        LOG_ALERT => "ALERT",
        LOG_CRIT => "CRIT",
        LOG_ERR => "ERROR",
        LOG_WARNING => "WARN",
        LOG_NOTICE => "NOTICE",
        LOG_INFO => "INFO",
        LOG_DEBUG => "DEBUG",
        _ => "?",
    }
}

/// Logger state shared across threads. Mutated only while the mutex is
/// held, including the mask check on the log path, so a concurrent
/// `set_mask` can never be observed half-applied.
struct Shared {
    ident: Arc<str>,
    opts: LogOptions,
    facility: u32,
    mask: u32,
}

/// A reentrant syslog-style logger.
///
/// Each instance owns its identity, options, facility and severity mask,
/// and renders one complete line per [`log`](Self::log) call into a
/// per-thread buffer before emitting it with a single write. Instances are
/// cheap to share behind an `Arc` and safe to call from any thread.
pub struct Syslog {
    id: Uuid,
    sink: Arc<Sink>,
    shared: Mutex<Shared>,
}

impl Syslog {
    /// Opens a logger against the process-wide destination (`USLOG_FILE`
    /// or stderr). `ident` defaults to the executable name; the severity
    /// mask starts with all priorities enabled.
    pub fn open(ident: Option<&str>, opts: LogOptions, facility: u32) -> Self {
        Self::with_sink(ident, opts, facility, process_sink())
    }

    /// Opens a logger writing to `path` in append mode, independent of the
    /// process-wide destination.
    pub fn open_to<P: AsRef<Path>>(
        path: P,
        ident: Option<&str>,
        opts: LogOptions,
        facility: u32,
    ) -> Result<Self, std::io::Error> {
        Ok(Self::with_sink(
            ident,
            opts,
            facility,
            Arc::new(Sink::file(path)?),
        ))
    }

    fn with_sink(ident: Option<&str>, opts: LogOptions, facility: u32, sink: Arc<Sink>) -> Self {
        let ident: Arc<str> = match ident {
            Some(ident) => Arc::from(ident),
            None => Arc::from(default_ident().as_str()),
        };
        Self {
            id: Uuid::new_v4(),
            sink,
            shared: Mutex::new(Shared {
                ident,
                opts,
                facility,
                mask: LOG_PRIO_ALL,
            }),
        }
    }

    /// Renders and emits one line, or does nothing if `prio` has no bit in
    /// common with the current mask. Fire-and-forget: allocation failure
    /// aborts the line silently and never disturbs shared state.
    pub fn log(&self, prio: u32, msg: fmt::Arguments<'_>) {
        let (ident, opts) = {
            let shared = self.shared.lock().unwrap();
            if prio & shared.mask == 0 {
                return;
            }
            (Arc::clone(&shared.ident), shared.opts)
        };
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let dt = Datetime::from_epoch_secs(now.as_secs() as i64);
        let pid = opts.contains(LogOptions::PID).then(std::process::id);
        let _ = thread_buf::with_line_buf(self.id, |buf| -> Result<(), Error> {
            render_line(buf, &dt, hostname(), &ident, pid, prio, msg)?;
            self.sink.write_line(buf.as_bytes());
            Ok(())
        });
    }

    /// Replaces the severity mask, returning the mask that was in effect
    /// immediately before the call.
    pub fn set_mask(&self, mask: u32) -> u32 {
        let mut shared = self.shared.lock().unwrap();
        mem::replace(&mut shared.mask, mask)
    }

    pub fn ident(&self) -> Arc<str> {
        Arc::clone(&self.shared.lock().unwrap().ident)
    }

    pub fn facility(&self) -> u32 {
        self.shared.lock().unwrap().facility
    }

    /// Closes the logger, releasing its identity and the calling thread's
    /// cached buffer. Equivalent to dropping it.
    pub fn close(self) {}
}

impl Drop for Syslog {
    fn drop(&mut self) {
        thread_buf::discard(self.id);
    }
}

/// Renders one complete log line:
/// `YYYY-MM-DDThh:mm:ss HOST IDENT[PID]: (TAG) MESSAGE\n`, with 1-based
/// month and day in the output and `[PID]` only when requested.
fn render_line(
    buf: &mut LineBuf,
    dt: &Datetime,
    host: &str,
    ident: &str,
    pid: Option<u32>,
    prio: u32,
    msg: fmt::Arguments<'_>,
) -> Result<(), Error> {
    buf.clear();
    buf.append_formatted(format_args!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02} ",
        dt.year,
        dt.mon + 1,
        dt.mday + 1,
        dt.hour,
        dt.min,
        dt.sec
    ))?;
    buf.append_bytes(host.as_bytes())?;
    buf.append_bytes(b" ")?;
    match pid {
        Some(pid) => buf.append_formatted(format_args!("{ident}[{pid}]"))?,
        None => buf.append_bytes(ident.as_bytes())?,
    }
    buf.append_bytes(b": ")?;
    buf.append_formatted(format_args!("({}) ", prio_tag(prio)))?;
    buf.append_formatted(msg)?;
    buf.append_bytes(b"\n")?;
    Ok(())
}
