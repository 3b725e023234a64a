use std::{
    fs::File,
    io::Write,
    path::Path,
    sync::{Arc, LazyLock},
};

use crate::config::USLOG_CONFIG;

/// Where formatted lines go. Resolved once per process for the default
/// destination and shared read-only afterwards; the handle is never
/// reopened.
pub enum Sink {
    Stderr,
    File(File),
}

impl Sink {
    /// Opens `path` for append-mode logging, creating it if needed.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let file = File::options().create(true).append(true).open(path)?;
        Ok(Self::File(file))
    }

    /// Emits one complete line as a single write, so concurrent writers
    /// append whole lines instead of interleaving partial ones. Write
    /// errors are swallowed: logging is best-effort by contract.
    pub fn write_line(&self, line: &[u8]) {
        let result = match self {
            Sink::Stderr => std::io::stderr().lock().write_all(line),
            Sink::File(file) => {
                let mut file = file;
                file.write_all(line)
            }
        };
        let _ = result;
    }
}

/// The process-wide destination: `USLOG_FILE` names an append-mode file,
/// unset or empty selects stderr. A configured path that cannot be opened
/// is fatal; silently losing every log line would be worse than stopping.
pub(crate) fn process_sink() -> Arc<Sink> {
    static SINK: LazyLock<Arc<Sink>> = LazyLock::new(|| {
        let path = &USLOG_CONFIG.FILE;
        if path.is_empty() {
            Arc::new(Sink::Stderr)
        } else {
            Arc::new(
                Sink::file(path)
                    .unwrap_or_else(|e| panic!("unable to open log file {path:?}: {e}")),
            )
        }
    });
    Arc::clone(&SINK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_appends_whole_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sink.log");
        let sink = Sink::file(&path).unwrap();
        sink.write_line(b"line one\n");
        sink.write_line(b"line two\n");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "line one\nline two\n"
        );
        // Reopening appends rather than truncating.
        let sink = Sink::file(&path).unwrap();
        sink.write_line(b"line three\n");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "line one\nline two\nline three\n"
        );
    }

    #[test]
    fn test_stderr_sink_does_not_panic() {
        Sink::Stderr.write_line(b"stderr sink smoke test\n");
    }
}
