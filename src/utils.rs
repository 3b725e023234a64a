use std::sync::LazyLock;

/// Local host name, resolved once and shared read-only afterwards.
static HOSTNAME: LazyLock<String> = LazyLock::new(|| {
    let mut buf = [0u8; 256];
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return "localhost".into();
    }
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
});

pub(crate) fn hostname() -> &'static str {
    &HOSTNAME
}

/// Identity used when the caller passes none: the executable's file name,
/// or `???` when that cannot be determined.
pub(crate) fn default_ident() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "???".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_is_nonempty() {
        assert!(!hostname().is_empty());
        // Cached: repeated calls hand back the same allocation.
        assert_eq!(hostname().as_ptr(), hostname().as_ptr());
    }

    #[test]
    fn test_default_ident_is_nonempty() {
        assert!(!default_ident().is_empty());
    }
}
