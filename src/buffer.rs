use std::{collections::TryReserveError, fmt};

/// Failure of a single best-effort logging operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Buffer growth or per-thread state allocation failed, or a growth
    /// computation would overflow.
    #[error("out of memory")]
    OutOfMemory,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

/// Growable byte buffer used to assemble one log line without per-call
/// heap churn. Storage is kept zero-terminated past the logical length so
/// the contents can be handed to C-style consumers, which means the
/// invariant `len < capacity` holds after every successful operation.
///
/// The buffer has no locking of its own; exclusive access comes from the
/// one-buffer-per-thread design in `thread_buf`.
pub struct LineBuf {
    storage: Vec<u8>,
    len: usize,
}

impl LineBuf {
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            len: 0,
        }
    }

    /// Creates a buffer with at least `initial_capacity + 1` bytes of
    /// storage already allocated.
    pub fn with_capacity(initial_capacity: usize) -> Result<Self, Error> {
        let mut buf = Self::new();
        if initial_capacity > 0 {
            buf.ensure_capacity(initial_capacity)?;
        }
        Ok(buf)
    }

    /// Guarantees room for `required` content bytes plus the terminator.
    /// Capacity only grows, by doubling, and never shrinks; arithmetic that
    /// would overflow `usize` fails with `OutOfMemory` instead of wrapping.
    pub fn ensure_capacity(&mut self, required: usize) -> Result<(), Error> {
        let required_alloc = required.checked_add(1).ok_or(Error::OutOfMemory)?;
        if required_alloc <= self.storage.len() {
            return Ok(());
        }
        let mut new_alloc = self.storage.len().max(1);
        while new_alloc < required_alloc {
            new_alloc = new_alloc.checked_mul(2).ok_or(Error::OutOfMemory)?;
        }
        self.storage.try_reserve_exact(new_alloc - self.storage.len())?;
        // Zero-fill so the slice past `len` is always a valid terminator.
        self.storage.resize(new_alloc, 0);
        Ok(())
    }

    fn grow_for(&mut self, delta: usize) -> Result<(), Error> {
        let required = self.len.checked_add(delta).ok_or(Error::OutOfMemory)?;
        self.ensure_capacity(required)
    }

    /// Appends `data` whole, or fails leaving the buffer unchanged.
    pub fn append_bytes(&mut self, data: &[u8]) -> Result<(), Error> {
        self.grow_for(data.len())?;
        self.storage[self.len..self.len + data.len()].copy_from_slice(data);
        self.len += data.len();
        self.storage[self.len] = 0;
        Ok(())
    }

    /// Appends formatted text. The exact rendered size is measured with a
    /// zero-copy counting pass first, so at most one growth happens per
    /// call before the text is rendered straight into the tail.
    pub fn append_formatted(&mut self, args: fmt::Arguments<'_>) -> Result<(), Error> {
        let mut counter = ByteCounter(0);
        if fmt::write(&mut counter, args).is_err() {
            // A Display impl refused to format; nothing was written.
            return Ok(());
        }
        self.grow_for(counter.0)?;
        let mut tail = TailWriter {
            buf: self,
            err: None,
        };
        match fmt::write(&mut tail, args) {
            Ok(()) => Ok(()),
            Err(_) => Err(tail.err.unwrap_or(Error::OutOfMemory)),
        }
    }

    /// Resets length to zero while keeping the storage for reuse.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }
}

impl Default for LineBuf {
    fn default() -> Self {
        Self::new()
    }
}

struct ByteCounter(usize);

impl fmt::Write for ByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

struct TailWriter<'a> {
    buf: &'a mut LineBuf,
    err: Option<Error>,
}

impl fmt::Write for TailWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Err(e) = self.buf.append_bytes(s.as_bytes()) {
            self.err = Some(e);
            return Err(fmt::Error);
        }
        Ok(())
    }
}

#[test]
fn test_appends_concatenate() {
    let mut buf = LineBuf::new();
    buf.append_bytes(b"hello").unwrap();
    buf.append_formatted(format_args!(" {} {}", "world", 42)).unwrap();
    buf.append_bytes(b"!").unwrap();
    assert_eq!(buf.as_bytes(), b"hello world 42!");
    assert_eq!(buf.len(), 15);
}

#[test]
fn test_capacity_doubles_to_smallest_cover() {
    let mut buf = LineBuf::new();
    buf.append_bytes(b"a").unwrap();
    // needs 2 bytes (content + terminator); doubling from 1 gives 2
    assert_eq!(buf.capacity(), 2);
    buf.append_bytes(b"bcdef").unwrap();
    // needs 7 bytes; 2 -> 4 -> 8
    assert_eq!(buf.capacity(), 8);
    buf.append_bytes(b"gh").unwrap();
    assert_eq!(buf.capacity(), 16);
    assert_eq!(buf.as_bytes(), b"abcdefgh");
}

#[test]
fn test_clear_keeps_storage() {
    let mut buf = LineBuf::with_capacity(64).unwrap();
    buf.append_bytes(b"some line content").unwrap();
    let cap = buf.capacity();
    buf.clear();
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), cap);
    buf.append_bytes(b"reused").unwrap();
    assert_eq!(buf.as_bytes(), b"reused");
    assert_eq!(buf.capacity(), cap);
}

#[test]
fn test_overflowing_growth_fails_cleanly() {
    let mut buf = LineBuf::new();
    buf.append_bytes(b"kept").unwrap();
    assert_eq!(buf.ensure_capacity(usize::MAX), Err(Error::OutOfMemory));
    // The failed call must not disturb existing contents.
    assert_eq!(buf.as_bytes(), b"kept");
}

#[test]
fn test_storage_stays_zero_terminated() {
    let mut buf = LineBuf::new();
    buf.append_bytes(b"abc").unwrap();
    assert!(buf.capacity() > buf.len());
    assert_eq!(buf.storage[buf.len], 0);
    buf.append_formatted(format_args!("{:>5}", "x")).unwrap();
    assert_eq!(buf.storage[buf.len], 0);
}

#[test]
fn test_formatted_append_single_growth() {
    let mut buf = LineBuf::with_capacity(4).unwrap();
    buf.append_formatted(format_args!("{:04}-{:02}", 2024, 7)).unwrap();
    assert_eq!(buf.as_bytes(), b"2024-07");
    assert_eq!(buf.capacity(), 8);
}
