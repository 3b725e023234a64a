use std::{cell::RefCell, collections::HashMap};

use uuid::Uuid;

use crate::buffer::{Error, LineBuf};

/// Initial allocation for a thread's line buffer; most lines fit without
/// any further growth.
const INITIAL_LINE_CAPACITY: usize = 1024;

thread_local! {
    /// One line buffer per (logger, thread) pair, created on first use by
    /// that thread and dropped when the thread ends. No other thread can
    /// ever observe an entry, which is what lets `LineBuf` go without
    /// locking.
    static BUFFERS: RefCell<HashMap<Uuid, LineBuf>> = RefCell::new(HashMap::new());
}

/// Runs `f` with the calling thread's buffer for `logger`, creating it on
/// first use. Creation allocates the buffer before registering it, so a
/// failed allocation reports `OutOfMemory` without a partial registration.
///
/// The buffer is taken out of the slot while `f` runs: a re-entrant log
/// call from inside a formatting impl finds the slot empty and works on a
/// fresh scratch buffer instead of aliasing the one already in use.
pub(crate) fn with_line_buf<R>(logger: Uuid, f: impl FnOnce(&mut LineBuf) -> R) -> Result<R, Error> {
    let taken = BUFFERS
        .try_with(|cell| cell.borrow_mut().remove(&logger))
        .ok()
        .flatten();
    let mut buf = match taken {
        Some(buf) => buf,
        None => LineBuf::with_capacity(INITIAL_LINE_CAPACITY)?,
    };
    let out = f(&mut buf);
    let _ = BUFFERS.try_with(|cell| cell.borrow_mut().insert(logger, buf));
    Ok(out)
}

/// Drops the calling thread's cached buffer for `logger`, if any. Entries
/// on other threads are reclaimed when those threads exit.
pub(crate) fn discard(logger: Uuid) {
    let _ = BUFFERS.try_with(|cell| cell.borrow_mut().remove(&logger));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_is_cached_per_thread() {
        let id = Uuid::new_v4();
        with_line_buf(id, |buf| {
            buf.append_bytes(b"first call").unwrap();
        })
        .unwrap();
        with_line_buf(id, |buf| {
            // Same buffer as before: contents survived the round trip.
            assert_eq!(buf.as_bytes(), b"first call");
            assert!(buf.capacity() >= INITIAL_LINE_CAPACITY);
        })
        .unwrap();
        discard(id);
        with_line_buf(id, |buf| {
            assert!(buf.is_empty());
        })
        .unwrap();
        discard(id);
    }

    #[test]
    fn test_loggers_get_separate_buffers() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        with_line_buf(a, |buf| buf.append_bytes(b"aaa").unwrap()).unwrap();
        with_line_buf(b, |buf| assert!(buf.is_empty())).unwrap();
        discard(a);
        discard(b);
    }

    #[test]
    fn test_reentrant_use_gets_scratch_buffer() {
        let id = Uuid::new_v4();
        with_line_buf(id, |outer| {
            outer.append_bytes(b"outer").unwrap();
            with_line_buf(id, |inner| {
                assert!(inner.is_empty());
                inner.append_bytes(b"inner").unwrap();
            })
            .unwrap();
            assert_eq!(outer.as_bytes(), b"outer");
        })
        .unwrap();
        discard(id);
    }
}
