//! The Byte Source Adapter: wraps a buffered input stream so the Match
//! Driver can inspect the current unread window, advance past consumed
//! bytes, and request a refill, without taking ownership of the stream.
//!
//! Mirrors the reader abstractions the teacher builds around `BufRead`
//! (`reader::stream_reader::StreamReader::from_reader<R: std::io::Read>`,
//! `reader::mod::LogReader`), generalized here into direct-vs-pulled window
//! management instead of line slicing.

use std::io::{self, BufRead};

/// A read-only view into the bytes currently available for matching.
/// Borrows zero-copy from the stream's own buffer in direct mode, or from
/// the adapter's `OverflowBuffer` in pulled mode.
pub type ByteWindow<'a> = &'a [u8];

/// Outcome of asking the adapter for more bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefillOutcome {
    /// At least one more byte is now available in the window.
    Refilled,
    /// The stream is exhausted; no more bytes will ever arrive.
    Eof,
}

enum Mode {
    /// Matching directly against the stream's own buffer.
    Direct,
    /// Matching against an owned, growable copy because the stream's
    /// buffer could not hold the whole candidate window.
    Pulled,
}

/// An owned, growable byte buffer used once the stream's native buffer is
/// too small to complete a match. Every byte ever pulled from the
/// underlying reader while in pulled mode lives here until consumed, so
/// replaying them (e.g. on a failed match) never requires re-reading the
/// stream.
struct OverflowBuffer {
    buf: Vec<u8>,
    cursor: usize,
}

impl OverflowBuffer {
    fn window(&self) -> &[u8] {
        &self.buf[self.cursor..]
    }
}

/// The trait the Match Driver programs against — spec.md §4.1's five
/// operations, verbatim.
pub trait ByteSource {
    /// The contiguous unread region the engine may match against.
    fn current_window(&mut self) -> io::Result<ByteWindow<'_>>;

    /// The byte immediately before the window, when known — `None` means
    /// "start of input," which is itself a beginning-of-line position.
    fn preceding_byte(&self) -> Option<u8>;

    /// Ask the stream for at least `min_additional` more bytes.
    fn try_refill(&mut self, min_additional: usize) -> io::Result<RefillOutcome>;

    /// Advance the logical position by `n` bytes, consuming from the
    /// window.
    fn commit(&mut self, n: usize) -> io::Result<()>;

    /// Attempt to restore the position recorded at the most recent
    /// `begin_scan`. Always replays already-pulled bytes from memory
    /// (never re-reads the stream); additionally repositions the
    /// underlying stream itself when it is seekable. Returns whether the
    /// underlying stream's own position was (or needed to be) restored.
    fn rewind_to_start(&mut self) -> bool;

    /// Record the position a new scan begins at. Called once per
    /// `scan`/`scan_with_callouts` invocation, before the Match Driver's
    /// first `current_window()` call.
    fn begin_scan(&mut self) -> io::Result<()>;
}

/// The Byte Source Adapter: `SourceAdapter<R>` for any `R: BufRead`.
///
/// Construct once per stream and reuse across repeated scan calls — the
/// adapter remembers the last committed byte (for beginning-of-line
/// detection on the *next* scan) and, once in pulled mode, keeps serving
/// leftover pulled bytes until they're drained rather than discarding them.
pub struct SourceAdapter<R> {
    reader: R,
    mode: Mode,
    overflow: Option<OverflowBuffer>,
    last_byte: Option<u8>,
    cursor_at_scan_start: usize,
    crossed_boundary: bool,
    tell: Option<Box<dyn FnMut(&mut R) -> io::Result<u64>>>,
    seek: Option<Box<dyn FnMut(&mut R, u64) -> io::Result<()>>>,
    mark_offset: u64,
}

impl<R: BufRead> SourceAdapter<R> {
    /// Wrap a non-seekable (or not-known-to-be-seekable) stream. Rewind
    /// after a refill-crossing failure is best-effort only at the raw
    /// stream level; the adapter's own logical position always recovers.
    pub fn new(reader: R) -> Self {
        SourceAdapter {
            reader,
            mode: Mode::Direct,
            overflow: None,
            last_byte: None,
            cursor_at_scan_start: 0,
            crossed_boundary: false,
            tell: None,
            seek: None,
            mark_offset: 0,
        }
    }
}

impl<R: BufRead + io::Seek + 'static> SourceAdapter<R> {
    /// Wrap a seekable stream so a failed scan that crossed into pulled
    /// mode can restore the raw stream's own position too.
    pub fn new_seekable(reader: R) -> Self {
        let mut adapter = Self::new(reader);
        adapter.tell = Some(Box::new(|r: &mut R| r.stream_position()));
        adapter.seek = Some(Box::new(|r: &mut R, pos: u64| {
            r.seek(io::SeekFrom::Start(pos)).map(|_| ())
        }));
        adapter
    }
}

impl<R: BufRead> ByteSource for SourceAdapter<R> {
    fn current_window(&mut self) -> io::Result<ByteWindow<'_>> {
        match self.mode {
            Mode::Direct => self.reader.fill_buf(),
            Mode::Pulled => Ok(self.overflow.as_ref().expect("pulled mode has overflow").window()),
        }
    }

    fn preceding_byte(&self) -> Option<u8> {
        self.last_byte
    }

    fn try_refill(&mut self, min_additional: usize) -> io::Result<RefillOutcome> {
        if matches!(self.mode, Mode::Direct) {
            // The stream's own buffer can't be extended without discarding
            // what's already in it (repeated fill_buf() calls return the
            // same slice until something is consumed). Transition to
            // pulled mode: take ownership of the current window, then
            // start pulling fresh bytes behind it.
            let current = self.reader.fill_buf()?.to_vec();
            let had = current.len();
            self.reader.consume(had);
            self.overflow = Some(OverflowBuffer {
                buf: current,
                cursor: 0,
            });
            self.mode = Mode::Pulled;
            self.crossed_boundary = true;
            self.cursor_at_scan_start = 0;
        }
        self.pull_more(min_additional)
    }

    fn commit(&mut self, n: usize) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        match self.mode {
            Mode::Direct => {
                let window = self.reader.fill_buf()?;
                self.last_byte = Some(window[n - 1]);
                self.reader.consume(n);
            }
            Mode::Pulled => {
                let overflow = self.overflow.as_mut().expect("pulled mode has overflow");
                self.last_byte = Some(overflow.buf[overflow.cursor + n - 1]);
                overflow.cursor += n;
            }
        }
        Ok(())
    }

    fn rewind_to_start(&mut self) -> bool {
        if !self.crossed_boundary {
            if let Some(overflow) = self.overflow.as_mut() {
                overflow.cursor = self.cursor_at_scan_start;
            }
            return true;
        }
        // `crossed_boundary` means this scan pulled the overflow buffer
        // into existence from a Direct-mode window that started exactly
        // at `mark_offset`. If the raw stream can seek back there, the
        // overflow's bytes are about to be re-read from the stream on the
        // next `fill_buf()` — keeping them around would serve them *and*
        // re-read them. Drop the overflow and return to Direct mode so
        // there's exactly one copy of those bytes again.
        let seeked = match self.seek.as_mut() {
            Some(seek) => seek(&mut self.reader, self.mark_offset).is_ok(),
            None => false,
        };
        if seeked {
            self.overflow = None;
            self.mode = Mode::Direct;
            true
        } else {
            if let Some(overflow) = self.overflow.as_mut() {
                overflow.cursor = self.cursor_at_scan_start;
            }
            false
        }
    }

    fn begin_scan(&mut self) -> io::Result<()> {
        self.crossed_boundary = false;
        if let Some(overflow) = &self.overflow {
            if overflow.cursor >= overflow.buf.len() {
                // Fully drained: the next fill_buf() on the real reader
                // continues exactly where we left off.
                self.overflow = None;
                self.mode = Mode::Direct;
            }
        }
        self.cursor_at_scan_start = self.overflow.as_ref().map(|o| o.cursor).unwrap_or(0);
        if let Some(tell) = self.tell.as_mut() {
            self.mark_offset = tell(&mut self.reader)?;
        }
        Ok(())
    }
}

impl<R: BufRead> SourceAdapter<R> {
    fn pull_more(&mut self, min_additional: usize) -> io::Result<RefillOutcome> {
        let overflow = self.overflow.as_mut().expect("pulled mode has overflow");
        // Compact already-committed bytes so the buffer doesn't grow
        // unboundedly across a long scan.
        if overflow.cursor > 0 {
            overflow.buf.drain(0..overflow.cursor);
            overflow.cursor = 0;
        }
        let target = overflow.buf.len() + min_additional.max(1);
        let mut pulled_any = false;
        while overflow.buf.len() < target {
            let chunk_len = {
                let chunk = self.reader.fill_buf()?;
                if chunk.is_empty() {
                    return Ok(if pulled_any {
                        RefillOutcome::Refilled
                    } else {
                        RefillOutcome::Eof
                    });
                }
                overflow.buf.extend_from_slice(chunk);
                chunk.len()
            };
            self.reader.consume(chunk_len);
            pulled_any = true;
        }
        Ok(RefillOutcome::Refilled)
    }
}
