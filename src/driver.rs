//! The Match Driver: the state machine that repeatedly asks a
//! `MatchEngine` to match the current window, refilling through a
//! `ByteSource` until the engine gives a definite answer.
//!
//! spec.md's state machine names seven states (start, matching, refilling,
//! complete, no-match, abort, error). The first three are phases of one
//! loop iteration here, not separate values a caller ever observes —
//! `DriverOutcome` carries only the four terminal ones a scan can end in.
//! `Abort` is never produced by `run()` itself; it exists so
//! `scan_with_callouts` (the layer above, which owns callout dispatch) can
//! report a callout-requested stop using the same vocabulary.

use crate::engine::{CaptureSpan, MatchEngine, MatchOutcome};
use crate::error::ScanError;
use crate::pattern::Pattern;
use crate::source::{ByteSource, RefillOutcome};

/// The terminal outcome of one Match Driver pass.
#[derive(Debug)]
pub enum DriverOutcome {
    Complete {
        consumed: usize,
        /// An owned copy of the matched bytes (`window[0..consumed]` at
        /// match time). Owned because the window borrow can't outlive the
        /// `current_window()` call that produced it, and callers need the
        /// bytes after the driver has already moved the stream past them.
        matched: Vec<u8>,
        captures: Vec<CaptureSpan>,
    },
    NoMatch,
    /// A callout requested the scan stop. Never produced by `run()`;
    /// reserved for `scan_with_callouts`.
    Abort,
    Error(ScanError),
}

/// Beginning-of-line per spec.md §3: true at start-of-input, or when the
/// byte immediately before the window is `\r` or `\n`.
pub fn bol_hint(preceding: Option<u8>) -> bool {
    match preceding {
        None => true,
        Some(b) => b == b'\n' || b == b'\r',
    }
}

/// Drives one scan to completion: match, refill, repeat, until the engine
/// reports `Complete` or `NoMatch`, the stream errors, or `max_refills` is
/// exhausted.
pub fn run<S: ByteSource, E: MatchEngine>(
    source: &mut S,
    pattern: &Pattern<E>,
    max_refills: Option<usize>,
) -> DriverOutcome {
    if let Err(e) = source.begin_scan() {
        return DriverOutcome::Error(e.into());
    }

    let mut at_eof = false;
    let mut refills = 0usize;

    loop {
        let window = match source.current_window() {
            Ok(w) => w,
            Err(e) => return DriverOutcome::Error(e.into()),
        };
        let bol = bol_hint(source.preceding_byte());

        match E::try_match(pattern.compiled(), window, bol, at_eof) {
            MatchOutcome::Complete { consumed, captures } => {
                let matched = window[..consumed].to_vec();
                if let Err(e) = source.commit(consumed) {
                    return DriverOutcome::Error(e.into());
                }
                return DriverOutcome::Complete {
                    consumed,
                    matched,
                    captures,
                };
            }
            MatchOutcome::NoMatch => {
                source.rewind_to_start();
                return DriverOutcome::NoMatch;
            }
            MatchOutcome::Error(message) => {
                source.rewind_to_start();
                return DriverOutcome::Error(ScanError::Engine(message));
            }
            MatchOutcome::Partial { need_more } => {
                if let Some(max) = max_refills {
                    if refills >= max {
                        source.rewind_to_start();
                        return DriverOutcome::NoMatch;
                    }
                }
                match source.try_refill(need_more) {
                    Ok(RefillOutcome::Refilled) => {
                        refills += 1;
                    }
                    Ok(RefillOutcome::Eof) => {
                        at_eof = true;
                    }
                    Err(e) => return DriverOutcome::Error(e.into()),
                }
            }
        }
    }
}
