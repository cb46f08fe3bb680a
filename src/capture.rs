//! The Capture Binder: turns the engine's per-group byte ranges into
//! either bound `Destination` values (positional mode) or an owned
//! `CaptureRecord` for callout dispatch (see `scan::scan_with_callouts`).

use crate::convert::Destination;
use crate::engine::CaptureSpan;
use crate::error::ScanError;

/// One capturing group's matched bytes, detached from the window they were
/// sliced out of so they can outlive the scan step that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    pub bytes: Vec<u8>,
    pub mark_index: u32,
    pub mark_name: Option<String>,
}

/// The result of binding as many captures as possible, left to right.
/// `successes` is spec.md §8's successful-capture counter — the return
/// value of `scan` even when `error` is set, per §7's propagation policy
/// ("the return value is the count of successes before the failure").
pub struct BindOutcome {
    pub successes: usize,
    pub error: Option<ScanError>,
}

/// Binds each capture span, in order, to the corresponding destination.
/// Stops at the shorter of the two lists — a pattern with more groups than
/// destinations silently leaves the trailing groups unbound, matching
/// scanf-family "extra conversions ignored" behavior; a pattern with fewer
/// groups than destinations leaves the trailing destinations untouched.
///
/// Also stops — without error — at the first capture whose sub-expression
/// didn't participate in the match (spec.md §8: "destination is left
/// untouched; successful-capture counter is not incremented; remaining
/// destinations are not attempted").
pub fn bind_positional(
    matched: &[u8],
    captures: &[CaptureSpan],
    destinations: &mut [&mut dyn Destination],
) -> BindOutcome {
    for (index, (capture, destination)) in captures.iter().zip(destinations.iter_mut()).enumerate() {
        let range = match &capture.range {
            Some(range) => range,
            None => {
                return BindOutcome {
                    successes: index,
                    error: None,
                }
            }
        };
        if let Err(e) = destination.convert(&matched[range.clone()]) {
            return BindOutcome {
                successes: index,
                error: Some(ScanError::conversion(index, e.0)),
            };
        }
    }
    BindOutcome {
        successes: captures.len().min(destinations.len()),
        error: None,
    }
}

/// Builds the one `CaptureRecord` a completed match contributes to a
/// callout: the last capturing group if the pattern has any, or the whole
/// match otherwise (see SPEC_FULL.md §4.4).
pub fn last_group_or_whole_match(matched: &[u8], captures: &[CaptureSpan]) -> CaptureRecord {
    match captures.last() {
        Some(span) => {
            let bytes = match &span.range {
                Some(range) => matched[range.clone()].to_vec(),
                None => Vec::new(),
            };
            CaptureRecord {
                bytes,
                mark_index: span.mark_index,
                mark_name: span.mark_name.clone(),
            }
        }
        None => CaptureRecord {
            bytes: matched.to_vec(),
            mark_index: 0,
            mark_name: None,
        },
    }
}
