//! Scan Entry Points: the public surface most callers use directly.
//! `scan`/`scan_with_callouts` drive a `Pattern` to completion over a
//! `ByteSource`; the `_str` variants compile an ad hoc pattern first.

use crate::capture::{self, CaptureRecord};
use crate::config::ScanConfig;
use crate::convert::Destination;
use crate::driver::{self, DriverOutcome};
use crate::engine::MatchEngine;
use crate::engine::regex_engine::RegexEngine;
use crate::error::ScanError;
use crate::pattern::Pattern;
use crate::source::ByteSource;

/// The result of a scan, carrying spec.md §6's return-code contract
/// (`as_code`) alongside typed variants callers actually want to match on.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The pattern matched; the payload is how many destinations (or, for
    /// `scan_with_callouts`, how many top-level matches) were bound.
    Matched(usize),
    /// The pattern matched and the stream advanced past it, but conversion
    /// failed partway through the destination list. `successes` is spec.md
    /// §7's propagation policy in action: "the return value is the count of
    /// successes before the failure" — a conversion error is not reported
    /// as a negative code, unlike a stream or engine error.
    MatchedWithConversionError { successes: usize, error: ScanError },
    NoMatch,
    /// A callout requested the scan stop before the stream was exhausted.
    Aborted,
    Error(ScanError),
}

impl ScanOutcome {
    pub fn as_code(&self) -> i64 {
        match self {
            ScanOutcome::Matched(n) => *n as i64,
            ScanOutcome::MatchedWithConversionError { successes, .. } => *successes as i64,
            ScanOutcome::NoMatch => 0,
            ScanOutcome::Aborted => -1,
            ScanOutcome::Error(_) => -2,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(
            self,
            ScanOutcome::Matched(_) | ScanOutcome::MatchedWithConversionError { .. }
        )
    }
}

/// Run `pattern` once against `source`, binding each capture group, left to
/// right, to the corresponding destination.
pub fn scan<S, E>(
    source: &mut S,
    pattern: &Pattern<E>,
    destinations: &mut [&mut dyn Destination],
) -> ScanOutcome
where
    S: ByteSource,
    E: MatchEngine,
{
    scan_with_config(source, pattern, destinations, &ScanConfig::default())
}

/// As `scan`, but with an explicit `ScanConfig` (currently only
/// `max_refills` affects the Match Driver directly; the rest is read by
/// callers constructing their destinations).
pub fn scan_with_config<S, E>(
    source: &mut S,
    pattern: &Pattern<E>,
    destinations: &mut [&mut dyn Destination],
    config: &ScanConfig,
) -> ScanOutcome
where
    S: ByteSource,
    E: MatchEngine,
{
    match driver::run(source, pattern, config.max_refills) {
        DriverOutcome::Complete {
            matched, captures, ..
        } => {
            let bound = capture::bind_positional(&matched, &captures, destinations);
            match bound.error {
                None => ScanOutcome::Matched(bound.successes),
                Some(error) => ScanOutcome::MatchedWithConversionError {
                    successes: bound.successes,
                    error,
                },
            }
        }
        DriverOutcome::NoMatch => ScanOutcome::NoMatch,
        DriverOutcome::Abort => ScanOutcome::Aborted,
        DriverOutcome::Error(e) => ScanOutcome::Error(e),
    }
}

/// Compile `pattern_src` ad hoc (JIT disabled, not cached) and run it once.
pub fn scan_str<S: ByteSource>(
    source: &mut S,
    pattern_src: &str,
    destinations: &mut [&mut dyn Destination],
) -> ScanOutcome {
    match Pattern::<RegexEngine>::compile_ad_hoc(pattern_src) {
        Ok(pattern) => scan(source, &pattern, destinations),
        Err(e) => ScanOutcome::Error(e),
    }
}

/// Repeatedly run `pattern` against `source`, invoking `callout` once per
/// completed top-level match with the last capturing group's bytes (or the
/// whole match, if the pattern has no groups). Stops when the stream is
/// exhausted, the callout returns `false`, or an error occurs.
///
/// This is the resolution to spec.md's callout Open Question described in
/// SPEC_FULL.md §4.4: every invocation happens only after a top-level match
/// has already completed, never speculatively during backtracking.
pub fn scan_with_callouts<S, E>(
    source: &mut S,
    pattern: &Pattern<E>,
    mut callout: impl FnMut(&CaptureRecord) -> bool,
) -> ScanOutcome
where
    S: ByteSource,
    E: MatchEngine,
{
    scan_with_callouts_config(source, pattern, &mut callout, &ScanConfig::default())
}

pub fn scan_with_callouts_config<S, E>(
    source: &mut S,
    pattern: &Pattern<E>,
    callout: &mut dyn FnMut(&CaptureRecord) -> bool,
    config: &ScanConfig,
) -> ScanOutcome
where
    S: ByteSource,
    E: MatchEngine,
{
    let mut matches = 0usize;
    loop {
        match driver::run(source, pattern, config.max_refills) {
            DriverOutcome::Complete {
                consumed,
                matched,
                captures,
            } => {
                let record = capture::last_group_or_whole_match(&matched, &captures);
                matches += 1;
                if !callout(&record) {
                    return ScanOutcome::Aborted;
                }
                // A zero-width match (e.g. `a*`, `(.*)`) never advances the
                // stream, so re-running the driver would match the same
                // empty span again, forever. One empty match is reported
                // like any other; the loop just can't repeat it.
                if consumed == 0 {
                    return ScanOutcome::Matched(matches);
                }
            }
            DriverOutcome::NoMatch => {
                return if matches > 0 {
                    ScanOutcome::Matched(matches)
                } else {
                    ScanOutcome::NoMatch
                };
            }
            DriverOutcome::Abort => return ScanOutcome::Aborted,
            DriverOutcome::Error(e) => return ScanOutcome::Error(e),
        }
    }
}

/// Compile `pattern_src` ad hoc and drive `scan_with_callouts` over it.
pub fn scan_str_with_callouts<S: ByteSource>(
    source: &mut S,
    pattern_src: &str,
    callout: impl FnMut(&CaptureRecord) -> bool,
) -> ScanOutcome {
    match Pattern::<RegexEngine>::compile_ad_hoc(pattern_src) {
        Ok(pattern) => scan_with_callouts(source, &pattern, callout),
        Err(e) => ScanOutcome::Error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{BytesDest, IntDest};
    use crate::config::IntBase;
    use crate::source::SourceAdapter;
    use std::io::Cursor;

    #[test]
    fn scans_a_key_value_line() {
        let mut adapter = SourceAdapter::new(Cursor::new(b"port: 8080\n".to_vec()));
        let pattern = Pattern::<RegexEngine>::compile(r"\s*(.*?)\s*:\s*(\d+)\s*\n").unwrap();
        let mut key = BytesDest::new();
        let mut value: IntDest<i32> = IntDest::new(IntBase::Decimal);
        let mut destinations: Vec<&mut dyn Destination> = vec![&mut key, &mut value];
        let outcome = scan(&mut adapter, &pattern, &mut destinations);
        assert!(outcome.is_matched());
        assert_eq!(key.0, b"port");
        assert_eq!(value.value, 8080);
    }

    #[test]
    fn conversion_overflow_reports_zero_successes_but_still_consumes_the_match() {
        let mut adapter = SourceAdapter::new(Cursor::new(b"99999999999999999999".to_vec()));
        let pattern = Pattern::<RegexEngine>::compile(r"(\d+)").unwrap();
        let mut value: IntDest<i32> = IntDest::new(IntBase::Decimal);
        let mut destinations: Vec<&mut dyn Destination> = vec![&mut value];
        let outcome = scan(&mut adapter, &pattern, &mut destinations);
        assert_eq!(outcome.as_code(), 0);
        match outcome {
            ScanOutcome::MatchedWithConversionError { successes, .. } => assert_eq!(successes, 0),
            other => panic!("expected MatchedWithConversionError, got {:?}", other),
        }
        // The overall match still succeeded and the stream advanced past it.
        let mut trailing = BytesDest::new();
        let mut rest: Vec<&mut dyn Destination> = vec![&mut trailing];
        let eof_outcome = scan_str(&mut adapter, r".+", &mut rest);
        assert_eq!(eof_outcome.as_code(), 0);
    }

    #[test]
    fn reports_no_match_for_unrelated_input() {
        let mut adapter = SourceAdapter::new(Cursor::new(b"abc".to_vec()));
        let pattern = Pattern::<RegexEngine>::compile(r"(\d+)").unwrap();
        let mut destinations: Vec<&mut dyn Destination> = vec![];
        let outcome = scan(&mut adapter, &pattern, &mut destinations);
        assert_eq!(outcome.as_code(), 0);
    }

    #[test]
    fn scan_str_compiles_ad_hoc_and_disables_jit() {
        let mut adapter = SourceAdapter::new(Cursor::new(b"42".to_vec()));
        let mut value: IntDest<i32> = IntDest::new(IntBase::Decimal);
        let mut destinations: Vec<&mut dyn Destination> = vec![&mut value];
        let outcome = scan_str(&mut adapter, r"\d+", &mut destinations);
        assert!(outcome.is_matched());
        assert_eq!(value.value, 42);
    }

    #[test]
    fn callouts_fire_once_per_line_until_stream_exhausted() {
        let mut adapter = SourceAdapter::new(Cursor::new(b"a\nb\nc\n".to_vec()));
        let pattern = Pattern::<RegexEngine>::compile(r"(.*)\n").unwrap();
        let mut seen = Vec::new();
        let outcome = scan_with_callouts(&mut adapter, &pattern, |record| {
            seen.push(record.bytes.clone());
            true
        });
        assert_eq!(seen, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
        match outcome {
            ScanOutcome::Matched(3) => {}
            other => panic!("expected Matched(3), got {:?}", other),
        }
    }

    #[test]
    fn callout_can_abort_the_scan_early() {
        let mut adapter = SourceAdapter::new(Cursor::new(b"a\nb\nc\n".to_vec()));
        let pattern = Pattern::<RegexEngine>::compile(r"(.*)\n").unwrap();
        let mut seen = Vec::new();
        let outcome = scan_with_callouts(&mut adapter, &pattern, |record| {
            seen.push(record.bytes.clone());
            record.bytes != b"b"
        });
        assert_eq!(seen, vec![b"a".to_vec(), b"b".to_vec()]);
        assert!(matches!(outcome, ScanOutcome::Aborted));
    }

    #[test]
    fn zero_width_match_terminates_instead_of_looping_forever() {
        let mut adapter = SourceAdapter::new(Cursor::new(b"bbb".to_vec()));
        let pattern = Pattern::<RegexEngine>::compile(r"a*").unwrap();
        let mut seen = Vec::new();
        let outcome = scan_with_callouts(&mut adapter, &pattern, |record| {
            seen.push(record.bytes.clone());
            true
        });
        assert_eq!(seen, vec![Vec::<u8>::new()]);
        match outcome {
            ScanOutcome::Matched(1) => {}
            other => panic!("expected Matched(1), got {:?}", other),
        }
    }
}
