//! The regex engine capability: spec.md §6's "regex engine" external
//! collaborator, formalized as a trait so the Match Driver never talks to
//! `regex::bytes::Regex` directly. `regex_engine` ships the one concrete
//! implementation this crate needs to run standalone; callers may supply
//! their own `MatchEngine` instead (e.g. to wrap a JIT-capable engine).

pub mod regex_engine;

use std::ops::Range;

/// One capturing group's span within the window passed to `try_match`,
/// plus the mark metadata spec.md's CaptureRecord tracks. The default
/// engine only ever produces `mark_index: 0, mark_name: None` — named
/// marks belong to engines with PCRE2-style mark support (see
/// `Pattern::callout_descriptors`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSpan {
    pub range: Option<Range<usize>>,
    pub mark_index: u32,
    pub mark_name: Option<String>,
}

/// What happened when the engine was asked to match a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The pattern matched completely within the given window.
    Complete {
        consumed: usize,
        captures: Vec<CaptureSpan>,
    },
    /// The window might be a prefix of a longer match; ask for at least
    /// `need_more` more bytes and retry.
    Partial { need_more: usize },
    /// The pattern provably cannot match starting at the window's first
    /// byte, even with more input.
    NoMatch,
    /// The engine failed for a reason unrelated to matching.
    Error(String),
}

/// A single callout point a pattern declares, carried on `Pattern` for
/// engines that support in-pattern callouts. The default `RegexEngine` has
/// none (see SPEC_FULL.md §4.4): callout dispatch for this crate happens at
/// the `scan_with_callouts` entry point instead, once per completed match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutDescriptor {
    pub number: u32,
    pub name: Option<String>,
}

/// Compile-time options a `MatchEngine` honors when building a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub case_insensitive: bool,
    pub dot_matches_newline: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            case_insensitive: false,
            dot_matches_newline: false,
        }
    }
}

/// The regex engine capability. Anchored-at-window-start matching over a
/// byte window, with an explicit beginning-of-line hint supplied by the
/// caller (the `SourceAdapter` computes it; see SPEC_FULL.md §9 for why the
/// hint can't just be the engine's own native `^`).
pub trait MatchEngine {
    /// Opaque handle to a compiled pattern. Implementations pick their own
    /// representation; callers only ever see it through `Pattern`.
    type Compiled: Send + Sync;

    fn compile(pattern: &str, options: CompileOptions) -> Result<Self::Compiled, String>;

    /// Attempt an anchored match against `window`. `at_bol` tells the
    /// engine whether the position immediately before `window` is a
    /// line start (per the CR/LF/CRLF rule the adapter already resolved);
    /// `at_eof` tells it whether `window` is all the input that will ever
    /// exist, so `Partial` can never be returned once true.
    fn try_match(compiled: &Self::Compiled, window: &[u8], at_bol: bool, at_eof: bool) -> MatchOutcome;

    fn capture_count(compiled: &Self::Compiled) -> usize;

    fn callout_descriptors(_compiled: &Self::Compiled) -> &[CalloutDescriptor] {
        &[]
    }
}
