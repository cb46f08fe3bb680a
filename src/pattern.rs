//! The Pattern Handle: an immutable, compiled, reusable representation of
//! what to match. Grounded on `filter::regex_filter::RegexFilter`'s role as
//! a thin, reusable wrapper the rest of the teacher's pipeline holds onto
//! rather than recompiling per line.

use crate::config::JitPreference;
use crate::engine::{CalloutDescriptor, CompileOptions, MatchEngine};
use crate::error::ScanError;

/// Matching options fixed by spec.md §3/§4.2 — not user-tunable beyond
/// `jit`, which this crate's default engine ignores but still carries for
/// forward compatibility with a `MatchEngine` that has a JIT stage.
#[derive(Debug, Clone, Copy)]
pub struct PatternOptions {
    pub case_insensitive: bool,
    pub dot_matches_newline: bool,
    pub jit: JitPreference,
}

impl Default for PatternOptions {
    fn default() -> Self {
        PatternOptions {
            case_insensitive: false,
            dot_matches_newline: false,
            jit: JitPreference::Enabled,
        }
    }
}

/// A compiled pattern, ready to drive repeated scans. Anchoring (matches
/// must start exactly at the window's first byte) and multi-line `^`/`$`
/// are always on, per spec.md — they are not knobs a caller can turn off.
pub struct Pattern<E: MatchEngine = crate::engine::regex_engine::RegexEngine> {
    compiled: E::Compiled,
    options: PatternOptions,
    source: String,
}

impl<E: MatchEngine> Pattern<E> {
    /// Compile `source` with the default options (JIT preferred, where the
    /// engine has a JIT stage).
    pub fn compile(source: &str) -> Result<Self, ScanError> {
        Self::compile_with(source, PatternOptions::default())
    }

    pub fn compile_with(source: &str, options: PatternOptions) -> Result<Self, ScanError> {
        let compile_options = CompileOptions {
            case_insensitive: options.case_insensitive,
            dot_matches_newline: options.dot_matches_newline,
        };
        let compiled =
            E::compile(source, compile_options).map_err(|message| ScanError::pattern(message))?;
        Ok(Pattern {
            compiled,
            options,
            source: source.to_string(),
        })
    }

    /// Compile an ad hoc pattern for a single scan call, with JIT disabled
    /// (there is no point preferring JIT for a pattern used exactly once).
    pub(crate) fn compile_ad_hoc(source: &str) -> Result<Self, ScanError> {
        let mut options = PatternOptions::default();
        options.jit = JitPreference::Disabled;
        Self::compile_with(source, options)
    }

    /// One-shot, idempotent opt-out: disables JIT preference for this
    /// pattern from this point on. Must be called before the pattern is
    /// first used to match, to be meaningful for engines with a JIT stage.
    pub fn disable_jit(&mut self) {
        self.options.jit = JitPreference::Disabled;
    }

    pub fn jit_preference(&self) -> JitPreference {
        self.options.jit
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn max_capture_index(&self) -> usize {
        E::capture_count(&self.compiled)
    }

    pub fn callout_descriptors(&self) -> &[CalloutDescriptor] {
        E::callout_descriptors(&self.compiled)
    }

    pub(crate) fn compiled(&self) -> &E::Compiled {
        &self.compiled
    }
}
