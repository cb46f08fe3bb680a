//! Scan configuration: the knobs spec.md §6 enumerates (`jit`,
//! `newline_recognition`, plus the number/boolean formatting the Converter
//! Set needs). Loadable from a YAML file the way the teacher's own
//! `config` module loads its YAML, but every field also has a sane
//! programmatic default so callers never have to touch a file.

use serde::Deserialize;
use std::path::Path;

/// Whether the JIT compilation stage of a `MatchEngine` should be attempted.
///
/// The default `RegexEngine` has no JIT stage at all and ignores this, but
/// the preference is still tracked on `Pattern` so an engine that does have
/// one (a future `MatchEngine` impl) can honor it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JitPreference {
    Enabled,
    Disabled,
}

impl Default for JitPreference {
    fn default() -> Self {
        JitPreference::Enabled
    }
}

/// Fixed per spec.md §3/§4.2: newline recognition is always CR-or-LF-or-CRLF
/// unless the pattern overrides it with the engine's in-pattern directive.
/// Kept as an enum (rather than hardcoding the rule inline) so a future
/// `MatchEngine` that can express other newline conventions has somewhere
/// to plug in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewlineRule {
    CrLfOrCrlf,
}

impl Default for NewlineRule {
    fn default() -> Self {
        NewlineRule::CrLfOrCrlf
    }
}

/// Integer base handling for `IntDest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntBase {
    /// Always parse as decimal, regardless of prefix.
    Decimal,
    /// Sniff a `0x`/`0X`, `0o`/`0O`, or `0b`/`0B` prefix (à la C's `%i`);
    /// fall back to decimal when none is present.
    Auto,
}

impl Default for IntBase {
    fn default() -> Self {
        IntBase::Auto
    }
}

/// Tokens `BoolDest` accepts in addition to `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BoolWords {
    pub case_sensitive: bool,
}

impl Default for BoolWords {
    fn default() -> Self {
        BoolWords {
            case_sensitive: false,
        }
    }
}

/// All scan-time configuration, threaded through `Pattern`, the
/// `MatchDriver`, and the Converter Set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub jit: JitPreference,
    pub newline: NewlineRule,
    pub int_base: IntBase,
    pub bool_words: BoolWords,
    /// Cap on the number of refills `MatchDriver` will request for a single
    /// scan before giving up and reporting `NoMatch`. `None` means
    /// unbounded (grow until EOF).
    #[serde(skip)]
    pub max_refills: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            jit: JitPreference::default(),
            newline: NewlineRule::default(),
            int_base: IntBase::default(),
            bool_words: BoolWords::default(),
            max_refills: None,
        }
    }
}

impl ScanConfig {
    /// Load a `ScanConfig` from a YAML file, falling back to defaults for
    /// any field the file omits.
    pub fn load(path: &Path) -> Result<Self, crate::error::ScanError> {
        let content = std::fs::read_to_string(path)?;
        serde_saphyr::from_str(&content).map_err(|e| crate::error::ScanError::config(e.to_string()))
    }

    /// The default config path: `~/.config/rxscan/config.yaml`.
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|p| p.join("rxscan").join("config.yaml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_documented_ones() {
        let cfg = ScanConfig::default();
        assert_eq!(cfg.jit, JitPreference::Enabled);
        assert_eq!(cfg.newline, NewlineRule::CrLfOrCrlf);
        assert_eq!(cfg.int_base, IntBase::Auto);
        assert!(!cfg.bool_words.case_sensitive);
        assert_eq!(cfg.max_refills, None);
    }

    #[test]
    fn load_missing_file_errors() {
        let result = ScanConfig::load(Path::new("/nonexistent/rxscan.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_partial_yaml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "jit: disabled\n").unwrap();

        let cfg = ScanConfig::load(&path).unwrap();
        assert_eq!(cfg.jit, JitPreference::Disabled);
        assert_eq!(cfg.newline, NewlineRule::CrLfOrCrlf);
    }
}
