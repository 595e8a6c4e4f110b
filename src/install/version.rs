//! Version extraction and comparison.
//!
//! Versions come from two places: the `release` metadata file at the root of
//! an installation, and the text an interpreter prints for `-version`. Neither
//! is guaranteed to be semver, so comparisons work on dotted prefixes.

use regex::Regex;
use std::sync::LazyLock;

/// Version recorded when neither the metadata file nor the interpreter
/// yields one.
pub const UNKNOWN_VERSION: &str = "unknown";

macro_rules! lazy_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());
    };
}

lazy_regex!(RE_OPENJDK_QUOTED, r#"openjdk version\s+"(\d+(?:\.\d+)*[^"]*)""#);
lazy_regex!(RE_JAVA_QUOTED, r#"java version\s+"(\d+(?:\.\d+)*[^"]*)""#);
lazy_regex!(RE_ANY_QUOTED, r#"version\s+"([^"\s]+)""#);
lazy_regex!(RE_LEGACY, r"\b(1\.\d+\.\d+_\d+)\b");
lazy_regex!(RE_UNQUOTED, r"version\s+(\d+\.\d+[^\s]*)");

lazy_regex!(RE_MAIN_FULL, r"^(\d+\.\d+\.\d+(?:_\d+)?)");
lazy_regex!(RE_MAIN_SHORT, r"^(\d+\.\d+)");

/// Patterns tried against `-version` output, most specific first.
fn output_patterns() -> [&'static Regex; 5] {
    [
        &RE_OPENJDK_QUOTED,
        &RE_JAVA_QUOTED,
        &RE_ANY_QUOTED,
        &RE_LEGACY,
        &RE_UNQUOTED,
    ]
}

/// Extract the value of `key` from a `key=value` metadata file.
///
/// Surrounding single or double quotes are stripped. Returns `None` if the
/// key is missing or its value is empty.
pub fn parse_metadata(content: &str, key: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let (k, v) = line.split_once('=')?;
        if k.trim() != key {
            return None;
        }
        let value = v.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
            .unwrap_or(value)
            .trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Extract a version from an interpreter's combined `-version` output.
///
/// The first pattern that matches wins.
pub fn parse_version_output(output: &str) -> Option<String> {
    output_patterns().iter().find_map(|re| {
        re.captures(output)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Reduce a version to the part that matters for comparison.
///
/// `"11.0.15+10"` becomes `"11.0.15"`, `"1.8.0_462"` is kept whole and
/// `"17-ea"` becomes `"17"`.
pub fn main_version(version: &str) -> String {
    let trimmed = version.trim().trim_start_matches(['"', '\'']);
    let trimmed = match trimmed.find(['+', '-']) {
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    };

    if let Some(m) = RE_MAIN_FULL.captures(trimmed).and_then(|c| c.get(1)) {
        return m.as_str().to_string();
    }
    if let Some(m) = RE_MAIN_SHORT.captures(trimmed).and_then(|c| c.get(1)) {
        return m.as_str().to_string();
    }
    trimmed.to_string()
}

/// How closely two versions agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionMatch {
    /// Only the major component agrees.
    Major,
    /// Major and minor components agree.
    MajorMinor,
    /// Main versions are identical.
    Full,
}

/// Compare two versions, most specific level first.
pub fn compare(candidate: &str, actual: &str) -> Option<VersionMatch> {
    let candidate = main_version(candidate);
    let actual = main_version(actual);
    if candidate.is_empty() || actual.is_empty() {
        return None;
    }

    if candidate == actual {
        return Some(VersionMatch::Full);
    }

    let c: Vec<&str> = candidate.split('.').collect();
    let a: Vec<&str> = actual.split('.').collect();

    if c.len() >= 2 && a.len() >= 2 && c[0] == a[0] && c[1] == a[1] {
        return Some(VersionMatch::MajorMinor);
    }

    if c[0] == a[0] {
        return Some(VersionMatch::Major);
    }

    None
}
