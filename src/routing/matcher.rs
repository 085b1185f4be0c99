//! Location pattern matching.
//!
//! # Responsibilities
//! - Compile route patterns into anchored regular expressions
//! - Match a whole location fragment (not a substring)
//! - Expose capture groups, optionally percent-decoded
//!
//! # Design Decisions
//! - `^` and `$` are implied: a pattern always covers the full location
//! - Groups are positional; group 0 is the whole location
//! - Optional groups that did not participate are reported as absent

use percent_encoding::percent_decode_str;
use regex::Regex;

/// A compiled, anchored route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    regex: Regex,
}

impl RoutePattern {
    /// Compile `pattern`, anchoring it on both ends.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", strip_anchors(pattern)))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the whole `location` matches.
    pub fn is_match(&self, location: &str) -> bool {
        self.regex.is_match(location)
    }

    /// Match `location` and extract its groups.
    pub fn captures(&self, location: &str) -> Option<RouteParams> {
        let caps = self.regex.captures(location)?;
        let groups = caps
            .iter()
            .map(|group| group.map(|m| m.as_str().to_string()))
            .collect();
        Some(RouteParams { groups })
    }
}

/// Drop a leading `^` and an unescaped trailing `$`.
fn strip_anchors(pattern: &str) -> &str {
    let pattern = pattern.strip_prefix('^').unwrap_or(pattern);
    match pattern.strip_suffix('$') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => pattern,
    }
}

/// Groups captured from a matched location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteParams {
    groups: Vec<Option<String>>,
}

impl RouteParams {
    /// Raw text of group `index`, if it participated in the match.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }

    /// Group `index` with percent-escapes decoded.
    pub fn decoded(&self, index: usize) -> Option<String> {
        self.get(index)
            .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
    }

    /// Number of groups including the whole match.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
