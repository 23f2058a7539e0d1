//! Section extraction: selects the part of a README a page is built from.
//!
//! Rules come from the `extract` key of a page in the YAML configuration and
//! are validated while the configuration is loaded, so extraction itself
//! never fails. A rule that selects nothing yields an empty string, which
//! the assembler reports as a skipped page.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

/// Which substring of a source document to keep.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "RuleSpec")]
pub enum ExtractionRule {
    /// The whole document.
    #[default]
    All,
    /// Lines `start..=end`, 1-indexed.
    LineRange { start: usize, end: usize },
    /// The full span of the first match.
    Regex { pattern: Regex },
    /// From the start marker up to (excluding) the end marker.
    Marker { start: String, end: Option<String> },
}

impl ExtractionRule {
    pub fn line_range(start: i64, end: i64) -> Result<Self, String> {
        if start < 1 {
            return Err(format!("line range must start at 1 or later, got {start}"));
        }
        if end < start {
            return Err(format!("line range end {end} is before start {start}"));
        }
        Ok(Self::LineRange {
            start: start as usize,
            end: end as usize,
        })
    }

    /// Compiles `pattern` with `^`/`$` matching at line boundaries and `.` matching newlines.
    pub fn regex(pattern: &str) -> Result<Self, String> {
        RegexBuilder::new(pattern)
            .multi_line(true)
            .dot_matches_new_line(true)
            .build()
            .map(|pattern| Self::Regex { pattern })
            .map_err(|e| format!("invalid extraction regex {pattern:?}: {e}"))
    }

    pub fn marker(start: impl Into<String>, end: Option<String>) -> Result<Self, String> {
        let start = start.into();
        if start.is_empty() {
            return Err("start marker must not be empty".to_string());
        }
        Ok(Self::Marker {
            start,
            end: end.filter(|e| !e.is_empty()),
        })
    }
}

impl fmt::Display for ExtractionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::LineRange { start, end } => write!(f, "lines {start}-{end}"),
            Self::Regex { pattern } => write!(f, "regex {:?}", pattern.as_str()),
            Self::Marker { start, end: Some(end) } => write!(f, "markers {start:?}..{end:?}"),
            Self::Marker { start, end: None } => write!(f, "marker {start:?}.."),
        }
    }
}

/// YAML shapes accepted for `extract`: `all`, `{lines: [a, b]}`,
/// `{regex: ...}` or `{start: ..., end: ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    Keyword(String),
    Mapping(RuleMapping),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleMapping {
    #[serde(default)]
    pub lines: Option<Vec<i64>>,
    #[serde(default)]
    pub regex: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl TryFrom<RuleSpec> for ExtractionRule {
    type Error = String;

    fn try_from(spec: RuleSpec) -> Result<Self, Self::Error> {
        match spec {
            RuleSpec::Keyword(word) if word == "all" => Ok(Self::All),
            RuleSpec::Keyword(word) => Err(format!(
                "unknown extraction rule {word:?}, expected \"all\" or a mapping"
            )),
            RuleSpec::Mapping(mapping) => mapping.try_into(),
        }
    }
}

impl TryFrom<RuleMapping> for ExtractionRule {
    type Error = String;

    fn try_from(mapping: RuleMapping) -> Result<Self, Self::Error> {
        let RuleMapping {
            lines,
            regex,
            start,
            end,
        } = mapping;

        let selectors =
            usize::from(lines.is_some()) + usize::from(regex.is_some()) + usize::from(start.is_some());
        if selectors > 1 {
            return Err("extraction rule must use exactly one of lines, regex or start".to_string());
        }
        if end.is_some() && start.is_none() {
            return Err("end marker given without a start marker".to_string());
        }

        if let Some(lines) = lines {
            return match lines.as_slice() {
                [start, end] => Self::line_range(*start, *end),
                other => Err(format!(
                    "lines must be [start, end], got {} value(s)",
                    other.len()
                )),
            };
        }
        if let Some(pattern) = regex {
            return Self::regex(&pattern);
        }
        match start {
            Some(start) => Self::marker(start, end),
            None => Err("extraction mapping needs lines, regex or start".to_string()),
        }
    }
}

/// Applies `rule` to `document`. An empty result means nothing was extracted.
pub fn extract(document: &str, rule: &ExtractionRule) -> String {
    match rule {
        ExtractionRule::All => document.to_string(),
        ExtractionRule::LineRange { start, end } => extract_lines(document, *start, *end),
        ExtractionRule::Regex { pattern } => match pattern.find(document) {
            Some(found) => found.as_str().to_string(),
            None => {
                warn!(pattern = pattern.as_str(), "Extraction regex matched nothing");
                String::new()
            }
        },
        ExtractionRule::Marker { start, end } => extract_between(document, start, end.as_deref()),
    }
}

fn extract_lines(document: &str, start: usize, end: usize) -> String {
    let lines: Vec<&str> = document.split('\n').collect();
    let from = start.saturating_sub(1).min(lines.len());
    let to = end.min(lines.len()).max(from);
    lines[from..to].join("\n")
}

fn extract_between(document: &str, start: &str, end: Option<&str>) -> String {
    let Some(begin) = document.find(start) else {
        warn!(marker = start, "Start marker not found");
        return String::new();
    };

    let after_start = begin + start.len();
    let finish = match end {
        Some(end) => match document[after_start..].find(end) {
            Some(offset) => after_start + offset,
            None => {
                debug!(marker = end, "End marker not found, taking rest of document");
                document.len()
            }
        },
        None => document.len(),
    };

    document[begin..finish].trim().to_string()
}
