//! Descriptor file parsing.
//!
//! One color per line: `<name>: <hue>, <lightness>, <chroma>`. Blank lines and
//! `#` comments are skipped. Lines that don't match are collected as errors so
//! the rest of the file still converts.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::ciecam02::{AppearanceCorrelate, CorrelateKind};
use crate::pipeline::NamedCorrelate;

static LINE_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^([A-Za-z0-9-]+)\s*:",
        r"\s*([0-9]+(?:\.[0-9]+)?)\s*,",
        r"\s*([0-9]+(?:\.[0-9]+)?)\s*,",
        r"\s*([0-9]+(?:\.[0-9]+)?)\s*$",
    ))
    .expect("descriptor pattern is valid")
});

/// A malformed descriptor line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid descriptor on line {line}: {text}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

/// One parsed descriptor line.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub name: String,
    pub hue: f64,
    pub lightness: f64,
    /// Third value; its meaning is chosen per run (chroma by default).
    pub chromatic: f64,
}

impl Descriptor {
    pub fn into_named(self, kind: CorrelateKind) -> NamedCorrelate {
        NamedCorrelate::new(
            self.name,
            AppearanceCorrelate {
                hue: self.hue,
                lightness: self.lightness,
                chromatic: kind.with_value(self.chromatic),
            },
        )
    }
}

/// Result of parsing a whole descriptor document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub entries: Vec<Descriptor>,
    pub invalid: Vec<ParseError>,
}

/// Parse one line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line_number: usize, raw: &str) -> Result<Option<Descriptor>, ParseError> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let invalid = || ParseError {
        line: line_number,
        text: line.to_string(),
    };
    let caps = LINE_FORMAT.captures(line).ok_or_else(invalid)?;
    let number = |i: usize| caps[i].parse::<f64>().map_err(|_| invalid());

    Ok(Some(Descriptor {
        name: caps[1].to_string(),
        hue: number(2)?,
        lightness: number(3)?,
        chromatic: number(4)?,
    }))
}

/// Parse a descriptor document, collecting invalid lines instead of failing.
pub fn parse_document(text: &str) -> ParsedDocument {
    let mut doc = ParsedDocument::default();
    for (idx, raw) in text.lines().enumerate() {
        match parse_line(idx + 1, raw) {
            Ok(Some(entry)) => doc.entries.push(entry),
            Ok(None) => {}
            Err(err) => {
                debug!(line = err.line, text = %err.text, "Skipping invalid descriptor line");
                doc.invalid.push(err);
            }
        }
    }
    doc
}
