//! Content needles: literal substrings or delimited regular expressions

use fskit_core::{Error, Result, REGEX_MARKER};
use regex::bytes::{Regex, RegexBuilder};
use std::fmt;

/// Search term matched against file contents
#[derive(Debug, Clone)]
pub enum Needle {
    /// Case-sensitive substring
    Literal(String),
    /// `/pattern/flags` expression
    Regex { source: String, regex: Regex },
}

impl Needle {
    /// Parse a needle; a leading `/` makes it a delimited regex
    pub fn parse(needle: &str) -> Result<Self> {
        let Some(rest) = needle.strip_prefix(REGEX_MARKER) else {
            return Ok(Needle::Literal(needle.to_string()));
        };

        let end = closing_delimiter(rest)
            .ok_or_else(|| Error::needle(format!("no ending delimiter in {}", needle)))?;
        let (pattern, flags) = (&rest[..end], &rest[end + 1..]);
        let pattern = pattern.replace(r"\/", "/");

        let pattern = if flags.contains('A') {
            format!(r"\A(?:{})", pattern)
        } else {
            pattern
        };

        let mut builder = RegexBuilder::new(&pattern);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'x' => {
                    builder.ignore_whitespace(true);
                }
                'U' => {
                    builder.swap_greed(true);
                }
                'u' => {
                    builder.unicode(true);
                }
                'A' => {}
                other => return Err(Error::needle(format!("unknown flag '{}' in {}", other, needle))),
            }
        }

        let regex = builder
            .build()
            .map_err(|e| Error::needle(format!("{}: {}", needle, e)))?;

        Ok(Needle::Regex {
            source: needle.to_string(),
            regex,
        })
    }

    /// The needle as written by the caller
    pub fn as_str(&self) -> &str {
        match self {
            Needle::Literal(s) => s,
            Needle::Regex { source, .. } => source,
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Needle::Regex { .. })
    }

    /// Check file contents against the needle
    pub fn is_match(&self, contents: &[u8]) -> bool {
        match self {
            Needle::Literal(s) => {
                let needle = s.as_bytes();
                needle.is_empty() || contents.windows(needle.len()).any(|w| w == needle)
            }
            Needle::Regex { regex, .. } => regex.is_match(contents),
        }
    }
}

/// Byte offset of the first `/` not preceded by a backslash escape
fn closing_delimiter(rest: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == REGEX_MARKER {
            return Some(i);
        }
    }
    None
}

impl fmt::Display for Needle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
