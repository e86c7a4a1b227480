//! Environment variable name canonicalizer.
//!
//! Responsibilities:
//! - Parse uppercase/underscore names into the same structure as property paths.
//! - Render a property path in environment variable form.
//!
//! Does NOT handle:
//! - Case folding or separator normalization (see `equivalence.rs`).
//!
//! Invariants:
//! - `_` separates segments; `__` after a separator opens a quoted segment.
//! - `_<digits>_` followed by `_` or end of name is an index on the preceding segment.
//! - A leading `_<RUN>_` followed by more content is a profile marker, digits included.
//! - Otherwise a leading `_` before a digit is an escape and carries no meaning.

use super::error::NameError;
use super::path::parse_path;
use super::{CanonicalName, NameForm, Segment};

/// Parse an environment variable name such as `_DEV_FOO__BAR_BAZ__ITEMS_0_`.
pub fn parse_env_name(name: &str) -> Result<CanonicalName, NameError> {
    EnvNameParser { name, pos: 0 }.parse()
}

/// Render a property path as the environment variable name that resolves to it.
///
/// Letters are uppercased and every other non-alphanumeric character, including
/// `%`, quotes and brackets, becomes `_`. Paths whose rendering would parse back
/// to a different property (a bare `%dev`, a leading quoted segment, a digit-only
/// segment before a quote) fail with [`NameError::NoEnvForm`].
pub fn to_env_name(path: &str) -> Result<String, NameError> {
    let parsed = parse_path(path)?;
    let rendered: String = path
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    match parse_env_name(&rendered) {
        Ok(env) if env == parsed => Ok(rendered),
        _ => Err(NameError::NoEnvForm {
            name: path.to_string(),
        }),
    }
}

struct EnvNameParser<'a> {
    name: &'a str,
    pos: usize,
}

impl<'a> EnvNameParser<'a> {
    fn byte(&self, at: usize) -> Option<u8> {
        self.name.as_bytes().get(at).copied()
    }

    fn peek(&self) -> Option<u8> {
        self.byte(self.pos)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.name.len()
    }

    fn error(&self, reason: &'static str) -> NameError {
        NameError::MalformedEnvName {
            name: self.name.to_string(),
            reason,
        }
    }

    fn parse(mut self) -> Result<CanonicalName, NameError> {
        if self.name.is_empty() {
            return Err(self.error("empty name"));
        }
        let profile = self.profile_marker();
        let escaped_digit =
            self.byte(0) == Some(b'_') && self.byte(1).is_some_and(|b| b.is_ascii_digit());
        if profile.is_none() && escaped_digit {
            self.pos = 1;
        }

        let mut segments = Vec::new();
        let mut current = self.plain();
        loop {
            if self.at_end() {
                segments.push(current);
                break;
            }
            if let Some(index) = self.index_marker()? {
                if current.index.is_some() {
                    segments.push(current);
                    current = Segment::new(String::new());
                }
                current.index = Some(index);
                continue;
            }

            // Separator.
            self.pos += 1;
            if self.at_end() {
                // `_` after a closing quote: `TEST_LANGUAGE__DE_ETR__`.
                if current.quoted {
                    segments.push(current);
                    break;
                }
                return Err(self.error("trailing separator with no following segment"));
            }
            segments.push(current);
            current = if self.peek() == Some(b'_') {
                self.quoted()
            } else {
                self.plain()
            };
        }

        Ok(CanonicalName::new(NameForm::Env, profile, segments))
    }

    fn profile_marker(&mut self) -> Option<String> {
        if self.byte(0) != Some(b'_') {
            return None;
        }
        let close = self.name.as_bytes()[1..]
            .iter()
            .position(|&b| b == b'_')
            .map(|offset| offset + 1)?;
        if close == 1 || close + 1 >= self.name.len() {
            return None;
        }
        self.pos = close + 1;
        Some(self.name[1..close].to_string())
    }

    fn plain(&mut self) -> Segment {
        let start = self.pos;
        while self.peek().is_some_and(|b| b != b'_') {
            self.pos += 1;
        }
        Segment::new(&self.name[start..self.pos])
    }

    /// Text after the opening `_`, closed by a `_` that is followed by `_` or the end.
    /// An unclosed quote runs to the end of the name.
    fn quoted(&mut self) -> Segment {
        self.pos += 1;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'_' && matches!(self.byte(self.pos + 1), None | Some(b'_')) {
                let segment = Segment::quoted(&self.name[start..self.pos]);
                self.pos += 1;
                return segment;
            }
            self.pos += 1;
        }
        Segment::quoted(&self.name[start..])
    }

    fn index_marker(&mut self) -> Result<Option<u32>, NameError> {
        let digits_start = self.pos + 1;
        let mut end = digits_start;
        while self.byte(end).is_some_and(|b| b.is_ascii_digit()) {
            end += 1;
        }
        if end == digits_start || self.byte(end) != Some(b'_') {
            return Ok(None);
        }
        if !matches!(self.byte(end + 1), None | Some(b'_')) {
            return Ok(None);
        }
        let index = self.name[digits_start..end]
            .parse()
            .map_err(|_| self.error("index out of range"))?;
        self.pos = end + 1;
        Ok(Some(index))
    }
}
