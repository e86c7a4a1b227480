//! Property-path canonicalizer.
//!
//! Responsibilities:
//! - Parse dotted paths with `"quoted"` segments, `[n]` indices and a `%profile` prefix.
//!
//! Does NOT handle:
//! - Separator or case normalization (see `equivalence.rs`).
//!
//! Invariants:
//! - Quoting and segmentation are decided on the raw text, before any normalization.
//! - Failure is all-or-nothing: no partial name is returned.

use super::error::NameError;
use super::{CanonicalName, NameForm, Segment};

/// Parse a property path such as `%dev.server."host.name".ports[0]`.
pub fn parse_path(path: &str) -> Result<CanonicalName, NameError> {
    let mut parser = PathParser { path, pos: 0 };
    let profile = parser.profile()?;
    let segments = if parser.at_end() && (profile.is_some() || path.is_empty()) {
        Vec::new()
    } else {
        parser.segments()?
    };
    Ok(CanonicalName::new(NameForm::Path, profile, segments))
}

struct PathParser<'a> {
    path: &'a str,
    pos: usize,
}

impl<'a> PathParser<'a> {
    fn peek(&self) -> Option<u8> {
        self.path.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.path.len()
    }

    fn find_from(&self, start: usize, needle: u8) -> Option<usize> {
        self.path.as_bytes()[start..]
            .iter()
            .position(|&b| b == needle)
            .map(|offset| start + offset)
    }

    fn error(&self, reason: &'static str) -> NameError {
        NameError::MalformedPath {
            name: self.path.to_string(),
            position: self.pos,
            reason,
        }
    }

    /// `%name` up to the first unquoted `.`, which is consumed.
    fn profile(&mut self) -> Result<Option<String>, NameError> {
        if self.peek() != Some(b'%') {
            return Ok(None);
        }
        self.pos = 1;
        let start = self.pos;
        let mut in_quotes = false;
        while let Some(b) = self.peek() {
            match b {
                b'"' => in_quotes = !in_quotes,
                b'.' if !in_quotes => break,
                _ => {}
            }
            self.pos += 1;
        }
        if in_quotes {
            return Err(self.error("unterminated quote in profile"));
        }
        let profile = self.path[start..self.pos].to_string();
        if self.peek() == Some(b'.') {
            self.pos += 1;
        }
        Ok(Some(profile))
    }

    fn segments(&mut self) -> Result<Vec<Segment>, NameError> {
        let mut segments = Vec::new();
        loop {
            let mut segment = if self.peek() == Some(b'"') {
                self.quoted()?
            } else {
                self.plain()?
            };
            while self.peek() == Some(b'[') {
                let index = self.index()?;
                if segment.index.is_some() {
                    segments.push(segment);
                    segment = Segment::new(String::new());
                }
                segment.index = Some(index);
            }
            segments.push(segment);

            match self.peek() {
                None => return Ok(segments),
                Some(b'.') => self.pos += 1,
                Some(_) => return Err(self.error("expected '.' after quoted segment or index")),
            }
        }
    }

    fn plain(&mut self) -> Result<Segment, NameError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            match b {
                b'.' | b'[' => break,
                b'"' => return Err(self.error("quote inside an unquoted segment")),
                _ => self.pos += 1,
            }
        }
        Ok(Segment::new(&self.path[start..self.pos]))
    }

    fn quoted(&mut self) -> Result<Segment, NameError> {
        let start = self.pos + 1;
        let end = self
            .find_from(start, b'"')
            .ok_or_else(|| self.error("unterminated quote"))?;
        self.pos = end + 1;
        Ok(Segment::quoted(&self.path[start..end]))
    }

    fn index(&mut self) -> Result<u32, NameError> {
        let start = self.pos + 1;
        let end = self
            .find_from(start, b']')
            .ok_or_else(|| self.error("unterminated '['"))?;
        let digits = &self.path[start..end];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.error("index must be a non-negative integer"));
        }
        let index = digits
            .parse()
            .map_err(|_| self.error("index out of range"))?;
        self.pos = end + 1;
        Ok(index)
    }
}
