//! Canonical token model shared by property paths and environment variable names.
//!
//! Responsibilities:
//! - Define `Segment` and `CanonicalName`, the structure both conventions parse into.
//! - Classify a raw name as property-path or env-name syntax and dispatch to the parser.
//!
//! Does NOT handle:
//! - Parsing details (see `path.rs` and `env.rs`).
//! - Equality and hashing rules (see `equivalence.rs`).
//!
//! Invariants:
//! - Segment text is stored as written; separator normalization happens only at comparison.
//! - A profile, when present, precedes every segment.
//! - A segment carries at most one index. `a[0][1]` is `a[0]` followed by an empty segment `[1]`.

mod env;
mod equivalence;
mod error;
mod path;

use std::fmt;
use std::str::FromStr;

pub use env::{parse_env_name, to_env_name};
pub use equivalence::{canonical_hash, names_equivalent};
pub use error::NameError;
pub use path::parse_path;

pub(crate) use equivalence::hash_of;

/// Surface syntax a name was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameForm {
    /// Dotted property path, e.g. `%dev.foo."bar.baz"[0]`.
    Path,
    /// Uppercase/underscore environment variable name, e.g. `_DEV_FOO__BAR_BAZ__0_`.
    Env,
}

/// Decide which canonicalizer a name goes through.
///
/// Only a non-empty name made of `A-Z`, `0-9` and `_` is env-name syntax.
/// Anything else, including ambiguous lowercase names such as `foo_bar`, is a path.
pub fn classify_syntax(name: &str) -> NameForm {
    let env_like = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_');
    if env_like {
        NameForm::Env
    } else {
        NameForm::Path
    }
}

/// One step of a canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    text: String,
    quoted: bool,
    index: Option<u32>,
}

impl Segment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
            index: None,
        }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            quoted: true,
            ..Self::new(text)
        }
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the segment was quoted in its source form. Not significant for equality.
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    pub fn index(&self) -> Option<u32> {
        self.index
    }
}

/// Parsed, structure-preserving form of a configuration name.
///
/// Equality follows the name-equivalence rules: separators `.`, `-`, `_` are
/// interchangeable, env-form text is case-insensitive and quoting is ignored.
/// Two path-form names compare case-sensitively, which makes the relation
/// non-transitive across forms, so the type deliberately does not implement `Eq`.
#[derive(Debug, Clone)]
pub struct CanonicalName {
    form: NameForm,
    profile: Option<String>,
    segments: Vec<Segment>,
}

impl CanonicalName {
    pub fn new(form: NameForm, profile: Option<String>, segments: Vec<Segment>) -> Self {
        Self {
            form,
            profile,
            segments,
        }
    }

    /// Canonicalize `name` with the parser its surface syntax selects.
    pub fn parse(name: &str) -> Result<Self, NameError> {
        match classify_syntax(name) {
            NameForm::Path => parse_path(name),
            NameForm::Env => parse_env_name(name),
        }
    }

    pub fn form(&self) -> NameForm {
        self.form
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn is_profile_qualified(&self) -> bool {
        self.profile.is_some()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The same name addressed as the first element of an indexed collection.
    ///
    /// Returns `None` when there is no segment or the last one already has an index.
    pub fn first_element(&self) -> Option<Self> {
        let last = self.segments.last()?;
        if last.index.is_some() {
            return None;
        }
        let mut element = self.clone();
        if let Some(last) = element.segments.last_mut() {
            last.index = Some(0);
        }
        Some(element)
    }
}

impl FromStr for CanonicalName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the name as a property path.
impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(profile) = &self.profile {
            write!(f, "%{profile}")?;
            if !self.segments.is_empty() {
                f.write_str(".")?;
            }
        }
        for (i, segment) in self.segments.iter().enumerate() {
            let continues_index = segment.text.is_empty() && segment.index.is_some() && i > 0;
            if i > 0 && !continues_index {
                f.write_str(".")?;
            }
            if segment.quoted {
                write!(f, "\"{}\"", segment.text)?;
            } else {
                f.write_str(&segment.text)?;
            }
            if let Some(index) = segment.index {
                write!(f, "[{index}]")?;
            }
        }
        Ok(())
    }
}
