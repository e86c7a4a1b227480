//! Name equivalence and hashing.
//!
//! Responsibilities:
//! - Compare canonical names across the property-path and env-name conventions.
//! - Produce a hash consistent with that comparison.
//!
//! Does NOT handle:
//! - Parsing (see `path.rs` and `env.rs`).
//!
//! Invariants:
//! - Each segment contributes its text split on ASCII punctuation (`.`, `-`, `_`, `/`, ...)
//!   into words, then its index. Segment boundaries and in-text separators are therefore
//!   interchangeable. Whitespace and non-ASCII characters are never separators.
//! - The `quoted` flag is never compared.
//! - Words compare case-insensitively unless both names are path-form.
//! - Names that compare equal always hash equal. The hash folds case, so it may
//!   collide for path-form names that differ only in case.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::{CanonicalName, NameForm};

const LITERAL_TAG: u8 = 0;
const PROFILE_TAG: u8 = 1;
const WORD_TAG: u8 = 2;
const INDEX_TAG: u8 = 3;

/// Characters that map to `_` in an environment variable name.
fn is_separator(c: char) -> bool {
    c.is_ascii_punctuation()
}

#[derive(Debug, Clone, Copy)]
enum Atom<'a> {
    Word(&'a str),
    Index(u32),
}

fn words(text: &str) -> impl Iterator<Item = Atom<'_>> {
    text.split(is_separator).map(Atom::Word)
}

impl CanonicalName {
    fn atoms(&self) -> impl Iterator<Item = Atom<'_>> {
        self.segments()
            .iter()
            .flat_map(|segment| words(segment.text()).chain(segment.index().map(Atom::Index)))
    }
}

fn atoms_equal<'a>(
    left: impl Iterator<Item = Atom<'a>>,
    right: impl Iterator<Item = Atom<'a>>,
    case_sensitive: bool,
) -> bool {
    let mut left = left;
    let mut right = right;
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(Atom::Word(l)), Some(Atom::Word(r))) => {
                let same = if case_sensitive {
                    l == r
                } else {
                    l.eq_ignore_ascii_case(r)
                };
                if !same {
                    return false;
                }
            }
            (Some(Atom::Index(l)), Some(Atom::Index(r))) if l == r => {}
            _ => return false,
        }
    }
}

impl PartialEq for CanonicalName {
    fn eq(&self, other: &Self) -> bool {
        let case_sensitive = self.form() == NameForm::Path && other.form() == NameForm::Path;
        let profiles_match = match (self.profile(), other.profile()) {
            (None, None) => true,
            (Some(a), Some(b)) => atoms_equal(words(a), words(b), case_sensitive),
            _ => false,
        };
        profiles_match && atoms_equal(self.atoms(), other.atoms(), case_sensitive)
    }
}

fn hash_word<H: Hasher>(tag: u8, word: &str, state: &mut H) {
    state.write_u8(tag);
    for b in word.bytes() {
        state.write_u8(b.to_ascii_lowercase());
    }
    state.write_usize(word.len());
}

impl Hash for CanonicalName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(profile) = self.profile() {
            for word in profile.split(is_separator) {
                hash_word(PROFILE_TAG, word, state);
            }
        }
        for atom in self.atoms() {
            match atom {
                Atom::Word(word) => hash_word(WORD_TAG, word, state),
                Atom::Index(index) => {
                    state.write_u8(INDEX_TAG);
                    state.write_u32(index);
                }
            }
        }
    }
}

/// Stable hash of an already canonicalized name.
pub(crate) fn hash_of(name: &CanonicalName) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}

/// Whether two names, in either convention, denote the same property.
///
/// Identical strings are always equivalent. Otherwise both names are
/// canonicalized and a name that fails to canonicalize matches nothing.
pub fn names_equivalent(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (CanonicalName::parse(a), CanonicalName::parse(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Hash consistent with [`names_equivalent`].
///
/// Names that cannot be canonicalized hash their literal text, since they are
/// only ever equivalent to themselves.
pub fn canonical_hash(name: &str) -> u64 {
    match CanonicalName::parse(name) {
        Ok(canonical) => hash_of(&canonical),
        Err(_) => {
            let mut hasher = DefaultHasher::new();
            hasher.write_u8(LITERAL_TAG);
            name.hash(&mut hasher);
            hasher.finish()
        }
    }
}
