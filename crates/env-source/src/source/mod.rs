//! Environment-backed configuration source.
//!
//! Responsibilities:
//! - Hold an immutable, insertion-ordered snapshot of environment variables.
//! - Resolve lookups by literal name or by any equivalent property path.
//! - Enumerate the literal names present in the snapshot.
//!
//! Does NOT handle:
//! - Ordering sources against each other, interpolation, or type conversion.
//! - Mutating the process environment.
//!
//! Invariants:
//! - A literal match is always tried before canonical comparison.
//! - Among equivalent stored names, the one captured first wins.
//! - Lookups never fail: malformed queries and malformed stored names are absent.
//! - Values are never logged or printed by `Debug`.

mod builder;
mod index;

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

pub use builder::EnvConfigSourceBuilder;

use crate::constants::SOURCE_NAME;
use crate::name::CanonicalName;
use index::LookupIndex;

/// A source of configuration values, as consumed by an aggregator.
pub trait ConfigSource {
    /// Value of `name`, or `None` when the source does not define it.
    fn value_of(&self, name: &str) -> Option<&str>;

    /// Names the source defines, in the form they were captured.
    fn known_names(&self) -> Vec<&str>;

    /// Ordinal of the source. Higher wins on conflicting keys.
    fn priority(&self) -> i32;

    /// Fixed display name for diagnostics and ordering ties.
    fn source_identifier(&self) -> &str;
}

/// Configuration source over a snapshot of environment variables.
pub struct EnvConfigSource {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
    ordinal: i32,
    index: OnceLock<LookupIndex>,
}

impl EnvConfigSource {
    pub fn builder() -> EnvConfigSourceBuilder {
        EnvConfigSourceBuilder::new()
    }

    /// Snapshot of the live process environment with the default or
    /// `CONFIG_ORDINAL`-provided ordinal.
    pub fn from_process_env() -> Self {
        Self::builder().with_process_env().build()
    }

    /// Source over an explicit mapping with a fixed ordinal.
    pub fn with_ordinal<I, K, V>(vars: I, ordinal: i32) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::builder().with_vars(vars).with_ordinal(ordinal).build()
    }

    /// Later duplicates overwrite the value but keep the first position.
    pub(crate) fn from_entries(vars: Vec<(String, String)>, ordinal: i32) -> Self {
        let mut entries: Vec<(String, String)> = Vec::with_capacity(vars.len());
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(vars.len());
        for (name, value) in vars {
            match positions.get(&name).copied() {
                Some(position) => entries[position].1 = value,
                None => {
                    positions.insert(name.clone(), entries.len());
                    entries.push((name, value));
                }
            }
        }
        Self {
            entries,
            positions,
            ordinal,
            index: OnceLock::new(),
        }
    }

    pub(crate) fn set_ordinal(&mut self, ordinal: i32) {
        self.ordinal = ordinal;
    }

    /// Value stored under exactly `name`, without canonicalizing anything.
    pub(crate) fn literal_value(&self, name: &str) -> Option<&str> {
        let position = *self.positions.get(name)?;
        self.entries.get(position).map(|(_, value)| value.as_str())
    }

    fn index(&self) -> &LookupIndex {
        self.index.get_or_init(|| LookupIndex::build(self.known_names()))
    }

    fn find(&self, query: &CanonicalName) -> Option<&str> {
        let position = self.index().find(query)?;
        self.entries.get(position).map(|(_, value)| value.as_str())
    }

    /// Resolve `name` given as a literal variable name or any equivalent path.
    ///
    /// A name without a trailing index that matches nothing also resolves to the
    /// first element of the collection it names, so `indexed` finds `INDEXED_0_`.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.literal_value(name) {
            return Some(value);
        }
        let query = CanonicalName::parse(name).ok()?;
        self.find(&query).or_else(|| {
            let element = query.first_element()?;
            tracing::trace!(
                query = name,
                element = %element,
                "Resolving name as first collection element"
            );
            self.find(&element)
        })
    }

    /// Whether `name` resolves, distinguishing an empty value from an absent one.
    pub fn contains(&self, name: &str) -> bool {
        self.value_of(name).is_some()
    }

    /// Literal names in capture order, including those holding an empty value.
    pub fn known_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn priority(&self) -> i32 {
        self.ordinal
    }

    pub fn source_identifier(&self) -> &str {
        SOURCE_NAME
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigSource for EnvConfigSource {
    fn value_of(&self, name: &str) -> Option<&str> {
        EnvConfigSource::value_of(self, name)
    }

    fn known_names(&self) -> Vec<&str> {
        EnvConfigSource::known_names(self).collect()
    }

    fn priority(&self) -> i32 {
        EnvConfigSource::priority(self)
    }

    fn source_identifier(&self) -> &str {
        EnvConfigSource::source_identifier(self)
    }
}

impl fmt::Debug for EnvConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfigSource")
            .field("ordinal", &self.ordinal)
            .field("names", &self.known_names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
