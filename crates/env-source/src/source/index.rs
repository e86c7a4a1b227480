//! Lazily built lookup index over the snapshot names.
//!
//! Responsibilities:
//! - Canonicalize every stored name once and bucket positions by canonical hash.
//!
//! Invariants:
//! - Bucket positions are in snapshot insertion order.
//! - Stored names that fail to canonicalize are left out; they remain reachable
//!   through the literal fast path only.

use std::collections::HashMap;

use crate::name::{CanonicalName, hash_of};

pub(super) struct LookupIndex {
    names: Vec<Option<CanonicalName>>,
    buckets: HashMap<u64, Vec<usize>>,
}

impl LookupIndex {
    pub(super) fn build<'a>(keys: impl Iterator<Item = &'a str>) -> Self {
        let mut names = Vec::new();
        let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
        for (position, key) in keys.enumerate() {
            match CanonicalName::parse(key) {
                Ok(name) => {
                    buckets.entry(hash_of(&name)).or_default().push(position);
                    names.push(Some(name));
                }
                Err(error) => {
                    tracing::trace!(
                        env_name = key,
                        %error,
                        "Skipping environment name that cannot be canonicalized"
                    );
                    names.push(None);
                }
            }
        }
        Self { names, buckets }
    }

    /// Position of the first stored name equivalent to `query`.
    pub(super) fn find(&self, query: &CanonicalName) -> Option<usize> {
        self.buckets
            .get(&hash_of(query))?
            .iter()
            .copied()
            .find(|&position| {
                self.names
                    .get(position)
                    .and_then(Option::as_ref)
                    .is_some_and(|name| name == query)
            })
    }
}
