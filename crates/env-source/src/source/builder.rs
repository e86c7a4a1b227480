//! Builder for `EnvConfigSource`.
//!
//! Responsibilities:
//! - Collect the variables of a snapshot from explicit pairs or the live process environment.
//! - Decide the ordinal: explicit, then `CONFIG_ORDINAL` in the snapshot, then the default.
//!
//! Does NOT handle:
//! - Name resolution (see `mod.rs`).
//!
//! Invariants:
//! - The process environment is read only by `with_process_env`, once, at build time.
//! - Variables whose name or value is not valid Unicode are skipped.
//! - An unparseable `CONFIG_ORDINAL` is ignored with a warning.
//! - The override is read by literal name only, so building never canonicalizes the snapshot.

use super::EnvConfigSource;
use crate::constants::{CONFIG_ORDINAL_ENV, CONFIG_ORDINAL_PROPERTY, DEFAULT_ORDINAL};

/// Builder that captures variables and produces an immutable `EnvConfigSource`.
#[derive(Debug, Default)]
pub struct EnvConfigSourceBuilder {
    vars: Vec<(String, String)>,
    ordinal: Option<i32>,
    from_process: bool,
}

impl EnvConfigSourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add variables in iteration order.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars
            .extend(vars.into_iter().map(|(name, value)| (name.into(), value.into())));
        self
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((name.into(), value.into()));
        self
    }

    /// Add every variable of the current process environment.
    pub fn with_process_env(mut self) -> Self {
        let vars = std::env::vars_os().filter_map(|(name, value)| {
            match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (Ok(name), Err(_)) => {
                    tracing::debug!(
                        env_name = %name,
                        "Skipping environment variable with non-Unicode value"
                    );
                    None
                }
                (Err(_), _) => None,
            }
        });
        self.vars.extend(vars);
        self.from_process = true;
        self
    }

    /// Fix the ordinal, ignoring any `CONFIG_ORDINAL` in the snapshot.
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = Some(ordinal);
        self
    }

    pub fn build(self) -> EnvConfigSource {
        let explicit = self.ordinal;
        let origin = if self.from_process { "process" } else { "explicit" };
        let mut source = EnvConfigSource::from_entries(self.vars, DEFAULT_ORDINAL);
        let ordinal = explicit
            .or_else(|| ordinal_override(&source))
            .unwrap_or(DEFAULT_ORDINAL);
        source.set_ordinal(ordinal);

        tracing::debug!(
            entries = source.len(),
            ordinal,
            origin,
            "Built environment configuration source"
        );
        source
    }
}

fn ordinal_override(source: &EnvConfigSource) -> Option<i32> {
    let (env_name, raw) = [CONFIG_ORDINAL_ENV, CONFIG_ORDINAL_PROPERTY]
        .into_iter()
        .find_map(|name| source.literal_value(name).map(|raw| (name, raw)))?;
    match raw.trim().parse() {
        Ok(ordinal) => Some(ordinal),
        Err(_) => {
            tracing::warn!(env_name, "Ignoring ordinal override that is not an integer");
            None
        }
    }
}
