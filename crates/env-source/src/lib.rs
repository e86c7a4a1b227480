//! Environment variable configuration source.
//!
//! This crate resolves configuration values from a snapshot of environment
//! variables and reconciles property-path names (`%dev.server."host.name".ports[0]`)
//! with environment variable names (`_DEV_SERVER__HOST_NAME__PORTS_0_`), so a
//! property can be looked up in either form.

pub mod constants;
pub mod name;
mod source;

pub use name::{
    CanonicalName, NameError, NameForm, Segment, canonical_hash, classify_syntax,
    names_equivalent, parse_env_name, parse_path, to_env_name,
};
pub use source::{ConfigSource, EnvConfigSource, EnvConfigSourceBuilder};
