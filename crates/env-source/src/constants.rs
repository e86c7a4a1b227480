//! Centralized constants for the environment configuration source.

/// Default ordinal of the environment source. Higher ordinals win on conflicting keys.
pub const DEFAULT_ORDINAL: i32 = 301;

/// Display name reported by `ConfigSource::source_identifier`.
pub const SOURCE_NAME: &str = "EnvConfigSource";

/// Variable that, when present in a captured environment, overrides the default ordinal.
pub const CONFIG_ORDINAL_ENV: &str = "CONFIG_ORDINAL";

/// Property spelling of the ordinal override, also accepted as a literal variable name.
///
/// The override is matched literally, never through name equivalence.
pub const CONFIG_ORDINAL_PROPERTY: &str = "config_ordinal";
