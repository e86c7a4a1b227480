//! Lookup and enumeration scenarios for `EnvConfigSource`.
//!
//! Test coverage:
//! - Resolution of env-style names through property paths in every spelling
//! - Enumeration of literal names, including empty values
//! - Indexed collections and profile-qualified names
//! - Ordinal defaults and overrides

use env_source::{ConfigSource, EnvConfigSource, constants::DEFAULT_ORDINAL};

fn source(vars: &[(&str, &str)], ordinal: i32) -> EnvConfigSource {
    EnvConfigSource::with_ordinal(vars.iter().copied(), ordinal)
}

#[test]
fn test_conversion_of_env_variable_names() {
    let env = source(
        &[
            ("SMALLRYE_MP_CONFIG_PROP", "5678"),
            ("smallrye_mp_config_prop_lower", "1234"),
        ],
        DEFAULT_ORDINAL,
    );
    let names: Vec<&str> = env.known_names().collect();

    assert_eq!(env.value_of("SMALLRYE_MP_CONFIG_PROP"), Some("5678"));
    assert!(names.contains(&"SMALLRYE_MP_CONFIG_PROP"));

    for spelling in [
        "smallrye_mp_config_prop",
        "smallrye.mp.config.prop",
        "SMALLRYE.MP.CONFIG.PROP",
        "smallrye-mp-config-prop",
        "SMALLRYE-MP-CONFIG-PROP",
        "smallrye/mp/config/prop",
    ] {
        assert_eq!(env.value_of(spelling), Some("5678"), "lookup of {spelling}");
        assert!(!names.contains(&spelling), "{spelling} must not be enumerated");
    }

    assert_eq!(env.value_of("smallrye_mp_config_prop_lower"), Some("1234"));
    assert_eq!(env.value_of("SMALLRYE_MP_CONFIG_PROP_LOWER"), Some("1234"));
    assert!(names.contains(&"smallrye_mp_config_prop_lower"));
}

#[test]
fn test_profile_env_variables() {
    let env = source(
        &[
            ("SMALLRYE_MP_CONFIG_PROP", "1234"),
            ("_ENV_SMALLRYE_MP_CONFIG_PROP", "5678"),
        ],
        DEFAULT_ORDINAL,
    );
    assert_eq!(env.value_of("smallrye.mp.config.prop"), Some("1234"));
    assert_eq!(env.value_of("%env.smallrye.mp.config.prop"), Some("5678"));
    assert_eq!(env.value_of("%dev.smallrye.mp.config.prop"), None);
}

#[test]
fn test_empty_value_is_present() {
    let env = source(&[("SMALLRYE_MP_CONFIG_EMPTY", "")], DEFAULT_ORDINAL);
    assert!(env.known_names().any(|name| name == "SMALLRYE_MP_CONFIG_EMPTY"));
    assert_eq!(env.value_of("SMALLRYE_MP_CONFIG_EMPTY"), Some(""));
    assert_eq!(env.value_of("smallrye.mp.config.empty"), Some(""));
    assert!(env.contains("smallrye.mp.config.empty"));
    assert!(!env.contains("smallrye.mp.config.missing"));
}

#[test]
fn test_ordinal() {
    let env = source(&[], DEFAULT_ORDINAL);
    assert_eq!(env.priority(), 301);
    assert_eq!(env.source_identifier(), "EnvConfigSource");
    assert!(env.is_empty());

    let custom = source(&[("FOO", "bar")], 300);
    assert_eq!(custom.priority(), 300);
}

#[test]
fn test_indexed() {
    let env = source(
        &[
            ("INDEXED_0_", "foo"),
            ("INDEXED_0__PROP", "bar"),
            ("INDEXED_0__PROPS_0_", "0"),
            ("INDEXED_0__PROPS_1_", "1"),
        ],
        300,
    );
    assert_eq!(env.value_of("indexed"), Some("foo"));
    assert_eq!(env.value_of("indexed[0]"), Some("foo"));
    assert_eq!(env.value_of("indexed[0].prop"), Some("bar"));
    assert_eq!(env.value_of("indexed[0].props"), Some("0"));
    assert_eq!(env.value_of("indexed[0].props[0]"), Some("0"));
    assert_eq!(env.value_of("indexed[0].props[1]"), Some("1"));
    assert_eq!(env.value_of("indexed[0].props[2]"), None);
    assert_eq!(env.value_of("indexed[1]"), None);
    assert_eq!(env.known_names().count(), 4);
}

#[test]
fn test_numbers() {
    let env = source(&[("999_MY_VALUE", "foo"), ("_999_MY_VALUE", "bar")], 300);
    assert_eq!(env.value_of("999.my.value"), Some("foo"));
    assert_eq!(env.value_of("999_MY_VALUE"), Some("foo"));
    assert_eq!(env.value_of("_999_MY_VALUE"), Some("bar"));
    assert_eq!(env.value_of("%999.my.value"), Some("bar"));

    let reversed = source(&[("_999_MY_VALUE", "bar"), ("999_MY_VALUE", "foo")], 300);
    assert_eq!(reversed.value_of("999.my.value"), Some("foo"));
    assert_eq!(reversed.value_of("%999.my.value"), Some("bar"));
}

#[test]
fn test_map_keys_with_quoted_segments() {
    let env = source(
        &[
            ("TEST_LANGUAGE__DE_ETR__", "Einfache Sprache"),
            ("TEST_LANGUAGE_PT_BR", "FROM ENV"),
        ],
        300,
    );
    assert_eq!(
        env.value_of("test.language.\"de.etr\""),
        Some("Einfache Sprache")
    );
    assert_eq!(env.value_of("test.language.pt-br"), Some("FROM ENV"));
    assert_eq!(env.value_of("test.language.\"pt-br\""), Some("FROM ENV"));
}

#[test]
fn test_first_equivalent_name_wins() {
    let env = source(&[("FOO_BAR", "first"), ("FOO__BAR_", "second")], 300);
    assert_eq!(env.value_of("foo.bar"), Some("first"));
    assert_eq!(env.value_of("foo.\"bar\""), Some("first"));
    assert_eq!(env.value_of("FOO__BAR_"), Some("second"));
}

#[test]
fn test_malformed_names_never_fail_lookups() {
    let env = source(&[("BROKEN_", "x"), ("_", "y"), ("VALID", "z")], 300);
    assert_eq!(env.value_of("valid"), Some("z"));
    assert_eq!(env.value_of("valid[0"), None);
    assert_eq!(env.value_of("BROKEN_"), Some("x"));
    assert_eq!(env.value_of("_"), Some("y"));
    assert_eq!(env.known_names().collect::<Vec<_>>(), vec!["BROKEN_", "_", "VALID"]);
}

#[test]
fn test_concurrent_readers() {
    let env = source(
        &[("SERVER_HOSTS_0_", "a"), ("SERVER_HOSTS_1_", "b")],
        DEFAULT_ORDINAL,
    );
    std::thread::scope(|scope| {
        for i in 0..8 {
            let env = &env;
            scope.spawn(move || {
                let expected = if i % 2 == 0 { "a" } else { "b" };
                let path = format!("server.hosts[{}]", i % 2);
                assert_eq!(env.value_of(&path), Some(expected));
            });
        }
    });
}

#[test]
fn test_sources_behind_trait_objects() {
    let low = source(&[("APP_NAME", "low")], 100);
    let high = source(&[("APP_NAME", "high")], 400);
    let mut sources: Vec<&dyn ConfigSource> = vec![&low, &high];
    sources.sort_by_key(|source| std::cmp::Reverse(source.priority()));

    let resolved = sources.iter().find_map(|source| source.value_of("app.name"));
    assert_eq!(resolved, Some("high"));
}
