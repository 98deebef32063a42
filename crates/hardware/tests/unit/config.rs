//! # Configuration Tests
//!
//! Shape validation, defaults and JSON deserialization.

use csim_core::common::ConfigError;
use csim_core::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.verbose);
    assert_eq!(config.cache, CacheConfig::new(4, 1, 4));
}

#[rstest]
#[case::cachelab_small(4, 1, 4)]
#[case::fully_associative(0, 8, 6)]
#[case::one_byte_blocks(5, 2, 0)]
#[case::single_line(0, 1, 0)]
#[case::full_address_width(32, 1, 32)]
fn test_valid_shapes(#[case] s: u32, #[case] e: usize, #[case] b: u32) {
    let shape = CacheConfig::new(s, e, b).validate().unwrap();
    assert_eq!(shape.set_bits(), s);
    assert_eq!(shape.ways(), e);
    assert_eq!(shape.block_bits(), b);
}

#[test]
fn test_zero_ways_rejected() {
    let err = CacheConfig::new(4, 0, 4).validate().unwrap_err();
    assert!(matches!(err, ConfigError::ZeroAssociativity));
}

#[rstest]
#[case(33, 32)]
#[case(0, 65)]
#[case(u32::MAX, 1)]
fn test_address_width_exceeded(#[case] s: u32, #[case] b: u32) {
    let err = CacheConfig::new(s, 1, b).validate().unwrap_err();
    assert!(
        matches!(err, ConfigError::AddressWidthExceeded { set_bits, block_bits } if set_bits == s && block_bits == b)
    );
}

#[test]
fn test_set_bits_beyond_usize_rejected() {
    let err = CacheConfig::new(usize::BITS, 1, 0).validate().unwrap_err();
    assert!(matches!(err, ConfigError::TooManySets { .. }));
}

#[rstest]
#[case::huge_associativity(0, usize::MAX)]
#[case::huge_set_count(62, 1)]
#[case::lines_overflow_bytes(40, 1 << 40)]
fn test_unallocatable_shape_rejected(#[case] s: u32, #[case] e: usize) {
    let err = CacheConfig::new(s, e, 0).validate().unwrap_err();
    assert!(
        matches!(err, ConfigError::StorageOverflow { set_bits, ways } if set_bits == s && ways == e)
    );
}

#[test]
fn test_deserialize_full() {
    let json = r#"{
        "cache": { "set_bits": 8, "ways": 4, "block_bits": 6 },
        "general": { "verbose": true }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(
        config,
        Config {
            cache: CacheConfig::new(8, 4, 6),
            general: GeneralConfig { verbose: true },
        }
    );
}

#[test]
fn test_deserialize_partial_uses_defaults() {
    let config = Config::from_json(r#"{ "cache": { "ways": 2 } }"#).unwrap();
    assert_eq!(config.cache, CacheConfig::new(4, 2, 4));
    assert!(!config.general.verbose);

    let empty = Config::from_json("{}").unwrap();
    assert_eq!(empty, Config::default());
}

#[test]
fn test_deserialize_rejects_negative() {
    let err = Config::from_json(r#"{ "cache": { "ways": -1 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_round_trip_through_json() {
    let config = Config {
        cache: CacheConfig::new(1, 2, 3),
        general: GeneralConfig { verbose: true },
    };
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&text).unwrap(), config);
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "cache": {{ "set_bits": 2, "ways": 2, "block_bits": 2 }} }}"#).unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.cache, CacheConfig::new(2, 2, 2));
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = Config::from_file(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}
