//! SimStats unit tests.
//!
//! Verifies counter bookkeeping, derived metrics and the two cachelab output
//! formats (summary line and results file).

use csim_core::sim::AccessOutcome;
use csim_core::stats::SimStats;
use pretty_assertions::assert_eq;

#[test]
fn default_stats_all_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.evictions, 0);
    assert_eq!(stats.accesses(), 0);
    assert!(stats.hit_rate().abs() < f64::EPSILON);
}

#[test]
fn record_counts_eviction_as_miss() {
    let mut stats = SimStats::default();
    stats.record(AccessOutcome::Hit);
    stats.record(AccessOutcome::Miss);
    stats.record(AccessOutcome::MissEviction);
    stats.record(AccessOutcome::MissEviction);
    assert_eq!(
        stats,
        SimStats {
            hits: 1,
            misses: 3,
            evictions: 2
        }
    );
    assert_eq!(stats.accesses(), 4);
    assert!((stats.hit_rate() - 0.25).abs() < 1e-12);
}

#[test]
fn summary_line_format() {
    let stats = SimStats {
        hits: 4,
        misses: 5,
        evictions: 3,
    };
    assert_eq!(stats.summary_line(), "hits:4 misses:5 evictions:3");
}

#[test]
fn summary_written_as_one_line() {
    let stats = SimStats {
        hits: 1,
        misses: 3,
        evictions: 2,
    };
    let mut out = Vec::new();
    stats.write_summary(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "hits:1 misses:3 evictions:2\n");
}

#[test]
fn results_file_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".csim_results");
    let stats = SimStats {
        hits: 9,
        misses: 8,
        evictions: 6,
    };
    stats.write_results(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "9 8 6\n");
}

#[test]
fn serializes_as_flat_json() {
    let stats = SimStats {
        hits: 1,
        misses: 2,
        evictions: 0,
    };
    assert_eq!(
        serde_json::to_string(&stats).unwrap(),
        r#"{"hits":1,"misses":2,"evictions":0}"#
    );
}
