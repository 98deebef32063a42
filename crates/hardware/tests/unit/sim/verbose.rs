//! Verbose Output Tests.
//!
//! The `-v` output line is `<event> <outcomes>`, matching the cachelab reference.

use csim_core::sim::{AccessOutcome, Replay};
use pretty_assertions::assert_eq;

use crate::common::harness::verbose_lines;

#[test]
fn yi_trace_verbose() {
    let lines = verbose_lines(
        4,
        1,
        4,
        " L 10,1\n M 20,1\n L 22,1\n S 18,1\n L 110,1\n L 210,1\n M 12,1\n",
    );
    assert_eq!(
        lines,
        vec![
            "L 10,1 miss",
            "M 20,1 miss hit",
            "L 22,1 hit",
            "S 18,1 hit",
            "L 110,1 miss eviction",
            "L 210,1 miss eviction",
            "M 12,1 miss eviction hit",
        ]
    );
}

#[test]
fn instruction_lines_are_not_echoed() {
    let lines = verbose_lines(0, 1, 0, "I 400,4\n L 0,1\n");
    assert_eq!(lines, vec!["L 0,1 miss"]);
}

#[test]
fn replay_display() {
    assert_eq!(Replay::Skipped.to_string(), "");
    assert_eq!(Replay::Single(AccessOutcome::Hit).to_string(), "hit");
    assert_eq!(
        Replay::Double(AccessOutcome::MissEviction, AccessOutcome::Hit).to_string(),
        "miss eviction hit"
    );
}
