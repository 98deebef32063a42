//! Cache (set array) Unit Tests.

use csim_core::cache::Cache;
use csim_core::common::Addr;

use crate::common::harness::shape;

#[test]
fn sized_from_shape() {
    let cache = Cache::new(shape(3, 2, 4));
    assert_eq!(cache.num_sets(), 8);
    for i in 0..cache.num_sets() {
        assert_eq!(cache.set(i).ways(), 2);
        assert_eq!(cache.set(i).occupancy(), 0);
    }
    assert_eq!(cache.occupancy(), 0);
}

#[test]
fn contains_is_read_only() {
    let sh = shape(1, 1, 4);
    let mut cache = Cache::new(sh);
    let d = sh.decode(Addr::new(0x30));
    cache.set_mut(d.set_index).fill(0, d.tag, 1);

    assert!(cache.contains(Addr::new(0x30)));
    assert!(cache.contains(Addr::new(0x3f)));
    assert!(!cache.contains(Addr::new(0x10)));
    assert_eq!(cache.set(d.set_index).line(0).recency, 1);
}

#[test]
fn sets_are_independent() {
    let sh = shape(1, 1, 0);
    let mut cache = Cache::new(sh);
    cache.set_mut(0).fill(0, 5, 1);
    assert_eq!(cache.set(0).occupancy(), 1);
    assert_eq!(cache.set(1).occupancy(), 0);
}

#[test]
#[should_panic]
fn out_of_range_set_panics() {
    let cache = Cache::new(shape(2, 1, 0));
    let _ = cache.set(4);
}
