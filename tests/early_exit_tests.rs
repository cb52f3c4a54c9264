//! Release accounting for lazy adapters.
//!
//! Every source handed to an adapter is wrapped in a [`Tracked`] iterator
//! that counts its own drop. Whether the consumer drains the adapter, stops
//! after one element, or the adapter stops early on its own, every source
//! must be released exactly once.

use std::cell::Cell;
use std::rc::Rc;

use iterset::prelude::*;
use rstest::rstest;

// =============================================================================
// Harness
// =============================================================================

#[derive(Default)]
struct Ledger {
    created: Cell<usize>,
    released: Cell<usize>,
}

impl Ledger {
    fn track<T: Clone>(self: &Rc<Self>, values: &[T]) -> Tracked<T> {
        self.created.set(self.created.get() + 1);
        Tracked {
            values: values.to_vec().into_iter(),
            ledger: Rc::clone(self),
        }
    }

    fn outstanding(&self) -> usize {
        self.created.get() - self.released.get()
    }
}

struct Tracked<T> {
    values: std::vec::IntoIter<T>,
    ledger: Rc<Ledger>,
}

impl<T> Iterator for Tracked<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.values.next()
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.ledger.released.set(self.ledger.released.get() + 1);
    }
}

const LEFT: [i32; 6] = [1, 2, 3, 4, 5, 6];
const RIGHT: [i32; 6] = [6, 5, 4, 3, 2, 1];

// =============================================================================
// Early Break
// =============================================================================

#[rstest]
fn test_break_after_first_element_releases_everything() {
    let ledger = Rc::new(Ledger::default());
    {
        let mut adapters: Vec<Box<dyn Iterator<Item = i32>>> = vec![
            Box::new(intersect(ledger.track(&LEFT), ledger.track(&RIGHT))),
            Box::new(difference(ledger.track(&LEFT), ledger.track(&[9]))),
            Box::new(sorted_union(ledger.track(&LEFT), ledger.track(&LEFT))),
            Box::new(sorted_intersect(ledger.track(&LEFT), ledger.track(&LEFT))),
            Box::new(sorted_difference(ledger.track(&LEFT), ledger.track(&[2]))),
            Box::new(unique(ledger.track(&LEFT))),
            Box::new(compact(ledger.track(&LEFT)).map(|(item, _)| item)),
            Box::new(intersect_all(LEFT.to_vec(), [LEFT.to_vec(), RIGHT.to_vec()])),
        ];
        for adapter in &mut adapters {
            assert!(adapter.next().is_some());
        }
    }
    assert_eq!(ledger.created.get(), 12);
    assert_eq!(ledger.outstanding(), 0);
}

#[rstest]
fn test_break_inside_for_loop() {
    let ledger = Rc::new(Ledger::default());
    for item in sorted_union(ledger.track(&LEFT), ledger.track(&RIGHT)) {
        if item == 2 {
            break;
        }
    }
    assert_eq!(ledger.outstanding(), 0);
}

// =============================================================================
// Release on Completion
// =============================================================================

#[rstest]
fn test_intersect_releases_sources_when_finished() {
    let ledger = Rc::new(Ledger::default());
    let mut common = intersect(ledger.track(&[1, 2]), ledger.track(&LEFT));
    while common.next().is_some() {}
    assert_eq!(ledger.outstanding(), 0);
    drop(common);
    assert_eq!(ledger.outstanding(), 0);
}

#[rstest]
fn test_difference_releases_seq_once_keys_run_out() {
    let ledger = Rc::new(Ledger::default());
    let mut rest = difference(vec![1, 2], ledger.track(&LEFT));
    assert_eq!(ledger.outstanding(), 1);
    assert_eq!(rest.next(), None);
    assert_eq!(ledger.outstanding(), 0);
}

#[rstest]
#[case::union(0)]
#[case::intersect(1)]
#[case::difference(2)]
fn test_sorted_merges_release_both_cursors(#[case] which: usize) {
    let ledger = Rc::new(Ledger::default());
    let left = ledger.track(&[1, 2, 3]);
    let right = ledger.track(&[2]);
    let mut merged: Box<dyn Iterator<Item = i32>> = match which {
        0 => Box::new(sorted_union(left, right)),
        1 => Box::new(sorted_intersect(left, right)),
        _ => Box::new(sorted_difference(left, right)),
    };
    while merged.next().is_some() {}
    assert_eq!(ledger.outstanding(), 0);
}

#[rstest]
fn test_sorted_intersect_stops_before_draining_driver() {
    let ledger = Rc::new(Ledger::default());
    let mut common = sorted_intersect(ledger.track(&LEFT), ledger.track(&[1]));
    assert_eq!(common.next(), Some(1));
    assert_eq!(common.next(), None);
    assert_eq!(ledger.outstanding(), 0);
}

#[rstest]
fn test_compact_releases_source_at_end() {
    let ledger = Rc::new(Ledger::default());
    let mut runs = compact(ledger.track(&[1, 1]));
    assert_eq!(runs.next(), Some((1, 2)));
    assert_eq!(ledger.outstanding(), 0);
}

// =============================================================================
// Predicates
// =============================================================================

#[rstest]
fn test_predicates_release_sources_on_early_answer() {
    let ledger = Rc::new(Ledger::default());
    assert!(!equal(ledger.track(&[1]), ledger.track(&LEFT)));
    assert!(!equal_counts(ledger.track(&[1, 1]), ledger.track(&[1])));
    assert!(!is_subset(ledger.track(&[7]), ledger.track(&LEFT)));
    assert!(!is_disjoint(ledger.track(&LEFT), ledger.track(&RIGHT)));
    assert_eq!(ledger.created.get(), 8);
    assert_eq!(ledger.outstanding(), 0);
}
