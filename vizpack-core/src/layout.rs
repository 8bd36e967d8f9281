//! Row packing of intervals into non-overlapping display rows
//!
//! Intervals are placed greedily in start order: each one goes into the first
//! row whose last interval ends at or before its start, or opens a new row.
//! The result is deterministic for a given input order but not guaranteed to
//! use the minimum possible number of rows.

use crate::types::{GenomicPos, Interval};
use serde::Serialize;

/// An interval annotated with the display row it was packed into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placed<T> {
    #[serde(flatten)]
    pub item: T,
    pub row: usize,
}

impl<T: Interval> Interval for Placed<T> {
    fn start(&self) -> GenomicPos {
        self.item.start()
    }

    fn end(&self) -> GenomicPos {
        self.item.end()
    }
}

/// Assign a row to every interval. The output keeps the input order.
///
/// Intervals must satisfy `start <= end`; the record constructors enforce it.
pub fn pack<T: Interval>(intervals: Vec<T>) -> Vec<Placed<T>> {
    let rows = assign_rows(&intervals);
    intervals
        .into_iter()
        .zip(rows)
        .map(|(item, row)| Placed { item, row })
        .collect()
}

fn assign_rows<T: Interval>(intervals: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    // stable: equal starts keep their input order
    order.sort_by_key(|&i| intervals[i].start());

    let mut row_ends: Vec<GenomicPos> = Vec::new();
    let mut rows = vec![0; intervals.len()];

    for i in order {
        let interval = &intervals[i];
        debug_assert!(interval.start() <= interval.end());
        let row = match row_ends.iter().position(|&end| end <= interval.start()) {
            Some(row) => row,
            None => {
                row_ends.push(interval.end());
                row_ends.len() - 1
            }
        };
        row_ends[row] = interval.end();
        rows[i] = row;
    }

    rows
}
