//! Heap-based selection of the smallest values.

use crate::error::{HotspotError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// What to do when fewer than `k` items are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnderflowPolicy {
    /// Return every available item, sorted
    #[default]
    Truncate,
    /// Fail with [`HotspotError::SelectionUnderflow`]
    Fail,
}

struct Ranked<T> {
    value: f64,
    seq: usize,
    payload: T,
}

impl<T> Ranked<T> {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then(self.seq.cmp(&other.seq))
    }
}

impl<T> PartialEq for Ranked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Ranked<T> {}

impl<T> PartialOrd for Ranked<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Ranked<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

/// Select the `k` items with the smallest value, in ascending order.
///
/// Values are ordered with `f64::total_cmp`; equal values keep their input
/// order. A bounded max-heap of `k` entries is maintained, so memory stays
/// at `O(k)` regardless of input length.
///
/// # Errors
///
/// With [`UnderflowPolicy::Fail`], returns `SelectionUnderflow` when the
/// input holds fewer than `k` items.
///
/// # Examples
///
/// ```rust
/// use hotspot::compute::selection::{UnderflowPolicy, top_k_by_value};
///
/// let temps = vec![(21.5, "Pasadena"), (18.0, "Santa Monica"), (25.1, "Burbank")];
/// let coolest = top_k_by_value(temps, 2, UnderflowPolicy::Truncate).unwrap();
/// assert_eq!(coolest, vec![(18.0, "Santa Monica"), (21.5, "Pasadena")]);
/// ```
pub fn top_k_by_value<T, I>(items: I, k: usize, policy: UnderflowPolicy) -> Result<Vec<(f64, T)>>
where
    I: IntoIterator<Item = (f64, T)>,
{
    let mut heap: BinaryHeap<Ranked<T>> = BinaryHeap::new();
    let mut available = 0usize;

    for (seq, (value, payload)) in items.into_iter().enumerate() {
        available += 1;
        if k == 0 {
            continue;
        }

        heap.push(Ranked {
            value,
            seq,
            payload,
        });
        if heap.len() > k {
            heap.pop();
        }
    }

    if available < k && policy == UnderflowPolicy::Fail {
        return Err(HotspotError::SelectionUnderflow {
            requested: k,
            available,
        });
    }

    Ok(heap
        .into_sorted_vec()
        .into_iter()
        .map(|r| (r.value, r.payload))
        .collect())
}
