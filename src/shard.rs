//! Deterministic workload sharding for distributed runs.
//!
//! Shard membership is a pure function of position in the ordered,
//! deduplicated URL sequence: item `i` belongs to shard `i % total`. Given
//! the same input, the union of all shards covers every URL exactly once,
//! so independent workers (separate processes or machines) need no
//! coordination and their result files merge by simple concatenation.

use thiserror::Error;

/// Shard parameters were out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShardError {
    /// `total` must be at least one.
    #[error("shard total must be at least 1, got {total}")]
    ZeroTotal {
        /// The invalid total that was provided.
        total: usize,
    },

    /// `index` must be strictly less than `total`.
    #[error("shard index {index} out of range for {total} shards")]
    IndexOutOfRange {
        /// The invalid index that was provided.
        index: usize,
        /// The shard count it was checked against.
        total: usize,
    },
}

/// A validated (index, total) shard assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardSpec {
    index: usize,
    total: usize,
}

impl ShardSpec {
    /// Validates `0 <= index < total` and `total >= 1`.
    ///
    /// # Errors
    ///
    /// Returns [`ShardError`] when the pair is out of range.
    pub fn new(index: usize, total: usize) -> Result<Self, ShardError> {
        if total == 0 {
            return Err(ShardError::ZeroTotal { total });
        }
        if index >= total {
            return Err(ShardError::IndexOutOfRange { index, total });
        }
        Ok(Self { index, total })
    }

    /// The single-shard assignment covering the whole sequence.
    #[must_use]
    pub fn whole() -> Self {
        Self { index: 0, total: 1 }
    }

    /// This shard's index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total shard count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Selects this shard's subsequence: items whose position modulo
    /// `total` equals `index`, in input order. With one shard the input
    /// is returned unchanged.
    #[must_use]
    pub fn select<T>(&self, items: Vec<T>) -> Vec<T> {
        if self.total <= 1 {
            return items;
        }
        items
            .into_iter()
            .enumerate()
            .filter(|(position, _)| position % self.total == self.index)
            .map(|(_, item)| item)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_new_rejects_zero_total() {
        assert_eq!(
            ShardSpec::new(0, 0),
            Err(ShardError::ZeroTotal { total: 0 })
        );
    }

    #[test]
    fn test_new_rejects_index_at_or_past_total() {
        assert_eq!(
            ShardSpec::new(3, 3),
            Err(ShardError::IndexOutOfRange { index: 3, total: 3 })
        );
        assert!(ShardSpec::new(5, 2).is_err());
    }

    #[test]
    fn test_single_shard_returns_input_unchanged() {
        let spec = ShardSpec::new(0, 1).unwrap();
        assert_eq!(spec.select(input(7)), input(7));
    }

    #[test]
    fn test_whole_is_single_shard() {
        assert_eq!(ShardSpec::whole(), ShardSpec::new(0, 1).unwrap());
    }

    #[test]
    fn test_modulo_selection() {
        let spec = ShardSpec::new(1, 3).unwrap();
        assert_eq!(spec.select(input(10)), vec![1, 4, 7]);
    }

    #[test]
    fn test_shards_partition_input_exactly() {
        // Union over all shards equals the input exactly once each, for a
        // range of shard counts including totals larger than the input.
        for total in 1..=12 {
            let mut union = Vec::new();
            for index in 0..total {
                let spec = ShardSpec::new(index, total).unwrap();
                union.extend(spec.select(input(10)));
            }
            union.sort_unstable();
            assert_eq!(union, input(10), "total {total}");
        }
    }

    #[test]
    fn test_selection_preserves_relative_order() {
        let spec = ShardSpec::new(0, 4).unwrap();
        let selected = spec.select(input(20));
        let mut sorted = selected.clone();
        sorted.sort_unstable();
        assert_eq!(selected, sorted);
    }

    #[test]
    fn test_empty_input() {
        let spec = ShardSpec::new(2, 5).unwrap();
        assert!(spec.select(Vec::<usize>::new()).is_empty());
    }

    #[test]
    fn test_selection_is_reproducible() {
        let spec = ShardSpec::new(2, 3).unwrap();
        assert_eq!(spec.select(input(50)), spec.select(input(50)));
    }
}
