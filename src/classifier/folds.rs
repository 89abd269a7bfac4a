//! Stratified k-fold splitting with seeded shuffling.

use ahash::AHashMap;
use rand::prelude::*;

use crate::error::{BanterError, Result};

/// Stratified k-fold assignment over a labeled sample set.
///
/// Samples are grouped by label, each group is shuffled under the seed, and
/// members are dealt onto folds round-robin with a counter that carries
/// across groups. Every fold ends up with close to the global label
/// distribution, and the assignment is fully reproducible for a fixed seed.
#[derive(Debug, Clone)]
pub struct StratifiedKFold {
    n_folds: usize,
    seed: u64,
}

impl StratifiedKFold {
    /// Create a splitter for `n_folds` folds.
    pub fn new(n_folds: usize, seed: u64) -> Result<Self> {
        if n_folds < 2 {
            return Err(BanterError::training(format!(
                "stratified split needs at least 2 folds, got {n_folds}"
            )));
        }
        Ok(StratifiedKFold { n_folds, seed })
    }

    /// Number of folds this splitter produces.
    pub fn n_folds(&self) -> usize {
        self.n_folds
    }

    /// Assign each sample index to a fold.
    ///
    /// Returns one index list per fold. Requires at least as many samples
    /// as folds and at least `n_folds` members in every label class, so no
    /// fold misses a class entirely.
    pub fn split(&self, labels: &[String]) -> Result<Vec<Vec<usize>>> {
        if labels.len() < self.n_folds {
            return Err(BanterError::training(format!(
                "cannot split {} samples into {} folds",
                labels.len(),
                self.n_folds
            )));
        }

        // Group sample indices by label, keeping first-seen label order.
        let mut groups: AHashMap<&str, Vec<usize>> = AHashMap::new();
        let mut label_order: Vec<&str> = Vec::new();
        for (idx, label) in labels.iter().enumerate() {
            let group = groups.entry(label.as_str()).or_insert_with(|| {
                label_order.push(label.as_str());
                Vec::new()
            });
            group.push(idx);
        }

        for label in &label_order {
            let size = groups[label].len();
            if size < self.n_folds {
                return Err(BanterError::training(format!(
                    "label {label} has {size} samples, fewer than {} folds",
                    self.n_folds
                )));
            }
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut folds = vec![Vec::new(); self.n_folds];
        let mut next_fold = 0;

        for label in &label_order {
            let mut indices = groups.remove(label).expect("group exists");
            indices.shuffle(&mut rng);
            for idx in indices {
                folds[next_fold].push(idx);
                next_fold = (next_fold + 1) % self.n_folds;
            }
        }

        Ok(folds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rejects_single_fold() {
        assert!(StratifiedKFold::new(1, 42).is_err());
    }

    #[test]
    fn test_every_index_assigned_exactly_once() {
        let y = labels(&["a", "a", "a", "b", "b", "b", "a", "b"]);
        let folds = StratifiedKFold::new(2, 42).unwrap().split(&y).unwrap();

        let mut all: Vec<usize> = folds.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, (0..y.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_folds_preserve_label_distribution() {
        let y = labels(&["a", "a", "a", "a", "b", "b", "b", "b"]);
        let folds = StratifiedKFold::new(2, 42).unwrap().split(&y).unwrap();

        for fold in &folds {
            let a_count = fold.iter().filter(|&&i| y[i] == "a").count();
            let b_count = fold.iter().filter(|&&i| y[i] == "b").count();
            assert_eq!(a_count, 2);
            assert_eq!(b_count, 2);
        }
    }

    #[test]
    fn test_split_is_deterministic_for_fixed_seed() {
        let y = labels(&["a", "a", "b", "b", "a", "b", "a", "b"]);
        let first = StratifiedKFold::new(2, 7).unwrap().split(&y).unwrap();
        let second = StratifiedKFold::new(2, 7).unwrap().split(&y).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_class_smaller_than_fold_count_rejected() {
        let y = labels(&["a", "a", "a", "b"]);
        let result = StratifiedKFold::new(2, 42).unwrap().split(&y);
        assert!(result.is_err());
    }
}
