// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Splits samples into two disjoint sets:
//   - Training set:   used to update model weights
//   - Validation set: used to measure loss on unseen rows
//
// The split itself is a plain index cut:
//
//   split_index = floor(train_fraction × N)
//   training    = samples[..split_index]
//   validation  = samples[split_index..]
//
// so it preserves whatever order it is given. Randomisation
// is a separate, optional step (shuffle) that runs before the
// cut, seeded when the run must be reproducible.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::seq::SliceRandom;

use crate::data::sampler::rng_from_seed;

/// Split `samples` into (train, validation) at floor(train_fraction × N).
///
/// # Arguments
/// * `samples`        - All available samples (consumed by this function)
/// * `train_fraction` - Proportion for training in [0, 1], e.g. 0.8 = 80%
///
/// # Example
/// ```ignore
/// let (train, val) = split_train_val(all_samples, 0.8);
/// // 10 samples → 8 training, 2 validation
/// ```
pub fn split_train_val<T>(mut samples: Vec<T>, train_fraction: f64) -> (Vec<T>, Vec<T>) {
    let total    = samples.len();
    let split_at = split_index(total, train_fraction);

    // split_off(n) removes elements [n..] from the Vec and returns them
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation ({}% / {}%)",
        samples.len(),
        val.len(),
        (samples.len() * 100) / total.max(1),
        (val.len()     * 100) / total.max(1),
    );

    (samples, val)
}

/// floor(train_fraction × total), clamped to [0, total].
/// A NaN fraction yields 0.
pub fn split_index(total: usize, train_fraction: f64) -> usize {
    let raw = (total as f64 * train_fraction).floor();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        (raw as usize).min(total)
    }
}

/// Shuffle in place. `Some(seed)` gives the same order on every run.
pub fn shuffle<T>(items: &mut [T], seed: Option<u64>) {
    let mut rng = rng_from_seed(seed);
    items.shuffle(&mut rng);
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_train_val(items, 0.8);
        assert_eq!(train.len(), 8);
        assert_eq!(val.len(),   2);
    }

    #[test]
    fn test_split_floors_the_index() {
        // 7 × 0.8 = 5.6 → 5
        let items: Vec<usize> = (0..7).collect();
        let (train, val)      = split_train_val(items, 0.8);
        assert_eq!(train.len(), 5);
        assert_eq!(val.len(),   2);
    }

    #[test]
    fn test_order_is_preserved_and_disjoint() {
        let items: Vec<usize> = (0..50).collect();
        let (train, val)      = split_train_val(items, 0.7);
        assert_eq!(train.len() + val.len(), 50);
        assert_eq!(train, (0..35).collect::<Vec<_>>());
        assert_eq!(val,   (35..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val)      = split_train_val(items, 0.8);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_whole_set_in_one_partition() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_train_val(items.clone(), 1.0);
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());

        let (train, val) = split_train_val(items, 0.0);
        assert!(train.is_empty());
        assert_eq!(val.len(), 10);
    }

    #[test]
    fn test_split_index_edge_values() {
        assert_eq!(split_index(0, 0.8), 0);
        assert_eq!(split_index(10, f64::NAN), 0);
        assert_eq!(split_index(10, 1.5), 10);
        assert_eq!(split_index(3, 0.5), 1);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let mut a: Vec<usize> = (0..100).collect();
        let mut b: Vec<usize> = (0..100).collect();
        shuffle(&mut a, Some(7));
        shuffle(&mut b, Some(7));
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
    }
}
