// ============================================================
// Layer 4 — Capped Random Sampler
// ============================================================
// Draws at most `cap` items from a dataset, every item having
// the same chance of being chosen.
//
// rand::seq::index::sample picks `cap` distinct indices out of
// 0..N uniformly (Floyd's algorithm or a partial shuffle,
// whichever is cheaper for the sizes involved). The chosen
// items are returned in their original relative order, so a
// later order-preserving split still sees the source order.
//
// If N <= cap the whole input is returned unchanged.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded RNG for reproducible runs, OS entropy otherwise
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None    => StdRng::from_entropy(),
    }
}

/// Uniformly sample at most `cap` items, keeping source order.
pub fn sample_capped<T>(items: Vec<T>, cap: usize, seed: Option<u64>) -> Vec<T> {
    let total = items.len();
    if total <= cap {
        return items;
    }

    let mut rng    = rng_from_seed(seed);
    let mut chosen = vec![false; total];
    for idx in rand::seq::index::sample(&mut rng, total, cap) {
        chosen[idx] = true;
    }

    let sampled: Vec<T> = items
        .into_iter()
        .zip(chosen)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect();

    tracing::debug!("Sampled {} of {} rows", sampled.len(), total);
    sampled
}
