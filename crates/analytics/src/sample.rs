use core_types::TradeRecord;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use tracing::debug;

/// Draws a bounded random sample of rows for scatter displays.
///
/// Sampling is the one non-deterministic-looking output of the system, so
/// the seed is explicit: a fixed seed reproduces the same sample, keeping
/// this utility testable while staying outside the deterministic
/// aggregation contract. When `max` covers the whole slice the sample is
/// the identity and file order is preserved.
pub fn sample_rows(rows: &[TradeRecord], max: usize, seed: u64) -> Vec<TradeRecord> {
    if rows.len() <= max {
        return rows.to_vec();
    }

    debug!(rows = rows.len(), max, seed, "sampling rows for scatter display");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = index::sample(&mut rng, rows.len(), max).into_vec();
    // Keep the sampled rows in their original table order.
    indices.sort_unstable();
    indices.into_iter().map(|i| rows[i].clone()).collect()
}
