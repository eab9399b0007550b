use tracing::debug;

use super::matrix::{approx_eq, PairwiseMatrix};
use super::weights::WeightedMatrix;

/// Largest relative disadvantage of each alternative against each other.
///
/// With `diff_j = w_aj - w_bj`, `D(a,b) = max(|diff_j| : diff_j < 0) / max(|diff_j|)`.
/// Differences between [`approx_eq`] cells count as exactly zero, so pairs
/// that only differ by rounding noise get `D = 0` instead of an unstable ratio.
pub fn discordance(weighted: &WeightedMatrix) -> PairwiseMatrix {
    let matrix = PairwiseMatrix::from_fn(weighted.rows(), |a, b| {
        discordance_index(weighted.row(a), weighted.row(b))
    });

    debug!(
        alternatives = matrix.n_rows(),
        mean = matrix.mean(),
        "computed discordance matrix"
    );
    matrix
}

fn discordance_index(a: &[f64], b: &[f64]) -> f64 {
    let mut worst_loss = 0.0_f64;
    let mut widest_gap = 0.0_f64;

    for (w_a, w_b) in a.iter().zip(b) {
        if approx_eq(*w_a, *w_b) {
            continue;
        }
        let diff = w_a - w_b;
        widest_gap = widest_gap.max(diff.abs());
        if diff < 0.0 {
            worst_loss = worst_loss.max(-diff);
        }
    }

    if widest_gap == 0.0 {
        0.0
    } else {
        worst_loss / widest_gap
    }
}
