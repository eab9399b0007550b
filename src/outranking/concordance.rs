use tracing::debug;

use super::criteria::Criteria;
use super::error::ElectreError;
use super::matrix::{approx_eq, PairwiseMatrix};
use super::normalize::NormalizedMatrix;

/// Weighted evidence that each alternative is at least as good as each other.
///
/// For `a != b`, criterion `j` contributes its full weight when
/// `x_aj > x_bj` and half its weight when the two are [`approx_eq`].
/// Closeness is checked first, so near-equal scores always split the
/// weight evenly between `C(a,b)` and `C(b,a)`. The diagonal is 0.
pub fn concordance(normalized: &NormalizedMatrix, criteria: &Criteria) -> Result<PairwiseMatrix, ElectreError> {
    let weights = criteria
        .aligned_weights(normalized.columns())
        .ok_or_else(|| ElectreError::CriteriaMismatch {
            expected: normalized.columns().sorted(),
            found: criteria.names().sorted(),
        })?;

    let matrix = PairwiseMatrix::from_fn(normalized.rows(), |a, b| {
        if a == b {
            return 0.0;
        }
        normalized
            .row(a)
            .iter()
            .zip(normalized.row(b))
            .zip(&weights)
            .map(|((x_a, x_b), w)| {
                if approx_eq(*x_a, *x_b) {
                    0.5 * w
                } else if x_a > x_b {
                    *w
                } else {
                    0.0
                }
            })
            .sum()
    });

    debug!(alternatives = matrix.n_rows(), "computed concordance matrix");
    Ok(matrix)
}
