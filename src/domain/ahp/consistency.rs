//! Consistency diagnostics for pairwise judgment matrices.
//!
//! Uses Saaty's random index calibration (The Analytic Hierarchy Process,
//! 1980) for matrix orders 1 through 10. Larger matrices have no published
//! calibration here and are rejected rather than extrapolated.

use super::AhpError;

/// Largest matrix order with a random index calibration value.
pub const MAX_SUPPORTED_SIZE: usize = 10;

/// Saaty's random consistency index, indexed by matrix order - 1.
const RANDOM_INDEX: [f64; MAX_SUPPORTED_SIZE] =
    [0.00, 0.00, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Returns the random index for a matrix of order `n`.
pub(crate) fn random_index(n: usize) -> Result<f64, AhpError> {
    if n == 0 || n > MAX_SUPPORTED_SIZE {
        return Err(AhpError::UnsupportedSize {
            size: n,
            max: MAX_SUPPORTED_SIZE,
        });
    }
    Ok(RANDOM_INDEX[n - 1])
}

/// Computes the consistency ratio from the principal eigenvalue estimate.
///
/// `CI = (lambda_max - n) / (n - 1)` and `CR = CI / RI[n]`. Orders 1 and 2
/// are reciprocally consistent by construction, so their ratio is 0. Tiny
/// negative values of CI are numerical noise and are clamped to 0.
pub fn consistency_ratio(lambda_max: f64, n: usize) -> Result<f64, AhpError> {
    if n > MAX_SUPPORTED_SIZE {
        return Err(AhpError::UnsupportedSize {
            size: n,
            max: MAX_SUPPORTED_SIZE,
        });
    }
    if n <= 2 {
        return Ok(0.0);
    }
    let ci = (lambda_max - n as f64) / (n as f64 - 1.0);
    let ri = random_index(n)?;
    Ok((ci / ri).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_index_matches_published_table() {
        assert_eq!(random_index(1).unwrap(), 0.00);
        assert_eq!(random_index(3).unwrap(), 0.58);
        assert_eq!(random_index(10).unwrap(), 1.49);
    }

    #[test]
    fn random_index_rejects_unsupported_sizes() {
        assert!(matches!(
            random_index(11),
            Err(AhpError::UnsupportedSize { size: 11, max: 10 })
        ));
        assert!(random_index(0).is_err());
    }

    #[test]
    fn small_orders_are_always_consistent() {
        assert_eq!(consistency_ratio(1.0, 1).unwrap(), 0.0);
        assert_eq!(consistency_ratio(2.3, 2).unwrap(), 0.0);
    }

    #[test]
    fn perfectly_consistent_eigenvalue_gives_zero_ratio() {
        assert_eq!(consistency_ratio(3.0, 3).unwrap(), 0.0);
    }

    #[test]
    fn inconsistency_raises_the_ratio() {
        // lambda_max = 3.116 gives CI = 0.058, CR = 0.1 at RI = 0.58.
        let cr = consistency_ratio(3.116, 3).unwrap();
        assert!((cr - 0.1).abs() < 1e-9);
    }

    #[test]
    fn numerical_noise_below_n_clamps_to_zero() {
        let cr = consistency_ratio(3.0 - 1e-13, 3).unwrap();
        assert_eq!(cr, 0.0);
    }

    #[test]
    fn consistency_ratio_rejects_unsupported_size() {
        assert!(consistency_ratio(12.0, 12).is_err());
    }
}
