//! Samplers over length-n coefficient vectors: ternary, uniform on Z_M, and
//! discrete Gaussian.

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

use crate::poly::{div_round, Poly};

/// Draw a length-n polynomial whose coefficients are independently and
/// uniformly drawn from `{-1, 0, 1}`.
pub fn sample_ternary<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> Poly {
    let coeffs = (0..n).map(|_| rng.gen_range(-1i128..=1)).collect();
    Poly::from_coeffs(coeffs)
}

/// Draw a length-n polynomial whose coefficients are independently and
/// uniformly drawn from `[0, m)`.
pub fn sample_uniform<R: RngCore + ?Sized>(rng: &mut R, n: usize, m: u128) -> Poly {
    let coeffs = (0..n)
        .map(|_| rng.gen_range(0i128..m as i128))
        .collect();
    Poly::from_coeffs(coeffs)
}

/// Draw a length-n polynomial whose coefficients are independently drawn
/// from a discrete Gaussian centered at 0 with standard deviation `sigma`.
///
/// Discretizes by sampling a continuous normal and rounding to nearest
/// integer (ties away from zero, matching [`div_round`] used throughout the
/// rest of the crate), as the design doc permits.
pub fn sample_gaussian<R: RngCore + ?Sized>(rng: &mut R, n: usize, sigma: f64) -> Poly {
    debug_assert!(sigma > 0.0);
    let normal = Normal::new(0.0, sigma).expect("sigma > 0 checked by Params::build");
    let coeffs = (0..n)
        .map(|_| {
            let x: f64 = normal.sample(rng);
            round_f64_away_from_zero(x)
        })
        .collect();
    Poly::from_coeffs(coeffs)
}

fn round_f64_away_from_zero(x: f64) -> i128 {
    // Route through div_round so the rounding convention is shared with the
    // integer-domain rounding elsewhere in the crate: scale by a large
    // power of two, round the scaled integer, then unscale.
    const SCALE: i128 = 1 << 20;
    let scaled = (x * SCALE as f64).round() as i128;
    div_round(scaled, SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn ternary_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let poly = sample_ternary(&mut rng, 256);
        assert!(poly.coeffs().iter().all(|&c| (-1..=1).contains(&c)));
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let m = 97u128;
        let poly = sample_uniform(&mut rng, 256, m);
        assert!(poly.coeffs().iter().all(|&c| c >= 0 && (c as u128) < m));
    }

    #[test]
    fn gaussian_is_seeded_deterministically() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);
        let a = sample_gaussian(&mut rng1, 64, 3.2);
        let b = sample_gaussian(&mut rng2, 64, 3.2);
        assert_eq!(a, b);
    }

    #[test]
    fn gaussian_is_small_with_overwhelming_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let poly = sample_gaussian(&mut rng, 4096, 3.2);
        // 10 sigma is an astronomically generous bound for a test.
        assert!(poly.coeffs().iter().all(|&c| c.abs() < 32));
    }
}
