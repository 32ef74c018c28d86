//! The polynomial arena: fixed-degree integer polynomials in the negacyclic
//! ring R = Z\[x\] / (x^n + 1), and the two arithmetic layers built on top of
//! it — "ring" ops that additionally reduce modulo a coefficient modulus M,
//! and "bare" ops that only fold modulo x^n+1 and leave coefficients as
//! unbounded signed integers.
//!
//! Coefficients are carried in `i128` throughout, except for the
//! multiplication/relinearization scale-and-round step. A schoolbook
//! product has coefficients bounded by `n * Q^2`, which comfortably fits
//! `i128` (`Params::build` rejects parameter sets for which it would not),
//! but scaling that product by `T` before dividing by `Q` (or `QP` by `1`
//! before dividing by `P`) can overflow `i128` at production parameter
//! sizes — `n * Q^2 * T` reaches ~2^135 for `n=4096, Q=2^54, T=40961`.
//! [`scale_round_mod`] therefore performs that multiply-then-round in
//! arbitrary precision via [`num_bigint::BigInt`].

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

/// A length-n polynomial with signed integer coefficients.
///
/// The same type represents both "R_M polynomials" (coefficients kept in
/// `[0, M)` by construction) and "raw polynomials" (coefficients left as
/// ordinary signed integers); which discipline applies is a property of how
/// a given `Poly` was produced, not of the type itself — exactly as in the
/// design doc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    coeffs: Vec<i128>,
}

impl zeroize::Zeroize for Poly {
    fn zeroize(&mut self) {
        self.coeffs.zeroize();
    }
}

impl Poly {
    /// Build a polynomial from its coefficient vector. The length fixes `n`.
    pub fn from_coeffs(coeffs: Vec<i128>) -> Self {
        Poly { coeffs }
    }

    /// A length-n polynomial of all zeros.
    pub fn zero(n: usize) -> Self {
        Poly {
            coeffs: vec![0; n],
        }
    }

    /// Ring dimension of this polynomial.
    pub fn degree(&self) -> usize {
        self.coeffs.len()
    }

    /// Borrow the coefficients.
    pub fn coeffs(&self) -> &[i128] {
        &self.coeffs
    }

    /// Consume and return the coefficients.
    pub fn into_coeffs(self) -> Vec<i128> {
        self.coeffs
    }

    /// Map every coefficient into the canonical range `[0, m)` by Euclidean
    /// (nonnegative) remainder.
    pub fn reduced_mod(&self, m: u128) -> Poly {
        let m = m as i128;
        Poly {
            coeffs: self.coeffs.iter().map(|&c| euclid_mod(c, m)).collect(),
        }
    }

    /// Every coefficient lies in `[0, m)`.
    pub fn in_range(&self, m: u128) -> bool {
        let m = m as i128;
        self.coeffs.iter().all(|&c| c >= 0 && c < m)
    }
}

/// Euclidean (always-nonnegative) remainder, as opposed to Rust's `%` which
/// is sign-preserving.
fn euclid_mod(a: i128, m: i128) -> i128 {
    let r = a % m;
    if r < 0 {
        r + m
    } else {
        r
    }
}

/// Round-half-away-from-zero division of `num` by `den` (`den` > 0).
///
/// Used for decryption scaling, where the numerator (`T * v` with `v`
/// already reduced mod `Q`) stays well within `i128`. The multiplication
/// scale and relinearization steps share the same tie-breaking rule but go
/// through [`div_round_big`] instead, since their numerators do not fit
/// `i128` at production parameter sizes.
pub(crate) fn div_round(num: i128, den: i128) -> i128 {
    debug_assert!(den > 0);
    if num >= 0 {
        (2 * num + den) / (2 * den)
    } else {
        -((2 * (-num) + den) / (2 * den))
    }
}

/// Reduce a raw product of length `2n-1` modulo `x^n + 1`: fold `x^{n+i}` to
/// `-x^i`, i.e. `q[i] = r[i] - r[i+n]` (the latter treated as 0 past the end
/// of `r`).
fn reduce_cyclotomic(raw: &[i128], n: usize) -> Vec<i128> {
    let mut out = vec![0i128; n];
    for i in 0..n {
        let lo = raw.get(i).copied().unwrap_or(0);
        let hi = raw.get(i + n).copied().unwrap_or(0);
        out[i] = lo - hi;
    }
    out
}

/// Schoolbook product of two length-n polynomials, reduced modulo `x^n+1`
/// only (coefficients left as unbounded signed integers).
fn schoolbook_mul_unreduced(a: &[i128], b: &[i128]) -> Vec<i128> {
    let n = a.len();
    debug_assert_eq!(n, b.len());
    let mut raw = vec![0i128; 2 * n - 1];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0 {
            continue;
        }
        for (j, &bj) in b.iter().enumerate() {
            raw[i + j] += ai * bj;
        }
    }
    reduce_cyclotomic(&raw, n)
}

/// `a + b`, reduced modulo `x^n+1` and modulo `m`. Both inputs and the
/// output are R_M polynomials.
pub fn ring_add(a: &Poly, b: &Poly, m: u128) -> Poly {
    ring_add_unreduced(a, b).reduced_mod(m)
}

/// `a - b`, reduced modulo `x^n+1` and modulo `m`.
pub fn ring_sub(a: &Poly, b: &Poly, m: u128) -> Poly {
    ring_sub_unreduced(a, b).reduced_mod(m)
}

/// `-a`, reduced modulo `m`: maps coefficient `c` to `(m - c) mod m`.
pub fn ring_neg(a: &Poly, m: u128) -> Poly {
    a.coeffs
        .iter()
        .map(|&c| -c)
        .collect::<Vec<_>>()
        .pipe(Poly::from_coeffs)
        .reduced_mod(m)
}

/// `a * b`, reduced modulo `x^n+1` and modulo `m`.
pub fn ring_mul(a: &Poly, b: &Poly, m: u128) -> Poly {
    ring_mul_unreduced(a, b).reduced_mod(m)
}

/// `a + b`, reduced modulo `x^n+1` only. Coefficients are left as signed
/// integers; the caller decides when (or whether) to reduce modulo a
/// coefficient modulus.
pub fn ring_add_unreduced(a: &Poly, b: &Poly) -> Poly {
    debug_assert_eq!(a.degree(), b.degree());
    Poly {
        coeffs: a
            .coeffs
            .iter()
            .zip(b.coeffs.iter())
            .map(|(&x, &y)| x + y)
            .collect(),
    }
}

/// `a - b`, reduced modulo `x^n+1` only.
pub fn ring_sub_unreduced(a: &Poly, b: &Poly) -> Poly {
    debug_assert_eq!(a.degree(), b.degree());
    Poly {
        coeffs: a
            .coeffs
            .iter()
            .zip(b.coeffs.iter())
            .map(|(&x, &y)| x - y)
            .collect(),
    }
}

/// `a * b`, reduced modulo `x^n+1` only. This is the operation the BFV
/// multiplier needs: the tensor product must be computed in the integers,
/// scaled by T, and divided by Q with rounding — applying a modulus before
/// that rounding step would round against the wrong scale.
pub fn ring_mul_unreduced(a: &Poly, b: &Poly) -> Poly {
    Poly {
        coeffs: schoolbook_mul_unreduced(&a.coeffs, &b.coeffs),
    }
}

/// Round-half-away-from-zero division of `num` by `den` (`den` > 0),
/// in arbitrary precision. Same tie-breaking rule as [`div_round`], used
/// where the numerator does not fit `i128`.
fn div_round_big(num: &BigInt, den: &BigInt) -> BigInt {
    debug_assert!(den.is_positive());
    let two = BigInt::from(2);
    if !num.is_negative() {
        (&two * num + den) / (&two * den)
    } else {
        -((&two * -num + den) / (&two * den))
    }
}

/// Map a `BigInt` into the canonical range `[0, m)`, returning the result as
/// an `i128` (valid since the reduced value always fits: `m` itself fits
/// `i128` for every modulus this crate uses).
fn euclid_mod_big(a: &BigInt, m: &BigInt) -> i128 {
    let r = &*a % m;
    let r = if r.is_negative() { r + m } else { r };
    r.to_i128()
        .expect("coefficient reduced mod m must fit i128: m itself fits i128")
}

/// Scale every coefficient of `raw` by `scalar` in the integers, then divide
/// by `den` with round-to-nearest, then map into `[0, m)`. This is the
/// `round_to_nearest(scalar * raw / den) mod m` operation used for the
/// ×T/Q multiplication scale and the ÷P relinearization step.
///
/// `raw` can carry coefficients up to `n * Q^2` in magnitude (the unreduced
/// tensor product); scaling that by `T` before dividing by `Q` — or an
/// unreduced relinearization product by `1` before dividing by `P` — can
/// overflow `i128` well before the final, reduced result does. The multiply
/// and the rounding division therefore happen in arbitrary-precision
/// arithmetic; only the final, already-reduced coefficient is brought back
/// down to `i128`.
pub fn scale_round_mod(raw: &Poly, scalar: i128, den: i128, m: u128) -> Poly {
    let scalar_big = BigInt::from(scalar);
    let den_big = BigInt::from(den);
    let m_big = BigInt::from(m);
    let coeffs = raw
        .coeffs
        .iter()
        .map(|&c| {
            let scaled = BigInt::from(c) * &scalar_big;
            let rounded = div_round_big(&scaled, &den_big);
            euclid_mod_big(&rounded, &m_big)
        })
        .collect();
    Poly { coeffs }
}

/// Small helper trait so `ring_neg` can read as a pipeline instead of a
/// nested call.
trait Pipe: Sized {
    fn pipe<T>(self, f: impl FnOnce(Self) -> T) -> T {
        f(self)
    }
}
impl<T> Pipe for T {}
