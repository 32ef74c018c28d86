//! Parameters for the BFV encryption scheme.

use derive_builder::Builder;

use crate::error::Error;

/// Parameters for the BFV encryption scheme.
///
/// Immutable after construction. Use [`ParamsBuilder`] to validate a set of
/// values before they are trusted by the rest of the crate.
#[derive(Debug, Builder, Clone, PartialEq)]
#[builder(build_fn(private, name = "fallible_build"), setter(into))]
pub struct Params {
    /// Ring dimension: the number of coefficients in a polynomial. Must be a
    /// power of two, at least 2.
    pub(crate) n: usize,

    /// Ciphertext coefficient modulus Q.
    pub(crate) q: u64,

    /// Plaintext coefficient modulus T.
    pub(crate) t: u64,

    /// Relinearization auxiliary modulus P.
    pub(crate) p: u64,

    /// Standard deviation of the error distribution χ used by key generation
    /// and encryption.
    pub(crate) sigma: f64,

    /// Standard deviation of the error distribution χ′ used by
    /// relinearization-key generation.
    pub(crate) sigma_prime: f64,
}

impl Params {
    /// Ring dimension.
    pub fn degree(&self) -> usize {
        self.n
    }

    /// Ciphertext coefficient modulus Q.
    pub fn q(&self) -> u64 {
        self.q
    }

    /// Plaintext coefficient modulus T.
    pub fn t(&self) -> u64 {
        self.t
    }

    /// Relinearization auxiliary modulus P.
    pub fn p(&self) -> u64 {
        self.p
    }

    /// Standard deviation of χ.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Standard deviation of χ′.
    pub fn sigma_prime(&self) -> f64 {
        self.sigma_prime
    }

    /// The scaling factor Δ = ⌊Q/T⌋, recomputed with integer-floor division
    /// on every call per the spec's invariant that it is never cached as a
    /// float.
    pub fn delta(&self) -> u64 {
        self.q / self.t
    }

    /// The extended relinearization modulus QP = Q·P, as a `u128` since Q·P
    /// can exceed 64 bits for production parameters.
    pub fn qp(&self) -> u128 {
        self.q as u128 * self.p as u128
    }

    /// The toy parameter set used throughout the crate's own test suite:
    /// n=4, Q=2^16, T=16, P=2^8, σ=1, σ′=2.
    pub fn toy() -> Self {
        ParamsBuilder::default()
            .n(4usize)
            .q(1u64 << 16)
            .t(16u64)
            .p(1u64 << 8)
            .sigma(1.0)
            .sigma_prime(2.0)
            .build()
            .expect("toy parameter set is always valid")
    }

    /// A production-scale parameter set suitable for stress testing:
    /// n=4096, Q=2^54, T=40961, P=2, σ=3.2, σ′=1.6.
    pub fn production() -> Self {
        ParamsBuilder::default()
            .n(4096usize)
            .q(1u64 << 54)
            .t(40961u64)
            .p(2u64)
            .sigma(3.2)
            .sigma_prime(1.6)
            .build()
            .expect("production parameter set is always valid")
    }
}

impl ParamsBuilder {
    /// Validate and build a [`Params`].
    pub fn build(&self) -> Result<Params, Error> {
        let n = self
            .n
            .ok_or_else(|| Error::Parameter("`n` is required".to_string()))?;
        if n < 2 || !n.is_power_of_two() {
            return Err(Error::Parameter(
                "`n` must be a power of two, at least 2".to_string(),
            ));
        }

        let q = self
            .q
            .ok_or_else(|| Error::Parameter("`q` is required".to_string()))?;
        let t = self
            .t
            .ok_or_else(|| Error::Parameter("`t` is required".to_string()))?;
        let p = self
            .p
            .ok_or_else(|| Error::Parameter("`p` is required".to_string()))?;

        if q == 0 || t == 0 || p == 0 {
            return Err(Error::Parameter(
                "`q`, `t`, and `p` must be positive".to_string(),
            ));
        }
        if q <= t {
            return Err(Error::Parameter("`q` must be strictly greater than `t`".to_string()));
        }

        let sigma = self.sigma.unwrap_or(3.2);
        let sigma_prime = self.sigma_prime.unwrap_or(sigma);
        if !(sigma > 0.0) || !(sigma_prime > 0.0) {
            return Err(Error::Parameter(
                "`sigma` and `sigma_prime` must be positive".to_string(),
            ));
        }

        // n * q^2 must fit comfortably inside i128: it bounds the native
        // schoolbook product of two R_Q polynomials (`ring_mul_unreduced`
        // on two ciphertext-sized polynomials), which the arena always
        // computes in `i128`. The subsequent ×T/÷Q multiplication scale and
        // ÷P relinearization scale are computed in arbitrary precision (see
        // `poly::scale_round_mod`) and are not bounded by this check.
        let headroom = (i128::MAX as u128) / 4;
        let n_q2 = (n as u128)
            .checked_mul(q as u128)
            .and_then(|v| v.checked_mul(q as u128));
        if n_q2.map(|v| v > headroom).unwrap_or(true) {
            return Err(Error::Parameter(
                "`n` and `q` are too large: the base polynomial product would overflow i128".to_string(),
            ));
        }

        // n * Q * QP = n * Q^2 * P must also fit inside i128: it bounds the
        // native schoolbook product of the degree-2 relinearization term
        // (bounded by Q) against the relinearization key (bounded by QP),
        // computed in `ring_mul_unreduced` before `scale_round_mod` divides
        // it down by P.
        let n_q2_p = n_q2.and_then(|v| v.checked_mul(p as u128));
        if n_q2_p.map(|v| v > headroom).unwrap_or(true) {
            return Err(Error::Parameter(
                "`n`, `q`, and `p` are too large: the relinearization product would overflow i128"
                    .to_string(),
            ));
        }

        Ok(Params {
            n,
            q,
            t,
            p,
            sigma,
            sigma_prime,
        })
    }
}
