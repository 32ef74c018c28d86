//! Key types and key generation for the BFV encryption scheme.

use std::rc::Rc;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::params::Params;
use crate::poly::{ring_add, ring_mul, ring_mul_unreduced, ring_neg, Poly};
use crate::sampler::{sample_gaussian, sample_ternary, sample_uniform};

/// Secret key for the BFV encryption scheme: a single ternary polynomial.
///
/// Never serialized by accident — there is no `Default`, no `Clone`, and the
/// coefficient buffer is zeroized when the key is dropped.
#[derive(Debug, PartialEq)]
pub struct SecretKey {
    pub(crate) par: Rc<Params>,
    pub(crate) s: Poly,
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.s.zeroize();
    }
}

impl ZeroizeOnDrop for SecretKey {}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl SecretKey {
    pub(crate) fn params(&self) -> &Rc<Params> {
        &self.par
    }

    pub(crate) fn poly(&self) -> &Poly {
        &self.s
    }
}

/// Public key for the BFV encryption scheme: a pair of R_Q polynomials
/// `(pk0, pk1)` with `pk0 + pk1*s ≈ 0 (mod Q, mod x^n+1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicKey {
    pub(crate) par: Rc<Params>,
    pub(crate) pk0: Poly,
    pub(crate) pk1: Poly,
}

impl PublicKey {
    pub(crate) fn params(&self) -> &Rc<Params> {
        &self.par
    }
}

/// Relinearization key (variant 2): a pair of R_{QP} polynomials
/// `(rlk0, rlk1)` with `rlk0 + rlk1*s ≈ P*s² (mod QP, mod x^n+1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelinKey {
    pub(crate) par: Rc<Params>,
    pub(crate) rlk0: Poly,
    pub(crate) rlk1: Poly,
}

impl Zeroize for RelinKey {
    fn zeroize(&mut self) {
        self.rlk0.zeroize();
        self.rlk1.zeroize();
    }
}

impl Drop for RelinKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl RelinKey {
    pub(crate) fn params(&self) -> &Rc<Params> {
        &self.par
    }
}

/// Generate a fresh `(SecretKey, PublicKey)` pair, drawing randomness from
/// the process CSPRNG.
///
/// Order of operations matches §4.3 of the design doc exactly, so that a
/// seeded RNG produces bit-identical keys across runs: `s`, then `a`, then
/// `e`.
pub fn keygen(params: &Rc<Params>) -> (SecretKey, PublicKey) {
    keygen_with_rng(params, &mut rand::thread_rng())
}

/// Like [`keygen`], but draws randomness from the supplied `rng` instead of
/// the process CSPRNG. Use a seeded [`rand_chacha::ChaCha8Rng`] for
/// reproducible tests.
pub fn keygen_with_rng<R: RngCore + ?Sized>(params: &Rc<Params>, rng: &mut R) -> (SecretKey, PublicKey) {
    let n = params.degree();
    let q = params.q() as u128;

    let s = sample_ternary(rng, n);
    let a = sample_uniform(rng, n, q);
    let e = sample_gaussian(rng, n, params.sigma());

    let neg_a = ring_neg(&a, q);
    let neg_e = ring_neg(&e, q);
    let pk0 = ring_add(&ring_mul(&neg_a, &s, q), &neg_e, q);
    let pk1 = a;

    tracing::debug!(n, q = params.q(), "generated BFV key pair");

    (
        SecretKey {
            par: params.clone(),
            s,
        },
        PublicKey {
            par: params.clone(),
            pk0,
            pk1,
        },
    )
}

/// Generate a relinearization key (variant 2) bound to `sk`, drawing
/// randomness from the process CSPRNG.
pub fn rlk_gen(params: &Rc<Params>, sk: &SecretKey) -> RelinKey {
    rlk_gen_with_rng(params, sk, &mut rand::thread_rng())
}

/// Like [`rlk_gen`], but draws randomness from the supplied `rng`.
pub fn rlk_gen_with_rng<R: RngCore + ?Sized>(
    params: &Rc<Params>,
    sk: &SecretKey,
    rng: &mut R,
) -> RelinKey {
    let n = params.degree();
    let qp = params.qp();
    let s = sk.poly();

    let a_prime = sample_uniform(rng, n, qp);
    let e_prime = sample_gaussian(rng, n, params.sigma_prime());

    // mask = P * (s*s), computed as a bare (unreduced mod Q) polynomial
    // product *before* any modular reduction, then scaled by P in the
    // integers. This ordering is the crux of relinearization variant 2.
    let s_squared = ring_mul_unreduced(s, s);
    let mask: Poly = Poly::from_coeffs(
        s_squared
            .coeffs()
            .iter()
            .map(|&c| c * params.p() as i128)
            .collect(),
    );

    let neg_a_prime_s = ring_mul_unreduced(&negate_unreduced(&a_prime), s);
    let neg_e_prime = negate_unreduced(&e_prime);
    let rlk0 = crate::poly::ring_add_unreduced(&neg_a_prime_s, &crate::poly::ring_add_unreduced(&neg_e_prime, &mask))
        .reduced_mod(qp);
    let rlk1 = a_prime.reduced_mod(qp);

    tracing::debug!(n, p = params.p(), "generated BFV relinearization key");

    RelinKey {
        par: params.clone(),
        rlk0,
        rlk1,
    }
}

fn negate_unreduced(p: &Poly) -> Poly {
    Poly::from_coeffs(p.coeffs().iter().map(|&c| -c).collect())
}

/// Seed a [`ChaCha8Rng`] from a `u64` seed, for callers that want the
/// convenience of a small integer seed rather than a full 32-byte one.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draw a fresh 32-byte seed from the process CSPRNG, for callers that want
/// to persist the seed that produced a given run.
pub fn fresh_seed() -> <ChaCha8Rng as SeedableRng>::Seed {
    let mut seed = <ChaCha8Rng as SeedableRng>::Seed::default();
    rand::thread_rng().fill(&mut seed[..]);
    seed
}
