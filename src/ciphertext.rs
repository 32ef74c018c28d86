//! Ciphertext type, encryption, decryption, and homomorphic addition.

use std::ops::{Add, AddAssign};
use std::rc::Rc;

use rand::RngCore;

use crate::error::{Error, Result};
use crate::keys::{PublicKey, SecretKey};
use crate::params::Params;
use crate::plaintext::Plaintext;
use crate::poly::{ring_add, ring_mul, Poly};
use crate::sampler::{sample_gaussian, sample_ternary};

/// A BFV ciphertext: an ordered pair `(c0, c1)` of R_Q polynomials such that
/// `c0 + c1*s ≈ Δ·m + noise (mod Q)` under the secret key `s` the
/// corresponding public key was generated from.
#[derive(Debug, Clone, PartialEq)]
pub struct Ciphertext {
    pub(crate) par: Rc<Params>,
    pub(crate) c0: Poly,
    pub(crate) c1: Poly,
}

impl Ciphertext {
    pub(crate) fn params(&self) -> &Rc<Params> {
        &self.par
    }

    pub(crate) fn c0(&self) -> &Poly {
        &self.c0
    }

    pub(crate) fn c1(&self) -> &Poly {
        &self.c1
    }

    pub(crate) fn from_parts(par: Rc<Params>, c0: Poly, c1: Poly) -> Self {
        Ciphertext { par, c0, c1 }
    }

    fn same_shape(&self, other: &Ciphertext) -> bool {
        self.par == other.par
    }
}

/// Encrypt `pt` under `pk`, drawing randomness from the process CSPRNG.
pub fn encrypt(params: &Rc<Params>, pk: &PublicKey, m: u64) -> Result<Ciphertext> {
    encrypt_with_rng(params, pk, m, &mut rand::thread_rng())
}

/// Like [`encrypt`], but draws randomness from the supplied `rng`.
pub fn encrypt_with_rng<R: RngCore + ?Sized>(
    params: &Rc<Params>,
    pk: &PublicKey,
    m: u64,
    rng: &mut R,
) -> Result<Ciphertext> {
    if pk.params() != params {
        return Err(Error::Domain(
            "public key was generated under different parameters".to_string(),
        ));
    }
    let pt = Plaintext::new(params, m)?;

    let n = params.degree();
    let q = params.q() as u128;

    let scale = pt.encode_scaled();
    let u = sample_ternary(rng, n);
    let e1 = sample_gaussian(rng, n, params.sigma());
    let e2 = sample_gaussian(rng, n, params.sigma());

    let c0 = ring_add(&ring_add(&ring_mul(&pk.pk0, &u, q), &e1, q), &scale, q);
    let c1 = ring_add(&ring_mul(&pk.pk1, &u, q), &e2, q);

    tracing::trace!(n, m, "encrypted plaintext");

    Ok(Ciphertext {
        par: params.clone(),
        c0,
        c1,
    })
}

/// Decrypt `ct` under `sk`, recovering the plaintext integer.
pub fn decrypt(params: &Rc<Params>, sk: &SecretKey, ct: &Ciphertext) -> Result<u64> {
    if sk.params() != params || ct.params() != params {
        return Err(Error::Domain(
            "ciphertext or secret key was generated under different parameters".to_string(),
        ));
    }
    let q = params.q() as u128;
    let scaled = ring_add(&ring_mul(&ct.c1, sk.poly(), q), &ct.c0, q);

    let t = params.t() as i128;
    let q_i = params.q() as i128;
    let decoded_coeffs: Vec<i128> = scaled
        .coeffs()
        .iter()
        .map(|&v| crate::poly::div_round(t * v, q_i).rem_euclid(t))
        .collect();
    let decoded = Poly::from_coeffs(decoded_coeffs);
    let pt = Plaintext::from_decoded(params, &decoded);

    tracing::trace!(n = params.degree(), "decrypted ciphertext");

    Ok(pt.value())
}

/// Homomorphic addition: `eval_add((a0,a1),(b0,b1)) = (a0+b0, a1+b1) mod Q`.
pub fn eval_add(params: &Rc<Params>, a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
    debug_assert_eq!(&a.par, params);
    debug_assert_eq!(&b.par, params);
    let q = params.q() as u128;
    Ciphertext {
        par: params.clone(),
        c0: ring_add(&a.c0, &b.c0, q),
        c1: ring_add(&a.c1, &b.c1, q),
    }
}

impl Add<&Ciphertext> for &Ciphertext {
    type Output = Ciphertext;

    fn add(self, rhs: &Ciphertext) -> Ciphertext {
        assert!(self.same_shape(rhs), "ciphertexts belong to different parameters");
        eval_add(&self.par.clone(), self, rhs)
    }
}

impl AddAssign<&Ciphertext> for Ciphertext {
    fn add_assign(&mut self, rhs: &Ciphertext) {
        assert!(self.same_shape(rhs), "ciphertexts belong to different parameters");
        let q = self.par.q() as u128;
        self.c0 = ring_add(&self.c0, &rhs.c0, q);
        self.c1 = ring_add(&self.c1, &rhs.c1, q);
    }
}
