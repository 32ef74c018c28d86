//! Plaintext encoding: a single integer in `[0, T)`, encoded as the
//! constant-coefficient polynomial `m + 0·x + ... + 0·x^{n-1}`.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::params::Params;
use crate::poly::Poly;

/// A plaintext integer `m` with `0 <= m < T`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plaintext {
    pub(crate) par: Rc<Params>,
    pub(crate) value: u64,
}

impl Plaintext {
    /// Construct a plaintext from an integer, rejecting values outside
    /// `[0, T)`.
    pub fn new(params: &Rc<Params>, value: u64) -> Result<Self> {
        if value >= params.t() {
            return Err(Error::Domain(format!(
                "plaintext value {value} is not in [0, {})",
                params.t()
            )));
        }
        Ok(Plaintext {
            par: params.clone(),
            value,
        })
    }

    /// The underlying integer.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Encode as the length-n polynomial with `m` in the constant
    /// coefficient and zeros elsewhere, every other coefficient forced to
    /// zero by construction.
    pub(crate) fn encode(&self) -> Poly {
        let mut coeffs = vec![0i128; self.par.degree()];
        coeffs[0] = self.value as i128;
        Poly::from_coeffs(coeffs)
    }

    /// Encode and scale by Δ = ⌊Q/T⌋, ready to be folded into a fresh
    /// ciphertext's `c0`.
    pub(crate) fn encode_scaled(&self) -> Poly {
        let delta = self.par.delta() as i128;
        let mut coeffs = self.encode().into_coeffs();
        coeffs[0] *= delta;
        Poly::from_coeffs(coeffs)
    }

    /// Recover a `Plaintext` from a decrypted, unscaled polynomial: take the
    /// constant coefficient modulo T. The remaining coefficients are
    /// expected to be zero or near-zero for a fresh ciphertext and are
    /// discarded, per the design doc.
    pub(crate) fn from_decoded(params: &Rc<Params>, decoded: &Poly) -> Self {
        let t = params.t() as i128;
        let v = decoded.coeffs()[0].rem_euclid(t) as u64;
        Plaintext {
            par: params.clone(),
            value: v,
        }
    }
}
