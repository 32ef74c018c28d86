//! Ciphertext-domain multiplication and relinearization.

use std::rc::Rc;

use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keys::RelinKey;
use crate::params::Params;
use crate::poly::{ring_add, ring_add_unreduced, ring_mul_unreduced, scale_round_mod};

/// Homomorphically multiply `a` and `b` under `rlk`, returning a fresh
/// degree-1 ciphertext.
///
/// Three phases, matching the design doc exactly: scale-and-round the tensor
/// product (Phase 1), relinearize the degree-2 term away using `rlk`
/// (Phase 2), then assemble the result (Phase 3).
pub fn eval_mul(
    params: &Rc<Params>,
    rlk: &RelinKey,
    a: &Ciphertext,
    b: &Ciphertext,
) -> Result<Ciphertext> {
    if rlk.params() != params {
        return Err(Error::Domain(
            "relinearization key was generated under different parameters".to_string(),
        ));
    }
    if a.params() != params || b.params() != params {
        return Err(Error::Domain(
            "ciphertext was generated under different parameters".to_string(),
        ));
    }

    let q = params.q() as u128;
    let t = params.t() as i128;
    let q_i = params.q() as i128;
    let p_i = params.p() as i128;

    // Phase 1: scale-and-round the tensor product. The raw products are
    // computed in the integers (reduced mod x^n+1 only) *before* any
    // reduction mod Q, then scaled by T and divided by Q with rounding.
    let d0_raw = ring_mul_unreduced(a.c0(), b.c0());
    let d1_raw = ring_add_unreduced(
        &ring_mul_unreduced(a.c0(), b.c1()),
        &ring_mul_unreduced(a.c1(), b.c0()),
    );
    let d2_raw = ring_mul_unreduced(a.c1(), b.c1());

    let d0 = scale_round_mod(&d0_raw, t, q_i, q);
    let d1 = scale_round_mod(&d1_raw, t, q_i, q);
    let d2 = scale_round_mod(&d2_raw, t, q_i, q);

    // Phase 2: relinearize. d2*s^2 is approximated via rlk without ever
    // needing s^2 directly.
    let r0_raw = ring_mul_unreduced(&d2, &rlk.rlk0);
    let r1_raw = ring_mul_unreduced(&d2, &rlk.rlk1);
    let r0 = scale_round_mod(&r0_raw, 1, p_i, q);
    let r1 = scale_round_mod(&r1_raw, 1, p_i, q);

    // Phase 3: assemble.
    let c0 = ring_add(&d0, &r0, q);
    let c1 = ring_add(&d1, &r1, q);

    tracing::trace!(n = params.degree(), "evaluated homomorphic multiplication");

    Ok(Ciphertext::from_parts(params.clone(), c0, c1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ciphertext::{decrypt, encrypt_with_rng};
    use crate::keys::{keygen_with_rng, rlk_gen_with_rng, seeded_rng};

    #[test]
    fn eval_mul_matches_modular_multiplication() {
        let params = Rc::new(Params::toy());
        let mut rng = seeded_rng(20);
        let (sk, pk) = keygen_with_rng(&params, &mut rng);
        let rlk = rlk_gen_with_rng(&params, &sk, &mut rng);

        let ct_a = encrypt_with_rng(&params, &pk, 2, &mut rng).unwrap();
        let ct_b = encrypt_with_rng(&params, &pk, 3, &mut rng).unwrap();

        let prod = eval_mul(&params, &rlk, &ct_a, &ct_b).unwrap();
        assert_eq!(decrypt(&params, &sk, &prod).unwrap(), 6);
    }

    #[test]
    fn eval_mul_wraps_modulo_t() {
        let params = Rc::new(Params::toy());
        let mut rng = seeded_rng(21);
        let (sk, pk) = keygen_with_rng(&params, &mut rng);
        let rlk = rlk_gen_with_rng(&params, &sk, &mut rng);

        let ct_a = encrypt_with_rng(&params, &pk, 5, &mut rng).unwrap();
        let ct_b = encrypt_with_rng(&params, &pk, 4, &mut rng).unwrap();

        let prod = eval_mul(&params, &rlk, &ct_a, &ct_b).unwrap();
        assert_eq!(decrypt(&params, &sk, &prod).unwrap(), 4);
    }

    #[test]
    fn chained_add_then_mul() {
        let params = Rc::new(Params::toy());
        let mut rng = seeded_rng(22);
        let (sk, pk) = keygen_with_rng(&params, &mut rng);
        let rlk = rlk_gen_with_rng(&params, &sk, &mut rng);

        let ct_1 = encrypt_with_rng(&params, &pk, 1, &mut rng).unwrap();
        let ct_2 = encrypt_with_rng(&params, &pk, 2, &mut rng).unwrap();
        let ct_3 = encrypt_with_rng(&params, &pk, 3, &mut rng).unwrap();

        let sum = crate::ciphertext::eval_add(&params, &ct_1, &ct_2);
        let prod = eval_mul(&params, &rlk, &sum, &ct_3).unwrap();
        assert_eq!(decrypt(&params, &sk, &prod).unwrap(), 9);
    }

    #[test]
    fn eval_mul_rejects_mismatched_relin_key() {
        let params = Rc::new(Params::toy());
        let other = Rc::new(Params::production());
        let mut rng = seeded_rng(23);
        let (_sk, pk) = keygen_with_rng(&params, &mut rng);
        let (other_sk, _) = keygen_with_rng(&other, &mut rng);
        let bad_rlk = rlk_gen_with_rng(&other, &other_sk, &mut rng);

        let ct_a = encrypt_with_rng(&params, &pk, 2, &mut rng).unwrap();
        let ct_b = encrypt_with_rng(&params, &pk, 3, &mut rng).unwrap();
        let err = eval_mul(&params, &bad_rlk, &ct_a, &ct_b);
        assert!(matches!(err, Err(Error::Domain(_))));
    }
}
