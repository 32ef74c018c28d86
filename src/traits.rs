//! Trait surface for encryption and decryption, so callers can be generic
//! over "something that can encrypt" / "something that can decrypt" rather
//! than naming `PublicKey`/`SecretKey` directly.

use std::rc::Rc;

use rand::RngCore;

use crate::ciphertext::{decrypt, encrypt_with_rng, Ciphertext};
use crate::error::Result;
use crate::keys::{PublicKey, SecretKey};
use crate::params::Params;

/// Something that can turn a plaintext integer into a ciphertext.
pub trait Encryptor {
    /// Encrypt `m`, drawing randomness from `rng`.
    fn encrypt_with_rng<R: RngCore + ?Sized>(
        &self,
        params: &Rc<Params>,
        m: u64,
        rng: &mut R,
    ) -> Result<Ciphertext>;

    /// Encrypt `m`, drawing randomness from the process CSPRNG.
    fn encrypt(&self, params: &Rc<Params>, m: u64) -> Result<Ciphertext> {
        self.encrypt_with_rng(params, m, &mut rand::thread_rng())
    }
}

impl Encryptor for PublicKey {
    fn encrypt_with_rng<R: RngCore + ?Sized>(
        &self,
        params: &Rc<Params>,
        m: u64,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        encrypt_with_rng(params, self, m, rng)
    }
}

/// Something that can recover a plaintext integer from a ciphertext.
pub trait Decryptor {
    /// Decrypt `ct`.
    fn decrypt(&self, params: &Rc<Params>, ct: &Ciphertext) -> Result<u64>;
}

impl Decryptor for SecretKey {
    fn decrypt(&self, params: &Rc<Params>, ct: &Ciphertext) -> Result<u64> {
        decrypt(params, self, ct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{keygen_with_rng, seeded_rng};

    #[test]
    fn trait_based_roundtrip_matches_free_functions() {
        let params = Rc::new(Params::toy());
        let mut rng = seeded_rng(30);
        let (sk, pk) = keygen_with_rng(&params, &mut rng);

        let ct = pk.encrypt_with_rng(&params, 9, &mut rng).unwrap();
        let m = sk.decrypt(&params, &ct).unwrap();
        assert_eq!(m, 9);
    }
}
