//! BFV homomorphic encryption over a power-of-two cyclotomic ring.
//!
//! This crate implements the Brakerski–Fan–Vercauteren scheme in coefficient
//! representation (no CRT/RNS, no NTT — see [`params`] for the structural
//! constraints this implies). Four primitives make up the public contract:
//! key generation, encryption, decryption, and homomorphic evaluation of
//! addition and multiplication (the latter via relinearization variant 2).
//!
//! ```
//! use std::rc::Rc;
//! use bfv_core::{keys, ciphertext, evaluator, params::Params};
//!
//! let params = Rc::new(Params::toy());
//! let (sk, pk) = keys::keygen(&params);
//! let rlk = keys::rlk_gen(&params, &sk);
//!
//! let a = ciphertext::encrypt(&params, &pk, 6).unwrap();
//! let b = ciphertext::encrypt(&params, &pk, 3).unwrap();
//!
//! let sum = ciphertext::eval_add(&params, &a, &b);
//! assert_eq!(ciphertext::decrypt(&params, &sk, &sum).unwrap(), 9);
//!
//! let product = evaluator::eval_mul(&params, &rlk, &a, &b).unwrap();
//! assert_eq!(ciphertext::decrypt(&params, &sk, &product).unwrap(), 18u64 % params.t());
//! ```

pub mod ciphertext;
pub mod error;
pub mod evaluator;
pub mod keys;
pub mod params;
pub mod plaintext;
pub mod poly;
pub mod sampler;
pub mod serialize;
pub mod traits;

pub use ciphertext::{decrypt, encrypt, encrypt_with_rng, eval_add, Ciphertext};
pub use error::{Error, Result};
pub use evaluator::eval_mul;
pub use keys::{keygen, keygen_with_rng, rlk_gen, rlk_gen_with_rng, PublicKey, RelinKey, SecretKey};
pub use params::{Params, ParamsBuilder};
pub use plaintext::Plaintext;
pub use traits::{Decryptor, Encryptor};
