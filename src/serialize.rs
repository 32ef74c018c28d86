//! Canonical little-endian, length-prefixed byte encoding for every
//! persistable object: secret key, public key, relinearization key, and
//! ciphertext.
//!
//! Layout is a one-byte format tag, a four-byte (LE) coefficient count `n`,
//! then one or more polynomials of `n` sixteen-byte (LE) signed coefficients
//! each. The tag and `n` let `deserialize` validate shape before trusting the
//! payload; the format makes no attempt at compatibility with any external
//! BFV library's wire format (not required, see the design doc).

use std::io::{Cursor, Read};
use std::rc::Rc;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::keys::{PublicKey, RelinKey, SecretKey};
use crate::params::Params;
use crate::poly::Poly;

const TAG_SECRET_KEY: u8 = 1;
const TAG_PUBLIC_KEY: u8 = 2;
const TAG_RELIN_KEY: u8 = 3;
const TAG_CIPHERTEXT: u8 = 4;

fn write_poly(out: &mut Vec<u8>, p: &Poly) {
    for &c in p.coeffs() {
        out.write_i128::<LittleEndian>(c).expect("Vec<u8> write cannot fail");
    }
}

fn read_poly(cursor: &mut Cursor<&[u8]>, n: usize) -> Result<Poly> {
    let mut coeffs = Vec::with_capacity(n);
    for _ in 0..n {
        let c = cursor
            .read_i128::<LittleEndian>()
            .map_err(|e| Error::Serialization(format!("truncated polynomial: {e}")))?;
        coeffs.push(c);
    }
    Ok(Poly::from_coeffs(coeffs))
}

fn write_header(out: &mut Vec<u8>, tag: u8, n: u32) {
    out.push(tag);
    out.write_u32::<LittleEndian>(n).expect("Vec<u8> write cannot fail");
}

fn read_header(cursor: &mut Cursor<&[u8]>, expected_tag: u8) -> Result<u32> {
    let mut tag_buf = [0u8; 1];
    cursor
        .read_exact(&mut tag_buf)
        .map_err(|e| Error::Serialization(format!("truncated header: {e}")))?;
    if tag_buf[0] != expected_tag {
        return Err(Error::Serialization(format!(
            "unexpected format tag {} (expected {})",
            tag_buf[0], expected_tag
        )));
    }
    cursor
        .read_u32::<LittleEndian>()
        .map_err(|e| Error::Serialization(format!("truncated header: {e}")))
}

fn check_degree(params: &Rc<Params>, n: u32) -> Result<()> {
    if n as usize != params.degree() {
        return Err(Error::Domain(format!(
            "serialized coefficient count {n} does not match ring dimension {}",
            params.degree()
        )));
    }
    Ok(())
}

/// Serialize a secret key.
pub fn serialize_secret_key(sk: &SecretKey) -> Vec<u8> {
    let mut out = Vec::new();
    write_header(&mut out, TAG_SECRET_KEY, sk.poly().degree() as u32);
    write_poly(&mut out, sk.poly());
    out
}

/// Deserialize a secret key, validating its shape against `params`.
pub fn deserialize_secret_key(params: &Rc<Params>, bytes: &[u8]) -> Result<SecretKey> {
    let mut cursor = Cursor::new(bytes);
    let n = read_header(&mut cursor, TAG_SECRET_KEY)?;
    check_degree(params, n)?;
    let s = read_poly(&mut cursor, n as usize)?;
    Ok(SecretKey {
        par: params.clone(),
        s,
    })
}

/// Serialize a public key.
pub fn serialize_public_key(pk: &PublicKey) -> Vec<u8> {
    let mut out = Vec::new();
    write_header(&mut out, TAG_PUBLIC_KEY, pk.pk0.degree() as u32);
    write_poly(&mut out, &pk.pk0);
    write_poly(&mut out, &pk.pk1);
    out
}

/// Deserialize a public key, validating its shape against `params`.
pub fn deserialize_public_key(params: &Rc<Params>, bytes: &[u8]) -> Result<PublicKey> {
    let mut cursor = Cursor::new(bytes);
    let n = read_header(&mut cursor, TAG_PUBLIC_KEY)?;
    check_degree(params, n)?;
    let pk0 = read_poly(&mut cursor, n as usize)?;
    let pk1 = read_poly(&mut cursor, n as usize)?;
    if !pk0.in_range(params.q() as u128) || !pk1.in_range(params.q() as u128) {
        return Err(Error::Domain(
            "public key coefficient out of range [0, Q)".to_string(),
        ));
    }
    Ok(PublicKey {
        par: params.clone(),
        pk0,
        pk1,
    })
}

/// Serialize a relinearization key.
pub fn serialize_relin_key(rlk: &RelinKey) -> Vec<u8> {
    let mut out = Vec::new();
    write_header(&mut out, TAG_RELIN_KEY, rlk.rlk0.degree() as u32);
    write_poly(&mut out, &rlk.rlk0);
    write_poly(&mut out, &rlk.rlk1);
    out
}

/// Deserialize a relinearization key, validating its shape against `params`.
pub fn deserialize_relin_key(params: &Rc<Params>, bytes: &[u8]) -> Result<RelinKey> {
    let mut cursor = Cursor::new(bytes);
    let n = read_header(&mut cursor, TAG_RELIN_KEY)?;
    check_degree(params, n)?;
    let rlk0 = read_poly(&mut cursor, n as usize)?;
    let rlk1 = read_poly(&mut cursor, n as usize)?;
    if !rlk0.in_range(params.qp()) || !rlk1.in_range(params.qp()) {
        return Err(Error::Domain(
            "relinearization key coefficient out of range [0, QP)".to_string(),
        ));
    }
    Ok(RelinKey {
        par: params.clone(),
        rlk0,
        rlk1,
    })
}

/// Serialize a ciphertext.
pub fn serialize_ciphertext(ct: &Ciphertext) -> Vec<u8> {
    let mut out = Vec::new();
    write_header(&mut out, TAG_CIPHERTEXT, ct.c0().degree() as u32);
    write_poly(&mut out, ct.c0());
    write_poly(&mut out, ct.c1());
    out
}

/// Deserialize a ciphertext, validating its shape against `params`.
pub fn deserialize_ciphertext(params: &Rc<Params>, bytes: &[u8]) -> Result<Ciphertext> {
    let mut cursor = Cursor::new(bytes);
    let n = read_header(&mut cursor, TAG_CIPHERTEXT)?;
    check_degree(params, n)?;
    let c0 = read_poly(&mut cursor, n as usize)?;
    let c1 = read_poly(&mut cursor, n as usize)?;
    if !c0.in_range(params.q() as u128) || !c1.in_range(params.q() as u128) {
        return Err(Error::Domain(
            "ciphertext coefficient out of range [0, Q)".to_string(),
        ));
    }
    Ok(Ciphertext::from_parts(params.clone(), c0, c1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ciphertext::encrypt_with_rng;
    use crate::keys::{keygen_with_rng, rlk_gen_with_rng, seeded_rng};

    #[test]
    fn secret_key_roundtrips() {
        let params = Rc::new(Params::toy());
        let mut rng = seeded_rng(40);
        let (sk, _pk) = keygen_with_rng(&params, &mut rng);
        let bytes = serialize_secret_key(&sk);
        let back = deserialize_secret_key(&params, &bytes).unwrap();
        assert_eq!(sk.poly(), back.poly());
    }

    #[test]
    fn public_key_roundtrips() {
        let params = Rc::new(Params::toy());
        let mut rng = seeded_rng(41);
        let (_sk, pk) = keygen_with_rng(&params, &mut rng);
        let bytes = serialize_public_key(&pk);
        let back = deserialize_public_key(&params, &bytes).unwrap();
        assert_eq!(pk, back);
    }

    #[test]
    fn relin_key_roundtrips() {
        let params = Rc::new(Params::toy());
        let mut rng = seeded_rng(42);
        let (sk, _pk) = keygen_with_rng(&params, &mut rng);
        let rlk = rlk_gen_with_rng(&params, &sk, &mut rng);
        let bytes = serialize_relin_key(&rlk);
        let back = deserialize_relin_key(&params, &bytes).unwrap();
        assert_eq!(rlk, back);
    }

    #[test]
    fn ciphertext_roundtrips() {
        let params = Rc::new(Params::toy());
        let mut rng = seeded_rng(43);
        let (_sk, pk) = keygen_with_rng(&params, &mut rng);
        let ct = encrypt_with_rng(&params, &pk, 7, &mut rng).unwrap();
        let bytes = serialize_ciphertext(&ct);
        let back = deserialize_ciphertext(&params, &bytes).unwrap();
        assert_eq!(ct, back);
    }

    #[test]
    fn deserialize_rejects_wrong_tag() {
        let params = Rc::new(Params::toy());
        let mut rng = seeded_rng(44);
        let (sk, _pk) = keygen_with_rng(&params, &mut rng);
        let bytes = serialize_secret_key(&sk);
        let err = deserialize_public_key(&params, &bytes);
        assert!(matches!(err, Err(Error::Serialization(_))));
    }

    #[test]
    fn deserialize_rejects_mismatched_degree() {
        let toy = Rc::new(Params::toy());
        let other = Rc::new(
            crate::params::ParamsBuilder::default()
                .n(8usize)
                .q(1u64 << 16)
                .t(16u64)
                .p(1u64 << 8)
                .sigma(1.0)
                .sigma_prime(2.0)
                .build()
                .unwrap(),
        );
        let mut rng = seeded_rng(45);
        let (sk, _pk) = keygen_with_rng(&toy, &mut rng);
        let bytes = serialize_secret_key(&sk);
        let err = deserialize_secret_key(&other, &bytes);
        assert!(matches!(err, Err(Error::Domain(_))));
    }

    #[test]
    fn deserialize_rejects_truncated_payload() {
        let params = Rc::new(Params::toy());
        let mut rng = seeded_rng(46);
        let (sk, _pk) = keygen_with_rng(&params, &mut rng);
        let mut bytes = serialize_secret_key(&sk);
        bytes.truncate(bytes.len() - 4);
        let err = deserialize_secret_key(&params, &bytes);
        assert!(matches!(err, Err(Error::Serialization(_))));
    }
}
