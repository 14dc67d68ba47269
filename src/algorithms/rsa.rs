//! RSA primitives ([RFC 8017 § 5](https://datatracker.ietf.org/doc/html/rfc8017#section-5)).
//!
//! The private-key operations take the CRT fast path whenever the key
//! carries its CRT components, falling back to a plain `c^d mod n`
//! exponentiation otherwise. Blinding is applied by the callers, around
//! these primitives.

use num_bigint::{BigInt, BigUint, Sign::Plus};
use num_traits::Signed;

use crate::errors::{Error, Result};
use crate::key::{PublicKeyParts, RsaPrivateKey, RsaPublicKey};

/// RSAEP: `c = m^e mod n`.
#[inline]
pub(crate) fn rsaep(pub_key: &RsaPublicKey, m: &BigUint) -> Result<BigUint> {
    if m >= pub_key.n() {
        return Err(Error::MessageRepresentativeOutOfRange);
    }
    Ok(m.modpow(pub_key.e(), pub_key.n()))
}

/// RSAVP1: `m = s^e mod n`.
#[inline]
pub(crate) fn rsavp1(pub_key: &RsaPublicKey, s: &BigUint) -> Result<BigUint> {
    if s >= pub_key.n() {
        return Err(Error::InvalidSignature);
    }
    Ok(s.modpow(pub_key.e(), pub_key.n()))
}

/// RSADP: recover the message representative from a ciphertext
/// representative.
#[inline]
pub(crate) fn rsadp(priv_key: &RsaPrivateKey, c: &BigUint) -> Result<BigUint> {
    if c >= priv_key.n() {
        return Err(Error::Decryption);
    }
    Ok(crt_power(priv_key, c))
}

/// RSASP1: produce the signature representative from a message
/// representative. Structurally identical to RSADP.
#[inline]
pub(crate) fn rsasp1(priv_key: &RsaPrivateKey, m: &BigUint) -> Result<BigUint> {
    if m >= priv_key.n() {
        return Err(Error::MessageRepresentativeOutOfRange);
    }
    Ok(crt_power(priv_key, m))
}

/// Private-key exponentiation, via the CRT when possible.
fn crt_power(priv_key: &RsaPrivateKey, c: &BigUint) -> BigUint {
    let crt = match priv_key.crt() {
        Some(crt) => crt,
        None => return c.modpow(priv_key.d(), priv_key.n()),
    };

    let p = priv_key.p();
    let q = priv_key.q();

    // m1 = c^dP mod p, m2 = c^dQ mod q
    let m1 = c.modpow(crt.dp(), p);
    let m2 = c.modpow(crt.dq(), q);

    // h = (m1 - m2) * qInv mod p; the difference may be negative, so lift
    // into signed integers and correct by multiples of p.
    let p_int = BigInt::from_biguint(Plus, p.clone());
    let mut h = BigInt::from_biguint(Plus, m1) - BigInt::from_biguint(Plus, m2.clone());
    while h.is_negative() {
        h += &p_int;
    }
    h *= BigInt::from_biguint(Plus, crt.qinv().clone());
    h %= &p_int;

    // m = m2 + q * h
    let mut m = h;
    m *= BigInt::from_biguint(Plus, q.clone());
    m += BigInt::from_biguint(Plus, m2);

    m.to_biguint().expect("CRT recombination is non-negative")
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    fn uint(v: u64) -> BigUint {
        BigUint::from_u64(v).unwrap()
    }

    // p = 61, q = 53, n = 3233, e = 17, d = 413 (mod lambda(n) = 780),
    // dP = 53, dQ = 49, qInv = 38.
    fn toy_key() -> (RsaPrivateKey, RsaPublicKey) {
        let private = RsaPrivateKey::from_crt_components(
            uint(413),
            uint(17),
            uint(3233),
            uint(61),
            uint(53),
            uint(53),
            uint(49),
            uint(38),
        )
        .unwrap();
        let public = RsaPublicKey::new(uint(3233), uint(17)).unwrap();
        (private, public)
    }

    #[test]
    fn encrypt_decrypt_via_crt() {
        let (private, public) = toy_key();
        for m in [0u64, 1, 42, 65, 3232] {
            let c = rsaep(&public, &uint(m)).unwrap();
            assert_eq!(rsadp(&private, &c).unwrap(), uint(m));
        }
    }

    #[test]
    fn sign_verify_representatives() {
        let (private, public) = toy_key();
        let s = rsasp1(&private, &uint(123)).unwrap();
        assert_eq!(rsavp1(&public, &s).unwrap(), uint(123));
    }

    #[test]
    fn out_of_range_representatives_rejected() {
        let (private, public) = toy_key();
        assert_eq!(
            rsaep(&public, &uint(3233)),
            Err(Error::MessageRepresentativeOutOfRange)
        );
        assert_eq!(rsavp1(&public, &uint(4000)), Err(Error::InvalidSignature));
        assert_eq!(rsadp(&private, &uint(3233)), Err(Error::Decryption));
        assert_eq!(
            rsasp1(&private, &uint(9999)),
            Err(Error::MessageRepresentativeOutOfRange)
        );
    }

    #[test]
    fn crt_matches_plain_exponentiation() {
        let (private, _) = toy_key();
        for m in [2u64, 100, 1000, 3000] {
            let plain = uint(m).modpow(private.d(), private.n());
            assert_eq!(crt_power(&private, &uint(m)), plain);
        }
    }
}
