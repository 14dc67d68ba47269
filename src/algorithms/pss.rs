//! EMSA-PSS encoding and verification ([RFC 8017 § 9.1](https://datatracker.ietf.org/doc/html/rfc8017#section-9.1)).

use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;

const PADDING1: [u8; 8] = [0u8; 8];

/// Encode `m_hash` into `EM = maskedDB || H || 0xBC` of `ceil(em_bits / 8)`
/// octets, with a fresh random salt of `s_len` octets.
pub(crate) fn emsa_pss_encode<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    m_hash: &[u8],
    em_bits: usize,
    s_len: usize,
    pss_hash: HashAlgorithm,
    mgf_hash: HashAlgorithm,
) -> Result<Vec<u8>> {
    let h_len = pss_hash.output_size();
    let em_len = (em_bits + 7) / 8;

    if m_hash.len() != h_len {
        return Err(Error::InvalidArguments);
    }
    if em_len < h_len + s_len + 2 {
        return Err(Error::InvalidArguments);
    }

    let mut salt = vec![0u8; s_len];
    rng.fill_bytes(&mut salt);

    // H = Hash(0x00 * 8 || mHash || salt)
    let mut hash = pss_hash.new_digest();
    hash.update(&PADDING1);
    hash.update(m_hash);
    hash.update(&salt);
    let hashed = hash.finalize_reset();

    let mut em = vec![0u8; em_len];
    let (db, h) = em.split_at_mut(em_len - h_len - 1);
    let h = &mut h[..h_len];
    h.copy_from_slice(&hashed);

    // DB = PS || 0x01 || salt, of length emLen - hLen - 1.
    let db_len = db.len();
    db[db_len - s_len - 1] = 0x01;
    db[db_len - s_len..].copy_from_slice(&salt);

    mgf1_xor(db, mgf_hash, h);

    // Clear the top 8 * emLen - emBits bits of the leftmost octet so that
    // OS2IP(EM) stays below 2^emBits.
    db[0] &= 0xff >> (8 * em_len - em_bits);

    em[em_len - 1] = 0xbc;

    Ok(em)
}

/// Check that `em` is a consistent PSS encoding of `m_hash`.
///
/// Structure checks on the public encoding may return early; the final
/// digest comparison is constant time.
pub(crate) fn emsa_pss_verify(
    m_hash: &[u8],
    em: &mut [u8],
    em_bits: usize,
    s_len: usize,
    pss_hash: HashAlgorithm,
    mgf_hash: HashAlgorithm,
) -> bool {
    let h_len = pss_hash.output_size();
    let em_len = em.len();

    if m_hash.len() != h_len {
        return false;
    }
    if em_len < h_len + s_len + 2 {
        return false;
    }
    if em[em_len - 1] != 0xbc {
        return false;
    }

    let (db, rest) = em.split_at_mut(em_len - h_len - 1);
    let h = &rest[..h_len];

    let zeros = 8 * em_len - em_bits;
    if zeros != 0 && db[0] & (0xff << (8 - zeros)) != 0 {
        return false;
    }

    mgf1_xor(db, mgf_hash, h);
    db[0] &= 0xff >> zeros;

    // DB must be emLen - hLen - sLen - 2 zero octets, 0x01, then the salt.
    let ps_len = em_len - h_len - s_len - 2;
    if db[..ps_len].iter().any(|&b| b != 0) {
        return false;
    }
    if db[ps_len] != 0x01 {
        return false;
    }

    let salt = &db[db.len() - s_len..];

    let mut hash = pss_hash.new_digest();
    hash.update(&PADDING1);
    hash.update(m_hash);
    hash.update(salt);
    let h_mark = hash.finalize_reset();

    bool::from(h_mark.ct_eq(h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    const EM_BITS: usize = 1023;

    fn encode(seed: u8, s_len: usize, hash: HashAlgorithm) -> (Vec<u8>, Vec<u8>) {
        let mut rng = ChaCha8Rng::from_seed([seed; 32]);
        let m_hash = hash.digest(b"hello world");
        let em = emsa_pss_encode(&mut rng, &m_hash, EM_BITS, s_len, hash, hash).unwrap();
        (m_hash, em)
    }

    #[test]
    fn encode_verify_round_trip() {
        let (m_hash, mut em) = encode(1, 20, HashAlgorithm::Sha1);
        assert_eq!(em.len(), (EM_BITS + 7) / 8);
        assert_eq!(*em.last().unwrap(), 0xbc);
        assert!(emsa_pss_verify(
            &m_hash,
            &mut em,
            EM_BITS,
            20,
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha1
        ));
    }

    #[test]
    fn zero_salt_round_trip() {
        let (m_hash, mut em) = encode(2, 0, HashAlgorithm::Sha256);
        assert!(emsa_pss_verify(
            &m_hash,
            &mut em,
            EM_BITS,
            0,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha256
        ));
    }

    #[test]
    fn top_bits_are_cleared() {
        let (_, em) = encode(3, 20, HashAlgorithm::Sha1);
        assert_eq!(em[0] & 0x80, 0);
    }

    #[test]
    fn tampered_encoding_rejected() {
        let (m_hash, em) = encode(4, 20, HashAlgorithm::Sha1);
        for pos in [0usize, 10, em.len() - 2] {
            let mut tampered = em.clone();
            tampered[pos] ^= 0x08;
            assert!(!emsa_pss_verify(
                &m_hash,
                &mut tampered,
                EM_BITS,
                20,
                HashAlgorithm::Sha1,
                HashAlgorithm::Sha1
            ));
        }
    }

    #[test]
    fn wrong_message_rejected() {
        let (_, mut em) = encode(5, 20, HashAlgorithm::Sha1);
        let other = HashAlgorithm::Sha1.digest(b"other message");
        assert!(!emsa_pss_verify(
            &other,
            &mut em,
            EM_BITS,
            20,
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha1
        ));
    }

    #[test]
    fn missing_trailer_rejected() {
        let (m_hash, mut em) = encode(6, 20, HashAlgorithm::Sha1);
        let last = em.len() - 1;
        em[last] = 0xbd;
        assert!(!emsa_pss_verify(
            &m_hash,
            &mut em,
            EM_BITS,
            20,
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha1
        ));
    }

    #[test]
    fn salt_too_long_for_modulus_rejected() {
        let mut rng = ChaCha8Rng::from_seed([13; 32]);
        let m_hash = HashAlgorithm::Sha512.digest(b"x");
        // emLen = 64 cannot hold hLen 64 + sLen 64 + 2.
        let result = emsa_pss_encode(
            &mut rng,
            &m_hash,
            511,
            64,
            HashAlgorithm::Sha512,
            HashAlgorithm::Sha512,
        );
        assert_eq!(result.unwrap_err(), Error::InvalidArguments);
    }
}
