//! EME-OAEP encoding and decoding ([RFC 8017 § 7.1](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1)).

use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;

/// Encode `msg` into a `k`-octet encoded message `EM = 0x00 || maskedSeed || maskedDB`.
///
/// The message must be no longer than `k - 2 * hLen - 2` octets. The label
/// L is the empty string, hashed at compile time per algorithm.
pub(crate) fn oaep_encode<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    msg: &[u8],
    label_hash: HashAlgorithm,
    mgf_hash: HashAlgorithm,
    k: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let h_len = label_hash.output_size();

    if msg.len() + 2 * h_len + 2 > k {
        return Err(Error::MessageTooLong);
    }

    let mut em = Zeroizing::new(vec![0u8; k]);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_len);
    rng.fill_bytes(seed);

    // DB = lHash || PS || 0x01 || M, of length k - hLen - 1.
    let db_len = k - h_len - 1;
    db[..h_len].copy_from_slice(label_hash.empty_label_hash());
    db[db_len - msg.len() - 1] = 0x01;
    db[db_len - msg.len()..].copy_from_slice(msg);

    mgf1_xor(db, mgf_hash, seed);
    mgf1_xor(seed, mgf_hash, db);

    Ok(em)
}

/// Decode a `k`-octet encoded message, returning the embedded payload.
///
/// All checks that depend on decrypted data are evaluated without early
/// exit and folded into a single [`Error::Decryption`], so failure reveals
/// neither which check rejected the input nor where the separator sat.
pub(crate) fn oaep_decode(
    em: &mut [u8],
    label_hash: HashAlgorithm,
    mgf_hash: HashAlgorithm,
    k: usize,
) -> Result<Vec<u8>> {
    let h_len = label_hash.output_size();

    if em.len() != k || k < 2 * h_len + 2 {
        return Err(Error::Decryption);
    }

    let first_byte_is_zero = em[0].ct_eq(&0u8);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_len);

    mgf1_xor(seed, mgf_hash, db);
    mgf1_xor(db, mgf_hash, seed);

    let hashes_are_equal = db[..h_len].ct_eq(label_hash.empty_label_hash());

    // The rest of DB must be zero or more 0x00 octets followed by 0x01 and
    // the message. The scan runs over the whole block regardless of what it
    // finds.
    //   looking_for_index: still searching for the 0x01 separator
    //   index: offset of the separator relative to the scan start
    //   nonzero_before_one: a padding octet other than 0x00 preceded it
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;
    let mut nonzero_before_one = Choice::from(0u8);

    for (i, el) in db.iter().skip(h_len).enumerate() {
        let equals0 = el.ct_eq(&0u8);
        let equals1 = el.ct_eq(&1u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals1);
        looking_for_index &= !equals1;
        nonzero_before_one |= looking_for_index & !equals0;
    }

    let valid = first_byte_is_zero & hashes_are_equal & !nonzero_before_one & !looking_for_index;

    if !bool::from(valid) {
        return Err(Error::Decryption);
    }

    Ok(db[h_len + index as usize + 1..].to_vec())
}
