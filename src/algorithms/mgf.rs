//! MGF1 mask generation function common to both PSS and OAEP padding.

use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;

/// XORs `out` with the MGF1 stream `Hash(seed || C(0)) || Hash(seed || C(1)) || ...`
/// where `C(i)` is the counter as four big-endian octets.
pub(crate) fn mgf1_xor(out: &mut [u8], hash: HashAlgorithm, seed: &[u8]) {
    let mut digest = hash.new_digest();
    let mut counter = [0u8; 4];
    let mut i = 0;

    while i < out.len() {
        digest.update(seed);
        digest.update(&counter);
        let digest_output = digest.finalize_reset();

        let mut j = 0;
        while j < digest_output.len() && i < out.len() {
            out[i] ^= digest_output[j];
            j += 1;
            i += 1;
        }
        inc_counter(&mut counter);
    }
}

/// Generate a standalone `mask_len`-octet mask from `seed`.
///
/// RFC 8017 allows masks up to `2^32 * hLen` octets; byte-array indexing
/// caps this implementation at `2^31 - 1 - hLen`, beyond which
/// [`Error::MaskTooLong`] is returned.
pub fn generate_mask(hash: HashAlgorithm, seed: &[u8], mask_len: usize) -> Result<Vec<u8>> {
    if mask_len > i32::MAX as usize - hash.output_size() {
        return Err(Error::MaskTooLong);
    }

    let mut mask = vec![0u8; mask_len];
    mgf1_xor(&mut mask, hash, seed);
    Ok(mask)
}

fn inc_counter(counter: &mut [u8; 4]) {
    for i in (0..4).rev() {
        counter[i] = counter[i].wrapping_add(1);
        if counter[i] != 0 {
            // No overflow
            return;
        }
    }
}
