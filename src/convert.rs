//! Integer / octet-string conversions from [RFC 8017 § 4](https://datatracker.ietf.org/doc/html/rfc8017#section-4).

use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::{Error, Result};

/// OS2IP: interpret an octet string as a big-endian unsigned integer.
#[inline]
pub fn os2ip(input: &[u8]) -> BigUint {
    BigUint::from_bytes_be(input)
}

/// I2OSP: convert a non-negative integer to a big-endian octet string of
/// exactly `x_len` octets, left padded with zeros.
///
/// Fails with [`Error::IntegerTooLarge`] when `x >= 256^x_len`.
pub fn i2osp(x: &BigUint, x_len: usize) -> Result<Vec<u8>> {
    if x.is_zero() {
        return Ok(vec![0u8; x_len]);
    }

    let bytes = x.to_bytes_be();
    if bytes.len() > x_len {
        return Err(Error::IntegerTooLarge);
    }

    let mut out = vec![0u8; x_len];
    out[x_len - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}
