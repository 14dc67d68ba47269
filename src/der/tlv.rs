use num_bigint::BigUint;

use super::oid::Oid;
use crate::errors::{Error, Result};

/// ASN.1 universal types with their DER tag octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asn1Type {
    Bool,
    Int,
    BitStr,
    OctStr,
    Null,
    Oid,
    Real,
    Enum,
    Seq,
    Set,
}

impl Asn1Type {
    /// DER encoded tag octet.
    pub fn tag(self) -> u8 {
        match self {
            Asn1Type::Bool => 0x01,
            Asn1Type::Int => 0x02,
            Asn1Type::BitStr => 0x03,
            Asn1Type::OctStr => 0x04,
            Asn1Type::Null => 0x05,
            Asn1Type::Oid => 0x06,
            Asn1Type::Real => 0x09,
            Asn1Type::Enum => 0x10,
            Asn1Type::Seq => 0x30,
            Asn1Type::Set => 0x31,
        }
    }

    /// Resolve a tag octet read from a stream. Only the tags that occur in
    /// the supported key schemas can be resolved.
    pub fn resolve(tag: u8) -> Result<Asn1Type> {
        match tag {
            0x30 => Ok(Asn1Type::Seq),
            0x02 => Ok(Asn1Type::Int),
            0x06 => Ok(Asn1Type::Oid),
            0x05 => Ok(Asn1Type::Null),
            0x04 => Ok(Asn1Type::OctStr),
            _ => Err(Error::decoding("Unsupported tag")),
        }
    }
}

/// Type-length-value unit, the atom of DER encoding. Holds the raw content
/// octets; the length header is derived on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    asn1_type: Asn1Type,
    value: Vec<u8>,
}

impl Tlv {
    /// TLV over raw content octets.
    pub fn new(asn1_type: Asn1Type, value: Vec<u8>) -> Tlv {
        Tlv { asn1_type, value }
    }

    /// NULL value: zero length, no content.
    pub fn null() -> Tlv {
        Tlv {
            asn1_type: Asn1Type::Null,
            value: Vec::new(),
        }
    }

    /// TLV whose content is the compact big-endian form of `value`.
    pub fn from_u32(asn1_type: Asn1Type, value: u32) -> Tlv {
        Tlv {
            asn1_type,
            value: compact_bytes(value),
        }
    }

    /// INTEGER-style TLV for a non-negative big integer. DER integers are
    /// two's complement, so a leading zero octet is inserted whenever the
    /// high bit of the magnitude is set.
    pub fn from_biguint(asn1_type: Asn1Type, value: &BigUint) -> Tlv {
        let magnitude = value.to_bytes_be();
        let mut body = Vec::with_capacity(magnitude.len() + 1);
        if magnitude[0] & 0x80 != 0 {
            body.push(0);
        }
        body.extend_from_slice(&magnitude);
        Tlv {
            asn1_type,
            value: body,
        }
    }

    /// OBJECT IDENTIFIER TLV.
    pub fn from_oid(oid: &Oid) -> Tlv {
        Tlv {
            asn1_type: Asn1Type::Oid,
            value: oid.as_bytes().to_vec(),
        }
    }

    pub fn asn1_type(&self) -> Asn1Type {
        self.asn1_type
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// DER encoded length header for the content octets.
    pub fn encoded_length(&self) -> Vec<u8> {
        encode_length(self.value.len())
    }

    /// Content octets as a small unsigned integer (empty content reads as
    /// zero, matching the unsigned interpretation of `as_biguint`).
    pub fn as_u32(&self) -> u32 {
        self.value
            .iter()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
    }

    /// Content octets as a non-negative big-endian integer.
    pub fn as_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.value)
    }
}

/// DER definite-length header: short form below 128, otherwise a leading
/// octet with the high bit set and the count of length octets in the low
/// seven bits, followed by the compact big-endian length.
pub(crate) fn encode_length(length: usize) -> Vec<u8> {
    if length <= 127 {
        vec![length as u8]
    } else {
        let body = compact_bytes(length as u32);
        let mut out = Vec::with_capacity(body.len() + 1);
        out.push(0x80 | body.len() as u8);
        out.extend_from_slice(&body);
        out
    }
}

/// Minimal big-endian byte form of a `u32`; zero keeps a single octet.
pub(crate) fn compact_bytes(value: u32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take(3).take_while(|&&b| b == 0).count();
    bytes[skip..].to_vec()
}
