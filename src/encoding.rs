//! DER serialization of RSA keys: PKCS #1 `RSAPublicKey` /
//! `RSAPrivateKey` and PKCS #8 `PrivateKeyInfo`.

use subtle::ConstantTimeEq;

use crate::der::{Asn1Type, DerReader, DerWriter, Oid, Tlv};
use crate::errors::{Error, Result};
use crate::key::{KeyPair, PublicKeyParts, RsaPrivateKey, RsaPublicKey};

/// rsaEncryption object identifier.
const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";

/// DER encoded subidentifiers of [`RSA_ENCRYPTION_OID`]; decode compares
/// against this in constant time.
const RSA_ENCRYPTION_OID_BYTES: [u8; 9] = [0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01];

/// Public key encoding schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKeyEncodingScheme {
    /// PKCS #1 `RSAPublicKey`, DER encoded.
    DerPkcs1,
}

/// Private key encoding schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateKeyEncodingScheme {
    /// PKCS #1 `RSAPrivateKey`, DER encoded.
    DerPkcs1,
    /// PKCS #8 `PrivateKeyInfo` wrapping the PKCS #1 structure.
    DerPkcs8,
}

impl RsaPublicKey {
    /// Encode the public key.
    pub fn encode(&self, scheme: PublicKeyEncodingScheme) -> Result<Vec<u8>> {
        match scheme {
            PublicKeyEncodingScheme::DerPkcs1 => Ok(encode_public_pkcs1(self)),
        }
    }

    /// Decode a public key.
    pub fn decode(key: &[u8], scheme: PublicKeyEncodingScheme) -> Result<RsaPublicKey> {
        match scheme {
            PublicKeyEncodingScheme::DerPkcs1 => decode_public_pkcs1(key),
        }
    }
}

impl RsaPrivateKey {
    /// Encode the private key.
    pub fn encode(&self, scheme: PrivateKeyEncodingScheme) -> Result<Vec<u8>> {
        match scheme {
            PrivateKeyEncodingScheme::DerPkcs1 => Ok(encode_private_pkcs1(self)),
            PrivateKeyEncodingScheme::DerPkcs8 => encode_private_pkcs8(self),
        }
    }

    /// Decode a private key.
    ///
    /// Both supported schemes serialize `(n, e)` alongside the private
    /// components, so the embedded public key is returned as well.
    pub fn decode(key: &[u8], scheme: PrivateKeyEncodingScheme) -> Result<KeyPair> {
        match scheme {
            PrivateKeyEncodingScheme::DerPkcs1 => decode_private_pkcs1(key),
            PrivateKeyEncodingScheme::DerPkcs8 => decode_private_pkcs8(key),
        }
    }
}

/// PKCS #1 `RSAPublicKey ::= SEQUENCE { modulus, publicExponent }`.
fn encode_public_pkcs1(key: &RsaPublicKey) -> Vec<u8> {
    let mut inner = DerWriter::new();
    inner.write_tlv(&Tlv::from_biguint(Asn1Type::Int, key.n()));
    inner.write_tlv(&Tlv::from_biguint(Asn1Type::Int, key.e()));

    let mut outer = DerWriter::new();
    outer.write_tlv(&Tlv::new(Asn1Type::Seq, inner.into_bytes()));
    outer.into_bytes()
}

fn decode_public_pkcs1(key: &[u8]) -> Result<RsaPublicKey> {
    let seq = DerReader::new(key).read_tlv()?;
    if seq.asn1_type() != Asn1Type::Seq {
        return Err(Error::decoding("Expected pkcs1 sequence tag"));
    }

    let mut inner = DerReader::new(seq.value());
    let n = read_integer(&mut inner)?;
    let e = read_integer(&mut inner)?;
    RsaPublicKey::new(n, e)
}

/// PKCS #1 two-prime `RSAPrivateKey` (version 0). A key without CRT
/// components would emit empty INTEGER placeholders for the last three
/// fields, which no strict decoder (including this one) accepts; the public
/// constructors always populate the CRT set.
fn encode_private_pkcs1(key: &RsaPrivateKey) -> Vec<u8> {
    let mut inner = DerWriter::new();
    inner.write_tlv(&Tlv::from_u32(Asn1Type::Int, 0));
    inner.write_tlv(&Tlv::from_biguint(Asn1Type::Int, key.n()));
    inner.write_tlv(&Tlv::from_biguint(Asn1Type::Int, key.e()));
    inner.write_tlv(&Tlv::from_biguint(Asn1Type::Int, key.d()));
    inner.write_tlv(&Tlv::from_biguint(Asn1Type::Int, key.p()));
    inner.write_tlv(&Tlv::from_biguint(Asn1Type::Int, key.q()));
    match key.crt() {
        Some(crt) => {
            inner.write_tlv(&Tlv::from_biguint(Asn1Type::Int, crt.dp()));
            inner.write_tlv(&Tlv::from_biguint(Asn1Type::Int, crt.dq()));
            inner.write_tlv(&Tlv::from_biguint(Asn1Type::Int, crt.qinv()));
        }
        None => {
            for _ in 0..3 {
                inner.write_tlv(&Tlv::new(Asn1Type::Int, Vec::new()));
            }
        }
    }

    let mut outer = DerWriter::new();
    outer.write_tlv(&Tlv::new(Asn1Type::Seq, inner.into_bytes()));
    outer.into_bytes()
}

fn decode_private_pkcs1(key: &[u8]) -> Result<KeyPair> {
    let seq = DerReader::new(key).read_tlv()?;
    if seq.asn1_type() != Asn1Type::Seq {
        return Err(Error::decoding("Expected pkcs1 sequence tag"));
    }

    let mut inner = DerReader::new(seq.value());
    let version = inner.read_tlv()?;
    if version.asn1_type() != Asn1Type::Int {
        return Err(Error::decoding("Expected pkcs1 version"));
    }
    if version.as_u32() != 0 {
        return Err(Error::decoding("Expected two-prime pkcs1 version key"));
    }

    let n = read_integer(&mut inner)?;
    let e = read_integer(&mut inner)?;
    let d = read_integer(&mut inner)?;
    let p = read_integer(&mut inner)?;
    let q = read_integer(&mut inner)?;
    let dp = read_integer(&mut inner)?;
    let dq = read_integer(&mut inner)?;
    let qinv = read_integer(&mut inner)?;

    let public = RsaPublicKey::new(n.clone(), e.clone())?;
    let private = RsaPrivateKey::from_crt_components(d, e, n, p, q, dp, dq, qinv)?;
    Ok(KeyPair::new(private, public))
}

/// PKCS #8 `PrivateKeyInfo ::= SEQUENCE { version, AlgorithmIdentifier,
/// OCTET STRING }` with the PKCS #1 structure as the payload.
fn encode_private_pkcs8(key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let oid = Oid::parse(RSA_ENCRYPTION_OID)?;

    let mut algorithm = DerWriter::new();
    algorithm.write_tlv(&Tlv::from_oid(&oid));
    algorithm.write_tlv(&Tlv::null());

    let mut inner = DerWriter::new();
    inner.write_tlv(&Tlv::from_u32(Asn1Type::Int, 0));
    inner.write_tlv(&Tlv::new(Asn1Type::Seq, algorithm.into_bytes()));
    inner.write_tlv(&Tlv::new(Asn1Type::OctStr, encode_private_pkcs1(key)));

    let mut outer = DerWriter::new();
    outer.write_tlv(&Tlv::new(Asn1Type::Seq, inner.into_bytes()));
    Ok(outer.into_bytes())
}

fn decode_private_pkcs8(key: &[u8]) -> Result<KeyPair> {
    let seq = DerReader::new(key).read_tlv()?;
    if seq.asn1_type() != Asn1Type::Seq {
        return Err(Error::decoding("Expected sequence tag"));
    }

    let mut inner = DerReader::new(seq.value());
    let version = inner.read_tlv()?;
    if version.asn1_type() != Asn1Type::Int {
        return Err(Error::decoding("Expected version tag"));
    }
    if version.as_u32() != 0 {
        return Err(Error::decoding("Unsupported version number"));
    }

    let algorithm = inner.read_tlv()?;
    if algorithm.asn1_type() != Asn1Type::Seq {
        return Err(Error::decoding("Expected algorithm sequence tag"));
    }
    let oid = DerReader::new(algorithm.value()).read_tlv()?;
    if oid.asn1_type() != Asn1Type::Oid {
        return Err(Error::decoding("Expected algorithm OID"));
    }
    if !bool::from(oid.value().ct_eq(&RSA_ENCRYPTION_OID_BYTES)) {
        return Err(Error::decoding("Unsupported algorithm OID"));
    }

    let payload = inner.read_tlv()?;
    if payload.asn1_type() != Asn1Type::OctStr {
        return Err(Error::decoding("Expected octet string with pkcs1 encoded key"));
    }

    decode_private_pkcs1(payload.value())
}

fn read_integer(reader: &mut DerReader<'_>) -> Result<num_bigint::BigUint> {
    let tlv = reader.read_tlv()?;
    if tlv.asn1_type() != Asn1Type::Int {
        return Err(Error::decoding("Expected integer"));
    }
    Ok(tlv.as_biguint())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oid_constant_matches_encoder() {
        let oid = Oid::parse(RSA_ENCRYPTION_OID).unwrap();
        assert_eq!(oid.as_bytes(), RSA_ENCRYPTION_OID_BYTES);
    }
}
