use core::fmt;

use crate::errors::{Error, Result};

/// Object identifier, held in dotted-string form together with its DER
/// encoded subidentifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oid {
    dotted: String,
    encoded: Vec<u8>,
}

impl Oid {
    /// Parse a dotted-string OID and encode its subidentifiers.
    ///
    /// At least two components are required; the first must not exceed 2
    /// and the second must not exceed 39.
    pub fn parse(oid: &str) -> Result<Oid> {
        let components = oid
            .split('.')
            .map(|c| {
                c.parse::<u32>()
                    .map_err(|_| Error::oid("Component must be a non-negative integer"))
            })
            .collect::<Result<Vec<u32>>>()?;

        if components.len() < 2 {
            return Err(Error::oid("OID too short"));
        }
        if components[0] > 2 {
            return Err(Error::oid("First component must not be greater than 2"));
        }
        if components[1] > 39 {
            return Err(Error::oid("Second component must not be greater than 39"));
        }

        let mut encoded = vec![(components[0] * 40 + components[1]) as u8];
        for &component in &components[2..] {
            encoded.extend_from_slice(&encode_component(component));
        }

        Ok(Oid {
            dotted: oid.to_owned(),
            encoded,
        })
    }

    /// DER encoded subidentifiers (the OBJECT IDENTIFIER content octets).
    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted)
    }
}

/// Base-128 subidentifier encoding: big-endian 7-bit groups with the high
/// bit set on every octet except the last. Leading all-zero groups are not
/// emitted.
fn encode_component(component: u32) -> Vec<u8> {
    let mut out = vec![(component & 0x7f) as u8];
    let mut rest = component >> 7;
    while rest != 0 {
        out.push((rest & 0x7f) as u8 | 0x80);
        rest >>= 7;
    }
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsa_encryption_oid_encoding() {
        let oid = Oid::parse("1.2.840.113549.1.1.1").unwrap();
        assert_eq!(
            oid.as_bytes(),
            &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01]
        );
        assert_eq!(oid.to_string(), "1.2.840.113549.1.1.1");
    }

    #[test]
    fn single_component_rejected() {
        assert!(matches!(
            Oid::parse("1"),
            Err(Error::InvalidOid { .. })
        ));
    }

    #[test]
    fn first_component_out_of_range() {
        assert!(matches!(
            Oid::parse("3.1"),
            Err(Error::InvalidOid { .. })
        ));
    }

    #[test]
    fn second_component_out_of_range() {
        assert!(matches!(
            Oid::parse("2.40"),
            Err(Error::InvalidOid { .. })
        ));
    }

    #[test]
    fn negative_component_rejected() {
        assert!(matches!(
            Oid::parse("1.2.-840"),
            Err(Error::InvalidOid { .. })
        ));
    }

    #[test]
    fn component_fitting_one_group() {
        assert_eq!(encode_component(88), vec![88]);
    }

    #[test]
    fn component_split_over_two_groups() {
        assert_eq!(encode_component(0xff), vec![0b1000_0001, 0b0111_1111]);
    }
}
