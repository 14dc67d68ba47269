use super::tlv::{Asn1Type, Tlv};
use crate::errors::{Error, Result};

/// Streaming reader over a DER encoded byte slice.
pub struct DerReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> DerReader<'a> {
    pub fn new(buf: &'a [u8]) -> DerReader<'a> {
        DerReader { buf, pos: 0 }
    }

    fn read_byte(&mut self) -> Result<u8> {
        let byte = *self
            .buf
            .get(self.pos)
            .ok_or_else(|| Error::decoding("Unexpected end of stream"))?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_exact(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.buf.len() - self.pos < len {
            return Err(Error::decoding("Unexpected end of stream"));
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Read the next TLV.
    ///
    /// Definite lengths only: the indefinite form is rejected, and the long
    /// form is limited to four length octets.
    pub fn read_tlv(&mut self) -> Result<Tlv> {
        let tag = self.read_byte()?;

        let len_hdr = self.read_byte()?;
        let mut length = (len_hdr & 0x7f) as usize;

        // High bit clear is the one-octet short form. High bit set with a
        // zero low part is the indefinite form, otherwise the low part
        // counts the length octets that follow.
        if len_hdr & 0x80 != 0 {
            if length == 0 {
                return Err(Error::decoding("Infinite form unsupported"));
            }
            if length > 4 {
                return Err(Error::decoding("Unsupported length"));
            }
            let len_bytes = self.read_exact(length)?;
            length = len_bytes
                .iter()
                .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));
        }

        let value = self.read_exact(length)?;
        Ok(Tlv::new(Asn1Type::resolve(tag)?, value.to_vec()))
    }
}

/// Buffering writer producing DER encoded bytes.
#[derive(Default)]
pub struct DerWriter {
    buf: Vec<u8>,
}

impl DerWriter {
    pub fn new() -> DerWriter {
        DerWriter::default()
    }

    pub fn write_tlv(&mut self, tlv: &Tlv) {
        self.buf.push(tlv.asn1_type().tag());
        self.buf.extend_from_slice(&tlv.encoded_length());
        self.buf.extend_from_slice(tlv.value());
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: Error) -> String {
        match err {
            Error::KeyDecoding { reason } => reason,
            other => panic!("expected KeyDecoding, got {:?}", other),
        }
    }

    #[test]
    fn short_form_round_trip() {
        let mut writer = DerWriter::new();
        writer.write_tlv(&Tlv::new(Asn1Type::OctStr, vec![1, 2, 3]));
        let bytes = writer.into_bytes();
        assert_eq!(bytes, vec![0x04, 0x03, 1, 2, 3]);

        let tlv = DerReader::new(&bytes).read_tlv().unwrap();
        assert_eq!(tlv.asn1_type(), Asn1Type::OctStr);
        assert_eq!(tlv.value(), &[1, 2, 3]);
    }

    #[test]
    fn long_form_round_trip() {
        let payload = vec![0xabu8; 300];
        let mut writer = DerWriter::new();
        writer.write_tlv(&Tlv::new(Asn1Type::OctStr, payload.clone()));
        let bytes = writer.into_bytes();
        assert_eq!(&bytes[..4], &[0x04, 0x82, 0x01, 0x2c]);

        let tlv = DerReader::new(&bytes).read_tlv().unwrap();
        assert_eq!(tlv.value(), payload.as_slice());
    }

    #[test]
    fn null_has_no_content() {
        let mut writer = DerWriter::new();
        writer.write_tlv(&Tlv::null());
        assert_eq!(writer.into_bytes(), vec![0x05, 0x00]);
    }

    #[test]
    fn truncated_value_rejected() {
        let err = DerReader::new(&[0x02, 0x03, 0x01]).read_tlv().unwrap_err();
        assert_eq!(reason(err), "Unexpected end of stream");
    }

    #[test]
    fn truncated_header_rejected() {
        let err = DerReader::new(&[0x02]).read_tlv().unwrap_err();
        assert_eq!(reason(err), "Unexpected end of stream");
    }

    #[test]
    fn indefinite_length_rejected() {
        let err = DerReader::new(&[0x30, 0x80, 0x00]).read_tlv().unwrap_err();
        assert_eq!(reason(err), "Infinite form unsupported");
    }

    #[test]
    fn oversized_length_field_rejected() {
        let err = DerReader::new(&[0x02, 0x85, 0, 0, 0, 0, 1])
            .read_tlv()
            .unwrap_err();
        assert_eq!(reason(err), "Unsupported length");
    }
}
