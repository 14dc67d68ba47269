//! X.690 DER building blocks: typed TLVs, definite-length codec, object
//! identifiers and a streaming reader/writer.
//!
//! Only the subset needed by the PKCS #1 / PKCS #8 key schemas is
//! supported: definite lengths (short form, or long form with at most four
//! length octets on decode), universal tags, and primitive INTEGER bodies.

mod oid;
mod stream;
mod tlv;

pub use self::oid::Oid;
pub use self::stream::{DerReader, DerWriter};
pub use self::tlv::{Asn1Type, Tlv};
