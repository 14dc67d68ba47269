pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A key component is missing or zero, or CRT components are required
    /// but absent.
    InvalidKey,
    /// Malformed DER input: wrong tag, unsupported version or algorithm
    /// OID, truncated stream.
    KeyDecoding { reason: String },
    /// Serializer-internal failure while encoding a key.
    KeyEncoding { reason: String },
    /// Malformed dotted-string object identifier.
    InvalidOid { reason: String },
    /// `I2OSP` input does not fit the requested octet length.
    IntegerTooLarge,
    /// OAEP input exceeds the capacity of the modulus.
    MessageTooLong,
    /// Message representative out of range for the modulus.
    MessageRepresentativeOutOfRange,
    /// OAEP decoding failed. Deliberately carries no detail about which
    /// check rejected the input.
    Decryption,
    /// Signature verification could not be performed on the input.
    InvalidSignature,
    /// MGF1 output request exceeds the mask ceiling.
    MaskTooLong,
    /// Unsupported scheme, policy or parameter combination.
    InvalidArguments,
    /// Internal consistency failure.
    Internal,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidKey => write!(f, "invalid key components"),
            Error::KeyDecoding { reason } => write!(f, "key decoding error: {}", reason),
            Error::KeyEncoding { reason } => write!(f, "key encoding error: {}", reason),
            Error::InvalidOid { reason } => write!(f, "invalid OID: {}", reason),
            Error::IntegerTooLarge => write!(f, "integer too large"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::MessageRepresentativeOutOfRange => {
                write!(f, "message representative out of range")
            }
            Error::Decryption => write!(f, "decryption error"),
            Error::InvalidSignature => write!(f, "invalid signature"),
            Error::MaskTooLong => write!(f, "mask too long"),
            Error::InvalidArguments => write!(f, "invalid arguments"),
            Error::Internal => write!(f, "internal error"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    pub(crate) fn decoding(reason: impl Into<String>) -> Error {
        Error::KeyDecoding {
            reason: reason.into(),
        }
    }

    pub(crate) fn oid(reason: impl Into<String>) -> Error {
        Error::InvalidOid {
            reason: reason.into(),
        }
    }
}
