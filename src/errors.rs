//! Error types.

use core::fmt;
use der::{asn1::ObjectIdentifier, Tag};

/// Alias for [`core::result::Result`] with the `cms-digested` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Decode input is neither a `DigestedData` nor an ASN.1 `SEQUENCE`.
    UnsupportedInputType {
        /// Tag of the rejected value.
        tag: Tag,
    },

    /// The `SEQUENCE` does not have the shape of a `DigestedData`.
    MalformedStructure(Malformed),

    /// A `ContentInfo` carries some content type other than `id-digestedData`.
    UnexpectedContentType {
        /// Content type found in the `ContentInfo`.
        oid: ObjectIdentifier,
    },

    /// Byte-level BER/DER (or PEM) error from the underlying `der` crate.
    Asn1(der::Error),
}

/// Ways in which a `SEQUENCE` can fail to be a `DigestedData`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Malformed {
    /// Fewer than the four mandatory elements.
    MissingElements {
        /// Number of elements present.
        found: usize,
    },

    /// The element at the position of `field` could not be decoded as that field.
    InvalidField {
        /// Field whose position held the bad element.
        field: Field,
        /// Error reported by the field type's decoder.
        error: der::Error,
    },
}

/// Fields of a `DigestedData`, in encoding order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    /// `version CMSVersion`
    Version,
    /// `digestAlgorithm DigestAlgorithmIdentifier`
    DigestAlgorithm,
    /// `encapContentInfo EncapsulatedContentInfo`
    EncapContentInfo,
    /// `digest Digest`
    Digest,
}

impl Field {
    /// Fields in the order they appear in the encoding.
    pub const ALL: [Field; 4] = [
        Field::Version,
        Field::DigestAlgorithm,
        Field::EncapContentInfo,
        Field::Digest,
    ];

    /// Zero-based position of this field within the `SEQUENCE`.
    pub const fn position(self) -> usize {
        match self {
            Field::Version => 0,
            Field::DigestAlgorithm => 1,
            Field::EncapContentInfo => 2,
            Field::Digest => 3,
        }
    }

    /// ASN.1 name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Version => "version",
            Field::DigestAlgorithm => "digestAlgorithm",
            Field::EncapContentInfo => "encapContentInfo",
            Field::Digest => "digest",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformed::MissingElements { found } => {
                write!(f, "expected at least 4 elements, found {}", found)
            }
            Malformed::InvalidField { field, error } => {
                write!(f, "invalid {} at position {}: {}", field, field.position(), error)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedInputType { tag } => {
                write!(f, "unsupported input type: expected SEQUENCE, got {}", tag)
            }
            Error::MalformedStructure(malformed) => {
                write!(f, "malformed DigestedData: {}", malformed)
            }
            Error::UnexpectedContentType { oid } => {
                write!(f, "unexpected content type: {}", oid)
            }
            Error::Asn1(err) => write!(f, "ASN.1 error: {}", err),
        }
    }
}

impl From<Malformed> for Error {
    fn from(malformed: Malformed) -> Error {
        Error::MalformedStructure(malformed)
    }
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        Error::Asn1(err)
    }
}

impl From<Error> for der::Error {
    fn from(err: Error) -> der::Error {
        match err {
            Error::UnsupportedInputType { tag } => tag.unexpected_error(Some(Tag::Sequence)),
            Error::MalformedStructure(Malformed::MissingElements { .. }) => {
                Tag::Sequence.value_error()
            }
            Error::MalformedStructure(Malformed::InvalidField { error, .. }) => error,
            Error::UnexpectedContentType { oid } => der::ErrorKind::OidUnknown { oid }.into(),
            Error::Asn1(err) => err,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MalformedStructure(Malformed::InvalidField { error, .. }) => Some(error),
            Error::Asn1(err) => Some(err),
            _ => None,
        }
    }
}
