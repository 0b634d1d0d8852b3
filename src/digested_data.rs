//! `DigestedData` content type as described in [RFC 5652 § 7].
//!
//! [RFC 5652 § 7]: https://www.rfc-editor.org/rfc/rfc5652#section-7

use crate::{
    errors::{Error, Field, Malformed, Result},
    sequence::{Asn1Sequence, Framing},
    version::Version,
};
use alloc::vec::Vec;
use cms::signed_data::EncapsulatedContentInfo;
use der::{
    asn1::OctetString, Any, Choice, DecodeValue, Encode, EncodeValue, Header, Length, Reader,
    Sequence, Writer,
};
use spki::AlgorithmIdentifierOwned;

#[cfg(feature = "serde")]
use {
    der::Decode,
    serdect::serde::{de, ser, Deserialize, Serialize},
};

/// Number of mandatory elements in a `DigestedData` `SEQUENCE`.
const FIELD_COUNT: usize = Field::ALL.len();

/// The `DigestedData` type.
///
/// ```text
/// DigestedData ::= SEQUENCE {
///     version CMSVersion,
///     digestAlgorithm DigestAlgorithmIdentifier,
///     encapContentInfo EncapsulatedContentInfo,
///     digest Digest }
///
/// Digest ::= OCTET STRING
/// ```
///
/// Values are immutable: the fields are set once, by [`DigestedData::new`]
/// or by decoding, and only handed out by reference afterwards.
///
/// The digest is carried as-is. Nothing here computes it or checks it
/// against the encapsulated content.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DigestedData {
    version: Version,
    digest_algorithm: AlgorithmIdentifierOwned,
    encap_content_info: EncapsulatedContentInfo,
    digest: OctetString,
}

/// Input accepted by [`DigestedData::decode`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asn1Object {
    /// An already decoded value, passed through untouched.
    DigestedData(DigestedData),

    /// A generic `SEQUENCE` whose elements are interpreted positionally.
    Sequence(Asn1Sequence),

    /// Any ASN.1 value. Only a `SEQUENCE` is accepted.
    Any(Any),
}

impl DigestedData {
    /// Create a new `v0` `DigestedData` from its components.
    ///
    /// No validation is performed: the digest is neither recomputed nor
    /// checked against `digest_algorithm`.
    pub fn new(
        digest_algorithm: AlgorithmIdentifierOwned,
        encap_content_info: EncapsulatedContentInfo,
        digest: OctetString,
    ) -> Self {
        Self {
            version: Version::V0,
            digest_algorithm,
            encap_content_info,
            digest,
        }
    }

    /// Decode a `DigestedData` from an already decoded value, a generic
    /// `SEQUENCE`, or an `Any` tagged `SEQUENCE`.
    pub fn decode(input: impl Into<Asn1Object>) -> Result<Self> {
        match input.into() {
            Asn1Object::DigestedData(digested_data) => Ok(digested_data),
            Asn1Object::Sequence(sequence) => Self::from_sequence(&sequence),
            Asn1Object::Any(any) => Self::from_sequence(&Asn1Sequence::try_from(&any)?),
        }
    }

    /// Interpret the first four elements of `sequence` as the fields of a
    /// `DigestedData`.
    ///
    /// Fields are taken strictly by position and never cross-checked: a
    /// `SEQUENCE` with its elements in the wrong order is either rejected by
    /// the positional type or decoded into the wrong fields. Elements past
    /// the fourth are ignored.
    pub fn from_sequence(sequence: &Asn1Sequence) -> Result<Self> {
        let elements = sequence.elements();

        if elements.len() < FIELD_COUNT {
            return Err(Malformed::MissingElements {
                found: elements.len(),
            }
            .into());
        }

        Ok(Self {
            version: decode_field(elements, Field::Version)?,
            digest_algorithm: decode_field(elements, Field::DigestAlgorithm)?,
            encap_content_info: decode_field(elements, Field::EncapContentInfo)?,
            digest: decode_field(elements, Field::Digest)?,
        })
    }

    /// Encode as a generic `SEQUENCE` of the four fields, in order.
    ///
    /// The sequence uses [`Framing::Indefinite`] so it nests inside a BER
    /// encoded envelope. Use [`Asn1Sequence::to_der`] or
    /// [`Encode::to_der`] for DER.
    ///
    /// This only fails if a field's encoding would exceed the maximum length
    /// supported by the `der` crate.
    pub fn encode(&self) -> Result<Asn1Sequence> {
        let elements = vec![
            Any::encode_from(&self.version)?,
            Any::encode_from(&self.digest_algorithm)?,
            Any::encode_from(&self.encap_content_info)?,
            Any::encode_from(&self.digest)?,
        ];

        Ok(Asn1Sequence::new(elements, Framing::Indefinite))
    }

    /// Parse BER bytes, accepting definite or indefinite length at any level.
    pub fn from_ber(bytes: &[u8]) -> Result<Self> {
        Self::from_sequence(&Asn1Sequence::from_ber(bytes)?)
    }

    /// Serialize as BER with indefinite outer framing.
    pub fn to_ber(&self) -> Result<Vec<u8>> {
        self.encode()?.to_ber()
    }

    /// Syntax version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Algorithm the digest was computed with.
    pub fn digest_algorithm(&self) -> &AlgorithmIdentifierOwned {
        &self.digest_algorithm
    }

    /// Content the digest was computed over.
    pub fn encap_content_info(&self) -> &EncapsulatedContentInfo {
        &self.encap_content_info
    }

    /// Digest value.
    pub fn digest(&self) -> &OctetString {
        &self.digest
    }

    /// Digest value as a byte slice.
    pub fn digest_bytes(&self) -> &[u8] {
        self.digest.as_bytes()
    }
}

fn decode_field<'a, T>(elements: &'a [Any], field: Field) -> Result<T>
where
    T: Choice<'a> + DecodeValue<'a>,
{
    elements[field.position()]
        .decode_as()
        .map_err(|error| Malformed::InvalidField { field, error }.into())
}

impl From<DigestedData> for Asn1Object {
    fn from(digested_data: DigestedData) -> Asn1Object {
        Asn1Object::DigestedData(digested_data)
    }
}

impl From<Asn1Sequence> for Asn1Object {
    fn from(sequence: Asn1Sequence) -> Asn1Object {
        Asn1Object::Sequence(sequence)
    }
}

impl From<Any> for Asn1Object {
    fn from(any: Any) -> Asn1Object {
        Asn1Object::Any(any)
    }
}

impl TryFrom<Asn1Object> for DigestedData {
    type Error = Error;

    fn try_from(input: Asn1Object) -> Result<Self> {
        Self::decode(input)
    }
}

impl TryFrom<&Asn1Sequence> for DigestedData {
    type Error = Error;

    fn try_from(sequence: &Asn1Sequence) -> Result<Self> {
        Self::from_sequence(sequence)
    }
}

//
// `der` trait impls
//

impl<'a> DecodeValue<'a> for DigestedData {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let digested_data = Self {
                version: reader.decode()?,
                digest_algorithm: reader.decode()?,
                encap_content_info: reader.decode()?,
                digest: reader.decode()?,
            };

            // Same policy as `from_sequence`: extra elements are skipped
            while !reader.is_finished() {
                reader.decode::<Any>()?;
            }

            Ok(digested_data)
        })
    }
}

impl EncodeValue for DigestedData {
    fn value_len(&self) -> der::Result<Length> {
        [
            self.version.encoded_len()?,
            self.digest_algorithm.encoded_len()?,
            self.encap_content_info.encoded_len()?,
            self.digest.encoded_len()?,
        ]
        .into_iter()
        .try_fold(Length::ZERO, |acc, len| acc + len)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.version.encode(writer)?;
        self.digest_algorithm.encode(writer)?;
        self.encap_content_info.encode(writer)?;
        self.digest.encode(writer)
    }
}

impl<'a> Sequence<'a> for DigestedData {}

impl TryFrom<&[u8]> for DigestedData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_ber(bytes)
    }
}

#[cfg(feature = "serde")]
impl Serialize for DigestedData {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serdect::serde::Serializer,
    {
        let der = self.to_der().map_err(ser::Error::custom)?;
        serdect::slice::serialize_hex_lower_or_bin(&der, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for DigestedData {
    fn deserialize<De>(deserializer: De) -> core::result::Result<Self, De::Error>
    where
        De: serdect::serde::Deserializer<'de>,
    {
        let der_bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::from_der(&der_bytes).map_err(de::Error::custom)
    }
}
