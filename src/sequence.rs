//! Generic ASN.1 `SEQUENCE` values with BER framing.
//!
//! [`Asn1Sequence`] is the untyped side of the [`DigestedData`] codec: an
//! ordered list of DER-encoded elements plus the length form used for the
//! outer `SEQUENCE` header when it is serialized.
//!
//! The `der` crate only speaks DER, so indefinite-length framing
//! (`.. 80 .. 00 00`) used inside BER envelopes is handled here. The outer
//! length form is remembered; nested indefinite-length values are re-framed
//! with definite lengths, so every element is held as DER.
//!
//! [`DigestedData`]: crate::DigestedData

use crate::errors::{Error, Result};
use alloc::vec::Vec;
use der::{Any, Decode, Encode, ErrorKind, Header, Length, Reader, SliceReader, Tag, Tagged};

/// Identifier octet of a constructed universal `SEQUENCE`.
const SEQUENCE_TAG: u8 = 0x30;

/// Length octet announcing indefinite-length content.
const INDEFINITE_LENGTH: u8 = 0x80;

/// End-of-contents octets terminating indefinite-length content.
const END_OF_CONTENTS: [u8; 2] = [0x00, 0x00];

/// Maximum nesting of constructed values accepted by [`Asn1Sequence::from_ber`].
const MAX_DEPTH: usize = 32;

/// Length form used for the outer `SEQUENCE` header.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Framing {
    /// Definite length, as required by DER.
    #[default]
    Definite,

    /// Indefinite length terminated by end-of-contents octets (BER only).
    Indefinite,
}

/// An ordered ASN.1 `SEQUENCE` of untyped elements.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Asn1Sequence {
    elements: Vec<Any>,
    framing: Framing,
}

impl Asn1Sequence {
    /// Create a sequence from its elements and the framing to serialize it with.
    pub fn new(elements: Vec<Any>, framing: Framing) -> Self {
        Self { elements, framing }
    }

    /// Elements of the sequence, in order.
    pub fn elements(&self) -> &[Any] {
        &self.elements
    }

    /// Framing used when this sequence is serialized with [`Asn1Sequence::to_ber`].
    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Does the sequence have no elements?
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Replace the framing.
    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    /// Consume the sequence, returning its elements.
    pub fn into_elements(self) -> Vec<Any> {
        self.elements
    }

    /// Parse a `SEQUENCE` using either definite or indefinite framing.
    ///
    /// The detected outer framing is kept, so [`Asn1Sequence::to_ber`]
    /// reproduces the same outer header. Nested values may use either length
    /// form. Input must hold exactly one value.
    pub fn from_ber(bytes: &[u8]) -> Result<Self> {
        if let Some(&identifier) = bytes.first() {
            let tag = Tag::try_from(identifier)?;

            if tag != Tag::Sequence {
                return Err(Error::UnsupportedInputType { tag });
            }
        }

        let framing = match bytes.get(1) {
            Some(&INDEFINITE_LENGTH) => Framing::Indefinite,
            _ => Framing::Definite,
        };

        let (any, rest) = read_element(bytes, 0)?;

        if !rest.is_empty() {
            return Err(der::Error::from(ErrorKind::TrailingData {
                decoded: Length::try_from(bytes.len() - rest.len())?,
                remaining: Length::try_from(rest.len())?,
            })
            .into());
        }

        Ok(Self::try_from(&any)?.with_framing(framing))
    }

    /// Serialize honoring [`Asn1Sequence::framing`].
    pub fn to_ber(&self) -> Result<Vec<u8>> {
        match self.framing {
            Framing::Definite => self.to_der(),
            Framing::Indefinite => {
                let mut buf = vec![SEQUENCE_TAG, INDEFINITE_LENGTH];
                self.encode_elements(&mut buf)?;
                buf.extend_from_slice(&END_OF_CONTENTS);
                Ok(buf)
            }
        }
    }

    /// Serialize as DER, ignoring [`Asn1Sequence::framing`].
    pub fn to_der(&self) -> Result<Vec<u8>> {
        Ok(self.to_any()?.to_der()?)
    }

    /// Convert into a single `Any` value tagged `SEQUENCE`.
    pub fn to_any(&self) -> Result<Any> {
        let mut content = Vec::new();
        self.encode_elements(&mut content)?;
        Ok(Any::new(Tag::Sequence, content)?)
    }

    fn encode_elements(&self, buf: &mut Vec<u8>) -> Result<()> {
        for element in &self.elements {
            element.encode_to_vec(buf)?;
        }

        Ok(())
    }
}

/// Read one BER value from the front of `input`, returning it with
/// definite-length framing throughout and the bytes that follow it.
fn read_element(input: &[u8], depth: usize) -> Result<(Any, &[u8])> {
    if let [identifier, INDEFINITE_LENGTH, content @ ..] = input {
        let tag = Tag::try_from(*identifier)?;

        if !tag.is_constructed() {
            return Err(der::Error::from(ErrorKind::IndefiniteLength).into());
        }

        if depth >= MAX_DEPTH {
            return Err(tag.value_error().into());
        }

        let mut value = Vec::new();
        let mut remaining = content;

        loop {
            if let Some(rest) = remaining.strip_prefix(&END_OF_CONTENTS[..]) {
                return Ok((Any::new(tag, value)?, rest));
            }

            let (element, rest) = read_element(remaining, depth + 1)?;
            element.encode_to_vec(&mut value)?;
            remaining = rest;
        }
    }

    let mut reader = SliceReader::new(input)?;
    let header = Header::decode(&mut reader)?;
    let content = reader.read_slice(header.length)?;
    let consumed = usize::try_from(reader.position())?;

    let value = if header.tag.is_constructed() {
        if depth >= MAX_DEPTH {
            return Err(header.tag.value_error().into());
        }

        let mut value = Vec::new();
        let mut remaining = content;

        while !remaining.is_empty() {
            let (element, rest) = read_element(remaining, depth + 1)?;
            element.encode_to_vec(&mut value)?;
            remaining = rest;
        }

        value
    } else {
        content.to_vec()
    };

    Ok((Any::new(header.tag, value)?, &input[consumed..]))
}

impl TryFrom<&Any> for Asn1Sequence {
    type Error = Error;

    fn try_from(any: &Any) -> Result<Self> {
        if any.tag() != Tag::Sequence {
            return Err(Error::UnsupportedInputType { tag: any.tag() });
        }

        let mut reader = SliceReader::new(any.value())?;
        let mut elements = Vec::new();

        while !reader.is_finished() {
            elements.push(reader.decode()?);
        }

        Ok(Self::new(elements, Framing::Definite))
    }
}

impl TryFrom<Any> for Asn1Sequence {
    type Error = Error;

    fn try_from(any: Any) -> Result<Self> {
        Self::try_from(&any)
    }
}

impl FromIterator<Any> for Asn1Sequence {
    fn from_iter<I: IntoIterator<Item = Any>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect(), Framing::Definite)
    }
}

#[cfg(test)]
mod tests {
    use super::{Asn1Sequence, Framing};
    use crate::Error;
    use der::{asn1::OctetString, Any, Encode, ErrorKind, Tag};
    use hex_literal::hex;

    fn elements() -> Vec<Any> {
        vec![
            Any::new(Tag::Integer, vec![0x01]).unwrap(),
            Any::encode_from(&OctetString::new(vec![0xab, 0xcd]).unwrap()).unwrap(),
        ]
    }

    #[test]
    fn definite_framing() {
        let seq = Asn1Sequence::new(elements(), Framing::Definite);
        let der = hex!("30070201010402abcd");
        assert_eq!(seq.to_ber().unwrap(), der);
        assert_eq!(seq.to_der().unwrap(), der);
        assert_eq!(Asn1Sequence::from_ber(&der).unwrap(), seq);
    }

    #[test]
    fn indefinite_framing() {
        let seq = Asn1Sequence::new(elements(), Framing::Indefinite);
        let ber = hex!("30800201010402abcd0000");
        assert_eq!(seq.to_ber().unwrap(), ber);
        assert_eq!(seq.to_der().unwrap(), hex!("30070201010402abcd"));

        let decoded = Asn1Sequence::from_ber(&ber).unwrap();
        assert_eq!(decoded.framing(), Framing::Indefinite);
        assert_eq!(decoded.elements(), seq.elements());
    }

    #[test]
    fn empty_sequence() {
        let seq = Asn1Sequence::from_ber(&hex!("3000")).unwrap();
        assert!(seq.is_empty());

        let seq = Asn1Sequence::from_ber(&hex!("30800000")).unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.to_ber().unwrap(), hex!("30800000"));
    }

    #[test]
    fn rejects_non_sequence() {
        assert_eq!(
            Asn1Sequence::from_ber(&hex!("020101")),
            Err(Error::UnsupportedInputType { tag: Tag::Integer })
        );
    }

    #[test]
    fn rejects_indefinite_non_sequence() {
        assert_eq!(
            Asn1Sequence::from_ber(&hex!("31800201010000")),
            Err(Error::UnsupportedInputType { tag: Tag::Set })
        );
    }

    #[test]
    fn nested_indefinite_elements() {
        let ber = hex!("3080" "3080020101" "0000" "a080" "0402abcd" "0000" "0000");
        let seq = Asn1Sequence::from_ber(&ber).unwrap();
        assert_eq!(seq.framing(), Framing::Indefinite);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.elements()[0].to_der().unwrap(), hex!("3003020101"));
        assert_eq!(seq.elements()[1].to_der().unwrap(), hex!("a0040402abcd"));
        assert_eq!(seq.to_der().unwrap(), hex!("300b3003020101a0040402abcd"));
    }

    #[test]
    fn definite_sequence_with_indefinite_element() {
        let seq = Asn1Sequence::from_ber(&hex!("3007" "3080020101" "0000")).unwrap();
        assert_eq!(seq.framing(), Framing::Definite);
        assert_eq!(seq.elements()[0].to_der().unwrap(), hex!("3003020101"));
    }

    #[test]
    fn rejects_indefinite_primitive() {
        let err = Asn1Sequence::from_ber(&hex!("3080" "0480" "0000" "0000")).unwrap_err();
        match err {
            Error::Asn1(err) => assert_eq!(err.kind(), ErrorKind::IndefiniteLength),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_deep_nesting() {
        let mut ber = Vec::new();
        for _ in 0..40 {
            ber.extend_from_slice(&hex!("3080"));
        }
        for _ in 0..40 {
            ber.extend_from_slice(&hex!("0000"));
        }

        let err = Asn1Sequence::from_ber(&ber).unwrap_err();
        assert!(matches!(err, Error::Asn1(_)));
    }

    #[test]
    fn rejects_missing_end_of_contents() {
        let err = Asn1Sequence::from_ber(&hex!("3080020101")).unwrap_err();
        assert!(matches!(err, Error::Asn1(_)));
    }

    #[test]
    fn rejects_trailing_data() {
        let err = Asn1Sequence::from_ber(&hex!("3080020101000002")).unwrap_err();
        match err {
            Error::Asn1(err) => assert!(matches!(err.kind(), ErrorKind::TrailingData { .. })),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn into_any() {
        let seq: Asn1Sequence = elements().into_iter().collect();
        let any = seq.to_any().unwrap();
        assert_eq!(any.to_der().unwrap(), seq.to_der().unwrap());
        assert_eq!(Asn1Sequence::try_from(any).unwrap(), seq);

        let indefinite = seq.clone().with_framing(Framing::Indefinite);
        assert_eq!(indefinite.to_any().unwrap(), seq.to_any().unwrap());
        assert_ne!(indefinite.to_ber().unwrap(), seq.to_ber().unwrap());
    }
}
