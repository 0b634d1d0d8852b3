//! `CMSVersion` field of a `DigestedData`.

use der::{
    asn1::Int, DecodeValue, EncodeValue, FixedTag, Header, Length, Reader, Tag, Writer,
};

/// Syntax version of a `DigestedData`.
///
/// ```text
/// CMSVersion ::= INTEGER  { v0(0), v1(1), v2(2), v3(3), v4(4), v5(5) }
/// ```
///
/// Only `v0` is ever produced. Decoding accepts any INTEGER and keeps values
/// other than zero verbatim in [`Version::Other`], so they re-encode to the
/// same bytes.
///
/// Equality compares the encoded INTEGER, so `Other` holding zero equals `V0`.
#[derive(Clone, Debug, Default)]
pub enum Version {
    /// `v0`
    #[default]
    V0,

    /// Any other INTEGER, as it appeared on the wire.
    Other(Int),
}

impl Version {
    /// Is this `v0`?
    pub fn is_v0(&self) -> bool {
        self.as_bytes() == [0]
    }

    /// Big endian two's complement bytes of the INTEGER value.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Version::V0 => &[0],
            Version::Other(int) => int.as_bytes(),
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Version) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Version {}

impl From<Int> for Version {
    fn from(int: Int) -> Version {
        if int.as_bytes() == [0] {
            Version::V0
        } else {
            Version::Other(int)
        }
    }
}

impl FixedTag for Version {
    const TAG: Tag = Tag::Integer;
}

impl<'a> DecodeValue<'a> for Version {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        Int::decode_value(reader, header).map(Version::from)
    }
}

impl EncodeValue for Version {
    fn value_len(&self) -> der::Result<Length> {
        match self {
            Version::V0 => Ok(Length::ONE),
            Version::Other(int) => int.value_len(),
        }
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        match self {
            Version::V0 => writer.write_byte(0),
            Version::Other(int) => int.encode_value(writer),
        }
    }
}
