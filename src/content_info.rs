//! `ContentInfo` wrapping.
//!
//! A standalone CMS message is a `ContentInfo` whose `contentType` names the
//! structure in `content`. For `DigestedData` that is `id-digestedData`.

use crate::{
    errors::{Error, Result},
    oid::ID_DIGESTED_DATA,
    DigestedData,
};
use cms::content_info::ContentInfo;
use der::Any;

#[cfg(feature = "pem")]
use {
    alloc::string::String,
    der::{
        pem::{self, LineEnding},
        Decode, Encode,
    },
};

/// Type label for PEM encoded CMS messages as described in [RFC 7468 § 9].
///
/// [RFC 7468 § 9]: https://www.rfc-editor.org/rfc/rfc7468#section-9
#[cfg(feature = "pem")]
pub const PEM_LABEL: &str = "CMS";

impl DigestedData {
    /// Wrap in a `ContentInfo` with content type `id-digestedData`.
    pub fn to_content_info(&self) -> Result<ContentInfo> {
        Ok(ContentInfo {
            content_type: ID_DIGESTED_DATA,
            content: Any::encode_from(self)?,
        })
    }

    /// Encode as a PEM `CMS` message wrapping a DER `ContentInfo`.
    #[cfg(feature = "pem")]
    pub fn to_pem(&self, line_ending: LineEnding) -> Result<String> {
        let der = self.to_content_info()?.to_der()?;
        Ok(pem::encode_string(PEM_LABEL, line_ending, &der).map_err(der::Error::from)?)
    }

    /// Decode a PEM `CMS` message holding a `DigestedData` `ContentInfo`.
    #[cfg(feature = "pem")]
    pub fn from_pem(pem: &str) -> Result<Self> {
        let (label, der_bytes) = pem::decode_vec(pem.as_bytes()).map_err(der::Error::from)?;

        if label != PEM_LABEL {
            return Err(der::Error::from(pem::Error::UnexpectedTypeLabel {
                expected: PEM_LABEL,
            })
            .into());
        }

        Self::try_from(ContentInfo::from_der(&der_bytes)?)
    }
}

impl TryFrom<ContentInfo> for DigestedData {
    type Error = Error;

    fn try_from(content_info: ContentInfo) -> Result<Self> {
        if content_info.content_type != ID_DIGESTED_DATA {
            return Err(Error::UnexpectedContentType {
                oid: content_info.content_type,
            });
        }

        Self::decode(content_info.content)
    }
}

impl TryFrom<&ContentInfo> for DigestedData {
    type Error = Error;

    fn try_from(content_info: &ContentInfo) -> Result<Self> {
        Self::try_from(content_info.clone())
    }
}
