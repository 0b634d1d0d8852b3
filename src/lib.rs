#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![warn(missing_docs)]

//! # Usage
//!
//! ## Encoding
//!
//! ```
//! use cms_digested::{
//!     cms::signed_data::EncapsulatedContentInfo,
//!     der::{asn1::OctetString, Any, AnyRef, Encode},
//!     oid,
//!     spki::AlgorithmIdentifierOwned,
//!     DigestedData,
//! };
//!
//! let digest_algorithm = AlgorithmIdentifierOwned {
//!     oid: oid::ID_SHA_256,
//!     parameters: Some(Any::from(AnyRef::NULL)),
//! };
//! let encap_content_info = EncapsulatedContentInfo {
//!     econtent_type: oid::ID_DATA,
//!     econtent: None,
//! };
//! let digest = OctetString::new([0u8; 32]).expect("digest too long");
//!
//! let digested_data = DigestedData::new(digest_algorithm, encap_content_info, digest);
//! assert!(digested_data.version().is_v0());
//!
//! // BER with an indefinite-length outer SEQUENCE
//! let ber = digested_data.to_ber().expect("failed to encode");
//! assert_eq!(&ber[..2], &[0x30, 0x80]);
//!
//! // DER
//! let der = digested_data.to_der().expect("failed to encode");
//! assert_eq!(&der[..2], &[0x30, 0x41]);
//! ```
//!
//! ## Decoding
//!
//! [`DigestedData::decode`] accepts an already decoded value (returned as
//! is), a generic [`Asn1Sequence`], or a `der::Any` tagged `SEQUENCE`.
//! Anything else is rejected with [`Error::UnsupportedInputType`].
//!
//! ```
//! use cms_digested::{Asn1Sequence, DigestedData, Error, Malformed};
//!
//! let ber = [
//!     0x30, 0x80, 0x02, 0x01, 0x00, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65,
//!     0x03, 0x04, 0x02, 0x01, 0x05, 0x00, 0x30, 0x0b, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86,
//!     0xf7, 0x0d, 0x01, 0x07, 0x01, 0x04, 0x04, 0xde, 0xad, 0xbe, 0xef, 0x00, 0x00,
//! ];
//!
//! let sequence = Asn1Sequence::from_ber(&ber).expect("malformed BER");
//! let digested_data = DigestedData::decode(sequence.clone()).expect("malformed DigestedData");
//! assert_eq!(digested_data.digest_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
//!
//! // Only the first three elements
//! let truncated = Asn1Sequence::new(sequence.elements()[..3].to_vec(), sequence.framing());
//! assert_eq!(
//!     DigestedData::decode(truncated),
//!     Err(Error::MalformedStructure(Malformed::MissingElements { found: 3 }))
//! );
//! ```

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod errors;
pub mod oid;

mod content_info;
mod digested_data;
mod sequence;
mod version;

pub use cms;
pub use der;
pub use spki;

#[cfg(feature = "pem")]
pub use crate::content_info::PEM_LABEL;
pub use crate::{
    digested_data::{Asn1Object, DigestedData},
    errors::{Error, Field, Malformed, Result},
    sequence::{Asn1Sequence, Framing},
    version::Version,
};
