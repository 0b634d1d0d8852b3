//! Object identifiers.

use der::asn1::ObjectIdentifier;

pub use const_oid::db::rfc5911::ID_DATA;
pub use const_oid::db::rfc5912::{ID_SHA_1, ID_SHA_256, ID_SHA_384, ID_SHA_512};

/// `id-digestedData` content type as described in [RFC 5652 § 7].
///
/// [RFC 5652 § 7]: https://www.rfc-editor.org/rfc/rfc5652#section-7
pub const ID_DIGESTED_DATA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.5");
