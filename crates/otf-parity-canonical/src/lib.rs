//! Canonical value model for cross-client parity reports.
//!
//! Two client implementations of the same fitness API are compared by
//! normalizing their responses into [`CanonicalValue`] trees: ordered maps,
//! sequences and JSON scalars. Records expose only their public fields,
//! timestamps render as ISO-8601 strings and enumerations collapse to their
//! scalar value. The serialized form sorts object keys at every level so two
//! reports can be diffed byte for byte.
//!
#![deny(missing_docs)]

/// Normalization rules and the `Canonicalize` trait.
pub mod canonicalizer;
/// Content digests over canonical trees.
pub mod digest;
/// Validated identifier newtypes.
pub mod identifiers;
/// ISO-8601 rendering for dates and datetimes.
pub mod temporal;
/// Validation errors.
pub mod validation;
/// Canonical value tree and ordered map.
pub mod value;

pub use canonicalizer::{
    canonicalize, canonicalize_record, Canonicalize, Enumeration, Field, Record, Visibility,
};
pub use digest::{Digest, DigestAlg};
pub use identifiers::ProbeName;
pub use validation::ValidationError;
pub use value::{CanonicalMap, CanonicalValue, SortedView};
