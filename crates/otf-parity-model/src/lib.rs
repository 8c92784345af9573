//! Response records of the fitness API client.
//!
//! Each record registers the list of fields that take part in canonical
//! output; the `raw` payload a record was parsed from is kept as internal
//! state and never emitted. [`ApiRecord`] is the closed set of variants a
//! client session can return.
//!
#![deny(missing_docs)]

/// Scalar enumerations.
pub mod enums;
/// Model error types.
pub mod errors;
/// Record types and their canonical field lists.
pub mod records;
/// Tagged record parsing.
pub mod typed;

pub use enums::{BookingStatus, Gender, StudioStatus};
pub use errors::ModelError;
pub use records::{
    Address, BodyCompositionRecord, Booking, HeartRate, Member, Studio, Workout, ZoneTimeMinutes,
};
pub use typed::{parse_record, ApiRecord};
