//! Normalization of domain values into [`CanonicalValue`] trees.
//!
//! Dispatch is by type rather than by runtime inspection. The rules, in the
//! order a dynamic implementation would try them:
//!
//! 1. records registered with [`canonical_record!`](crate::canonical_record)
//!    expand into a map of their public fields, in declaration order;
//! 2. dates and datetimes render as ISO-8601 strings (see [`crate::temporal`]);
//! 3. sequences keep element order;
//! 4. string-keyed maps keep iteration order;
//! 5. enumerations registered with [`canonical_enum!`](crate::canonical_enum)
//!    emit their underlying scalar;
//! 6. primitives pass through, `None` becomes `Null`.

use crate::temporal::{iso_date, iso_datetime, iso_zoned};
use crate::value::{CanonicalMap, CanonicalValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;
use std::collections::BTreeMap;

/// Conversion into canonical form. Implementations must be total.
pub trait Canonicalize {
    /// Produces the canonical tree for `self`.
    fn canonicalize(&self) -> CanonicalValue;
}

/// Canonicalizes any supported value.
pub fn canonicalize<T: Canonicalize + ?Sized>(value: &T) -> CanonicalValue {
    value.canonicalize()
}

/// Whether a record field takes part in canonical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Emitted under its field name.
    Public,
    /// Client-internal state; never emitted.
    Internal,
}

/// One named field of a [`Record`].
pub struct Field<'a> {
    /// Field name as it appears in the canonical map.
    pub name: &'static str,
    /// Visibility marker.
    pub visibility: Visibility,
    /// Borrowed field value.
    pub value: &'a dyn Canonicalize,
}

impl<'a> Field<'a> {
    /// A field that is emitted.
    pub fn public(name: &'static str, value: &'a dyn Canonicalize) -> Self {
        Self {
            name,
            visibility: Visibility::Public,
            value,
        }
    }

    /// A field that is skipped.
    pub fn internal(name: &'static str, value: &'a dyn Canonicalize) -> Self {
        Self {
            name,
            visibility: Visibility::Internal,
            value,
        }
    }
}

/// Object-with-attributes shape: a fixed list of named fields.
pub trait Record {
    /// All fields, public ones in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Expands a record into a map of its public fields.
pub fn canonicalize_record<R: Record + ?Sized>(record: &R) -> CanonicalValue {
    let map: CanonicalMap = record
        .fields()
        .into_iter()
        .filter(|field| field.visibility == Visibility::Public)
        .map(|field| (field.name.to_string(), field.value.canonicalize()))
        .collect();
    CanonicalValue::Map(map)
}

/// Enumeration-like values that stand for a scalar.
pub trait Enumeration {
    /// The scalar the variant stands for.
    fn underlying_value(&self) -> CanonicalValue;
}

/// Registers a struct as a [`Record`] and implements [`Canonicalize`] for it.
///
/// ```
/// use otf_parity_canonical::{canonical_record, canonicalize};
///
/// struct Coach {
///     name: String,
///     rating: Option<f64>,
///     cache_key: u64,
/// }
///
/// canonical_record!(Coach { name, rating } internal { cache_key });
///
/// let coach = Coach { name: "Sam".into(), rating: None, cache_key: 7 };
/// let value = canonicalize(&coach);
/// assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("Sam"));
/// assert!(value.get("cache_key").is_none());
/// ```
#[macro_export]
macro_rules! canonical_record {
    ($ty:ident { $($field:ident),* $(,)? } $(internal { $($hidden:ident),* $(,)? })?) => {
        impl $crate::Record for $ty {
            #[allow(unused_mut)]
            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                let mut fields: ::std::vec::Vec<$crate::Field<'_>> = ::std::vec![
                    $($crate::Field::public(::core::stringify!($field), &self.$field)),*
                ];
                $($(
                    fields.push($crate::Field::internal(::core::stringify!($hidden), &self.$hidden));
                )*)?
                fields
            }
        }

        impl $crate::Canonicalize for $ty {
            fn canonicalize(&self) -> $crate::CanonicalValue {
                $crate::canonicalize_record(self)
            }
        }
    };
}

/// Registers a fieldless enum as an [`Enumeration`] with one scalar per variant.
#[macro_export]
macro_rules! canonical_enum {
    ($ty:ident { $($variant:ident => $value:expr),+ $(,)? }) => {
        impl $crate::Enumeration for $ty {
            fn underlying_value(&self) -> $crate::CanonicalValue {
                match self {
                    $($ty::$variant => $crate::Canonicalize::canonicalize(&$value)),+
                }
            }
        }

        impl $crate::Canonicalize for $ty {
            fn canonicalize(&self) -> $crate::CanonicalValue {
                $crate::Enumeration::underlying_value(self)
            }
        }
    };
}

impl Canonicalize for CanonicalValue {
    fn canonicalize(&self) -> CanonicalValue {
        self.clone()
    }
}

impl Canonicalize for CanonicalMap {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::Map(self.clone())
    }
}

impl Canonicalize for Value {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::from_json(self)
    }
}

impl Canonicalize for bool {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::Bool(*self)
    }
}

macro_rules! signed {
    ($($t:ty),*) => {$(
        impl Canonicalize for $t {
            fn canonicalize(&self) -> CanonicalValue {
                CanonicalValue::from(*self as i64)
            }
        }
    )*};
}

macro_rules! unsigned {
    ($($t:ty),*) => {$(
        impl Canonicalize for $t {
            fn canonicalize(&self) -> CanonicalValue {
                CanonicalValue::from(*self as u64)
            }
        }
    )*};
}

signed!(i8, i16, i32, i64, isize);
unsigned!(u8, u16, u32, u64, usize);

impl Canonicalize for f64 {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::from_f64(*self)
    }
}

impl Canonicalize for f32 {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::from_f64(f64::from(*self))
    }
}

impl Canonicalize for str {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::String(self.to_string())
    }
}

impl Canonicalize for String {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::String(self.clone())
    }
}

impl<T: Canonicalize + ?Sized> Canonicalize for &T {
    fn canonicalize(&self) -> CanonicalValue {
        (**self).canonicalize()
    }
}

impl<T: Canonicalize + ?Sized> Canonicalize for Box<T> {
    fn canonicalize(&self) -> CanonicalValue {
        (**self).canonicalize()
    }
}

impl<T: Canonicalize> Canonicalize for Option<T> {
    fn canonicalize(&self) -> CanonicalValue {
        match self {
            Some(inner) => inner.canonicalize(),
            None => CanonicalValue::Null,
        }
    }
}

impl<T: Canonicalize> Canonicalize for [T] {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::Sequence(self.iter().map(Canonicalize::canonicalize).collect())
    }
}

impl<T: Canonicalize> Canonicalize for Vec<T> {
    fn canonicalize(&self) -> CanonicalValue {
        self.as_slice().canonicalize()
    }
}

impl<T: Canonicalize> Canonicalize for BTreeMap<String, T> {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::Map(
            self.iter()
                .map(|(key, value)| (key.clone(), value.canonicalize()))
                .collect(),
        )
    }
}

impl Canonicalize for NaiveDate {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::String(iso_date(self))
    }
}

impl Canonicalize for NaiveDateTime {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::String(iso_datetime(self))
    }
}

impl<Tz: TimeZone> Canonicalize for DateTime<Tz> {
    fn canonicalize(&self) -> CanonicalValue {
        CanonicalValue::String(iso_zoned(self))
    }
}
