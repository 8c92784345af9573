use otf_parity_canonical::canonical_enum;
use serde::{Deserialize, Serialize};

/// Operating status of a studio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudioStatus {
    /// Open for classes.
    Active,
    /// Closed for a limited period.
    #[serde(rename = "Temporarily Closed")]
    TemporarilyClosed,
    /// Announced but not yet open.
    #[serde(rename = "Coming Soon")]
    ComingSoon,
    /// Closed for good.
    #[serde(rename = "Permanently Closed")]
    PermanentlyClosed,
    /// Status not reported.
    Unknown,
}

canonical_enum!(StudioStatus {
    Active => "Active",
    TemporarilyClosed => "Temporarily Closed",
    ComingSoon => "Coming Soon",
    PermanentlyClosed => "Permanently Closed",
    Unknown => "Unknown",
});

/// State of a class booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Seat reserved.
    Booked,
    /// On the waitlist.
    Waitlisted,
    /// Attended.
    #[serde(rename = "Checked In")]
    CheckedIn,
    /// Cancelled inside the free window.
    Cancelled,
    /// Cancelled after the free window.
    #[serde(rename = "Late Cancelled")]
    LateCancelled,
}

canonical_enum!(BookingStatus {
    Booked => "Booked",
    Waitlisted => "Waitlisted",
    CheckedIn => "Checked In",
    Cancelled => "Cancelled",
    LateCancelled => "Late Cancelled",
});

/// Member gender as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    #[serde(rename = "M")]
    Male,
    /// Female.
    #[serde(rename = "F")]
    Female,
    /// Not disclosed.
    #[serde(rename = "U")]
    Unspecified,
}

canonical_enum!(Gender {
    Male => "M",
    Female => "F",
    Unspecified => "U",
});
