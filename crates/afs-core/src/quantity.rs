//! # Byte Quantities
//!
//! [`Quantity`] wraps a byte count and renders it with binary prefixes.
//!
//! ## Rendering Rule
//!
//! The unit is the largest threshold the value is *strictly greater* than,
//! falling back to bytes. A value exactly equal to a threshold stays in the
//! lower unit: `1024` renders as `"1024 B"`, `1025` as `"1 KiB"`. The value
//! is floor-divided by the chosen threshold. GiB is the largest unit.

use serde::{Deserialize, Serialize};

use crate::error::InvalidQuantity;

/// Binary-prefix thresholds, largest first, with their unit labels.
const UNITS: [(u64, &str); 3] = [
    (Quantity::GIBIBYTE.0, "GiB"),
    (Quantity::MEBIBYTE.0, "MiB"),
    (Quantity::KIBIBYTE.0, "KiB"),
];

/// A non-negative number of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const BYTE: Quantity = Quantity(1);
    pub const KIBIBYTE: Quantity = Quantity(1 << 10);
    pub const MEBIBYTE: Quantity = Quantity(1 << 20);
    pub const GIBIBYTE: Quantity = Quantity(1 << 30);

    /// Create a quantity from a signed byte count.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidQuantity`] if `bytes` is negative.
    pub fn of(bytes: i64) -> Result<Self, InvalidQuantity> {
        u64::try_from(bytes).map(Self).map_err(|_| InvalidQuantity(bytes))
    }

    /// The raw byte count.
    pub fn bytes(self) -> u64 {
        self.0
    }

    /// The floor-divided value and the unit label used to display it.
    pub fn scaled(self) -> (u64, &'static str) {
        for (threshold, unit) in UNITS {
            if self.0 > threshold {
                return (self.0 / threshold, unit);
            }
        }
        (self.0, "B")
    }

    /// Render as `"<integer> <unit>"`.
    pub fn to_display_string(self) -> String {
        let (value, unit) = self.scaled();
        format!("{value} {unit}")
    }
}

impl From<u64> for Quantity {
    fn from(bytes: u64) -> Self {
        Self(bytes)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = InvalidQuantity;

    fn try_from(bytes: i64) -> Result<Self, Self::Error> {
        Self::of(bytes)
    }
}

impl std::iter::Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        Self(iter.map(|q| q.0).fold(0, u64::saturating_add))
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (value, unit) = self.scaled();
        write!(f, "{value} {unit}")
    }
}
