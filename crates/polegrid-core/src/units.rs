//! Unit newtypes for distances and money.
//!
//! Span lengths and cost estimates travel through the planner as plain
//! numbers in several places (distance matrix, edge weights, rounded report
//! fields). Wrapping the values that cross module boundaries keeps a length
//! from being added to a cost by accident:
//!
//! ```
//! use polegrid_core::units::{Dollars, Meters};
//!
//! let span = Meters(42.0) + Meters(8.0);
//! let wire = span.priced_at(2.5);
//! assert_eq!(wire, Dollars(125.0));
//!
//! // let wrong = span + wire; // does not compile
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Additive arithmetic plus the report rounding, shared by both units. No
/// scaling ops: the only length-to-money conversion is [`Meters::priced_at`].
macro_rules! unit_newtype {
    ($type:ident, $suffix:literal) => {
        impl Add for $type {
            type Output = $type;
            fn add(self, rhs: $type) -> $type {
                $type(self.0 + rhs.0)
            }
        }

        impl AddAssign for $type {
            fn add_assign(&mut self, rhs: $type) {
                self.0 += rhs.0;
            }
        }

        impl Sum for $type {
            fn sum<I: Iterator<Item = $type>>(iter: I) -> $type {
                iter.fold($type(0.0), Add::add)
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.2} {}", self.0, $suffix)
            }
        }

        impl $type {
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Two decimals, half away from zero, as every report field is.
            #[inline]
            pub fn rounded(self) -> $type {
                $type(round2(self.0))
            }
        }
    };
}

/// Length along the ground in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Meters(pub f64);

unit_newtype!(Meters, "m");

/// Monetary amount in the caller's currency.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Dollars(pub f64);

unit_newtype!(Dollars, "$");

impl Meters {
    /// Cost of this much wire at `cost_per_meter`.
    #[inline]
    pub fn priced_at(self, cost_per_meter: f64) -> Dollars {
        Dollars(self.0 * cost_per_meter)
    }
}

/// Two-decimal rounding used for every length and cost in a plan report.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
