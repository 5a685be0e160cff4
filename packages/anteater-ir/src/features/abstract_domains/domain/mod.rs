//! Lattice-valued abstract state (spec §4.5).

mod interval;
mod nullability;

pub use interval::{Bound, Interval};
pub use nullability::Nullability;
use serde::{Deserialize, Serialize};

/// The product of the two domains tracked per symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractValue {
    pub nullability: Nullability,
    pub interval: Interval,
}

impl AbstractValue {
    pub fn bottom() -> Self {
        Self {
            nullability: Nullability::bottom(),
            interval: Interval::bottom(),
        }
    }

    pub fn top() -> Self {
        Self {
            nullability: Nullability::top(),
            interval: Interval::top(),
        }
    }

    pub fn non_null() -> Self {
        Self {
            nullability: Nullability::NonNull,
            interval: Interval::top(),
        }
    }

    pub fn null() -> Self {
        Self {
            nullability: Nullability::Null,
            interval: Interval::bottom(),
        }
    }

    pub fn int(v: i64) -> Self {
        Self {
            nullability: Nullability::NonNull,
            interval: Interval::point(v),
        }
    }

    pub fn join(self, other: Self) -> Self {
        Self {
            nullability: self.nullability.join(other.nullability),
            interval: self.interval.join(other.interval),
        }
    }

    pub fn leq(self, other: Self) -> bool {
        self.nullability.leq(other.nullability) && self.interval.leq(other.interval)
    }

    pub fn widen(self, other: Self) -> Self {
        Self {
            nullability: self.nullability.widen(other.nullability),
            interval: self.interval.widen(other.interval),
        }
    }

    pub fn narrow(self, other: Self) -> Self {
        Self {
            nullability: self.nullability.narrow(other.nullability),
            interval: self.interval.narrow(other.interval),
        }
    }
}
