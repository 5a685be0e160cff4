//! Maintainability Index result (spec §4.7).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaintainabilityIndex(pub f64);

impl MaintainabilityIndex {
    /// Letter rating bucket for the aggregator's distribution: A [80-100],
    /// B [60-80), C [40-60), D [20-40), F [0-20) (spec §4.10).
    pub fn rating(self) -> Rating {
        match self.0 {
            v if v >= 80.0 => Rating::A,
            v if v >= 60.0 => Rating::B,
            v if v >= 40.0 => Rating::C,
            v if v >= 20.0 => Rating::D,
            _ => Rating::F,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    A,
    B,
    C,
    D,
    F,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::A => "A",
            Rating::B => "B",
            Rating::C => "C",
            Rating::D => "D",
            Rating::F => "F",
        }
    }
}
