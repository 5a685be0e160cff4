//! Nullability lattice (spec §4.5): `⊥ < {NonNull, Null} < Nullable < ⊤`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nullability {
    Bottom,
    NonNull,
    Null,
    Nullable,
    Top,
}

impl Nullability {
    pub fn bottom() -> Self {
        Nullability::Bottom
    }

    pub fn top() -> Self {
        Nullability::Top
    }

    pub fn join(self, other: Self) -> Self {
        use Nullability::*;
        match (self, other) {
            (Bottom, x) | (x, Bottom) => x,
            (Top, _) | (_, Top) => Top,
            (a, b) if a == b => a,
            (NonNull, Null) | (Null, NonNull) => Nullable,
            (Nullable, NonNull) | (NonNull, Nullable) => Nullable,
            (Nullable, Null) | (Null, Nullable) => Nullable,
        }
    }

    pub fn meet(self, other: Self) -> Self {
        use Nullability::*;
        match (self, other) {
            (Top, x) | (x, Top) => x,
            (Bottom, _) | (_, Bottom) => Bottom,
            (a, b) if a == b => a,
            (Nullable, x) | (x, Nullable) => x,
            (NonNull, Null) | (Null, NonNull) => Bottom,
        }
    }

    pub fn leq(self, other: Self) -> bool {
        self.join(other) == other
    }

    /// Finite-height lattice: widening and narrowing both collapse to join
    /// (spec §4.6 only calls for interval widening at loop headers; this
    /// domain never needs to - it reaches its fixpoint in at most 3 joins).
    pub fn widen(self, other: Self) -> Self {
        self.join(other)
    }

    pub fn narrow(self, other: Self) -> Self {
        self.meet(other).join(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Nullability::*;

    #[test]
    fn non_null_join_null_is_nullable() {
        assert_eq!(NonNull.join(Null), Nullable);
    }

    #[test]
    fn bottom_is_identity_for_join() {
        assert_eq!(Bottom.join(NonNull), NonNull);
    }

    #[test]
    fn leq_respects_lattice_order() {
        assert!(NonNull.leq(Nullable));
        assert!(!Nullable.leq(NonNull));
        assert!(Bottom.leq(Top));
    }
}
