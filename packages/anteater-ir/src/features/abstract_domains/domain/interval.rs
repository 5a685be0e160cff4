//! Interval lattice (spec §4.5): `⊥`, `[l,u]` with `l,u ∈ ℤ ∪ {−∞,+∞}`,
//! `⊤ = [−∞,+∞]`.

use serde::{Deserialize, Serialize};
use std::cmp::{max, min};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    NegInf,
    Finite(i64),
    PosInf,
}

impl Bound {
    fn min(self, other: Self) -> Self {
        match (self, other) {
            (Bound::NegInf, _) | (_, Bound::NegInf) => Bound::NegInf,
            (Bound::PosInf, x) | (x, Bound::PosInf) => x,
            (Bound::Finite(a), Bound::Finite(b)) => Bound::Finite(min(a, b)),
        }
    }

    fn max(self, other: Self) -> Self {
        match (self, other) {
            (Bound::PosInf, _) | (_, Bound::PosInf) => Bound::PosInf,
            (Bound::NegInf, x) | (x, Bound::NegInf) => x,
            (Bound::Finite(a), Bound::Finite(b)) => Bound::Finite(max(a, b)),
        }
    }

    fn le(self, other: Self) -> bool {
        match (self, other) {
            (Bound::NegInf, _) => true,
            (_, Bound::PosInf) => true,
            (Bound::PosInf, _) => matches!(other, Bound::PosInf),
            (_, Bound::NegInf) => matches!(self, Bound::NegInf),
            (Bound::Finite(a), Bound::Finite(b)) => a <= b,
        }
    }

    fn add(self, other: Self) -> Self {
        match (self, other) {
            (Bound::NegInf, Bound::PosInf) | (Bound::PosInf, Bound::NegInf) => Bound::Finite(0),
            (Bound::NegInf, _) | (_, Bound::NegInf) => Bound::NegInf,
            (Bound::PosInf, _) | (_, Bound::PosInf) => Bound::PosInf,
            (Bound::Finite(a), Bound::Finite(b)) => a
                .checked_add(b)
                .map(Bound::Finite)
                .unwrap_or(if a.is_negative() { Bound::NegInf } else { Bound::PosInf }),
        }
    }

    fn neg(self) -> Self {
        match self {
            Bound::NegInf => Bound::PosInf,
            Bound::PosInf => Bound::NegInf,
            Bound::Finite(a) => Bound::Finite(-a),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    Bottom,
    Range(Bound, Bound),
}

impl Interval {
    pub fn bottom() -> Self {
        Interval::Bottom
    }

    pub fn top() -> Self {
        Interval::Range(Bound::NegInf, Bound::PosInf)
    }

    pub fn point(v: i64) -> Self {
        Interval::Range(Bound::Finite(v), Bound::Finite(v))
    }

    pub fn range(lo: Bound, hi: Bound) -> Self {
        if lo.le(hi) {
            Interval::Range(lo, hi)
        } else {
            Interval::Bottom
        }
    }

    pub fn join(self, other: Self) -> Self {
        match (self, other) {
            (Interval::Bottom, x) | (x, Interval::Bottom) => x,
            (Interval::Range(l1, u1), Interval::Range(l2, u2)) => Interval::Range(l1.min(l2), u1.max(u2)),
        }
    }

    pub fn meet(self, other: Self) -> Self {
        match (self, other) {
            (Interval::Bottom, _) | (_, Interval::Bottom) => Interval::Bottom,
            (Interval::Range(l1, u1), Interval::Range(l2, u2)) => Interval::range(l1.max(l2), u1.min(u2)),
        }
    }

    pub fn leq(self, other: Self) -> bool {
        match (self, other) {
            (Interval::Bottom, _) => true,
            (_, Interval::Bottom) => false,
            (Interval::Range(l1, u1), Interval::Range(l2, u2)) => l2.le(l1) && u1.le(u2),
        }
    }

    /// Drops unstable bounds to infinity (spec §4.5): a bound that moved
    /// between `self` and `other` is assumed to keep moving.
    pub fn widen(self, other: Self) -> Self {
        match (self, other) {
            (Interval::Bottom, x) => x,
            (x, Interval::Bottom) => x,
            (Interval::Range(l1, u1), Interval::Range(l2, u2)) => {
                let lo = if l2.le(l1) && l2 != l1 { Bound::NegInf } else { l1.min(l2) };
                let hi = if u1.le(u2) && u1 != u2 { Bound::PosInf } else { u1.max(u2) };
                Interval::Range(lo, hi)
            }
        }
    }

    /// Tightens a post-widening interval using newly observed bounds;
    /// callers run this for at most two passes (spec §4.6).
    pub fn narrow(self, other: Self) -> Self {
        match (self, other) {
            (Interval::Bottom, _) | (_, Interval::Bottom) => Interval::Bottom,
            (Interval::Range(l1, u1), Interval::Range(l2, u2)) => {
                let lo = if l1 == Bound::NegInf { l2 } else { l1 };
                let hi = if u1 == Bound::PosInf { u2 } else { u1 };
                Interval::range(lo, hi)
            }
        }
    }

    pub fn add(self, other: Self) -> Self {
        match (self, other) {
            (Interval::Bottom, _) | (_, Interval::Bottom) => Interval::Bottom,
            (Interval::Range(l1, u1), Interval::Range(l2, u2)) => Interval::Range(l1.add(l2), u1.add(u2)),
        }
    }

    pub fn negate(self) -> Self {
        match self {
            Interval::Bottom => Interval::Bottom,
            Interval::Range(l, u) => Interval::Range(u.neg(), l.neg()),
        }
    }

    pub fn sub(self, other: Self) -> Self {
        self.add(other.negate())
    }

    /// Straddles zero (neither bound can rule out a division by 0).
    pub fn straddles_zero(self) -> bool {
        matches!(self, Interval::Range(lo, hi) if lo.le(Bound::Finite(0)) && Bound::Finite(0).le(hi))
    }

    /// Division per spec §4.5: an interval straddling zero as the divisor
    /// yields `⊤`.
    pub fn div(self, divisor: Self) -> Self {
        if divisor.straddles_zero() {
            return Interval::top();
        }
        match (self, divisor) {
            (Interval::Bottom, _) | (_, Interval::Bottom) => Interval::Bottom,
            (Interval::Range(l1, u1), Interval::Range(l2, u2)) => {
                let candidates = [div_bound(l1, l2), div_bound(l1, u2), div_bound(u1, l2), div_bound(u1, u2)];
                let lo = candidates.iter().copied().reduce(Bound::min).unwrap();
                let hi = candidates.iter().copied().reduce(Bound::max).unwrap();
                Interval::Range(lo, hi)
            }
        }
    }
}

fn div_bound(a: Bound, b: Bound) -> Bound {
    match (a, b) {
        (_, Bound::Finite(0)) => Bound::PosInf,
        (Bound::Finite(x), Bound::Finite(y)) => Bound::Finite(x / y),
        (Bound::NegInf, Bound::Finite(y)) => if y > 0 { Bound::NegInf } else { Bound::PosInf },
        (Bound::PosInf, Bound::Finite(y)) => if y > 0 { Bound::PosInf } else { Bound::NegInf },
        _ => Bound::Finite(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_takes_the_wider_bounds() {
        let a = Interval::range(Bound::Finite(0), Bound::Finite(5));
        let b = Interval::range(Bound::Finite(3), Bound::Finite(10));
        assert_eq!(a.join(b), Interval::Range(Bound::Finite(0), Bound::Finite(10)));
    }

    #[test]
    fn widen_drops_moving_bound_to_infinity() {
        let a = Interval::point(0);
        let b = Interval::range(Bound::Finite(0), Bound::Finite(1));
        let widened = a.widen(b);
        assert_eq!(widened, Interval::Range(Bound::Finite(0), Bound::PosInf));
    }

    #[test]
    fn division_by_interval_straddling_zero_is_top() {
        let dividend = Interval::point(10);
        let divisor = Interval::range(Bound::Finite(-1), Bound::Finite(1));
        assert_eq!(dividend.div(divisor), Interval::top());
    }

    #[test]
    fn leq_orders_narrower_inside_wider() {
        let narrow = Interval::point(5);
        let wide = Interval::range(Bound::Finite(0), Bound::Finite(10));
        assert!(narrow.leq(wide));
        assert!(!wide.leq(narrow));
    }
}
