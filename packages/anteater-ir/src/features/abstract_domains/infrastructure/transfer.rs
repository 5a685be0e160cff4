//! `transfer(op, operandStates)` for each operation tag the CFG carries
//! (spec §4.5). Nullability and interval transfer independently; the
//! caller is responsible for combining them with control-flow refinement
//! (e.g. narrowing `x` after `if (x != null)`), which lives in C6 since it
//! depends on branch conditions rather than the instruction alone.

use super::super::domain::{AbstractValue, Interval, Nullability};
use crate::features::cfg::domain::{BinOpKind, OperationTag};

pub fn transfer(op: &OperationTag, operands: &[AbstractValue]) -> AbstractValue {
    match op {
        OperationTag::Assign => operands.first().copied().unwrap_or_else(AbstractValue::top),
        OperationTag::Alloc => AbstractValue::non_null(),
        OperationTag::Call => AbstractValue::top(),
        OperationTag::Load | OperationTag::IndexLoad => AbstractValue {
            nullability: Nullability::Nullable,
            interval: Interval::top(),
        },
        OperationTag::BinOp(kind) => transfer_binop(*kind, operands),
        OperationTag::NullCheck => AbstractValue {
            nullability: Nullability::NonNull,
            interval: Interval::top(),
        },
        OperationTag::Store | OperationTag::IndexStore | OperationTag::Branch | OperationTag::Return => {
            AbstractValue::top()
        }
        OperationTag::Phi => operands
            .iter()
            .copied()
            .fold(AbstractValue::bottom(), AbstractValue::join),
    }
}

fn transfer_binop(kind: BinOpKind, operands: &[AbstractValue]) -> AbstractValue {
    let (Some(&a), Some(&b)) = (operands.first(), operands.get(1)) else {
        return AbstractValue::top();
    };
    match kind {
        BinOpKind::Add => AbstractValue {
            nullability: Nullability::NonNull,
            interval: a.interval.add(b.interval),
        },
        BinOpKind::Sub => AbstractValue {
            nullability: Nullability::NonNull,
            interval: a.interval.sub(b.interval),
        },
        BinOpKind::Div => AbstractValue {
            nullability: Nullability::NonNull,
            interval: a.interval.div(b.interval),
        },
        BinOpKind::Mul | BinOpKind::Mod => AbstractValue {
            nullability: Nullability::NonNull,
            interval: Interval::top(),
        },
        BinOpKind::Eq
        | BinOpKind::Ne
        | BinOpKind::Lt
        | BinOpKind::Le
        | BinOpKind::Gt
        | BinOpKind::Ge
        | BinOpKind::And
        | BinOpKind::Or
        | BinOpKind::Other => AbstractValue {
            nullability: Nullability::NonNull,
            interval: Interval::top(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_is_always_non_null() {
        let v = transfer(&OperationTag::Alloc, &[]);
        assert_eq!(v.nullability, Nullability::NonNull);
    }

    #[test]
    fn field_load_is_nullable_without_annotation() {
        let v = transfer(&OperationTag::Load, &[AbstractValue::non_null()]);
        assert_eq!(v.nullability, Nullability::Nullable);
    }
}
