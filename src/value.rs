//! Typed values and the write-back slots that carry them into a record.

use std::fmt;

use chrono::TimeDelta;

use crate::duration;
use crate::types::FlagKind;

/// A parsed value of one of the supported kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Bool(bool),
    Duration(TimeDelta),
    Float64(f64),
    Int(isize),
    Int64(i64),
    String(String),
    Uint(usize),
    Uint64(u64),
}

impl FlagValue {
    pub fn kind(&self) -> FlagKind {
        match self {
            FlagValue::Bool(_) => FlagKind::Bool,
            FlagValue::Duration(_) => FlagKind::Duration,
            FlagValue::Float64(_) => FlagKind::Float64,
            FlagValue::Int(_) => FlagKind::Int,
            FlagValue::Int64(_) => FlagKind::Int64,
            FlagValue::String(_) => FlagKind::String,
            FlagValue::Uint(_) => FlagKind::Uint,
            FlagValue::Uint64(_) => FlagKind::Uint64,
        }
    }

    /// The value a field of `kind` takes when nothing else applies.
    pub fn zero(kind: FlagKind) -> Self {
        match kind {
            FlagKind::Bool => FlagValue::Bool(false),
            FlagKind::Duration => FlagValue::Duration(TimeDelta::zero()),
            FlagKind::Float64 => FlagValue::Float64(0.0),
            FlagKind::Int => FlagValue::Int(0),
            FlagKind::Int64 => FlagValue::Int64(0),
            FlagKind::String => FlagValue::String(String::new()),
            FlagKind::Uint => FlagValue::Uint(0),
            FlagKind::Uint64 => FlagValue::Uint64(0),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(v) => write!(f, "{v}"),
            FlagValue::Duration(v) => f.write_str(&duration::format(*v)),
            FlagValue::Float64(v) => write!(f, "{v}"),
            FlagValue::Int(v) => write!(f, "{v}"),
            FlagValue::Int64(v) => write!(f, "{v}"),
            FlagValue::String(v) => f.write_str(v),
            FlagValue::Uint(v) => write!(f, "{v}"),
            FlagValue::Uint64(v) => write!(f, "{v}"),
        }
    }
}

/// A mutable borrow of one record field, tagged with its kind.
#[derive(Debug)]
pub enum Slot<'a> {
    Bool(&'a mut bool),
    Duration(&'a mut TimeDelta),
    Float64(&'a mut f64),
    Int(&'a mut isize),
    Int64(&'a mut i64),
    String(&'a mut String),
    Uint(&'a mut usize),
    Uint64(&'a mut u64),
}

impl Slot<'_> {
    pub fn kind(&self) -> FlagKind {
        match self {
            Slot::Bool(_) => FlagKind::Bool,
            Slot::Duration(_) => FlagKind::Duration,
            Slot::Float64(_) => FlagKind::Float64,
            Slot::Int(_) => FlagKind::Int,
            Slot::Int64(_) => FlagKind::Int64,
            Slot::String(_) => FlagKind::String,
            Slot::Uint(_) => FlagKind::Uint,
            Slot::Uint64(_) => FlagKind::Uint64,
        }
    }

    /// Write `value` through the borrow. Returns `false`, leaving the field
    /// alone, when the value's kind does not match the slot's.
    pub fn assign(self, value: FlagValue) -> bool {
        match (self, value) {
            (Slot::Bool(t), FlagValue::Bool(v)) => *t = v,
            (Slot::Duration(t), FlagValue::Duration(v)) => *t = v,
            (Slot::Float64(t), FlagValue::Float64(v)) => *t = v,
            (Slot::Int(t), FlagValue::Int(v)) => *t = v,
            (Slot::Int64(t), FlagValue::Int64(v)) => *t = v,
            (Slot::String(t), FlagValue::String(v)) => *t = v,
            (Slot::Uint(t), FlagValue::Uint(v)) => *t = v,
            (Slot::Uint64(t), FlagValue::Uint64(v)) => *t = v,
            _ => return false,
        }
        true
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Field types that can be bound. Implemented for exactly the supported
/// carriers: `bool`, `chrono::TimeDelta`, `f64`, `isize`, `i64`, `String`,
/// `usize` and `u64`.
pub trait Bindable: sealed::Sealed {
    const KIND: FlagKind;

    fn slot(&mut self) -> Slot<'_>;
}

macro_rules! bindable {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Bindable for $ty {
                const KIND: FlagKind = FlagKind::$variant;

                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

bindable! {
    bool => Bool,
    TimeDelta => Duration,
    f64 => Float64,
    isize => Int,
    i64 => Int64,
    String => String,
    usize => Uint,
    u64 => Uint64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_writes_matching_kind() {
        let mut port: u64 = 0;
        assert!(port.slot().assign(FlagValue::Uint64(8080)));
        assert_eq!(port, 8080);

        let mut timeout = TimeDelta::zero();
        assert!(timeout.slot().assign(FlagValue::Duration(TimeDelta::seconds(5))));
        assert_eq!(timeout, TimeDelta::seconds(5));
    }

    #[test]
    fn assign_refuses_mismatched_kind() {
        let mut count: i64 = 7;
        assert!(!count.slot().assign(FlagValue::Int(1)));
        assert_eq!(count, 7);
    }

    #[test]
    fn slot_kind_matches_bindable_kind() {
        let mut name = String::new();
        assert_eq!(name.slot().kind(), <String as Bindable>::KIND);
        let mut n: isize = 0;
        assert_eq!(n.slot().kind(), FlagKind::Int);
    }

    #[test]
    fn zero_values() {
        assert_eq!(FlagValue::zero(FlagKind::Bool), FlagValue::Bool(false));
        assert_eq!(
            FlagValue::zero(FlagKind::Duration),
            FlagValue::Duration(TimeDelta::zero())
        );
        assert_eq!(
            FlagValue::zero(FlagKind::String),
            FlagValue::String(String::new())
        );
        for kind in [FlagKind::Int, FlagKind::Uint64, FlagKind::Float64] {
            assert_eq!(FlagValue::zero(kind).kind(), kind);
        }
    }

    #[test]
    fn display_uses_duration_form() {
        assert_eq!(
            FlagValue::Duration(TimeDelta::seconds(3723)).to_string(),
            "1h2m3s"
        );
        assert_eq!(FlagValue::Uint(255).to_string(), "255");
    }
}
