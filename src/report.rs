//! What a load resolved: one entry per bound field.

use std::fmt;

use serde::Serialize;

use crate::types::{FlagKind, ValueSource};

/// A bound field's final value and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFlag {
    pub name: String,
    pub kind: FlagKind,
    pub source: ValueSource,
    /// The value as written into the record, rendered for display.
    pub value: String,
}

/// Returned by [`Binder::load`](crate::Binder::load). Display lists each field
/// as `NAME = value (source)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    entries: Vec<ResolvedFlag>,
    remaining_args: Vec<String>,
}

impl Resolution {
    pub(crate) fn new(entries: Vec<ResolvedFlag>, remaining_args: Vec<String>) -> Self {
        Self {
            entries,
            remaining_args,
        }
    }

    /// Entries in field declaration order.
    pub fn entries(&self) -> &[ResolvedFlag] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedFlag> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Positional arguments left after flag parsing stopped.
    pub fn remaining_args(&self) -> &[String] {
        &self.remaining_args
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} = {} ({})", entry.name, entry.value, entry.source)?;
        }
        Ok(())
    }
}
