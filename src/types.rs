use std::fmt;

use serde::Serialize;

/// The closed set of scalar kinds a field can be bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagKind {
    /// `bool`
    Bool,
    /// `chrono::TimeDelta` (signed)
    Duration,
    /// `f64`
    Float64,
    /// `isize`
    Int,
    /// `i64`
    Int64,
    /// `String`
    String,
    /// `usize`
    Uint,
    /// `u64`
    Uint64,
}

impl FlagKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlagKind::Bool => "bool",
            FlagKind::Duration => "duration",
            FlagKind::Float64 => "float64",
            FlagKind::Int => "int",
            FlagKind::Int64 => "int64",
            FlagKind::String => "string",
            FlagKind::Uint => "uint",
            FlagKind::Uint64 => "uint64",
        }
    }

    /// Whether a command-line occurrence needs an explicit value.
    /// Booleans may appear bare (`-verbose`), everything else may not.
    pub fn takes_value(self) -> bool {
        !matches!(self, FlagKind::Bool)
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a field's final value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    /// The field's default literal.
    Default,
    /// No usable default literal, so the kind's zero value.
    Zero,
    /// An environment variable named after the field.
    Env,
    /// A command-line argument.
    Arg,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueSource::Default => "default",
            ValueSource::Zero => "zero",
            ValueSource::Env => "env",
            ValueSource::Arg => "arg",
        };
        f.write_str(s)
    }
}
