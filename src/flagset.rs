//! The per-call binding table: one descriptor per eligible record field.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::EnvFlagsError;
use crate::parse::parse_value;
use crate::types::{FlagKind, ValueSource};
use crate::value::{Bindable, FlagValue, Slot};

/// A record whose fields can be populated from the environment.
///
/// Usually derived with `#[derive(EnvFlags)]`. A hand-written impl registers
/// each bindable field on the set:
///
/// ```
/// use envflags::{EnvFlags, FlagSet};
///
/// struct Server {
///     pub port: u64,
///     pub host: String,
/// }
///
/// impl EnvFlags for Server {
///     fn bind_fields<'a>(&'a mut self, set: &mut FlagSet<'a>) {
///         set.field("PORT", "8080", &mut self.port);
///         set.field("HOST", "localhost", &mut self.host);
///     }
/// }
/// ```
pub trait EnvFlags {
    fn bind_fields<'a>(&'a mut self, set: &mut FlagSet<'a>);
}

/// One bound field: its external name, default and write-back slot.
#[derive(Debug)]
pub struct Flag<'a> {
    name: String,
    default_literal: String,
    help: String,
    default: FlagValue,
    default_source: ValueSource,
    slot: Slot<'a>,
}

impl<'a> Flag<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FlagKind {
        self.slot.kind()
    }

    pub fn default_literal(&self) -> &str {
        &self.default_literal
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// The parsed default, or the zero value when the literal did not parse.
    pub fn default_value(&self) -> &FlagValue {
        &self.default
    }

    pub(crate) fn default_source(&self) -> ValueSource {
        self.default_source
    }

    pub(crate) fn assign(self, value: FlagValue) -> bool {
        self.slot.assign(value)
    }
}

/// Registration target handed to [`EnvFlags::bind_fields`].
///
/// Registration never fails on the spot. Problems that make the record
/// unbindable are remembered and reported as
/// [`EnvFlagsError::InvalidTarget`] before anything is written.
#[derive(Debug, Default)]
pub struct FlagSet<'a> {
    flags: Vec<Flag<'a>>,
    index: HashMap<String, usize>,
    problems: Vec<String>,
}

impl<'a> FlagSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `target` under the external `name` with a default literal.
    /// An empty `default` means "use the zero value".
    pub fn field<T: Bindable>(&mut self, name: &str, default: &str, target: &'a mut T) -> &mut Self {
        self.field_with_help(name, default, "", target)
    }

    /// Like [`field`](Self::field), with a help line for usage output.
    pub fn field_with_help<T: Bindable>(
        &mut self,
        name: &str,
        default: &str,
        help: &str,
        target: &'a mut T,
    ) -> &mut Self {
        if let Err(problem) = self.check_name(name) {
            self.problems.push(problem);
            return self;
        }

        let (default_value, default_source) = match parse_value(T::KIND, default) {
            Ok(value) => (value, ValueSource::Default),
            Err(err) => {
                if !default.is_empty() {
                    debug!(
                        flag = name,
                        literal = default,
                        error = %err,
                        "default literal does not parse, using zero value"
                    );
                }
                (FlagValue::zero(T::KIND), ValueSource::Zero)
            }
        };
        trace!(flag = name, kind = %T::KIND, default = %default_value, "registered flag");

        self.index.insert(name.to_string(), self.flags.len());
        self.flags.push(Flag {
            name: name.to_string(),
            default_literal: default.to_string(),
            help: help.to_string(),
            default: default_value,
            default_source,
            slot: target.slot(),
        });
        self
    }

    fn check_name(&self, name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("flag name must not be empty".to_string());
        }
        if name.starts_with('-') {
            return Err(format!("flag name '{name}' must not start with '-'"));
        }
        if name.contains('=') {
            return Err(format!("flag name '{name}' must not contain '='"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(format!("flag name '{name}' must not contain whitespace"));
        }
        if self.index.contains_key(name) {
            return Err(format!("flag '{name}' registered twice"));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<&Flag<'a>> {
        self.index.get(name).map(|&i| &self.flags[i])
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn flags(&self) -> &[Flag<'a>] {
        &self.flags
    }

    pub(crate) fn into_flags(self) -> Vec<Flag<'a>> {
        self.flags
    }

    /// Fail with [`EnvFlagsError::InvalidTarget`] if any registration was
    /// rejected.
    pub fn validate(&self) -> Result<(), EnvFlagsError> {
        match self.problems.first() {
            None => Ok(()),
            Some(reason) => Err(EnvFlagsError::InvalidTarget {
                reason: reason.clone(),
            }),
        }
    }
}
