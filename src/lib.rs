//! Populate a configuration struct from environment variables, with optional
//! command-line override. Built for 12-factor style services: declare the
//! struct, annotate the fields, call one function at startup.
//!
//! ```ignore
//! use envflags::EnvFlags;
//!
//! #[derive(EnvFlags)]
//! struct Config {
//!     /// Address to listen on.
//!     #[flag(name = "LISTEN_ADDR", default = "0.0.0.0:8080")]
//!     pub listen_addr: String,
//!
//!     #[flag(name = "SHUTDOWN_GRACE", default = "30s")]
//!     pub shutdown_grace: chrono::TimeDelta,
//!
//!     /// Not public, never touched.
//!     secret_cache: String,
//! }
//!
//! let mut config = Config { /* ... */ };
//! envflags::populate_from_env(&mut config)?;
//! ```
//!
//! # Which fields are bound
//!
//! A field is bound when it is declared `pub` and its type is one of:
//!
//! | Kind | Rust type |
//! |------|-----------|
//! | bool | `bool` |
//! | duration | `chrono::TimeDelta` (`chrono::Duration`) |
//! | float64 | `f64` |
//! | int | `isize` |
//! | int64 | `i64` |
//! | string | `String` |
//! | uint | `usize` |
//! | uint64 | `u64` |
//!
//! Anything else (including `std::time::Duration`) is skipped silently, as is
//! a field marked `#[flag(skip)]`.
//! The external name is `#[flag(name = "...")]` or the field identifier.
//!
//! # Layer precedence
//!
//! ```text
//! Zero value            false, 0, "", 0s
//!        ↑ replaced by
//! Default literal       #[flag(default = "...")], when it parses
//!        ↑ overridden by
//! Environment           NAME=value, exact case-sensitive match
//!        ↑ overridden by
//! Command line          -NAME=value   (populate_from_env_with_args only)
//! ```
//!
//! A default literal that does not parse quietly falls back to the zero
//! value. A supplied value that does not parse is an
//! [`EnvFlagsError::InvalidValue`]: the record is left untouched and the
//! caller is expected to log the error and exit, see
//! [`EnvFlagsError::is_fatal`] and [`EnvFlagsError::exit_code`].
//!
//! # Value syntax
//!
//! - bool: `1 t T TRUE true True`, `0 f F FALSE false False`
//! - duration: `7h2m3s`, `1.5h`, `-300ms`, `0`; units `ns us µs ms s m h`
//! - integers: decimal, `0x` hex, `0o` or leading-`0` octal, `0b` binary,
//!   `_` separators
//! - float64: `3.14`, `1e-3`, `inf`, `NaN`
//! - string: taken verbatim
//!
//! # Command line
//!
//! `-NAME=value`, `-NAME value` and the `--` forms are accepted; a boolean
//! may appear bare (`-verbose`). Parsing stops at `--` or the first
//! positional argument. Unknown flags are an error. Tokens whose name starts
//! with `test.` are reserved for test runners and always dropped.
//!
//! Use [`Binder`] for control over the inputs (explicit environment or
//! argument lists, program name, reserved prefix) and to get the
//! [`Resolution`] report of where each value came from.

pub mod error;
pub mod types;

mod builder;
mod cli;
mod duration;
mod env;
mod flagset;
mod parse;
mod report;
mod resolve;
mod value;

#[cfg(test)]
mod fixtures;

pub use builder::Binder;
pub use cli::RESERVED_PREFIX;
pub use error::EnvFlagsError;
pub use flagset::{EnvFlags, Flag, FlagSet};
pub use parse::ParseValueError;
pub use report::{Resolution, ResolvedFlag};
pub use types::{FlagKind, ValueSource};
pub use value::{Bindable, FlagValue, Slot};

#[cfg(feature = "derive")]
pub use envflags_derive::EnvFlags;

/// Populate `target` from the process environment.
///
/// Each bound field ends up holding the matching environment variable, else
/// its parsed default literal, else its zero value. Arguments are not read.
pub fn populate_from_env<T: EnvFlags + ?Sized>(target: &mut T) -> Result<(), EnvFlagsError> {
    Binder::new().load(target).map(drop)
}

/// Populate `target` from the process environment, then let the process
/// arguments override it.
///
/// `-NAME=value` on the command line beats `NAME=value` in the
/// environment.
pub fn populate_from_env_with_args<T: EnvFlags + ?Sized>(
    target: &mut T,
) -> Result<(), EnvFlagsError> {
    Binder::new().process_args().load(target).map(drop)
}
