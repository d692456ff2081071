//! Core resolution pipeline: layer defaults, environment and arguments, then
//! write the result into the record.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no process access,
//! making the full pipeline testable with synthetic inputs. Steps:
//!
//! 1. Reject an unbindable record (`InvalidTarget`)
//! 2. Start every field at its default (or zero value)
//! 3. Apply environment literals on top
//! 4. Apply command-line literals on top (highest priority)
//! 5. Write every field back through its slot
//!
//! Every supplied literal is parsed, even one later overridden, and nothing
//! is written unless all of them parse.

use tracing::{debug, warn};

use crate::cli;
use crate::env;
use crate::error::EnvFlagsError;
use crate::flagset::FlagSet;
use crate::parse::parse_value;
use crate::report::{Resolution, ResolvedFlag};
use crate::types::ValueSource;
use crate::value::FlagValue;

/// All pre-loaded data needed for one resolution. No I/O happens here.
pub struct ResolveInput {
    /// Environment pairs (pass `env::process_env()` or synthetic data).
    /// `None` disables the environment layer.
    pub env_vars: Option<Vec<(String, String)>>,
    /// Arguments without the program name. `None` disables the argument layer.
    pub args: Option<Vec<String>>,
    /// Name shown in usage and argument errors.
    pub program_name: String,
    /// Arguments whose flag name starts with this are dropped.
    pub reserved_prefix: String,
}

pub fn resolve(set: FlagSet<'_>, input: ResolveInput) -> Result<Resolution, EnvFlagsError> {
    // 1: Target must be bindable before anything else happens
    set.validate()?;

    // 2: Defaults
    let mut resolved: Vec<(FlagValue, ValueSource)> = set
        .flags()
        .iter()
        .map(|flag| (flag.default_value().clone(), flag.default_source()))
        .collect();

    // 3: Environment on top
    if let Some(vars) = input.env_vars {
        for (name, literal) in env::env_literals(&set, vars) {
            apply(&set, &mut resolved, &name, literal, ValueSource::Env)?;
        }
    }

    // 4: Arguments on top
    let mut remaining_args = Vec::new();
    if let Some(args) = input.args {
        let parsed = cli::parse_args(&set, &input.program_name, &input.reserved_prefix, args)?;
        for (name, literal) in parsed.supplied {
            apply(&set, &mut resolved, &name, literal, ValueSource::Arg)?;
        }
        remaining_args = parsed.positionals;
    }

    // 5: Write back
    let mut entries = Vec::with_capacity(resolved.len());
    for (flag, (value, source)) in set.into_flags().into_iter().zip(resolved) {
        let entry = ResolvedFlag {
            name: flag.name().to_string(),
            kind: flag.kind(),
            source,
            value: value.to_string(),
        };
        if !flag.assign(value) {
            warn!(flag = %entry.name, "resolved value does not match field kind");
        }
        entries.push(entry);
    }
    debug!(fields = entries.len(), "populated record");

    Ok(Resolution::new(entries, remaining_args))
}

fn apply(
    set: &FlagSet<'_>,
    resolved: &mut [(FlagValue, ValueSource)],
    name: &str,
    literal: String,
    origin: ValueSource,
) -> Result<(), EnvFlagsError> {
    let Some(index) = set.position(name) else {
        return Ok(());
    };
    let kind = set.flags()[index].kind();
    let value = parse_value(kind, &literal).map_err(|err| EnvFlagsError::InvalidValue {
        name: name.to_string(),
        value: literal.clone(),
        origin,
        reason: err.to_string(),
    })?;
    debug!(flag = name, %origin, "supplied value");
    resolved[index] = (value, origin);
    Ok(())
}
