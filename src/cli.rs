//! Command-line layer.
//!
//! Arguments use single-dash long names (`-PORT=8080`, `-PORT 8080`,
//! `-verbose`), with `--` accepted as well. Before parsing, tokens carrying
//! the reserved test-runner prefix are dropped and single-dash names are
//! rewritten to the double-dash form, then a [`clap::Command`] built from the
//! registered flags does the actual parsing.
//!
//! Parsing stops at `--` or at the first token that is not a flag; the rest
//! is returned as positional arguments. Unknown flags are an error.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::error::EnvFlagsError;
use crate::flagset::FlagSet;

/// Name prefix reserved for test-runner plumbing (`-test.v`, `--test.run=..`).
pub const RESERVED_PREFIX: &str = "test.";

const POSITIONAL_ID: &str = "__envflags_positional";
const HELP_ID: &str = "__envflags_help";

/// Supplied literals and leftover positionals from one argument list.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedArgs {
    /// `(name, literal)` in occurrence order per flag; the last one wins.
    pub supplied: Vec<(String, String)>,
    pub positionals: Vec<String>,
}

/// Parse `args` (without the program name) against the registered flags.
pub fn parse_args(
    set: &FlagSet<'_>,
    program_name: &str,
    reserved_prefix: &str,
    args: impl IntoIterator<Item = String>,
) -> Result<ParsedArgs, EnvFlagsError> {
    let args = strip_reserved(args, reserved_prefix);
    let args = normalize(set, args);

    let matches = build_command(set, program_name)
        .try_get_matches_from(std::iter::once(program_name.to_string()).chain(args))?;

    let mut supplied = Vec::new();
    for flag in set.flags() {
        if let Some(values) = matches.get_many::<String>(flag.name()) {
            supplied.extend(values.map(|v| (flag.name().to_string(), v.clone())));
        }
    }
    let positionals = matches
        .get_many::<String>(POSITIONAL_ID)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    Ok(ParsedArgs {
        supplied,
        positionals,
    })
}

/// Drop every token whose flag name starts with `prefix`, wherever it appears.
pub fn strip_reserved(args: impl IntoIterator<Item = String>, prefix: &str) -> Vec<String> {
    args.into_iter()
        .filter(|arg| {
            let name = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'));
            !name.is_some_and(|name| name.starts_with(prefix))
        })
        .collect()
}

/// Rewrite `-name...` flag tokens to `--name...` so clap sees long flags.
///
/// A token that is the value of a preceding non-boolean flag is left alone,
/// so `-OFFSET -5` keeps `-5` as the value. Everything after `--` or the
/// first positional is passed through untouched.
fn normalize(set: &FlagSet<'_>, args: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut args = args.into_iter();
    let mut expecting_value = false;

    while let Some(arg) = args.next() {
        if expecting_value {
            expecting_value = false;
            out.push(arg);
            continue;
        }
        if arg == "--" || arg == "-" || !arg.starts_with('-') {
            out.push(arg);
            out.extend(args.by_ref());
            break;
        }

        let body = arg
            .strip_prefix("--")
            .unwrap_or_else(|| &arg[1..])
            .to_string();
        let (name, has_value) = match body.split_once('=') {
            Some((name, _)) => (name, true),
            None => (body.as_str(), false),
        };
        if !has_value {
            expecting_value = set.lookup(name).is_some_and(|f| f.kind().takes_value());
        }
        out.push(format!("--{body}"));
    }
    out
}

fn build_command(set: &FlagSet<'_>, program_name: &str) -> Command {
    let mut cmd = Command::new(program_name.to_string())
        .disable_help_flag(true)
        .disable_version_flag(true);

    for flag in set.flags() {
        let arg = Arg::new(flag.name().to_string())
            .long(flag.name().to_string())
            .help(flag.help().to_string())
            .action(ArgAction::Append)
            .value_parser(value_parser!(String));
        let arg = if flag.kind().takes_value() {
            arg.num_args(1)
                .allow_hyphen_values(true)
                .value_name(flag.kind().as_str().to_string())
        } else {
            arg.num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        };
        cmd = cmd.arg(arg);
    }

    // `-help` and `-h` ask for usage unless a record claims those names.
    let mut help_names = ["help", "h"].into_iter().filter(|n| set.lookup(n).is_none());
    if let Some(long) = help_names.next() {
        let mut help = Arg::new(HELP_ID)
            .long(long)
            .action(ArgAction::Help)
            .help("Print help");
        for alias in help_names {
            help = help.alias(alias);
        }
        cmd = cmd.arg(help);
    }

    cmd.arg(
        Arg::new(POSITIONAL_ID)
            .num_args(1..)
            .trailing_var_arg(true)
            .value_parser(value_parser!(String))
            .hide(true),
    )
}
