use tracing::debug;

use crate::cli::RESERVED_PREFIX;
use crate::env;
use crate::error::EnvFlagsError;
use crate::flagset::{EnvFlags, FlagSet};
use crate::report::Resolution;
use crate::resolve::{self, ResolveInput};

/// Program name used when no argument layer is involved.
const ENV_PROGRAM_NAME: &str = "environment";

#[derive(Debug, Clone, PartialEq)]
enum ArgSource {
    Disabled,
    Process,
    List(Vec<String>),
}

/// Builder for a single populate call.
///
/// By default only the process environment is read. Enable the argument
/// layer with [`process_args()`](Self::process_args) or
/// [`args()`](Self::args); arguments always override the environment.
///
/// ```no_run
/// # use envflags::{Binder, EnvFlags, FlagSet};
/// # struct Config { pub port: u64 }
/// # impl EnvFlags for Config {
/// #     fn bind_fields<'a>(&'a mut self, set: &mut FlagSet<'a>) {
/// #         set.field("PORT", "8080", &mut self.port);
/// #     }
/// # }
/// let mut config = Config { port: 0 };
/// let resolution = Binder::new().process_args().load(&mut config)?;
/// println!("{resolution}");
/// # Ok::<(), envflags::EnvFlagsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Binder {
    program_name: Option<String>,
    env_vars: Option<Vec<(String, String)>>,
    env_enabled: bool,
    args: ArgSource,
    reserved_prefix: String,
}

impl Default for Binder {
    fn default() -> Self {
        Self::new()
    }
}

impl Binder {
    pub fn new() -> Self {
        Self {
            program_name: None,
            env_vars: None,
            env_enabled: true,
            args: ArgSource::Disabled,
            reserved_prefix: RESERVED_PREFIX.to_string(),
        }
    }

    /// Name shown in usage and argument errors (default: `argv[0]` when
    /// reading process arguments, `"environment"` otherwise).
    pub fn program_name(mut self, name: &str) -> Self {
        self.program_name = Some(name.to_string());
        self
    }

    /// Use these pairs instead of the process environment.
    pub fn env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Disable the environment layer entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Read the process arguments (after `argv[0]`) on top of the environment.
    pub fn process_args(mut self) -> Self {
        self.args = ArgSource::Process;
        self
    }

    /// Parse these arguments (without a program name) on top of the
    /// environment.
    pub fn args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.args = ArgSource::List(args.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the reserved test-runner prefix (default `"test."`).
    /// Argument tokens whose flag name starts with it are dropped.
    pub fn reserved_prefix(mut self, prefix: &str) -> Self {
        self.reserved_prefix = prefix.to_string();
        self
    }

    fn effective_program_name(&self) -> String {
        if let Some(name) = &self.program_name {
            return name.clone();
        }
        if self.args == ArgSource::Process
            && let Some(argv0) = std::env::args_os().next()
        {
            return argv0.to_string_lossy().into_owned();
        }
        ENV_PROGRAM_NAME.to_string()
    }

    fn effective_env_vars(&self) -> Option<Vec<(String, String)>> {
        if !self.env_enabled {
            return None;
        }
        Some(self.env_vars.clone().unwrap_or_else(env::process_env))
    }

    fn effective_args(&self) -> Option<Vec<String>> {
        match &self.args {
            ArgSource::Disabled => None,
            ArgSource::Process => Some(
                std::env::args_os()
                    .skip(1)
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect(),
            ),
            ArgSource::List(args) => Some(args.clone()),
        }
    }

    /// Snapshot the environment and arguments once for this call.
    fn build_input(&self) -> ResolveInput {
        ResolveInput {
            env_vars: self.effective_env_vars(),
            args: self.effective_args(),
            program_name: self.effective_program_name(),
            reserved_prefix: self.reserved_prefix.clone(),
        }
    }

    /// Bind `target`'s fields, resolve them through every enabled layer and
    /// write the results in place.
    ///
    /// On error nothing has been written.
    pub fn load<T: EnvFlags + ?Sized>(self, target: &mut T) -> Result<Resolution, EnvFlagsError> {
        let input = self.build_input();
        let mut set = FlagSet::new();
        target.bind_fields(&mut set);
        debug!(
            program = %input.program_name,
            fields = set.len(),
            env = input.env_vars.is_some(),
            args = input.args.is_some(),
            "resolving record"
        );
        resolve::resolve(set, input)
    }
}
