use tracing::trace;

use crate::flagset::FlagSet;

/// Pick the `(name, literal)` pairs whose key exactly matches a registered
/// flag name. Matching is case-sensitive; everything else is ignored.
///
/// Takes an iterator so tests can pass synthetic data instead of the process
/// environment.
pub fn env_literals(
    set: &FlagSet<'_>,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Vec<(String, String)> {
    vars.into_iter()
        .filter(|(key, _)| set.lookup(key).is_some())
        .collect()
}

/// Snapshot the process environment. Entries that are not valid UTF-8 are
/// skipped.
pub fn process_env() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (key, _) => {
                trace!(key = ?key, "skipping non UTF-8 environment entry");
                None
            }
        })
        .collect()
}
