//! Helpers for reading configuration from the process environment.

pub fn read_string_from_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Reads `name` from the environment, falling back to `default` when it is unset or empty.
pub fn string_from_env_or(name: &str, default: &str) -> String {
    read_string_from_env(name).unwrap_or_else(|| default.to_string())
}

pub fn read_int_from_env(name: &str) -> Result<Option<u64>, std::num::ParseIntError> {
    read_string_from_env(name).map(|s| s.parse()).transpose()
}
