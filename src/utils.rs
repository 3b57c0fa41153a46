use std::env;

/// Reads an environment variable, treating unset and empty the same.
pub fn get_env(env_key: &str) -> Option<String> {
    env::var(env_key).ok().filter(|v| !v.is_empty())
}
