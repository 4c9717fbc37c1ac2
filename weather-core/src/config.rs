use crate::error::{Result, WeatherError};

/// Environment variable consulted when `--api-key` is not given.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Resolve the API key from the two possible sources.
///
/// The explicit command-line value wins over the environment; a value that is
/// empty after trimming counts as absent. Both sources are passed in so the
/// resolution stays independent of process-global state.
pub fn resolve_api_key(flag: Option<&str>, env: Option<&str>) -> Result<String> {
    [flag, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .map(str::to_string)
        .ok_or(WeatherError::MissingApiKey)
}
