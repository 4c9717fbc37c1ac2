use thiserror::Error;

/// Closed set of failures the fetch pipeline can surface.
///
/// The CLI driver maps every variant to a single printed line and exit code 1;
/// no raw transport error is allowed to reach the user.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Rejected before any network call is attempted.
    #[error("City name cannot be empty.")]
    EmptyCity,

    /// Rejected before any network call is attempted.
    #[error(
        "No API key provided. Set the OPENWEATHER_API_KEY environment variable or pass --api-key."
    )]
    MissingApiKey,

    /// Unknown unit-system name, rejected before any network call is attempted.
    #[error("Unknown unit system '{value}'. Supported: metric, imperial, standard.")]
    InvalidUnits { value: String },

    /// HTTP 401 from the provider.
    #[error("Invalid API key. Please check your OPENWEATHER_API_KEY.")]
    InvalidApiKey,

    /// HTTP 404 from the provider.
    #[error("City '{city}' not found. Please check the city name.")]
    CityNotFound { city: String },

    /// Any other non-2xx status, 429 and 5xx included.
    #[error("The weather service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timed out. Please check your internet connection.")]
    Timeout,

    #[error("Connection error. Please check your internet connection.")]
    Connection,

    /// Malformed JSON, missing response fields, or an unclassified transport error.
    #[error("Unexpected error: {detail}")]
    Unexpected { detail: String },
}

impl WeatherError {
    pub fn unexpected(detail: impl Into<String>) -> Self {
        WeatherError::Unexpected { detail: detail.into() }
    }

    /// Classify a transport-level failure from the HTTP client.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout
        } else if err.is_connect() {
            WeatherError::Connection
        } else {
            WeatherError::unexpected(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
