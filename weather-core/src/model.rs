use std::convert::TryFrom;

use crate::error::{Result, WeatherError};

/// Unit system requested from the provider.
///
/// The provider converts values server-side; this type only selects the query
/// parameter and the presentation suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Units {
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Value sent as the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Standard]
    }

    /// Suffix appended to temperature values.
    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    /// Suffix appended to wind-speed values.
    pub fn wind_speed_suffix(&self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric | Units::Standard => "m/s",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(WeatherError::InvalidUnits { value: value.to_string() }),
        }
    }
}

/// A validated request for current conditions in one city.
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    pub city: String,
    pub units: Units,
    pub api_key: String,
}

impl WeatherQuery {
    /// Validates and normalizes the inputs. The city is stored trimmed; an
    /// empty city or API key is rejected here, before any network call.
    pub fn new(city: &str, units: Units, api_key: impl Into<String>) -> Result<Self> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        Ok(Self { city: city.to_string(), units, api_key })
    }
}

/// Current conditions for one city, exactly as reported by the provider.
///
/// Constructed once per successful fetch, handed to the formatter, then
/// discarded. Values are already expressed in the requested unit system.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city_name: String,
    pub country_code: String,
    pub condition_main: String,
    pub condition_description: String,
    pub temp_current: f64,
    pub temp_feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_percent: u8,
    pub pressure_hpa: u32,
    pub wind_speed: f64,
    pub wind_direction_deg: u16,
    pub cloudiness_percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_as_str_roundtrip() {
        for units in Units::all() {
            let s = units.as_str();
            let parsed = Units::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn units_parse_is_case_insensitive() {
        assert_eq!(Units::try_from("Imperial").unwrap(), Units::Imperial);
        assert_eq!(Units::try_from("METRIC").unwrap(), Units::Metric);
    }

    #[test]
    fn unknown_units_error() {
        let err = Units::try_from("celsius").unwrap_err();
        assert!(err.to_string().contains("Unknown unit system 'celsius'"));
    }

    #[test]
    fn query_trims_the_city() {
        let query = WeatherQuery::new("  London  ", Units::Metric, "KEY").unwrap();
        assert_eq!(query.city, "London");
    }

    #[test]
    fn empty_city_is_rejected() {
        let err = WeatherQuery::new("", Units::Metric, "KEY").unwrap_err();
        assert!(matches!(err, WeatherError::EmptyCity));

        let err = WeatherQuery::new("   ", Units::Metric, "KEY").unwrap_err();
        assert!(matches!(err, WeatherError::EmptyCity));
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = WeatherQuery::new("London", Units::Metric, "").unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }
}
