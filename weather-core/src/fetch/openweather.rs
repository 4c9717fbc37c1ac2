use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, WeatherError};
use crate::model::{WeatherQuery, WeatherReport};

use super::WeatherFetcher;

/// OpenWeatherMap "current conditions" endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Production [`WeatherFetcher`] backed by the OpenWeatherMap API.
#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    base_url: String,
    request_timeout: Duration,
    http: Client,
}

impl Default for OpenWeatherFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenWeatherFetcher {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the fetcher at a different endpoint, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            http: Client::new(),
        }
    }

    /// Override the 10-second request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherFetcher {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReport> {
        debug!(city = %query.city, units = %query.units, "requesting current conditions");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", query.city.as_str()),
                ("appid", query.api_key.as_str()),
                ("units", query.units.as_str()),
            ])
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(WeatherError::from_transport)?;

        let status = res.status();
        let body = res.text().await.map_err(WeatherError::from_transport)?;

        debug!(status = status.as_u16(), "provider responded");

        if !status.is_success() {
            return Err(match status.as_u16() {
                401 => WeatherError::InvalidApiKey,
                404 => WeatherError::CityNotFound { city: query.city.clone() },
                code => WeatherError::Api { status: code, message: provider_message(&body) },
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|err| {
            WeatherError::unexpected(format!("failed to parse provider response: {err}"))
        })?;

        parsed.into_report()
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
    clouds: OwClouds,
}

impl OwCurrentResponse {
    fn into_report(self) -> Result<WeatherReport> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::unexpected("provider response contained no weather conditions"))?;

        Ok(WeatherReport {
            city_name: self.name,
            country_code: self.sys.country,
            condition_main: condition.main,
            condition_description: condition.description,
            temp_current: self.main.temp,
            temp_feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            humidity_percent: self.main.humidity,
            pressure_hpa: self.main.pressure,
            wind_speed: self.wind.speed,
            wind_direction_deg: self.wind.deg,
            cloudiness_percent: self.clouds.all,
        })
    }
}

/// Error bodies usually look like `{"cod":"404","message":"city not found"}`;
/// fall back to a raw excerpt when they don't.
fn provider_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct OwError {
        message: String,
    }

    serde_json::from_str::<OwError>(body)
        .map(|err| err.message)
        .unwrap_or_else(|_| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_prefers_the_json_message_field() {
        let body = r#"{"cod":"404","message":"city not found"}"#;
        assert_eq!(provider_message(body), "city not found");
    }

    #[test]
    fn provider_message_falls_back_to_the_raw_body() {
        assert_eq!(provider_message("<html>bad gateway</html>"), "<html>bad gateway</html>");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(300);
        let message = provider_message(&body);
        assert_eq!(message.len(), 203);
        assert!(message.ends_with("..."));
    }
}
