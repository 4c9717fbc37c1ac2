use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{WeatherQuery, WeatherReport};

pub mod openweather;

pub use openweather::OpenWeatherFetcher;

/// Seam between the CLI driver and the HTTP client, so tests can substitute
/// a stub without touching the network.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    /// Perform one fetch of current conditions. No retries, no caching.
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReport>;
}
