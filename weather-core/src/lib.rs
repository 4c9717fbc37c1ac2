//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The error taxonomy shared by the fetcher and the CLI driver
//! - API-key resolution (command-line flag vs. environment)
//! - The OpenWeatherMap fetcher and its wire models
//! - Plain-text report formatting
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod model;

pub use config::{API_KEY_ENV, resolve_api_key};
pub use error::{Result, WeatherError};
pub use fetch::{OpenWeatherFetcher, WeatherFetcher};
pub use format::format_report;
pub use model::{Units, WeatherQuery, WeatherReport};
