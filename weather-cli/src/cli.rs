use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::debug;
use weather_core::{
    API_KEY_ENV, OpenWeatherFetcher, Result, Units, WeatherFetcher, WeatherQuery, format_report,
    resolve_api_key,
};

/// Exit code for an interrupt, 128 + SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    disable_version_flag = true,
    about = "Fetch current weather information from the OpenWeatherMap API",
    after_help = "Environment variables:\n  OPENWEATHER_API_KEY    Your OpenWeatherMap API key"
)]
pub struct Cli {
    /// Name of the city to get weather for, e.g. "London" or "New York".
    pub city: String,

    /// Unit system: metric (°C), imperial (°F), or standard (K).
    #[arg(short, long, default_value = "metric")]
    pub units: String,

    /// OpenWeatherMap API key; falls back to the OPENWEATHER_API_KEY environment variable.
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Print version information.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    /// Drive one query to completion, racing it against Ctrl-C.
    pub async fn run(self) -> ExitCode {
        let fetcher = OpenWeatherFetcher::new();
        let env_key = std::env::var(API_KEY_ENV).ok();

        tokio::select! {
            outcome = self.execute(&fetcher, env_key.as_deref()) => match outcome {
                Ok(report) => {
                    println!("{report}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    debug!(?err, "command failed");
                    eprintln!("❌ Error: {err}");
                    ExitCode::from(1)
                }
            },
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\n⚠️  Operation cancelled by user.");
                ExitCode::from(EXIT_INTERRUPTED)
            }
        }
    }

    /// The fetch-and-format pipeline without the process-level concerns, so
    /// tests can drive it with a stub fetcher and an explicit environment value.
    async fn execute(&self, fetcher: &dyn WeatherFetcher, env_key: Option<&str>) -> Result<String> {
        let units = Units::try_from(self.units.as_str())?;
        let api_key = resolve_api_key(self.api_key.as_deref(), env_key)?;
        let query = WeatherQuery::new(&self.city, units, api_key)?;

        let report = fetcher.fetch(&query).await?;

        Ok(format_report(&report, units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use clap::CommandFactory;
    use weather_core::{WeatherError, WeatherReport};

    /// Records whether and how it was called instead of touching the network.
    #[derive(Debug, Default)]
    struct StubFetcher {
        called: AtomicBool,
        seen_key: Mutex<Option<String>>,
    }

    #[async_trait]
    impl WeatherFetcher for StubFetcher {
        async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherReport> {
            self.called.store(true, Ordering::SeqCst);
            *self.seen_key.lock().unwrap() = Some(query.api_key.clone());

            Ok(WeatherReport {
                city_name: query.city.clone(),
                country_code: "GB".to_string(),
                condition_main: "Clear".to_string(),
                condition_description: "clear sky".to_string(),
                temp_current: 18.5,
                temp_feels_like: 17.8,
                temp_min: 16.2,
                temp_max: 20.1,
                humidity_percent: 72,
                pressure_hpa: 1013,
                wind_speed: 3.6,
                wind_direction_deg: 230,
                cloudiness_percent: 20,
            })
        }
    }

    fn cli(city: &str, units: &str, api_key: Option<&str>) -> Cli {
        Cli {
            city: city.to_string(),
            units: units.to_string(),
            api_key: api_key.map(str::to_string),
            version: None,
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn arguments_parse_with_defaults() {
        let parsed = Cli::try_parse_from(["weather", "London"]).unwrap();
        assert_eq!(parsed.city, "London");
        assert_eq!(parsed.units, "metric");
        assert!(parsed.api_key.is_none());

        let parsed =
            Cli::try_parse_from(["weather", "New York", "-u", "imperial", "-k", "KEY"]).unwrap();
        assert_eq!(parsed.city, "New York");
        assert_eq!(parsed.units, "imperial");
        assert_eq!(parsed.api_key.as_deref(), Some("KEY"));
    }

    #[tokio::test]
    async fn happy_path_renders_the_report() {
        let stub = StubFetcher::default();
        let output = cli("London", "metric", Some("KEY")).execute(&stub, None).await.unwrap();

        assert!(stub.called.load(Ordering::SeqCst));
        assert!(output.contains("Weather Information for London, GB"));
        assert!(output.contains("Current:    18.5°C"));
    }

    #[tokio::test]
    async fn empty_city_fails_before_the_fetcher_runs() {
        let stub = StubFetcher::default();
        let err = cli("   ", "metric", Some("KEY")).execute(&stub, None).await.unwrap_err();

        assert!(matches!(err, WeatherError::EmptyCity));
        assert!(!stub.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_the_fetcher_runs() {
        let stub = StubFetcher::default();
        let err = cli("London", "metric", None).execute(&stub, None).await.unwrap_err();

        assert!(matches!(err, WeatherError::MissingApiKey));
        assert!(err.to_string().contains("No API key provided"));
        assert!(!stub.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_units_fail_before_the_fetcher_runs() {
        let stub = StubFetcher::default();
        let err = cli("London", "celsius", Some("KEY")).execute(&stub, None).await.unwrap_err();

        assert!(matches!(err, WeatherError::InvalidUnits { .. }));
        assert!(!stub.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn flag_key_wins_over_the_environment_value() {
        let stub = StubFetcher::default();
        cli("London", "metric", Some("FLAG_KEY")).execute(&stub, Some("ENV_KEY")).await.unwrap();

        assert_eq!(stub.seen_key.lock().unwrap().as_deref(), Some("FLAG_KEY"));
    }

    #[tokio::test]
    async fn environment_value_is_used_when_the_flag_is_absent() {
        let stub = StubFetcher::default();
        cli("London", "metric", None).execute(&stub, Some("ENV_KEY")).await.unwrap();

        assert_eq!(stub.seen_key.lock().unwrap().as_deref(), Some("ENV_KEY"));
    }
}
