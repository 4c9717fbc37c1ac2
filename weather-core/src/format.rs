use crate::model::{Units, WeatherReport};

/// Render a report as the fixed multi-line text block printed by the CLI.
///
/// Values are shown exactly as the provider returned them; the unit system
/// only selects the temperature and wind-speed suffixes. Identical inputs
/// always produce byte-identical output.
pub fn format_report(report: &WeatherReport, units: Units) -> String {
    let temp_suffix = units.temperature_suffix();
    let wind_suffix = units.wind_speed_suffix();

    format!(
        "
╔════════════════════════════════════════════════════════════╗
║  Weather Information for {city}, {country}
╚════════════════════════════════════════════════════════════╝

🌤️  Condition: {condition_main} ({condition_description})

🌡️  Temperature:
    Current:    {temp_current}{temp_suffix}
    Feels Like: {temp_feels_like}{temp_suffix}
    Min/Max:    {temp_min}{temp_suffix} / {temp_max}{temp_suffix}

💧 Humidity:    {humidity}%
🔽 Pressure:    {pressure} hPa

💨 Wind:
    Speed:      {wind_speed} {wind_suffix}
    Direction:  {wind_direction}°

☁️  Cloudiness: {cloudiness}%
",
        city = report.city_name,
        country = report.country_code,
        condition_main = report.condition_main,
        condition_description = report.condition_description,
        temp_current = report.temp_current,
        temp_feels_like = report.temp_feels_like,
        temp_min = report.temp_min,
        temp_max = report.temp_max,
        humidity = report.humidity_percent,
        pressure = report.pressure_hpa,
        wind_speed = report.wind_speed,
        wind_direction = report.wind_direction_deg,
        cloudiness = report.cloudiness_percent,
    )
}
