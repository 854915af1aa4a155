use reqwest::Url;
use serde::Deserialize;

use crate::{config::Credentials, model::WeatherReading};

use super::{Lookup, ParseError};

const CURRENT_URL: &str = "http://api.weatherapi.com/v1/current.json";

/// Current-conditions lookup against WeatherAPI.com.
#[derive(Debug, Default)]
pub struct WeatherLookup;

impl Lookup for WeatherLookup {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn request_url(&self, location: &str, credentials: &Credentials) -> Option<Url> {
        Url::parse_with_params(
            CURRENT_URL,
            [("key", credentials.weather_key.as_str()), ("q", location), ("aqi", "no")],
        )
        .ok()
    }

    fn parse(&self, body: &str) -> Result<String, ParseError> {
        let parsed: WaResponse = serde_json::from_str(body)?;

        let reading = WeatherReading {
            temperature_c: parsed.current.temp_c,
            condition: parsed.current.condition.text,
            humidity_pct: parsed.current.humidity,
            wind_kph: parsed.current.wind_kph,
            pressure_mb: parsed.current.pressure_mb,
            feels_like_c: parsed.current.feelslike_c,
        };

        Ok(reading.to_string())
    }

    fn parse_failure_text(&self) -> &'static str {
        "Failed to retrieve weather data."
    }
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
    humidity: u8,
    wind_kph: f64,
    pressure_mb: f64,
    feelslike_c: f64,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}
