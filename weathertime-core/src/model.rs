use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One parsed weather observation. Each fetch constructs a fresh reading
/// that fully replaces the previous one; there is no identity or update
/// semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub pressure_mb: f64,
    pub feels_like_c: f64,
}

impl fmt::Display for WeatherReading {
    /// The fixed six-line `label: value` block shown in the weather region.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Temperature: {}°C", self.temperature_c)?;
        writeln!(f, "Condition: {}", self.condition)?;
        writeln!(f, "Humidity: {}%", self.humidity_pct)?;
        writeln!(f, "Wind: {} km/h", self.wind_kph)?;
        writeln!(f, "Pressure: {} mb", self.pressure_mb)?;
        write!(f, "Feels like: {}°C", self.feels_like_c)
    }
}

/// A single absolute instant, displayed in the machine's local time zone.
///
/// Note the zone: the formatted string uses the zone of the machine
/// running the tool, not the queried city's zone. The upstream timestamp
/// is already zone-shifted, so this carries the display quirk of the
/// original behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime(DateTime<Local>);

impl LocalTime {
    /// Build from epoch seconds; `None` when the timestamp is outside the
    /// representable range.
    pub fn from_epoch(timestamp: i64) -> Option<Self> {
        DateTime::from_timestamp(timestamp, 0).map(|utc| Self(utc.with_timezone(&Local)))
    }

    /// `YYYY-MM-DD HH:MM:SS`, 24-hour, zero-padded.
    pub fn formatted(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Local time:\n{}", self.formatted())
    }
}
