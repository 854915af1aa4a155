use anyhow::{Result, anyhow};

/// The eight selectable city labels, in menu order.
pub const CITIES: [&str; 8] =
    ["London", "Paris", "New-York", "Tokyo", "Moscow", "Berlin", "Dubai", "Sydney"];

/// City label → IANA timezone identifier. Every entry in [`CITIES`] must
/// have a row here; the time lookup refuses to query unmapped labels.
const TIMEZONES: [(&str, &str); 8] = [
    ("London", "Europe/London"),
    ("Paris", "Europe/Paris"),
    ("New-York", "America/New_York"),
    ("Tokyo", "Asia/Tokyo"),
    ("Moscow", "Europe/Moscow"),
    ("Berlin", "Europe/Berlin"),
    ("Dubai", "Asia/Dubai"),
    ("Sydney", "Australia/Sydney"),
];

/// Returns the timezone identifier for a city label, if it is mapped.
pub fn timezone_id(location: &str) -> Option<&'static str> {
    TIMEZONES.iter().find(|(city, _)| *city == location).map(|(_, zone)| *zone)
}

/// Resolve user input to a canonical city label (case-insensitive).
pub fn resolve(input: &str) -> Result<&'static str> {
    CITIES.iter().find(|city| city.eq_ignore_ascii_case(input)).copied().ok_or_else(|| {
        anyhow!("Unknown city '{input}'. Supported cities: {}.", CITIES.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_city_has_a_timezone() {
        for city in CITIES {
            let zone = timezone_id(city);
            assert!(zone.is_some_and(|z| !z.is_empty()), "no timezone for {city}");
        }
    }

    #[test]
    fn unknown_city_has_no_timezone() {
        assert_eq!(timezone_id("Atlantis"), None);
        assert_eq!(timezone_id(""), None);
    }

    #[test]
    fn resolve_is_case_insensitive() {
        assert_eq!(resolve("london").unwrap(), "London");
        assert_eq!(resolve("NEW-YORK").unwrap(), "New-York");
    }

    #[test]
    fn resolve_rejects_unknown_city() {
        let err = resolve("Atlantis").unwrap_err();
        assert!(err.to_string().contains("Unknown city"));
        assert!(err.to_string().contains("London"));
    }
}
