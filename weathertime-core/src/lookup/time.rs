use reqwest::Url;
use serde::Deserialize;

use crate::{config::Credentials, location, model::LocalTime};

use super::{Lookup, ParseError};

const ZONE_URL: &str = "http://api.timezonedb.com/v2.1/get-time-zone";

/// Zone-time lookup against TimezoneDB.
///
/// The city label is resolved to a timezone identifier through the fixed
/// table in [`location`]; an unmapped label skips the request entirely.
#[derive(Debug, Default)]
pub struct TimeLookup;

impl Lookup for TimeLookup {
    fn name(&self) -> &'static str {
        "time"
    }

    fn request_url(&self, location: &str, credentials: &Credentials) -> Option<Url> {
        let zone = location::timezone_id(location)?;

        Url::parse_with_params(
            ZONE_URL,
            [
                ("key", credentials.timezone_key.as_str()),
                ("format", "json"),
                ("by", "zone"),
                ("zone", zone),
            ],
        )
        .ok()
    }

    fn parse(&self, body: &str) -> Result<String, ParseError> {
        let parsed: TzResponse = serde_json::from_str(body)?;

        let time = LocalTime::from_epoch(parsed.timestamp)
            .ok_or(ParseError::TimestampOutOfRange(parsed.timestamp))?;

        Ok(time.to_string())
    }

    fn parse_failure_text(&self) -> &'static str {
        "Failed to retrieve time data."
    }
}

#[derive(Debug, Deserialize)]
struct TzResponse {
    timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials { weather_key: String::new(), timezone_key: "TKEY".to_string() }
    }

    #[test]
    fn url_resolves_for_every_predefined_city() {
        for city in location::CITIES {
            let url = TimeLookup.request_url(city, &credentials());
            assert!(url.is_some(), "no request URL for {city}");
        }
    }

    #[test]
    fn url_carries_zone_query() {
        let url = TimeLookup.request_url("Tokyo", &credentials()).expect("url");

        assert_eq!(url.host_str(), Some("api.timezonedb.com"));
        assert_eq!(url.path(), "/v2.1/get-time-zone");

        let pairs: Vec<(String, String)> =
            url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "TKEY".to_string()),
                ("format".to_string(), "json".to_string()),
                ("by".to_string(), "zone".to_string()),
                ("zone".to_string(), "Asia/Tokyo".to_string()),
            ]
        );
    }

    #[test]
    fn unmapped_city_builds_no_url() {
        assert!(TimeLookup.request_url("Atlantis", &credentials()).is_none());
        assert!(TimeLookup.request_url("", &credentials()).is_none());
    }

    #[test]
    fn parses_timestamp_into_header_and_formatted_line() {
        let text = TimeLookup.parse(r#"{"timestamp": 1700000000}"#).expect("well-formed body");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Local time:");
        assert!(lines[1].chars().enumerate().all(|(i, c)| match i {
            4 | 7 => c == '-',
            10 => c == ' ',
            13 | 16 => c == ':',
            _ => c.is_ascii_digit(),
        }));
        assert_eq!(lines[1].len(), 19);
    }

    #[test]
    fn missing_timestamp_is_a_parse_error() {
        let body = r#"{"status": "OK", "zoneName": "Asia/Tokyo"}"#;
        let err = TimeLookup.parse(body).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn out_of_range_timestamp_is_a_parse_error() {
        let body = format!(r#"{{"timestamp": {}}}"#, i64::MAX);
        let err = TimeLookup.parse(&body).unwrap_err();
        assert!(matches!(err, ParseError::TimestampOutOfRange(_)));
    }
}
