#![forbid(unsafe_code)]

use chrono::{DateTime, Utc};
use tracing::warn;

/// Parse an RFC 3339 timestamp as sent by the API. Unparseable values are
/// logged and treated as missing.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(err) => {
            warn!(raw, %err, "ignoring malformed timestamp");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn offsets_are_normalised_to_utc() {
        assert_eq!(
            parse_timestamp("2024-03-02T18:00:00+03:00"),
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 15, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
