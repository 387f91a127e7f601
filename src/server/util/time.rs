use chrono::{DateTime, NaiveDate, NaiveDateTime};
use derive_more::{Display, Error};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Output format for date-time values in responses.
pub(crate) const DATE_TIME_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Display, Error, PartialEq)]
#[display("unable to parse '{input}' as a date")]
pub(crate) struct DateParseError {
    input: String,
}

/// A parsed date-like value. `has_time` is false when the input only named a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ParsedDate {
    pub value: NaiveDateTime,
    pub has_time: bool,
}

/// Parse a date or date-time string, trying the common spreadsheet and ISO layouts.
///
/// Timezone-aware RFC 3339 input is normalized to UTC. Returns the original
/// input in the error when no layout matches.
pub(crate) fn parse_permissive(raw: &str) -> Result<ParsedDate, DateParseError> {
    let input = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(ParsedDate {
            value: dt.naive_utc(),
            has_time: true,
        });
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(ParsedDate {
                value,
                has_time: true,
            });
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(ParsedDate {
                value: date.and_time(chrono::NaiveTime::MIN),
                has_time: false,
            });
        }
    }
    Err(DateParseError {
        input: raw.to_string(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_date_only_layouts() {
        for input in ["2024-01-10", "2024/01/10", "01/10/2024", "10.01.2024", "20240110", "Jan 10, 2024", "January 10, 2024", "10 Jan 2024", " 2024-01-10 "] {
            let parsed = parse_permissive(input).unwrap_or_else(|e| panic!("{input}: {e}"));
            assert_eq!(parsed.value.date(), ymd(2024, 1, 10), "{input}");
            assert!(!parsed.has_time, "{input}");
        }
    }

    #[test]
    fn parses_date_time_layouts() {
        for input in ["2024-01-10T08:30:00", "2024-01-10 08:30:00.250", "2024-01-10 08:30", "01/10/2024 08:30", "2024-01-10T08:30:00Z"] {
            let parsed = parse_permissive(input).unwrap_or_else(|e| panic!("{input}: {e}"));
            assert_eq!(parsed.value.date(), ymd(2024, 1, 10), "{input}");
            assert_eq!(parsed.value.format("%H:%M").to_string(), "08:30", "{input}");
            assert!(parsed.has_time, "{input}");
        }
    }

    #[test]
    fn rfc3339_offsets_are_normalized_to_utc() {
        let parsed = parse_permissive("2024-01-10T23:30:00-02:00").unwrap();
        assert_eq!(parsed.value.date(), ymd(2024, 1, 11));
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        for input in ["", "not-a-date", "2024-13-01", "2024-02-30", "13/45/2024"] {
            let err = parse_permissive(input).unwrap_err();
            assert_eq!(err.to_string(), format!("unable to parse '{input}' as a date"));
        }
    }
}
