use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Returned when none of the supported layouts accept the input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized time format: {0:?}")]
pub struct TimeFormatError(pub String);

/// Timestamp layouts accepted by the API, most precise first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLayout {
    /// `2021-01-01T00:00:00+02:00`
    Rfc3339,
    /// `2021-01-01T00:00:00.123456789+02:00`
    Rfc3339Fractional,
    /// `2021-01-01T00:00:00Z`
    IsoUtc,
    /// `2021-01-01T00:00:00.123456Z`
    IsoUtcFractional,
    /// `2021-01-01 00:00:00.000000`, the postgres text format, read as UTC
    SpaceFractional,
    /// `2021-01-01 00:00:00`, read as UTC
    Space,
    /// `2021-01-01`, midnight UTC
    Date,
}

pub const LAYOUTS: [TimeLayout; 7] = [
    TimeLayout::Rfc3339,
    TimeLayout::Rfc3339Fractional,
    TimeLayout::IsoUtc,
    TimeLayout::IsoUtcFractional,
    TimeLayout::SpaceFractional,
    TimeLayout::Space,
    TimeLayout::Date,
];

impl TimeLayout {
    /// Try this single layout against the input
    pub fn parse(&self, input: &str) -> Option<DateTime<Utc>> {
        match self {
            TimeLayout::Rfc3339 => DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            TimeLayout::Rfc3339Fractional => {
                DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f%:z")
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }
            TimeLayout::IsoUtc => naive_as_utc(input, "%Y-%m-%dT%H:%M:%SZ"),
            TimeLayout::IsoUtcFractional => naive_as_utc(input, "%Y-%m-%dT%H:%M:%S%.fZ"),
            TimeLayout::SpaceFractional => naive_as_utc(input, "%Y-%m-%d %H:%M:%S%.f"),
            TimeLayout::Space => naive_as_utc(input, "%Y-%m-%d %H:%M:%S"),
            TimeLayout::Date => NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive)),
        }
    }
}

fn naive_as_utc(input: &str, format: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(input, format)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Resolve a free-form timestamp to a UTC instant using the first layout that parses
pub fn parse_time(input: &str) -> Result<DateTime<Utc>, TimeFormatError> {
    LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(input))
        .ok_or_else(|| TimeFormatError(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_every_layout_resolves_to_utc() {
        let new_year = utc(2021, 1, 1, 0, 0, 0);
        let cases = [
            "2021-01-01T00:00:00Z",
            "2021-01-01T02:00:00+02:00",
            "2020-12-31T19:00:00-05:00",
            "2021-01-01T00:00:00.000000000+00:00",
            "2021-01-01T00:00:00.000000Z",
            "2021-01-01 00:00:00.000000",
            "2021-01-01 00:00:00",
            "2021-01-01",
        ];
        for input in cases {
            assert_eq!(parse_time(input), Ok(new_year), "input {:?}", input);
        }
    }

    #[test]
    fn test_fractional_seconds_are_kept() {
        let parsed = parse_time("2021-01-01 12:30:45.250000").unwrap();
        assert_eq!(parsed.timestamp(), utc(2021, 1, 1, 12, 30, 45).timestamp());
        assert_eq!(parsed.timestamp_subsec_micros(), 250_000);

        let parsed = parse_time("2021-01-01T12:30:45.5Z").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_each_layout_accepts_its_own_example() {
        assert!(TimeLayout::Rfc3339.parse("2021-01-01T00:00:00+01:00").is_some());
        assert!(TimeLayout::Rfc3339Fractional
            .parse("2021-01-01T00:00:00.5+01:00")
            .is_some());
        assert!(TimeLayout::IsoUtc.parse("2021-01-01T00:00:00Z").is_some());
        assert!(TimeLayout::IsoUtcFractional
            .parse("2021-01-01T00:00:00.123456Z")
            .is_some());
        assert!(TimeLayout::SpaceFractional
            .parse("2021-01-01 00:00:00.123456")
            .is_some());
        assert!(TimeLayout::Space.parse("2021-01-01 00:00:00").is_some());
        assert!(TimeLayout::Date.parse("2021-01-01").is_some());

        // Layouts without a zone never accept one
        assert!(TimeLayout::Space.parse("2021-01-01 00:00:00+01:00").is_none());
        assert!(TimeLayout::Date.parse("2021-01-01T00:00:00Z").is_none());
    }

    #[test]
    fn test_rejects_unknown_formats() {
        for input in [
            "invalid-time",
            "",
            "01/02/2021",
            "2021-13-01",
            "2021-01-01T25:00:00Z",
            "yesterday",
            "1609459200",
        ] {
            assert_eq!(
                parse_time(input),
                Err(TimeFormatError(input.to_string())),
                "input {:?}",
                input
            );
        }
    }
}
