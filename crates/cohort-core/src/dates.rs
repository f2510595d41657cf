//! Calendar-day parsing for attendance identities.
//!
//! Attendance is keyed on a plain `YYYY-MM-DD` day. There is no timezone
//! handling: the day is whatever the caller says it is.

use chrono::NaiveDate;

use crate::errors::CoreError;

/// Format used for every stored attendance day.
pub const ISO_DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict ISO calendar day (`2024-03-04`).
///
/// Rejects unpadded forms (`2024-3-4`), trailing time components and
/// impossible dates (`2024-02-30`).
///
/// # Errors
///
/// Returns `CoreError::Validation` if `raw` is not a zero-padded ISO day.
pub fn parse_iso_day(raw: &str) -> Result<NaiveDate, CoreError> {
    let invalid = || CoreError::validation(format!("invalid date '{raw}' (expected YYYY-MM-DD)"));
    if raw.len() != 10 {
        return Err(invalid());
    }
    let day = NaiveDate::parse_from_str(raw, ISO_DAY_FORMAT).map_err(|_| invalid())?;
    if day.format(ISO_DAY_FORMAT).to_string() != raw {
        return Err(invalid());
    }
    Ok(day)
}

/// Parse an optional bound of a date range.
///
/// # Errors
///
/// Returns `CoreError::Validation` if a present bound is malformed.
pub fn parse_optional_iso_day(raw: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    raw.map(parse_iso_day).transpose()
}

/// Render a day the way it is stored.
#[must_use]
pub fn format_iso_day(day: NaiveDate) -> String {
    day.format(ISO_DAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_padded_day() {
        let day = parse_iso_day("2024-03-04").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(format_iso_day(day), "2024-03-04");
    }

    #[rstest]
    #[case("2024-3-4")]
    #[case("2024-02-30")]
    #[case("04/03/2024")]
    #[case("2024-03-04T10:00:00")]
    #[case("")]
    #[case("2024-03-0x")]
    fn rejects_malformed_day(#[case] raw: &str) {
        assert!(matches!(parse_iso_day(raw), Err(CoreError::Validation(_))));
    }

    #[test]
    fn optional_bound_passes_through_none() {
        assert_eq!(parse_optional_iso_day(None).unwrap(), None);
        assert!(parse_optional_iso_day(Some("nope")).is_err());
    }
}
