//! Turns one loosely-typed [`RatingInput`] into a validated [`Rating`].

use crate::error::{DecimalError, IngestError};
use crate::normalize::{clean_decimal, parse_timestamp};
use crate::rating::{Rating, RatingInput, REQUIRED_FIELDS};

/// Checks that every required field is present and non-empty.
///
/// Fails fast on the first violation in [`REQUIRED_FIELDS`] order.
///
/// # Errors
///
/// Returns [`IngestError::MissingField`] naming the first absent or empty
/// field.
pub fn validate_required_fields(input: &RatingInput) -> Result<(), IngestError> {
    for field in REQUIRED_FIELDS {
        if input.field(field).is_none_or(str::is_empty) {
            return Err(IngestError::MissingField { field });
        }
    }
    Ok(())
}

/// Builds a [`Rating`] from raw input.
///
/// Runs the required-field check, then normalizes `target_from`,
/// `target_to` and `time` in that order. The first failure is returned and
/// no record is produced.
///
/// # Errors
///
/// Returns the first [`IngestError`] encountered.
pub fn build_rating(input: &RatingInput) -> Result<Rating, IngestError> {
    validate_required_fields(input)?;

    let target_from = price_field(input, "target_from")?;
    let target_to = price_field(input, "target_to")?;
    let time = parse_timestamp(required(input, "time"))?;

    Ok(Rating {
        ticker: required(input, "ticker").to_owned(),
        target_from,
        target_to,
        company: required(input, "company").to_owned(),
        action: required(input, "action").to_owned(),
        brokerage: required(input, "brokerage").to_owned(),
        rating_from: required(input, "rating_from").to_owned(),
        rating_to: required(input, "rating_to").to_owned(),
        time,
    })
}

// Only called after validate_required_fields has passed.
fn required<'a>(input: &'a RatingInput, field: &str) -> &'a str {
    input.field(field).unwrap_or_default()
}

fn price_field(input: &RatingInput, field: &'static str) -> Result<f64, IngestError> {
    let raw = required(input, field);
    clean_decimal(raw).map_err(|source| match source {
        DecimalError::Empty => IngestError::EmptyValue { field },
        source => IngestError::InvalidNumber {
            field,
            raw: raw.to_owned(),
            source,
        },
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn valid_input() -> RatingInput {
        RatingInput {
            ticker: Some("AAPL".to_string()),
            target_from: Some("$150.00".to_string()),
            target_to: Some("$1,160.50".to_string()),
            company: Some("Apple Inc.".to_string()),
            action: Some("target raised by".to_string()),
            brokerage: Some("Morgan Stanley".to_string()),
            rating_from: Some("Equal Weight".to_string()),
            rating_to: Some("Overweight".to_string()),
            time: Some("2024-01-15T10:00:00Z".to_string()),
        }
    }

    #[test]
    fn validate_accepts_complete_input() {
        assert!(validate_required_fields(&valid_input()).is_ok());
    }

    #[test]
    fn validate_names_each_missing_field() {
        for field in REQUIRED_FIELDS {
            let input: RatingInput = REQUIRED_FIELDS
                .iter()
                .filter(|f| **f != field)
                .map(|f| (*f, "1"))
                .collect();
            let err = validate_required_fields(&input).unwrap_err();
            assert!(
                matches!(err, IngestError::MissingField { field: f } if f == field),
                "expected MissingField({field}), got: {err:?}"
            );
        }
    }

    #[test]
    fn validate_treats_empty_string_as_missing() {
        let mut input = valid_input();
        input.company = Some(String::new());
        let err = validate_required_fields(&input).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingField { field: "company" }
        ));
    }

    #[test]
    fn validate_reports_first_violation_in_declared_order() {
        let mut input = valid_input();
        input.time = None;
        input.target_to = None;
        input.ticker = Some(String::new());
        let err = validate_required_fields(&input).unwrap_err();
        assert!(matches!(err, IngestError::MissingField { field: "ticker" }));
    }

    #[test]
    fn build_rating_normalizes_all_fields() {
        let rating = build_rating(&valid_input()).expect("valid input");
        assert_eq!(rating.ticker, "AAPL");
        assert!((rating.target_from - 150.0).abs() < f64::EPSILON);
        assert!((rating.target_to - 1160.5).abs() < f64::EPSILON);
        assert_eq!(rating.company, "Apple Inc.");
        assert_eq!(rating.action, "target raised by");
        assert_eq!(rating.brokerage, "Morgan Stanley");
        assert_eq!(rating.rating_from, "Equal Weight");
        assert_eq!(rating.rating_to, "Overweight");
        assert_eq!(
            rating.time.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn build_rating_missing_field_precedes_number_errors() {
        let mut input = valid_input();
        input.target_from = Some("not a price".to_string());
        input.rating_to = None;
        let err = build_rating(&input).unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingField { field: "rating_to" }
        ));
    }

    #[test]
    fn build_rating_reports_invalid_target_from_with_raw_value() {
        let mut input = valid_input();
        input.target_from = Some("abc".to_string());
        let err = build_rating(&input).unwrap_err();
        assert!(
            matches!(
                err,
                IngestError::InvalidNumber { field: "target_from", ref raw, .. } if raw == "abc"
            ),
            "got: {err:?}"
        );
        assert_eq!(err.to_string().split(':').next(), Some("invalid target_from value 'abc'"));
    }

    #[test]
    fn build_rating_checks_target_from_before_target_to() {
        let mut input = valid_input();
        input.target_from = Some("x".to_string());
        input.target_to = Some("y".to_string());
        let err = build_rating(&input).unwrap_err();
        assert!(matches!(
            err,
            IngestError::InvalidNumber {
                field: "target_from",
                ..
            }
        ));
    }

    #[test]
    fn build_rating_symbol_only_price_is_empty_value() {
        let mut input = valid_input();
        input.target_to = Some("$".to_string());
        let err = build_rating(&input).unwrap_err();
        assert!(matches!(err, IngestError::EmptyValue { field: "target_to" }));
    }

    #[test]
    fn build_rating_checks_prices_before_time() {
        let mut input = valid_input();
        input.target_to = Some("bad".to_string());
        input.time = Some("bad".to_string());
        let err = build_rating(&input).unwrap_err();
        assert_eq!(err.code(), "invalid_number");
    }

    #[test]
    fn build_rating_rejects_unparseable_time() {
        let mut input = valid_input();
        input.time = Some("99/99/9999".to_string());
        let err = build_rating(&input).unwrap_err();
        assert!(matches!(err, IngestError::InvalidTimestamp { .. }));
    }
}
