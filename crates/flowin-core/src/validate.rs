//! Field-level validation helpers shared by the parameter types.

use jiff::civil::Date;

use crate::error::{PlannerError, Result};

/// Checks that `value` has between `min` and `max` characters.
pub(crate) fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min {
        let reason = if min == 1 {
            "must not be empty".to_string()
        } else {
            format!("must be at least {min} characters")
        };
        return Err(PlannerError::invalid_input(field).with_reason(reason));
    }
    if len > max {
        return Err(PlannerError::invalid_input(field)
            .with_reason(format!("must be at most {max} characters (got {len})")));
    }
    Ok(())
}

/// Like [`check_length`] for optional text with no lower bound.
pub(crate) fn check_optional_length(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(value) => check_length(field, value, 0, max),
        None => Ok(()),
    }
}

/// Checks that `value` lies in `min..=max`.
pub(crate) fn check_range<T>(field: &str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(PlannerError::invalid_input(field)
            .with_reason(format!("must be between {min} and {max} (got {value})")));
    }
    Ok(())
}

pub(crate) fn check_optional_range<T>(field: &str, value: Option<T>, min: T, max: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    match value {
        Some(value) => check_range(field, value, min, max),
        None => Ok(()),
    }
}

/// Parses a calendar date written exactly as `YYYY-MM-DD`.
pub(crate) fn parse_date(field: &str, value: &str) -> Result<Date> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(PlannerError::invalid_input(field)
            .with_reason(format!("'{value}' is not a YYYY-MM-DD date")));
    }
    value.parse::<Date>().map_err(|e| {
        PlannerError::invalid_input(field).with_reason(format!("'{value}' is not a valid date: {e}"))
    })
}

pub(crate) fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>> {
    value.map(|v| parse_date(field, v)).transpose()
}

/// Checks that an inclusive date range is not reversed.
pub(crate) fn check_date_order(start: Option<Date>, end: Option<Date>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(PlannerError::invalid_input("end_date")
                .with_reason("End date must not be before start date"));
        }
    }
    Ok(())
}

/// Loose structural check of an email address used as an identity key.
pub(crate) fn check_email(value: &str) -> Result<()> {
    let invalid = || {
        PlannerError::invalid_input("email")
            .with_reason(format!("'{value}' is not a valid email address"))
    };

    check_length("email", value, 3, 254)?;
    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let Some((local, domain)) = value.split_once('@') else {
        return Err(invalid());
    };
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.split_once('.') {
        Some((host, rest)) if !host.is_empty() && !rest.is_empty() && !domain.ends_with('.') => {
            Ok(())
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_length_bounds() {
        assert!(check_length("title", "a", 1, 200).is_ok());
        assert!(check_length("title", &"a".repeat(200), 1, 200).is_ok());

        let err = check_length("title", "", 1, 200).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
        assert!(check_length("title", &"a".repeat(201), 1, 200).is_err());
    }

    #[test]
    fn test_check_length_counts_characters() {
        assert!(check_length("notes", "ééé", 0, 3).is_ok());
    }

    #[test]
    fn test_check_range() {
        assert!(check_range("minutes", 15u32, 15, 480).is_ok());
        assert!(check_range("minutes", 480u32, 15, 480).is_ok());
        assert!(check_range("minutes", 14u32, 15, 480).is_err());
        assert!(check_optional_range::<u8>("energy_level", None, 1, 5).is_ok());
        assert!(check_optional_range("energy_level", Some(6u8), 1, 5).is_err());
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("plan_date", "2025-01-15").unwrap();
        assert_eq!(date, Date::new(2025, 1, 15).unwrap());

        for bad in ["2025-1-15", "20250115", "2025-02-30", "15-01-2025", "2025/01/15"] {
            assert!(parse_date("plan_date", bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_check_date_order() {
        let a = Date::new(2025, 1, 1).unwrap();
        let b = Date::new(2025, 1, 31).unwrap();
        assert!(check_date_order(Some(a), Some(b)).is_ok());
        assert!(check_date_order(Some(a), Some(a)).is_ok());
        assert!(check_date_order(Some(b), Some(a)).is_err());
        assert!(check_date_order(None, Some(a)).is_ok());
    }

    #[test]
    fn test_check_email() {
        assert!(check_email("ada@example.com").is_ok());
        assert!(check_email("first.last@mail.example.org").is_ok());

        for bad in ["", "ada", "ada@", "@example.com", "ada@example", "a@b@c.com", "ada @x.io", "ada@x."] {
            assert!(check_email(bad).is_err(), "accepted {bad:?}");
        }
    }
}
