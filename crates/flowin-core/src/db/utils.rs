//! Column conversions shared by the query modules.

use std::{fmt::Display, str::FromStr};

use jiff::{civil::Date, fmt::temporal::DateTimePrinter, Timestamp};
use rusqlite::{types::Type, Row};

fn conversion_failure<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn invalid_data(idx: usize, message: String) -> rusqlite::Error {
    conversion_failure(
        idx,
        std::io::Error::new(std::io::ErrorKind::InvalidData, message),
    )
}

/// Reads an INTEGER primary or foreign key.
pub(super) fn id(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    row.get::<_, i64>(idx).map(|v| v as u64)
}

/// Reads a non-negative INTEGER count or duration.
pub(super) fn minutes(row: &Row<'_>, idx: usize) -> rusqlite::Result<u32> {
    let value: i64 = row.get(idx)?;
    u32::try_from(value).map_err(|e| conversion_failure(idx, e))
}

pub(super) fn optional_minutes(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<u32>> {
    row.get::<_, Option<i64>>(idx)?
        .map(|value| u32::try_from(value).map_err(|e| conversion_failure(idx, e)))
        .transpose()
}

/// Formats an instant for a TEXT column.
///
/// The fraction is always nine digits wide so that stored instants sort
/// chronologically as text.
pub(super) fn sql_timestamp(ts: Timestamp) -> String {
    DateTimePrinter::new()
        .precision(Some(9))
        .timestamp_to_string(&ts)
}

/// Reads an RFC 3339 TEXT column.
pub(super) fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| conversion_failure(idx, e))
}

pub(super) fn optional_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| s.parse::<Timestamp>().map_err(|e| conversion_failure(idx, e)))
        .transpose()
}

/// Reads a `YYYY-MM-DD` TEXT column.
pub(super) fn date(row: &Row<'_>, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| conversion_failure(idx, e))
}

/// Reads a TEXT column holding one of the enum spellings.
pub(super) fn parsed<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| invalid_data(idx, format!("{e}")))
}

/// Resolves a partial update of an optional text column. `None` keeps the
/// current value and an empty string clears it.
pub(super) fn merged_text<'a>(change: Option<&'a str>, current: Option<&'a str>) -> Option<&'a str> {
    match change {
        Some("") => None,
        Some(text) => Some(text),
        None => current,
    }
}

/// Converts a key for binding as an SQLite INTEGER.
pub(super) fn sql_id(id: u64) -> i64 {
    id as i64
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::{merged_text, sql_timestamp};

    #[test]
    fn test_stored_instants_sort_as_text() {
        let earlier: Timestamp = "2025-03-10T09:00:00.12Z".parse().unwrap();
        let later: Timestamp = "2025-03-10T09:00:00.123Z".parse().unwrap();

        let (earlier, later) = (sql_timestamp(earlier), sql_timestamp(later));
        assert_eq!(earlier, "2025-03-10T09:00:00.120000000Z");
        assert!(earlier < later);
        assert_eq!(
            sql_timestamp("2025-03-10T09:00:00Z".parse().unwrap()),
            "2025-03-10T09:00:00.000000000Z"
        );
    }

    #[test]
    fn test_merged_text() {
        assert_eq!(merged_text(None, Some("kept")), Some("kept"));
        assert_eq!(merged_text(Some("new"), Some("kept")), Some("new"));
        assert_eq!(merged_text(Some(""), Some("kept")), None);
    }
}
