//! Pure validation over submitted field sets. Nothing in here touches the
//! database, the filesystem, or the network; callers run these checks before
//! any I/O.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::ValidationError;

/// Whole-year age at `reference`: the year difference, minus one if the
/// birthday has not yet come around in the reference year.
pub fn age_on(date_of_birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - date_of_birth.year();
    if (reference.month(), reference.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

pub fn validate_age(date_of_birth: NaiveDate, reference: NaiveDate) -> Result<(), ValidationError> {
    if age_on(date_of_birth, reference) < 18 {
        return Err(ValidationError::UnderAge);
    }
    Ok(())
}

/// Employment period check. Only enforced when both ends are present;
/// start and end falling on the same day is allowed.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(ValidationError::DateRange);
        }
    }
    Ok(())
}

/// Worked-time interval check. Strict: an empty interval is rejected.
pub fn validate_time_range(
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<(), ValidationError> {
    if start >= end {
        return Err(ValidationError::TimeRange);
    }
    Ok(())
}

/// Every listed field must be present and non-blank after trimming. The
/// error names all offenders at once so the form can show them together.
pub fn validate_required_fields(
    fields: &[(&'static str, Option<&str>)],
) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

/// Optional date field off a form. Blank submits mean "not provided".
pub fn parse_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ValidationError::InvalidField {
                field,
                expected: "a date in YYYY-MM-DD form",
            }),
    }
}

// Browsers submit datetime-local inputs without seconds; the canonical
// storage form carries them.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

pub fn parse_datetime(field: &'static str, value: &str) -> Result<NaiveDateTime, ValidationError> {
    let raw = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or(ValidationError::InvalidField {
            field,
            expected: "a date and time in YYYY-MM-DDTHH:MM form",
        })
}

pub fn parse_salary(value: &str) -> Result<f64, ValidationError> {
    let salary: f64 = value
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidField {
            field: "salary",
            expected: "a number",
        })?;

    if !salary.is_finite() || salary < 0.0 {
        return Err(ValidationError::InvalidField {
            field: "salary",
            expected: "a non-negative number",
        });
    }
    Ok(salary)
}

/// Canonical "YYYY-MM-DD HH:MM:SS" storage form.
pub fn normalize_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}
