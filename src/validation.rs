//! Pure input predicates shared by the form controllers.
//!
//! Nothing in here knows about forms or views; every function takes the raw
//! string the user typed (callers trim first where the form rules say so).

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static DATE_YMD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern"));

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,30}$").expect("name pattern"));

static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+9665|05)[0-9]{8}$").expect("mobile pattern"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,}[0-9]{2,}$").expect("course code pattern"));

static STUDENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7}$").expect("student id pattern"));

/// Parses a strict `YYYY-MM-DD` value into a calendar date.
///
/// The shape is checked first; the date is then rebuilt from its parts so
/// impossible days such as `2023-02-30` are rejected instead of rolled over.
pub fn parse_date_ymd(value: &str) -> Option<NaiveDate> {
    if !DATE_YMD.is_match(value) {
        return None;
    }

    let year = value[0..4].parse::<i32>().ok()?;
    let month = value[5..7].parse::<u32>().ok()?;
    let day = value[8..10].parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn is_valid_date_ymd(value: &str) -> bool {
    parse_date_ymd(value).is_some()
}

/// English letters only, 2 to 30 of them.
pub fn is_valid_name(value: &str) -> bool {
    NAME.is_match(value)
}

/// Saudi mobile number, `+9665XXXXXXXX` or `05XXXXXXXX`.
pub fn is_valid_mobile(value: &str) -> bool {
    MOBILE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// At least two letters followed by at least two digits, e.g. `CS101`.
pub fn is_valid_course_code(value: &str) -> bool {
    COURSE_CODE.is_match(value)
}

pub fn is_valid_student_id(value: &str) -> bool {
    STUDENT_ID.is_match(value)
}

pub fn is_digits_only(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Character count, not byte length.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn has_min_chars(value: &str, min: usize) -> bool {
    char_len(value) >= min
}
