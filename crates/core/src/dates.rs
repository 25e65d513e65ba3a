//! Date rendering for proposal slides.

use chrono::{Datelike, Duration, NaiveDate};

/// How long an offer stays open.
pub const VALIDITY_DAYS: i64 = 30;

pub fn validity_date(issued_on: NaiveDate) -> NaiveDate {
    issued_on + Duration::days(VALIDITY_DAYS)
}

/// `15th of February, 2024`.
pub fn long_ordinal(date: NaiveDate) -> String {
    format!(
        "{}{} of {}",
        date.day(),
        ordinal_suffix(date.day()),
        date.format("%B, %Y")
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{long_ordinal, validity_date};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn renders_long_ordinal_dates() {
        assert_eq!(long_ordinal(date(2024, 2, 15)), "15th of February, 2024");
        assert_eq!(long_ordinal(date(2025, 12, 1)), "1st of December, 2025");
        assert_eq!(long_ordinal(date(2025, 3, 22)), "22nd of March, 2025");
        assert_eq!(long_ordinal(date(2025, 6, 23)), "23rd of June, 2025");
        assert_eq!(long_ordinal(date(2025, 1, 31)), "31st of January, 2025");
    }

    #[test]
    fn teen_days_take_th_suffix() {
        assert_eq!(long_ordinal(date(2024, 7, 11)), "11th of July, 2024");
        assert_eq!(long_ordinal(date(2024, 7, 12)), "12th of July, 2024");
        assert_eq!(long_ordinal(date(2024, 7, 13)), "13th of July, 2024");
    }

    #[test]
    fn validity_runs_thirty_days_from_issue() {
        assert_eq!(validity_date(date(2024, 2, 15)), date(2024, 3, 16));
        assert_eq!(validity_date(date(2025, 12, 15)), date(2026, 1, 14));
    }
}
