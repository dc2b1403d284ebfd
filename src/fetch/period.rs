//! Report-period arithmetic for the exchange's publication URLs.

use chrono::{Datelike, Duration, NaiveDate};

/// Whole-month count between two dates, used as the instrument URL suffix.
pub fn months_between(date1: NaiveDate, date2: NaiveDate) -> i32 {
    let (earlier, later) = if date1 > date2 {
        (date2, date1)
    } else {
        (date1, date2)
    };

    let years_diff = later.year() - earlier.year();
    let months_diff = later.month() as i32 - earlier.month() as i32;

    years_diff * 12 + months_diff
}

/// Last day of the calendar month preceding `date`'s month.
pub fn previous_month_end(date: NaiveDate) -> NaiveDate {
    let first_of_month = date.with_day(1).expect("day 1 is always valid");
    first_of_month - Duration::days(1)
}

/// Human label for a monthly report period, e.g. "September 2025".
pub fn month_label(date: NaiveDate) -> String {
    format!("{} {}", date.format("%B"), date.year())
}

/// The most recent Friday on or before `date`, optionally stepped back
/// by whole weeks.
pub fn previous_friday(date: NaiveDate, weeks_ago: i64) -> NaiveDate {
    let days_since_friday = (date.weekday().num_days_from_monday() as i64 - 4).rem_euclid(7);
    date - Duration::days(days_since_friday) - Duration::weeks(weeks_ago)
}

/// Label for a weekly report period, e.g. "5 September 2025".
pub fn weekly_label(friday: NaiveDate) -> String {
    format!("{} {} {}", friday.day(), friday.format("%B"), friday.year())
}

/// Percent-encode the spaces of a period label for use as a URL tail.
pub fn url_encode_label(label: &str) -> String {
    label.replace(' ', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn months_between_counts_whole_months() {
        assert_eq!(months_between(date(2020, 4, 30), date(2020, 5, 1)), 1);
        assert_eq!(months_between(date(2020, 4, 30), date(2021, 4, 30)), 12);
        assert_eq!(months_between(date(2020, 4, 30), date(2024, 6, 15)), 50);
    }

    #[test]
    fn months_between_is_order_insensitive() {
        assert_eq!(
            months_between(date(2024, 6, 15), date(2020, 4, 30)),
            months_between(date(2020, 4, 30), date(2024, 6, 15))
        );
    }

    #[test]
    fn previous_month_end_crosses_year_boundary() {
        assert_eq!(previous_month_end(date(2025, 1, 15)), date(2024, 12, 31));
        assert_eq!(previous_month_end(date(2025, 3, 1)), date(2025, 2, 28));
    }

    #[test]
    fn month_label_formats_name_and_year() {
        assert_eq!(month_label(date(2024, 12, 31)), "December 2024");
    }

    #[test]
    fn previous_friday_from_each_weekday() {
        // 2025-09-05 is a Friday
        assert_eq!(previous_friday(date(2025, 9, 5), 0), date(2025, 9, 5));
        // Saturday and Sunday fall back to it
        assert_eq!(previous_friday(date(2025, 9, 6), 0), date(2025, 9, 5));
        assert_eq!(previous_friday(date(2025, 9, 7), 0), date(2025, 9, 5));
        // Thursday falls back to the prior week's Friday
        assert_eq!(previous_friday(date(2025, 9, 4), 0), date(2025, 8, 29));
    }

    #[test]
    fn previous_friday_steps_back_whole_weeks() {
        assert_eq!(previous_friday(date(2025, 9, 5), 1), date(2025, 8, 29));
    }

    #[test]
    fn weekly_label_has_no_zero_padding() {
        assert_eq!(weekly_label(date(2025, 9, 5)), "5 September 2025");
        assert_eq!(url_encode_label("5 September 2025"), "5%20September%202025");
    }
}
