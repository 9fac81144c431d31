//! Weekday trading calendar used to date forecast points.

use chrono::{Datelike, NaiveDate, Weekday};

pub fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first weekday strictly after `date`.
pub fn next_trading_day(date: NaiveDate) -> Option<NaiveDate> {
    let mut next = date.succ_opt()?;
    while !is_trading_day(next) {
        next = next.succ_opt()?;
    }
    Some(next)
}

/// The `count` weekdays following `date`.
pub fn trading_days_after(date: NaiveDate, count: usize) -> Vec<NaiveDate> {
    std::iter::successors(next_trading_day(date), |d| next_trading_day(*d))
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_friday_rolls_to_monday() {
        // 2024-03-08 is a Friday.
        assert_eq!(next_trading_day(date(2024, 3, 8)), Some(date(2024, 3, 11)));
    }

    #[test]
    fn test_weekend_input() {
        assert_eq!(next_trading_day(date(2024, 3, 9)), Some(date(2024, 3, 11)));
        assert!(!is_trading_day(date(2024, 3, 10)));
    }

    #[test]
    fn test_five_days_from_wednesday() {
        let days = trading_days_after(date(2024, 3, 6), 5);
        assert_eq!(
            days,
            vec![
                date(2024, 3, 7),
                date(2024, 3, 8),
                date(2024, 3, 11),
                date(2024, 3, 12),
                date(2024, 3, 13),
            ]
        );
    }
}
