//! Trading-day calendar.
//!
//! Deterministic, pure logic. No IO, no wall-clock. The simulated clock
//! only ever lands on dates this calendar admits.

use chrono::{Datelike, NaiveDate, Weekday};

/// Which calendar dates count as trading days.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradingCalendar {
    /// Monday through Friday. Holidays are handled by data absence: a
    /// weekday with no bars is simply skipped by the run loop.
    Weekdays,

    /// Every calendar day trades (24/7 venues, synthetic test data).
    AlwaysOn,
}

impl TradingCalendar {
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        match self {
            TradingCalendar::Weekdays => {
                !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
            }
            TradingCalendar::AlwaysOn => true,
        }
    }

    /// Trading days in the closed window `[start, end]`, ascending.
    pub fn trading_days(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut out = Vec::new();
        let mut date = start;
        while date <= end {
            if self.is_trading_day(date) {
                out.push(date);
            }
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekdays_trade_weekends_do_not() {
        let cal = TradingCalendar::Weekdays;
        assert!(cal.is_trading_day(d(2013, 10, 7))); // Monday
        assert!(cal.is_trading_day(d(2013, 10, 11))); // Friday
        assert!(!cal.is_trading_day(d(2013, 10, 12))); // Saturday
        assert!(!cal.is_trading_day(d(2013, 10, 13))); // Sunday
    }

    #[test]
    fn one_business_week_yields_five_days() {
        let days = TradingCalendar::Weekdays.trading_days(d(2013, 10, 7), d(2013, 10, 11));
        assert_eq!(days.len(), 5);
        assert_eq!(days[0], d(2013, 10, 7));
        assert_eq!(days[4], d(2013, 10, 11));
    }

    #[test]
    fn window_spanning_weekend_excludes_it() {
        let days = TradingCalendar::Weekdays.trading_days(d(2013, 10, 10), d(2013, 10, 14));
        // Thu, Fri, Mon. Sat/Sun dropped.
        assert_eq!(days, vec![d(2013, 10, 10), d(2013, 10, 11), d(2013, 10, 14)]);
    }

    #[test]
    fn always_on_includes_weekend() {
        let days = TradingCalendar::AlwaysOn.trading_days(d(2013, 10, 11), d(2013, 10, 13));
        assert_eq!(days.len(), 3);
    }

    #[test]
    fn single_day_window() {
        let days = TradingCalendar::Weekdays.trading_days(d(2013, 10, 7), d(2013, 10, 7));
        assert_eq!(days, vec![d(2013, 10, 7)]);
    }
}
