use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::common::reading::Timestamp;
use crate::common::utils::get_current_timestamp;
use crate::{CloudyErr, Result};

/// A calendar month in UTC, written as `YYYY-MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<MonthKey> {
        if month < 1 || month > 12 {
            return Err(CloudyErr::MonthErr(format!("{}-{}", year, month)));
        }
        Ok(MonthKey { year, month })
    }

    pub fn of(t: &Timestamp) -> MonthKey {
        MonthKey {
            year: t.year(),
            month: t.month(),
        }
    }

    pub fn current() -> MonthKey {
        MonthKey::of(&get_current_timestamp())
    }

    /// Parse a month key, falling back to the current month on bad input.
    pub fn parse_or_current(s: &str) -> MonthKey {
        s.parse().unwrap_or_else(|e| {
            warn!("{}, using current month", e);
            MonthKey::current()
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1 based month of year.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn next(&self) -> MonthKey {
        if self.month == 12 {
            MonthKey {
                year: self.year + 1,
                month: 1,
            }
        } else {
            MonthKey {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Half open time range `[start, end)` covered by this month.
    pub fn range(&self) -> (Timestamp, Timestamp) {
        let start = self.first_day().and_time(NaiveTime::MIN).and_utc();
        let end = self.next().first_day().and_time(NaiveTime::MIN).and_utc();
        (start, end)
    }

    pub fn contains(&self, t: &Timestamp) -> bool {
        let (start, end) = self.range();
        *t >= start && *t < end
    }
}

impl FromStr for MonthKey {
    type Err = CloudyErr;

    fn from_str(s: &str) -> Result<MonthKey> {
        let err = || CloudyErr::MonthErr(s.to_string());
        let mut parts = s.trim().splitn(2, '-');
        let year = parts.next().ok_or_else(err)?;
        let month = parts.next().ok_or_else(err)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(err());
        }
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        MonthKey::new(year, month).map_err(|_| err())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
