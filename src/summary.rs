use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::common::month::MonthKey;
use crate::common::reading::{Reading, Value};

/// Split readings by the calendar month they were taken in.
pub fn group_by_month(readings: &[Reading]) -> BTreeMap<MonthKey, Vec<&Reading>> {
    let mut res: BTreeMap<MonthKey, Vec<&Reading>> = BTreeMap::new();
    for r in readings {
        res.entry(MonthKey::of(&r.timestamp)).or_insert_with(Vec::new).push(r);
    }
    res
}

#[derive(Default)]
struct Mean {
    sum: Value,
    count: usize,
}

impl Mean {
    fn add(&mut self, v: Option<Value>) {
        if let Some(v) = v {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<Value> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as Value)
        }
    }
}

/// Mean of each measurement over one month. A measurement no reading of the
/// month carries is absent.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthAverage {
    pub month: MonthKey,
    pub temperature: Option<Value>,
    pub humidity: Option<Value>,
    pub pressure: Option<Value>,
}

/// Twelve monthly averages for `year`, January first.
pub fn monthly_averages(readings: &[Reading], year: i32) -> Vec<MonthAverage> {
    let months = group_by_month(readings);
    (1..=12)
        .filter_map(|m| MonthKey::new(year, m).ok())
        .map(|key| {
            let (mut t, mut h, mut p) = (Mean::default(), Mean::default(), Mean::default());
            for r in months.get(&key).into_iter().flatten() {
                t.add(r.temperature);
                h.add(r.humidity);
                p.add(r.pressure);
            }
            MonthAverage {
                month: key,
                temperature: t.value(),
                humidity: h.value(),
                pressure: p.value(),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: NaiveDate,
    pub min_temp: Value,
    pub max_temp: Value,
}

/// Lowest and highest temperature of each day in `month`, ordered by day.
/// Days without any temperature are left out.
pub fn daily_min_max(readings: &[Reading], month: &MonthKey) -> Vec<DaySummary> {
    let (start, end) = month.range();
    let mut days: BTreeMap<NaiveDate, (Value, Value)> = BTreeMap::new();
    for r in readings.iter().filter(|r| r.timestamp >= start && r.timestamp < end) {
        if let Some(t) = r.temperature {
            let e = days.entry(r.timestamp.date_naive()).or_insert((t, t));
            e.0 = e.0.min(t);
            e.1 = e.1.max(t);
        }
    }
    days.into_iter()
        .map(|(day, (min_temp, max_temp))| DaySummary { day, min_temp, max_temp })
        .collect()
}

/// Highest and lowest temperature seen so far in a month.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MonthExtremes {
    pub highest: Value,
    pub lowest: Value,
}

impl MonthExtremes {
    pub fn new(temperature: Value) -> MonthExtremes {
        MonthExtremes {
            highest: temperature,
            lowest: temperature,
        }
    }

    /// None when no reading of `month` has a temperature.
    pub fn from_readings(readings: &[Reading], month: &MonthKey) -> Option<MonthExtremes> {
        let (start, end) = month.range();
        readings
            .iter()
            .filter(|r| r.timestamp >= start && r.timestamp < end)
            .filter_map(|r| r.temperature)
            .fold(None, |acc: Option<MonthExtremes>, t| match acc {
                Some(e) => Some(e.observe(t)),
                None => Some(MonthExtremes::new(t)),
            })
    }

    /// Extremes after a new live temperature arrives.
    pub fn observe(self, temperature: Value) -> MonthExtremes {
        if temperature.is_nan() {
            return self;
        }
        MonthExtremes {
            highest: self.highest.max(temperature),
            lowest: self.lowest.min(temperature),
        }
    }
}
