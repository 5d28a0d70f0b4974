use chrono::{DateTime, Duration, Utc};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::common::reading::{Reading, Timestamp};
use crate::{CloudyErr, Result};

pub fn parse_timestamp(s: &str) -> Result<Timestamp> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| CloudyErr::TimestampErr(s.to_string()))
}

pub fn get_current_timestamp() -> Timestamp {
    Utc::now()
}

/// Signed milliseconds from `earlier` to `later`.
pub fn millis_between(earlier: &Timestamp, later: &Timestamp) -> f64 {
    (*later - *earlier).num_milliseconds() as f64
}

/// Shift a timestamp by a fractional amount of milliseconds, dropping the
/// fraction. None when the result leaves the representable range.
pub fn add_millis(t: &Timestamp, millis: f64) -> Option<Timestamp> {
    if !millis.is_finite() {
        return None;
    }
    t.checked_add_signed(Duration::milliseconds(millis.trunc() as i64))
}

/// Load readings from a JSON file, or from stdin when no path is given.
pub fn load_readings(path: Option<&Path>) -> Result<Vec<Reading>> {
    let readings = match path {
        Some(p) => Reading::read_json(BufReader::new(File::open(p)?))?,
        None => Reading::read_json(BufReader::new(io::stdin()))?,
    };
    debug!("loaded {} readings", readings.len());
    Ok(readings)
}
