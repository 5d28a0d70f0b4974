use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::Result;

pub type ReadingId = i64;
pub type Timestamp = DateTime<Utc>;
pub type Value = f64;

/// One stored sensor sample, as handed over by the data backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: ReadingId,
    pub timestamp: Timestamp,
    pub temperature: Option<Value>,
    pub humidity: Option<Value>,
    pub pressure: Option<Value>,
}

impl Reading {
    pub fn new(
        id: ReadingId,
        timestamp: Timestamp,
        temperature: Option<Value>,
        humidity: Option<Value>,
        pressure: Option<Value>,
    ) -> Reading {
        Reading {
            id,
            timestamp,
            temperature,
            humidity,
            pressure,
        }
    }

    /// Read a JSON array of readings.
    pub fn read_json<R: Read>(reader: R) -> Result<Vec<Reading>> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// A reading on a reconstructed timeline, either real or a placeholder for a
/// sample that is missing.
///
/// Ids of placeholders are guesses and may collide with real ids, they are
/// only meant for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GapReading {
    pub id: ReadingId,
    pub timestamp: Timestamp,
    pub temperature: Option<Value>,
    pub humidity: Option<Value>,
    pub pressure: Option<Value>,
}

impl GapReading {
    /// Placeholder row with no measurement.
    pub fn missing(id: ReadingId, timestamp: Timestamp) -> GapReading {
        GapReading {
            id,
            timestamp,
            temperature: None,
            humidity: None,
            pressure: None,
        }
    }

    /// True when no measurement is present, which is how placeholders look.
    pub fn is_missing(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none() && self.pressure.is_none()
    }
}

impl From<&Reading> for GapReading {
    fn from(r: &Reading) -> Self {
        GapReading {
            id: r.id,
            timestamp: r.timestamp,
            temperature: r.temperature,
            humidity: r.humidity,
            pressure: r.pressure,
        }
    }
}

impl From<Reading> for GapReading {
    fn from(r: Reading) -> Self {
        GapReading::from(&r)
    }
}
