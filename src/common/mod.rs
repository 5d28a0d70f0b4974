use crate::common::reading::{GapReading, Reading, ReadingId, Timestamp};

pub mod month;
pub mod option;
pub mod reading;
pub mod utils;

pub mod ops {
    /// Check a sequence is ordered the way the gap passes expect.
    pub trait TimeOrdered {
        /// Timestamps never go backwards.
        fn is_time_ordered(&self) -> bool;
        /// Ids strictly increase.
        fn is_id_ordered(&self) -> bool;
    }
}

/// Anything carrying an id and a point in time.
pub trait Timestamped {
    fn id(&self) -> ReadingId;
    fn timestamp(&self) -> &Timestamp;
}

impl Timestamped for Reading {
    fn id(&self) -> ReadingId {
        self.id
    }

    fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}

impl Timestamped for GapReading {
    fn id(&self) -> ReadingId {
        self.id
    }

    fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}

impl<T: Timestamped> ops::TimeOrdered for [T] {
    fn is_time_ordered(&self) -> bool {
        self.windows(2).all(|w| w[0].timestamp() <= w[1].timestamp())
    }

    fn is_id_ordered(&self) -> bool {
        self.windows(2).all(|w| w[0].id() < w[1].id())
    }
}
