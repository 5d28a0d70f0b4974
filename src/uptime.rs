//! Device uptime over the last day, as the number of readings received in
//! each half hour slot.

use chrono::Duration;

use crate::common::reading::Timestamp;

pub const UPTIME_SLOTS: usize = 48;
pub const SLOT_MINUTES: i64 = 30;
/// Slot counts are capped so one burst does not flatten the chart.
pub const MAX_UPDATES_PER_SLOT: u32 = 90;

/// Count readings per 30 minute slot over the 24 hours before `now`.
///
/// The last slot is the most recent one. Timestamps older than a day or
/// later than `now` are ignored.
pub fn device_uptime<'a, I>(timestamps: I, now: &Timestamp) -> Vec<u32>
where
    I: IntoIterator<Item = &'a Timestamp>,
{
    let mut slots = vec![0u32; UPTIME_SLOTS];
    let window = Duration::minutes(SLOT_MINUTES * UPTIME_SLOTS as i64);
    for t in timestamps {
        let elapsed = *now - *t;
        if elapsed < Duration::zero() || elapsed >= window {
            continue;
        }
        let idx = (elapsed.num_minutes() / SLOT_MINUTES) as usize;
        if idx < UPTIME_SLOTS {
            slots[idx] += 1;
        }
    }
    slots
        .into_iter()
        .rev()
        .map(|v| v.min(MAX_UPDATES_PER_SLOT))
        .collect()
}
