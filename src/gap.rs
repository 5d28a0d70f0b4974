//! Rebuild a continuous timeline out of sparse sensor readings.
//!
//! Missing samples show up two ways: as skipped ids, when stored rows were
//! deleted, or as a long stretch of wall-clock time between two rows, when the
//! device stopped reporting. Each pass inserts placeholder rows with no
//! measurement and an estimated timestamp, so a chart draws a break instead of
//! a line across the outage.
//!
//! Neither pass sorts or validates its input. Rows are expected in ascending
//! timestamp (and id) order; out of order rows never count as a gap.

use crate::common::ops::TimeOrdered;
use crate::common::option::GapOpts;
use crate::common::reading::{GapReading, Reading, ReadingId, Timestamp};
use crate::common::utils::{add_millis, millis_between};

/// How much longer than the average interval a step must be to count as a gap.
pub const DEFAULT_SLACK_FACTOR: f64 = 1.7;

/// Average step between consecutive timestamps, in milliseconds.
///
/// The sum of the steps is divided by the number of timestamps, not the
/// number of steps. The slack factor is tuned against this value, keep both
/// together. One timestamp gives 0, no timestamp gives `NaN`.
pub fn average_interval<'a, I>(timestamps: I) -> f64
where
    I: IntoIterator<Item = &'a Timestamp>,
{
    let mut sum = 0f64;
    let mut count = 0usize;
    let mut prev: Option<&Timestamp> = None;
    for t in timestamps {
        if let Some(p) = prev {
            sum += millis_between(p, t);
        }
        prev = Some(t);
        count += 1;
    }
    sum / count as f64
}

/// Insert a placeholder for every id skipped between two consecutive readings.
///
/// Placeholders are spaced by the average interval from the reading before
/// the skip and get the skipped ids in order.
pub fn fill_id_gaps(readings: &[Reading]) -> Vec<GapReading> {
    let interval = average_interval(readings.iter().map(|r| &r.timestamp));
    let mut res = Vec::with_capacity(readings.len());
    let mut prev: Option<&Reading> = None;
    for reading in readings {
        if let Some(p) = prev {
            let diff = reading.id.saturating_sub(p.id);
            if diff > 1 {
                if diff as u64 > readings.len() as u64 * 1000 {
                    warn!(
                        "id jumps from {} to {}, filling {} placeholders for {} readings",
                        p.id,
                        reading.id,
                        diff - 1,
                        readings.len()
                    );
                }
                fill_missing(&mut res, p.id, &p.timestamp, interval, (diff - 1) as u64);
            }
        }
        res.push(GapReading::from(reading));
        prev = Some(reading);
    }
    res
}

/// Insert placeholders where two consecutive rows are further apart than
/// [`DEFAULT_SLACK_FACTOR`] times the average interval.
pub fn fill_time_gaps(rows: &[GapReading]) -> Vec<GapReading> {
    fill_time_gaps_with_slack(rows, DEFAULT_SLACK_FACTOR)
}

/// Same as [`fill_time_gaps`] with a custom slack factor.
///
/// A gap of `diff` milliseconds gets `floor(diff / interval)` placeholders,
/// at most one per input row. Ordered input never reaches that bound, since
/// no single step is longer than the whole span.
/// Placeholder ids continue from the row before the gap and will usually
/// collide with real ids.
pub fn fill_time_gaps_with_slack(rows: &[GapReading], slack_factor: f64) -> Vec<GapReading> {
    let interval = average_interval(rows.iter().map(|r| &r.timestamp));
    // Only unsorted input can sum to a non positive interval.
    if !(interval.is_finite() && interval > 0.0) {
        if rows.len() > 1 {
            debug!("average interval is {} ms, skip time gap detection", interval);
        }
        return rows.to_vec();
    }

    let threshold = interval * slack_factor;
    let mut res = Vec::with_capacity(rows.len());
    let mut prev: Option<&GapReading> = None;
    for row in rows {
        if let Some(p) = prev {
            let diff = millis_between(&p.timestamp, &row.timestamp);
            if diff > threshold {
                let num_gaps = ((diff / interval).floor() as u64).min(rows.len() as u64);
                fill_missing(&mut res, p.id, &p.timestamp, interval, num_gaps);
            }
        }
        res.push(row.clone());
        prev = Some(row);
    }
    res
}

fn fill_missing(
    res: &mut Vec<GapReading>,
    after_id: ReadingId,
    after: &Timestamp,
    interval: f64,
    count: u64,
) {
    for j in 1..=count {
        match add_millis(after, interval * j as f64) {
            Some(timestamp) => res.push(GapReading::missing(after_id.wrapping_add(j as i64), timestamp)),
            None => {
                warn!("estimated timestamp after {} out of range, stop filling gap", after);
                break;
            }
        }
    }
}

/// Number of placeholders each pass inserted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GapStats {
    pub id_gaps: usize,
    pub time_gaps: usize,
}

impl GapStats {
    pub fn total(&self) -> usize {
        self.id_gaps + self.time_gaps
    }
}

/// A reconstructed timeline ready to be rendered.
#[derive(Clone, Debug)]
pub struct Timeline {
    rows: Vec<GapReading>,
    stats: GapStats,
}

impl Timeline {
    pub fn rows(&self) -> &Vec<GapReading> {
        &self.rows
    }

    pub fn stats(&self) -> GapStats {
        self.stats
    }

    pub fn into_rows(self) -> Vec<GapReading> {
        self.rows
    }
}

/// Run the id pass then the time pass, as enabled by `opts`.
///
/// The time pass computes its interval over the output of the id pass.
pub fn reconstruct(readings: &[Reading], opts: &GapOpts) -> Timeline {
    if !readings.is_time_ordered() {
        warn!("readings are not ordered by timestamp, gaps may be missed");
    } else if opts.id_pass() && !readings.is_id_ordered() {
        warn!("reading ids are not increasing, id gaps may be missed");
    }

    let mut stats = GapStats::default();
    let rows = if opts.id_pass() {
        let rows = fill_id_gaps(readings);
        stats.id_gaps = rows.len() - readings.len();
        rows
    } else {
        readings.iter().map(GapReading::from).collect()
    };

    let rows = if opts.time_pass() {
        let filled = fill_time_gaps_with_slack(&rows, opts.slack_factor());
        stats.time_gaps = filled.len() - rows.len();
        filled
    } else {
        rows
    };

    debug!(
        "reconstructed {} readings into {} rows, {} from id gaps, {} from time gaps",
        readings.len(),
        rows.len(),
        stats.id_gaps,
        stats.time_gaps
    );
    Timeline { rows, stats }
}

#[cfg(test)]
mod test {
    use chrono::Duration;

    use crate::common::option::GapOpts;
    use crate::common::reading::{GapReading, Reading, Timestamp};
    use crate::common::utils::parse_timestamp;
    use crate::gap::{average_interval, fill_id_gaps, fill_time_gaps, fill_time_gaps_with_slack, reconstruct};

    fn base() -> Timestamp {
        parse_timestamp("2023-05-01T10:00:00Z").unwrap()
    }

    fn at(secs: i64) -> Timestamp {
        base() + Duration::seconds(secs)
    }

    fn reading(id: i64, secs: i64) -> Reading {
        Reading::new(id, at(secs), Some(20.0 + id as f64), Some(40.0), Some(1010.0))
    }

    fn gap_rows(readings: &[Reading]) -> Vec<GapReading> {
        readings.iter().map(GapReading::from).collect()
    }

    #[test]
    fn average_interval_divides_by_count() {
        let ts = vec![at(0), at(60), at(180), at(240)];
        assert_eq!(average_interval(&ts), 60_000.0);
        assert_eq!(average_interval(&[at(0), at(90)]), 45_000.0);
    }

    #[test]
    fn average_interval_edge_cases() {
        let empty: Vec<Timestamp> = Vec::new();
        assert!(average_interval(&empty).is_nan());
        assert_eq!(average_interval(&[at(10)]), 0.0);
    }

    #[test]
    fn id_gaps_filled() {
        let readings = vec![reading(1, 0), reading(2, 60), reading(5, 180), reading(6, 240)];
        let res = fill_id_gaps(&readings);
        assert_eq!(res.len(), 6);
        assert_eq!(res.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        assert!(res[2].is_missing() && res[3].is_missing());
        assert_eq!(res[2].timestamp, at(120));
        assert_eq!(res[3].timestamp, at(180));
        assert_eq!(res[4], GapReading::from(&readings[2]));
    }

    #[test]
    fn sequential_ids_unchanged() {
        let readings: Vec<Reading> = (0..10).map(|i| reading(i + 1, i * 60)).collect();
        assert_eq!(fill_id_gaps(&readings), gap_rows(&readings));
    }

    #[test]
    fn id_pass_small_inputs() {
        assert!(fill_id_gaps(&[]).is_empty());
        let single = vec![reading(3, 0)];
        assert_eq!(fill_id_gaps(&single), gap_rows(&single));
    }

    #[test]
    fn time_gap_detected() {
        // average 50s, threshold 85s
        let rows = gap_rows(&[reading(1, 0), reading(2, 60), reading(3, 150)]);
        let res = fill_time_gaps(&rows);
        assert_eq!(res.len(), 4);
        assert!(res[2].is_missing());
        assert_eq!(res[2].id, 3);
        assert_eq!(res[2].timestamp, at(110));
        assert_eq!(res[3], rows[2]);
    }

    #[test]
    fn time_jitter_ignored() {
        // average 40s, threshold 68s
        let rows = gap_rows(&[reading(1, 0), reading(2, 60), reading(3, 120)]);
        assert_eq!(fill_time_gaps(&rows), rows);
    }

    #[test]
    fn time_gap_count() {
        let mut readings: Vec<Reading> = (0..10).map(|i| reading(i + 1, i * 60)).collect();
        readings.push(reading(11, 9 * 60 + 600));
        // 11 timestamps over 1140s
        let interval = 1_140_000.0 / 11.0;
        let res = fill_time_gaps(&gap_rows(&readings));
        let missing: Vec<&GapReading> = res.iter().filter(|r| r.is_missing()).collect();
        assert_eq!(missing.len(), (600_000.0 / interval) as usize);
        assert_eq!(missing[0].id, 11);
        assert!(missing.iter().all(|r| r.timestamp < at(1140)));
    }

    #[test]
    fn custom_slack_factor() {
        let rows = gap_rows(&[reading(1, 0), reading(2, 60), reading(3, 120)]);
        assert_eq!(fill_time_gaps_with_slack(&rows, 1.2).len(), 5);
    }

    #[test]
    fn unordered_rows_no_gap() {
        let rows = gap_rows(&[reading(1, 0), reading(2, 600), reading(3, 60), reading(4, 120)]);
        let res = fill_time_gaps(&rows);
        let idx = res.iter().position(|r| *r == rows[2]).unwrap();
        assert_eq!(res[idx - 1], rows[1]);
        let zero = gap_rows(&[reading(1, 0), reading(2, 60), reading(3, 0)]);
        assert_eq!(fill_time_gaps(&zero), zero);
    }

    #[test]
    fn unordered_rows_bounded() {
        let ms = |m: i64| base() + Duration::milliseconds(m);
        let rows: Vec<GapReading> = [0, 1_000_000, 0, 4]
            .iter()
            .enumerate()
            .map(|(i, m)| GapReading::from(Reading::new(i as i64 + 1, ms(*m), Some(1.0), None, None)))
            .collect();
        // average interval 1ms, both forward steps hit the cap
        let res = fill_time_gaps(&rows);
        assert_eq!(res.len(), 4 + 4 + 4);
        assert_eq!(res.iter().filter(|r| !r.is_missing()).count(), 4);
    }

    #[test]
    fn large_id_jump_filled() {
        let readings = vec![reading(1, 0), reading(2_000, 60)];
        let res = fill_id_gaps(&readings);
        assert_eq!(res.len(), 2_000);
        assert_eq!(res[1_998].id, 1_999);
        assert_eq!(res[1_999], GapReading::from(&readings[1]));
    }

    #[test]
    fn reconstruct_with_opts() {
        let readings = vec![reading(1, 0), reading(2, 60), reading(5, 180), reading(6, 240)];
        let timeline = reconstruct(&readings, &GapOpts::default());
        assert_eq!(timeline.stats().id_gaps, 2);
        assert_eq!(timeline.rows().len(), 6 + timeline.stats().time_gaps);

        let only_time = reconstruct(&readings, &GapOpts::new(1.7, false, true).unwrap());
        assert_eq!(only_time.stats().id_gaps, 0);

        let none = reconstruct(&readings, &GapOpts::new(1.7, false, false).unwrap());
        assert_eq!(none.into_rows(), gap_rows(&readings));
    }
}
