use chrono::Duration;
use cloudy::reading::{Reading, Timestamp};
use cloudy::utils::parse_timestamp;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn base_time() -> Timestamp {
    parse_timestamp("2023-05-01T00:00:00Z").unwrap()
}

pub fn minutes(m: i64) -> Timestamp {
    base_time() + Duration::minutes(m)
}

/// Readings with the given ids, `ids[i]` taken at `mins[i]` minutes.
pub fn readings_generator(ids: Vec<i64>, mins: Vec<i64>) -> Vec<Reading> {
    assert_eq!(ids.len(), mins.len());
    ids.iter()
        .zip(mins.iter())
        .map(|(id, m)| Reading::new(*id, minutes(*m), Some(18.5), Some(62.0), Some(1013.2)))
        .collect()
}

/// Ordered readings roughly one minute apart with random id skips and outages.
pub fn random_readings(seed: u64, len: usize) -> Vec<Reading> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut id = 1i64;
    let mut ts = base_time();
    let mut res = Vec::with_capacity(len);
    for _ in 0..len {
        res.push(Reading::new(
            id,
            ts,
            Some(rng.gen_range(-10.0, 35.0)),
            Some(rng.gen_range(20.0, 90.0)),
            Some(rng.gen_range(980.0, 1040.0)),
        ));
        id += if rng.gen_bool(0.05) { rng.gen_range(2, 6) } else { 1 };
        let step = if rng.gen_bool(0.03) { rng.gen_range(300, 3600) } else { rng.gen_range(50, 70) };
        ts = ts + Duration::seconds(step);
    }
    res
}
