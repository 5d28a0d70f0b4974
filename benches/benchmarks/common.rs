use chrono::Duration;
use cloudy::reading::Reading;
use cloudy::utils::parse_timestamp;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// About one reading a minute, with some deleted ids and some outages.
pub fn generate_readings(len: usize) -> Vec<Reading> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut id = 1i64;
    let mut ts = parse_timestamp("2023-01-01T00:00:00Z").unwrap();
    let mut res = Vec::with_capacity(len);
    for _ in 0..len {
        res.push(Reading::new(id, ts, Some(rng.gen_range(-5.0, 30.0)), Some(55.0), Some(1012.0)));
        id += if rng.gen_bool(0.01) { rng.gen_range(2, 10) } else { 1 };
        let step = if rng.gen_bool(0.005) { rng.gen_range(600, 7200) } else { 60 };
        ts = ts + Duration::seconds(step);
    }
    res
}
