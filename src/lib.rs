#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

pub mod common;
pub mod gap;
pub mod summary;
pub mod uptime;
mod error;

pub use common::*;
pub use error::*;
pub use gap::{average_interval, fill_id_gaps, fill_time_gaps, reconstruct, GapStats, Timeline};

pub const INPUT_ARG: &str = "input";
pub const CONFIG_ARG: &str = "config";
pub const SLACK_ARG: &str = "slack";
pub const NO_ID_PASS_ARG: &str = "no_id_pass";
pub const NO_TIME_PASS_ARG: &str = "no_time_pass";
pub const YEAR_ARG: &str = "year";
pub const MONTH_ARG: &str = "month";
pub const NOW_ARG: &str = "now";
