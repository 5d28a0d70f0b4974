use clap::ArgMatches;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::gap::DEFAULT_SLACK_FACTOR;
use crate::{CloudyErr, Result, CONFIG_ARG, NO_ID_PASS_ARG, NO_TIME_PASS_ARG, SLACK_ARG};

/// Options for timeline reconstruction.
///
/// Can be loaded from a yaml file such as
/// ```yaml
/// slack_factor: 1.7
/// id_pass: true
/// time_pass: true
/// ```
/// Missing keys keep their default value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GapOpts {
    slack_factor: f64,
    id_pass: bool,
    time_pass: bool,
}

impl Default for GapOpts {
    fn default() -> Self {
        GapOpts {
            slack_factor: DEFAULT_SLACK_FACTOR,
            id_pass: true,
            time_pass: true,
        }
    }
}

impl GapOpts {
    pub fn new(slack_factor: f64, id_pass: bool, time_pass: bool) -> Result<GapOpts> {
        let opts = GapOpts {
            slack_factor,
            id_pass,
            time_pass,
        };
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_yaml(content: &str) -> Result<GapOpts> {
        let opts: GapOpts = serde_yaml::from_str(content)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_file(path: &Path) -> Result<GapOpts> {
        GapOpts::from_yaml(&fs::read_to_string(path)?)
    }

    /// Build options from command line, flags override the config file.
    pub fn get_config(matches: &ArgMatches) -> Result<GapOpts> {
        let mut opts = match matches.value_of(CONFIG_ARG) {
            Some(path) => GapOpts::from_file(Path::new(path))?,
            None => GapOpts::default(),
        };
        if let Some(slack) = matches.value_of(SLACK_ARG) {
            opts.slack_factor = slack.parse()?;
        }
        if matches.is_present(NO_ID_PASS_ARG) {
            opts.id_pass = false;
        }
        if matches.is_present(NO_TIME_PASS_ARG) {
            opts.time_pass = false;
        }
        opts.validate()?;
        Ok(opts)
    }

    fn validate(&self) -> Result<()> {
        if !(self.slack_factor.is_finite() && self.slack_factor > 0.0) {
            return Err(CloudyErr::OptionErr(format!(
                "slack factor must be a positive number, got {}",
                self.slack_factor
            )));
        }
        Ok(())
    }

    pub fn slack_factor(&self) -> f64 {
        self.slack_factor
    }

    pub fn id_pass(&self) -> bool {
        self.id_pass
    }

    pub fn time_pass(&self) -> bool {
        self.time_pass
    }
}
