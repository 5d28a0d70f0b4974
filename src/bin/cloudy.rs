use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use cloudy::month::MonthKey;
use cloudy::option::GapOpts;
use cloudy::summary::{daily_min_max, monthly_averages, MonthExtremes};
use cloudy::uptime::device_uptime;
use cloudy::utils::{get_current_timestamp, load_readings, parse_timestamp};
use cloudy::{
    reconstruct, CloudyErr, Result, CONFIG_ARG, INPUT_ARG, MONTH_ARG, NOW_ARG, NO_ID_PASS_ARG,
    NO_TIME_PASS_ARG, SLACK_ARG, YEAR_ARG,
};
use serde::Serialize;
use std::io;
use std::path::Path;
use std::process;

#[macro_use]
extern crate log;

///
/// Command line wrapper around the reading tools.
/// Readings come as a JSON array from --input or stdin, results go to stdout as JSON.
/// subcommands:
/// gaps, rebuild the timeline with placeholders for missing readings
/// summary, monthly averages of a year
/// daily, daily min/max temperature of a month
/// extremes, highest and lowest temperature of a month
/// uptime, readings per half hour over the last day
///
fn main() {
    env_logger::init();

    let input = Arg::with_name(INPUT_ARG)
        .short("i")
        .long("input")
        .takes_value(true)
        .help("JSON file with readings, stdin when absent");

    let matches = App::new("cloudy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("weather station reading tools")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("gaps")
                .about("rebuild the timeline with placeholders for missing readings")
                .args(&[
                    input.clone(),
                    Arg::with_name(CONFIG_ARG)
                        .short("c")
                        .long("config")
                        .takes_value(true)
                        .help("yaml file with gap options"),
                    Arg::with_name(SLACK_ARG)
                        .short("s")
                        .long("slack")
                        .takes_value(true)
                        .help("multiple of the average interval a step must exceed to be a gap"),
                    Arg::with_name(NO_ID_PASS_ARG)
                        .long("no-id-pass")
                        .help("do not look for skipped ids"),
                    Arg::with_name(NO_TIME_PASS_ARG)
                        .long("no-time-pass")
                        .help("do not look for long intervals"),
                ]),
        )
        .subcommand(
            SubCommand::with_name("summary")
                .about("monthly averages of a year")
                .args(&[
                    input.clone(),
                    Arg::with_name(YEAR_ARG)
                        .short("y")
                        .long("year")
                        .takes_value(true)
                        .help("year to summarize, current year when absent"),
                ]),
        )
        .subcommand(
            SubCommand::with_name("daily")
                .about("daily min/max temperature of a month")
                .args(&[
                    input.clone(),
                    Arg::with_name(MONTH_ARG)
                        .short("m")
                        .long("month")
                        .takes_value(true)
                        .help("month as YYYY-MM, current month when absent or invalid"),
                ]),
        )
        .subcommand(
            SubCommand::with_name("extremes")
                .about("highest and lowest temperature of a month")
                .args(&[
                    input.clone(),
                    Arg::with_name(MONTH_ARG)
                        .short("m")
                        .long("month")
                        .takes_value(true)
                        .help("month as YYYY-MM, current month when absent or invalid"),
                ]),
        )
        .subcommand(
            SubCommand::with_name("uptime")
                .about("readings received per half hour over the last day")
                .args(&[
                    input,
                    Arg::with_name(NOW_ARG)
                        .long("now")
                        .takes_value(true)
                        .help("RFC 3339 reference time, current time when absent"),
                ]),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        ("gaps", Some(sub)) => {
            let opts = GapOpts::get_config(sub)?;
            let readings = load_readings(input_path(sub))?;
            let timeline = reconstruct(&readings, &opts);
            info!(
                "{} readings, {} placeholders inserted",
                readings.len(),
                timeline.stats().total()
            );
            write_json(timeline.rows())
        }
        ("summary", Some(sub)) => {
            let year = match sub.value_of(YEAR_ARG) {
                Some(y) => y
                    .parse()
                    .map_err(|_| CloudyErr::OptionErr(format!("invalid year {}", y)))?,
                None => MonthKey::current().year(),
            };
            let readings = load_readings(input_path(sub))?;
            write_json(&monthly_averages(&readings, year))
        }
        ("daily", Some(sub)) => {
            let month = month_arg(sub);
            let readings = load_readings(input_path(sub))?;
            write_json(&daily_min_max(&readings, &month))
        }
        ("extremes", Some(sub)) => {
            let month = month_arg(sub);
            let readings = load_readings(input_path(sub))?;
            // null when the month has no temperature
            write_json(&MonthExtremes::from_readings(&readings, &month))
        }
        ("uptime", Some(sub)) => {
            let now = match sub.value_of(NOW_ARG) {
                Some(s) => parse_timestamp(s)?,
                None => get_current_timestamp(),
            };
            let readings = load_readings(input_path(sub))?;
            write_json(&device_uptime(readings.iter().map(|r| &r.timestamp), &now))
        }
        (name, _) => Err(CloudyErr::OptionErr(format!("unknown command {}", name))),
    }
}

fn month_arg(matches: &ArgMatches) -> MonthKey {
    matches
        .value_of(MONTH_ARG)
        .map(MonthKey::parse_or_current)
        .unwrap_or_else(MonthKey::current)
}

fn input_path<'a>(matches: &'a ArgMatches) -> Option<&'a Path> {
    matches.value_of(INPUT_ARG).map(Path::new)
}

fn write_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), value)?;
    println!();
    Ok(())
}
