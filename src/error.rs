use std::io;
use std::num::ParseFloatError;

#[derive(Debug, Fail)]
pub enum CloudyErr {
    #[fail(display = "{}", _0)]
    FileIoErr(#[cause] io::Error),

    #[fail(display = "Invalid reading data: {}", _0)]
    JsonErr(#[cause] serde_json::Error),

    #[fail(display = "Invalid config file: {}", _0)]
    ConfigErr(#[cause] serde_yaml::Error),

    #[fail(display = "Cannot parse timestamp {}", _0)]
    TimestampErr(String),

    #[fail(display = "Invalid month {}, expect YYYY-MM", _0)]
    MonthErr(String),

    #[fail(display = "Invalid option: {}", _0)]
    OptionErr(String),
}

pub type Result<T> = std::result::Result<T, CloudyErr>;

impl From<io::Error> for CloudyErr {
    fn from(e: io::Error) -> Self {
        CloudyErr::FileIoErr(e)
    }
}

impl From<serde_json::Error> for CloudyErr {
    fn from(e: serde_json::Error) -> Self {
        CloudyErr::JsonErr(e)
    }
}

impl From<serde_yaml::Error> for CloudyErr {
    fn from(e: serde_yaml::Error) -> Self {
        CloudyErr::ConfigErr(e)
    }
}

impl From<ParseFloatError> for CloudyErr {
    fn from(e: ParseFloatError) -> Self {
        CloudyErr::OptionErr(e.to_string())
    }
}
