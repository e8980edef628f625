use crate::configuration::constants::cargo_env::CARGO_PKG_NAME;
use clap::arg_enum;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug)]
    pub enum LogLevel {
        Off, Error, Warn, Info, Debug, Trace,
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = CARGO_PKG_NAME)]
pub struct Opt {
    /// JUnit XML files, directories with reports, or zip archives of CI artifacts
    #[structopt(parse(from_os_str), required = true)]
    pub inputs: Vec<PathBuf>,

    /// Identifier of the workflow run the reports belong to
    #[structopt(long, default_value = "0")]
    pub workflow_id: u64,

    /// Name of the workflow the reports belong to
    #[structopt(long, default_value = "local")]
    pub workflow_name: String,

    /// Repository the workflow ran for
    #[structopt(long, default_value = "")]
    pub repository: String,

    /// Branch the workflow ran on
    #[structopt(long, default_value = "")]
    pub branch: String,

    /// Test conclusions to keep, any other test case will be dropped
    #[structopt(long, short = "c")]
    pub conclusions: Vec<String>,

    /// File to which the parsed records will be written as JSON
    #[structopt(long, short = "o")]
    pub output: Option<PathBuf>,

    /// Sets a logging level
    #[structopt(case_insensitive = true, long, short = "L", possible_values = &LogLevel::variants(), env = "LOG_LEVEL")]
    pub logging: Option<LogLevel>,

    /// File to which application will write logs
    #[structopt(long, short = "O", env = "LOG_OUTPUT_FILE")]
    pub log_output_file: Option<PathBuf>,
}

impl Into<LevelFilter> for LogLevel {
    fn into(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
