// #![forbid(unsafe_code)]
// #![deny(non_upper_case_globals)]
// #![deny(non_camel_case_types)]
// #![deny(non_snake_case)]
// #![deny(unused_mut)]
// #![deny(unused_variables)]
// #![deny(dead_code)]
// #![deny(unused_imports)]
//#![deny(missing_docs)]
//#![deny(warnings)]

extern crate chrono;
extern crate lazy_static;
extern crate serde_derive;

#[macro_use]
extern crate log;

mod configuration;
mod junit;
mod source;
mod time;

use log::LevelFilter;
use serde_derive::Serialize;
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    process::exit,
    sync::Arc,
};
use structopt::StructOpt;

use self::junit::model::{Testcase, Testsuite, WorkflowRun};
use self::{
    configuration::command_line::{LogLevel, Opt},
    configuration::constants::common::DEFAULT_ALLOWED_CONCLUSIONS,
    source::{archive::ArchiveEntry, disk::DiskFile, ReportFile},
};

const ARCHIVE_EXTENSION: &str = "zip";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    testsuites: Vec<Arc<Testsuite>>,
    testcases: Vec<Testcase>,
}

fn main() {
    let options = Opt::from_args();

    init_logging(
        options.logging.unwrap_or(LogLevel::Info).into(),
        &options.log_output_file,
    );

    let workflow_run = Arc::new(WorkflowRun {
        id: options.workflow_id,
        name: options.workflow_name.clone(),
        repository: options.repository.clone(),
        head_branch: options.branch.clone(),
    });
    let conclusions: Vec<String> = if options.conclusions.is_empty() {
        DEFAULT_ALLOWED_CONCLUSIONS
            .iter()
            .map(|conclusion| (*conclusion).to_owned())
            .collect()
    } else {
        options.conclusions.clone()
    };

    let files = match collect_sources(&options.inputs) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to enumerate input files: {}", e);
            exit(1);
        }
    };
    info!("Collected {} candidate report files", files.len());

    match junit::parse_files(&files, &workflow_run, &conclusions) {
        Ok((testsuites, testcases)) => {
            info!(
                "Parsed {} test suites and {} test cases",
                testsuites.len(),
                testcases.len()
            );
            let report = Report {
                testsuites,
                testcases,
            };
            if let Err(e) = write_report(&report, &options.output) {
                error!("Failed to write the report: {}", e);
                exit(1);
            }
        }
        Err(e) => {
            error!("Failed to parse junit reports: {}", e);
            exit(1);
        }
    }
}

/// Expands the input paths into report sources: directories contribute
/// their direct entries, zip archives contribute every archive entry,
/// anything else is taken as a single report file.
fn collect_sources(inputs: &[PathBuf]) -> io::Result<Vec<Box<dyn ReportFile>>> {
    let mut files: Vec<Box<dyn ReportFile>> = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut paths = Vec::new();
            for entry in std::fs::read_dir(input)? {
                paths.push(entry?.path());
            }
            paths.sort();
            for path in paths {
                files.push(Box::new(DiskFile::new(path)));
            }
        } else if is_archive(input) {
            for entry in ArchiveEntry::list(input)? {
                files.push(Box::new(entry));
            }
        } else {
            files.push(Box::new(DiskFile::new(input.clone())));
        }
    }
    Ok(files)
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .map(|extension| extension == ARCHIVE_EXTENSION)
        .unwrap_or(false)
}

fn write_report(report: &Report, output: &Option<PathBuf>) -> io::Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)?;
            serde_json::to_writer_pretty(file, report)?;
            Ok(())
        }
        None => {
            let stdout = io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), report)?;
            println!();
            Ok(())
        }
    }
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file).unwrap())
    }
    dispatcher.apply().unwrap();
    info!("Logging level {} enabled", level);
}

#[cfg(test)]
mod tests {
    use crate::write_report;
    use crate::Report;
    use std::env;
    use std::fs;

    #[test]
    fn test_writing_the_report_to_a_file() {
        let report = Report {
            testsuites: Vec::new(),
            testcases: Vec::new(),
        };
        {
            let path = env::temp_dir().join("retriever-write-report-test.json");
            let result = write_report(&report, &Some(path.clone()));
            assert!(result.is_ok());
            let content = fs::read_to_string(&path).unwrap();
            let value: serde_json::Value = serde_json::from_str(&content).unwrap();
            assert!(value["testsuites"].as_array().unwrap().is_empty());
            assert!(value["testcases"].as_array().unwrap().is_empty());
            fs::remove_file(path).unwrap();
        }
        {
            // An unwritable path surfaces as the function's own error.
            let path = env::temp_dir()
                .join("retriever-no-such-dir")
                .join("report.json");
            let result = write_report(&report, &Some(path));
            assert!(result.is_err());
        }
    }
}
