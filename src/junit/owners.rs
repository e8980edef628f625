use lazy_static::*;
use regex::Regex;
use std::fmt;

const METADATA_DELIMITER: &str = ";metadata;";
const WORKFLOW_PATH_SEPARATOR: char = '/';

lazy_static! {
    static ref OWNERS_REGEX: Regex = Regex::new(r"@[A-Za-z0-9/-]+").expect("Regex compilation error");
    static ref TEST_NAMES_REGEX: Regex =
        Regex::new(r"\(([A-Za-z0-9/-]+)\)").expect("Regex compilation error");
}

/// A failure payload that does not carry a usable ownership annotation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum InvalidFailureData {
    MissingDelimiter,
    NoTestNames,
}

impl std::error::Error for InvalidFailureData {}

impl fmt::Display for InvalidFailureData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InvalidFailureData::MissingDelimiter => {
                write!(f, "failure data has no '{}' delimiter", METADATA_DELIMITER)
            }
            InvalidFailureData::NoTestNames => {
                write!(f, "failure data metadata names no tests")
            }
        }
    }
}

/// Extracts the ownership annotation
/// `<free text>;metadata;Owners: @owner1 (test-1), @owner2 (test-2)`.
/// Owners keep order and duplicates; test names come from the first token
/// match only, so there may be fewer tokens than owners.
pub fn parse_failure_data(data: &str) -> Result<(Vec<String>, Vec<String>), InvalidFailureData> {
    let metadata = match data.split_once(METADATA_DELIMITER) {
        Some((_, metadata)) => metadata,
        None => return Err(InvalidFailureData::MissingDelimiter),
    };
    let owners = OWNERS_REGEX
        .find_iter(metadata)
        .map(|owner| owner.as_str().to_owned())
        .collect();
    let tests = match TEST_NAMES_REGEX.captures(metadata) {
        Some(captures) => captures
            .iter()
            .skip(1)
            .flatten()
            .map(|test| test.as_str().to_owned())
            .collect(),
        None => return Err(InvalidFailureData::NoTestNames),
    };
    Ok((owners, tests))
}

pub fn filter_test_owners(owners: &[String], tests: &[String]) -> Vec<String> {
    owners
        .iter()
        .zip(tests.iter())
        .filter(|(_, test)| !test.contains(WORKFLOW_PATH_SEPARATOR))
        .map(|(owner, _)| owner.clone())
        .collect()
}

pub fn filter_workflow_owners(owners: &[String], tests: &[String]) -> Vec<String> {
    owners
        .iter()
        .enumerate()
        .filter(|(position, _)| match tests.get(*position) {
            Some(test) => test.contains(WORKFLOW_PATH_SEPARATOR),
            // An owner past the end of the token list is a workflow owner.
            None => true,
        })
        .map(|(_, owner)| owner.clone())
        .collect()
}
