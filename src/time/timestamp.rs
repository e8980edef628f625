use crate::time::error::Error;
use chrono::NaiveDateTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Interprets a JUnit `timestamp` attribute as local wall-clock time.
///
/// A trailing UTC `Z` marker is stripped before parsing, not converted;
/// report writers disagree on whether to emit it and the zone carries no
/// information the records keep.
pub fn parse_end_time(value: &str) -> Result<NaiveDateTime, Error> {
    let local = value.strip_suffix('Z').unwrap_or(value);
    NaiveDateTime::parse_from_str(local, TIMESTAMP_FORMAT)
        .map_err(|err| Error::Syntax(format!("Cannot parse timestamp '{}': {}", value, err)))
}
