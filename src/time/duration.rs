use crate::time::error::Error;
use lazy_static::*;
use regex::Regex;
use std::time::Duration;

lazy_static! {
    static ref SECONDS_REGEX: Regex = Regex::new(
        r"^[+-]?(\d+(\.\d*)?|\.\d+)$"
    )
    .expect("Regex compilation error");
}

/// Interprets a JUnit `time` attribute as a plain decimal number of seconds.
///
/// Exponent notation, infinities and NaN are rejected; negative values are
/// rejected as well because a duration cannot run backwards.
pub fn parse_seconds(value: &str) -> Result<Duration, Error> {
    if !SECONDS_REGEX.is_match(value) {
        return Err(Error::Syntax(format!(
            "Value '{}' is not a decimal number of seconds",
            value
        )));
    }
    let seconds = value
        .parse::<f64>()
        .map_err(|err| Error::Syntax(format!("Cannot parse '{}' as seconds: {}", value, err)))?;
    Duration::try_from_secs_f64(seconds).map_err(|err| {
        Error::OutOfRange(format!(
            "Duration of '{}' seconds is not representable: {}",
            value, err
        ))
    })
}
