use crate::junit::error::DecodeError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_derive::Deserialize;

const COLLECTION_ROOT: &str = "testsuites";
const SUITE_ROOT: &str = "testsuite";

#[derive(Debug, Deserialize)]
pub(crate) struct Testsuites {
    #[serde(rename = "testsuite", default)]
    pub suites: Vec<Testsuite>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Testsuite {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@tests", default)]
    pub tests: u64,
    #[serde(rename = "@failures", default)]
    pub failures: u64,
    #[serde(rename = "@errors", default)]
    pub errors: u64,
    #[serde(rename = "@skipped", default)]
    pub skipped: u64,
    #[serde(rename = "@time")]
    pub time: Option<String>,
    #[serde(rename = "@timestamp")]
    pub timestamp: Option<String>,
    #[serde(rename = "testcase", default)]
    pub testcases: Vec<Testcase>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Testcase {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@status")]
    pub status: Option<String>,
    #[serde(rename = "@time")]
    pub time: Option<String>,
    pub error: Option<Outcome>,
    pub failure: Option<Outcome>,
    pub skipped: Option<Outcome>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Outcome {
    #[serde(rename = "@message")]
    pub message: Option<String>,
    #[serde(rename = "$text")]
    pub text: Option<String>,
}

impl Outcome {
    /// The annotation carrier: the element body, else the message attribute.
    pub fn data(&self) -> &str {
        match self.text {
            Some(ref text) if !text.trim().is_empty() => text,
            _ => self.message.as_deref().unwrap_or(""),
        }
    }
}

/// Both decode attempts failed; kept separately so the caller can report
/// the two underlying reasons side by side.
#[derive(Debug)]
pub(crate) struct ShapeError {
    pub as_collection: DecodeError,
    pub as_single: DecodeError,
}

/// Decodes either document shape, trying `<testsuites>` before one bare
/// `<testsuite>`. Serde-style XML decoding carries no root-name check of
/// its own, so each attempt verifies the root element first.
pub(crate) fn decode_report(content: &str) -> Result<Vec<Testsuite>, ShapeError> {
    let as_collection = match decode_collection(content) {
        Ok(suites) => return Ok(suites),
        Err(err) => err,
    };
    match decode_single(content) {
        Ok(suite) => Ok(vec![suite]),
        Err(as_single) => Err(ShapeError {
            as_collection,
            as_single,
        }),
    }
}

fn decode_collection(content: &str) -> Result<Vec<Testsuite>, DecodeError> {
    expect_root(content, COLLECTION_ROOT)?;
    let document: Testsuites =
        quick_xml::de::from_str(content).map_err(DecodeError::Deserialize)?;
    Ok(document.suites)
}

fn decode_single(content: &str) -> Result<Testsuite, DecodeError> {
    expect_root(content, SUITE_ROOT)?;
    quick_xml::de::from_str(content).map_err(DecodeError::Deserialize)
}

fn expect_root(content: &str, expected: &'static str) -> Result<(), DecodeError> {
    let mut reader = Reader::from_str(content);
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref element)) | Ok(Event::Empty(ref element)) => {
                let name = element.local_name();
                if name.as_ref() == expected.as_bytes() {
                    return Ok(());
                }
                return Err(DecodeError::Root {
                    expected,
                    found: String::from_utf8_lossy(name.as_ref()).into_owned(),
                });
            }
            Ok(Event::Eof) => return Err(DecodeError::MissingRoot),
            Ok(_) => continue,
            Err(err) => return Err(DecodeError::Scan(err)),
        }
    }
}
