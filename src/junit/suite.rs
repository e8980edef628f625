use crate::junit::model::{Testcase, Testsuite, WorkflowRun};
use crate::junit::owners;
use crate::junit::schema;
use crate::time::duration::parse_seconds;
use crate::time::error::Error;
use crate::time::timestamp::parse_end_time;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

const STATUS_ERROR: &str = "error";
const STATUS_FAILURE: &str = "failure";
const STATUS_SKIPPED: &str = "skipped";
const STATUS_PASSED: &str = "passed";

struct ParsedCase {
    name: String,
    status: String,
    duration: Duration,
    owners: Option<Vec<String>>,
}

/// Cases outside `allowed_conclusions` are dropped before anything else of
/// theirs is parsed. A malformed duration or timestamp aborts the suite; an
/// unusable ownership annotation only drops that case's owners.
pub(crate) fn parse_testsuite(
    suite: &schema::Testsuite,
    filename: &str,
    workflow_run: &Arc<WorkflowRun>,
    allowed_conclusions: &[String],
) -> Result<(Arc<Testsuite>, Vec<Testcase>), Error> {
    let mut duration = Duration::default();
    if let Some(ref time) = suite.time {
        if !time.is_empty() {
            duration = parse_seconds(time)?;
        }
    }
    let mut end_time = None;
    if let Some(ref timestamp) = suite.timestamp {
        if !timestamp.is_empty() {
            end_time = Some(parse_end_time(timestamp)?);
        }
    }

    let mut suite_owners = BTreeSet::new();
    let mut parsed_cases = Vec::new();
    for testcase in &suite.testcases {
        let status = resolve_status(testcase);
        if !allowed_conclusions
            .iter()
            .any(|conclusion| conclusion == &status)
        {
            debug!(
                "Skipping test case '{}' with status '{}', not in the allowed conclusions",
                testcase.name, status
            );
            continue;
        }
        let mut case_duration = Duration::default();
        if let Some(ref time) = testcase.time {
            if !time.is_empty() {
                case_duration = parse_seconds(time)?;
            }
        }
        let case_owners = match testcase.failure {
            Some(ref failure) => match owners::parse_failure_data(failure.data()) {
                Ok((extracted, _tests)) => {
                    suite_owners.extend(extracted.iter().cloned());
                    Some(extracted)
                }
                Err(err) => {
                    warn!(
                        "Unable to parse owners from failure data of test case '{}': {}",
                        testcase.name, err
                    );
                    None
                }
            },
            None => None,
        };
        parsed_cases.push(ParsedCase {
            name: testcase.name.clone(),
            status,
            duration: case_duration,
            owners: case_owners,
        });
    }

    let testsuite = Arc::new(Testsuite {
        workflow_run: Arc::clone(workflow_run),
        name: suite.name.clone(),
        filename: filename.to_owned(),
        total_tests: suite.tests,
        total_failures: suite.failures,
        total_errors: suite.errors,
        total_skipped: suite.skipped,
        duration,
        end_time,
        owners: suite_owners,
    });
    let testcases = parsed_cases
        .into_iter()
        .map(|case| Testcase {
            testsuite: Arc::clone(&testsuite),
            name: case.name,
            status: case.status,
            duration: case.duration,
            owners: case.owners,
        })
        .collect();
    Ok((testsuite, testcases))
}

/// An explicit, non-empty status attribute wins; otherwise the status is
/// inferred from the child elements, error first, defaulting to passed.
fn resolve_status(testcase: &schema::Testcase) -> String {
    if let Some(ref status) = testcase.status {
        if !status.is_empty() {
            return status.clone();
        }
    }
    if testcase.error.is_some() {
        STATUS_ERROR.to_owned()
    } else if testcase.failure.is_some() {
        STATUS_FAILURE.to_owned()
    } else if testcase.skipped.is_some() {
        STATUS_SKIPPED.to_owned()
    } else {
        STATUS_PASSED.to_owned()
    }
}
