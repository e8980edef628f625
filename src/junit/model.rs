use chrono::NaiveDateTime;
use serde_derive::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRun {
    pub id: u64,
    pub name: String,
    pub repository: String,
    pub head_branch: String,
}

/// The totals mirror the suite's self-reported attributes; they are never
/// recomputed from the case list, which shrinks under status filtering.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Testsuite {
    pub workflow_run: Arc<WorkflowRun>,
    pub name: String,
    pub filename: String,
    pub total_tests: u64,
    pub total_failures: u64,
    pub total_errors: u64,
    pub total_skipped: u64,
    #[serde(with = "crate::junit::serialize::seconds")]
    pub duration: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
    pub owners: BTreeSet<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Testcase {
    pub testsuite: Arc<Testsuite>,
    pub name: String,
    pub status: String,
    #[serde(with = "crate::junit::serialize::seconds")]
    pub duration: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owners: Option<Vec<String>>,
}
