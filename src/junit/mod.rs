pub(crate) mod error;
pub(crate) mod model;
pub(crate) mod owners;
pub(crate) mod schema;
pub(crate) mod serialize;
pub(crate) mod suite;

use crate::junit::error::Error;
use crate::junit::model::{Testcase, Testsuite, WorkflowRun};
use crate::source::ReportFile;
use std::io::Read;
use std::str;
use std::sync::Arc;

const JUNIT_FILE_EXTENSION: &str = ".xml";

/// Parses every JUnit report in the batch, in input order. Non-`.xml` and
/// empty sources are skipped; the first fatal failure aborts the batch.
pub fn parse_files<F: ReportFile>(
    files: &[F],
    workflow_run: &Arc<WorkflowRun>,
    allowed_conclusions: &[String],
) -> Result<(Vec<Arc<Testsuite>>, Vec<Testcase>), Error> {
    let mut testsuites = Vec::new();
    let mut testcases = Vec::new();
    for file in files {
        if let Some((suites, cases)) = parse_file(file, workflow_run, allowed_conclusions)? {
            testsuites.extend(suites);
            testcases.extend(cases);
        }
    }
    Ok((testsuites, testcases))
}

/// Parses one JUnit report, or returns `None` when the file is skipped.
pub fn parse_file<F: ReportFile>(
    file: &F,
    workflow_run: &Arc<WorkflowRun>,
    allowed_conclusions: &[String],
) -> Result<Option<(Vec<Arc<Testsuite>>, Vec<Testcase>)>, Error> {
    if !file.name().ends_with(JUNIT_FILE_EXTENSION) || file.is_dir() {
        debug!("Ignoring '{}', not a junit report file", file.name());
        return Ok(None);
    }
    info!("Parsing junit file '{}'", file.name());
    let content = read_content(file)?;
    if content.is_empty() {
        debug!("Skipping junit file '{}' with no content", file.name());
        return Ok(None);
    }
    let content = str::from_utf8(&content).map_err(|source| Error::Encoding {
        file: file.name().to_owned(),
        source,
    })?;
    let raw_suites = schema::decode_report(content).map_err(|shape| Error::Shape {
        file: file.name().to_owned(),
        as_collection: shape.as_collection,
        as_single: shape.as_single,
    })?;

    let mut testsuites = Vec::with_capacity(raw_suites.len());
    let mut testcases = Vec::new();
    for raw in &raw_suites {
        let (testsuite, cases) =
            suite::parse_testsuite(raw, file.name(), workflow_run, allowed_conclusions).map_err(
                |source| Error::Suite {
                    file: file.name().to_owned(),
                    source,
                },
            )?;
        testsuites.push(testsuite);
        testcases.extend(cases);
    }
    Ok(Some((testsuites, testcases)))
}

fn read_content<F: ReportFile>(file: &F) -> Result<Vec<u8>, Error> {
    let mut reader = file.open().map_err(|source| Error::Read {
        file: file.name().to_owned(),
        source,
    })?;
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .map_err(|source| Error::Read {
            file: file.name().to_owned(),
            source,
        })?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use crate::junit::error::Error;
    use crate::junit::model::WorkflowRun;
    use crate::junit::parse_file;
    use crate::junit::parse_files;
    use crate::source::ReportFile;
    use std::io;
    use std::io::Read;
    use std::sync::Arc;

    struct StubFile {
        name: String,
        directory: bool,
        content: Vec<u8>,
    }

    impl StubFile {
        fn new(name: &str, content: &str) -> Self {
            StubFile {
                name: name.to_owned(),
                directory: false,
                content: content.as_bytes().to_vec(),
            }
        }
    }

    impl ReportFile for StubFile {
        fn open(&self) -> io::Result<Box<dyn Read + '_>> {
            Ok(Box::new(self.content.as_slice()))
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn is_dir(&self) -> bool {
            self.directory
        }
    }

    fn all_conclusions() -> Vec<String> {
        vec![
            "passed".to_owned(),
            "failure".to_owned(),
            "error".to_owned(),
            "skipped".to_owned(),
        ]
    }

    const SUITE_BODY: &str = r#"<testsuite name="connectivity" tests="3" failures="1" errors="0" skipped="0" time="2.617" timestamp="2023-07-18T09:21:03Z">
    <testcase name="case-a" time="0.153"/>
    <testcase name="case-b" time="0.201">
        <failure type="failure">case-b exploded;metadata;Owners: @team-a (case-b), @team-b (case-b)</failure>
    </testcase>
    <testcase name="case-c" time="0.009"><skipped/></testcase>
</testsuite>"#;

    #[test]
    fn test_both_document_shapes_parse_identically() {
        let run = Arc::new(WorkflowRun::default());
        let bare = StubFile::new("report.xml", SUITE_BODY);
        let wrapped = StubFile::new(
            "report.xml",
            &format!("<testsuites>{}</testsuites>", SUITE_BODY),
        );

        let from_bare = parse_file(&bare, &run, &all_conclusions());
        let from_wrapped = parse_file(&wrapped, &run, &all_conclusions());
        assert!(from_bare.is_ok());
        assert!(from_wrapped.is_ok());
        assert_eq!(from_bare.unwrap(), from_wrapped.unwrap());
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let run = Arc::new(WorkflowRun::default());
        let file = StubFile::new("report.xml", SUITE_BODY);

        let first = parse_file(&file, &run, &all_conclusions()).unwrap();
        let second = parse_file(&file, &run, &all_conclusions()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parsing_one_report_end_to_end() {
        let run = Arc::new(WorkflowRun::default());
        let file = StubFile::new("report.xml", SUITE_BODY);

        let result = parse_file(&file, &run, &all_conclusions());
        assert!(result.is_ok());
        let (suites, cases) = result.unwrap().unwrap();

        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].filename, "report.xml");
        assert_eq!(suites[0].total_tests, 3);
        assert_eq!(suites[0].total_failures, 1);
        let owners: Vec<&str> = suites[0].owners.iter().map(String::as_str).collect();
        assert_eq!(owners, vec!["@team-a", "@team-b"]);

        assert_eq!(cases.len(), 3);
        assert_eq!(cases[0].status, "passed");
        assert_eq!(cases[1].status, "failure");
        assert_eq!(cases[2].status, "skipped");
        assert_eq!(
            cases[1].owners,
            Some(vec!["@team-a".to_owned(), "@team-b".to_owned()])
        );
    }

    #[test]
    fn test_filtered_statuses_do_not_change_totals() {
        let run = Arc::new(WorkflowRun::default());
        let file = StubFile::new("report.xml", SUITE_BODY);

        let result = parse_file(&file, &run, &["failure".to_owned()]);
        assert!(result.is_ok());
        let (suites, cases) = result.unwrap().unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].name, "case-b");
        assert_eq!(suites[0].total_tests, 3);
        assert_eq!(suites[0].total_failures, 1);
        assert_eq!(suites[0].total_skipped, 0);
    }

    #[test]
    fn test_skipping_files_that_are_not_reports() {
        let run = Arc::new(WorkflowRun::default());
        {
            let file = StubFile::new("notes.txt", "not a report");
            let result = parse_file(&file, &run, &all_conclusions());
            assert!(result.is_ok());
            assert!(result.unwrap().is_none());
        }
        {
            let mut file = StubFile::new("nested.xml", "");
            file.directory = true;
            let result = parse_file(&file, &run, &all_conclusions());
            assert!(result.is_ok());
            assert!(result.unwrap().is_none());
        }
        {
            let file = StubFile::new("empty.xml", "");
            let result = parse_file(&file, &run, &all_conclusions());
            assert!(result.is_ok());
            assert!(result.unwrap().is_none());
        }
    }

    #[test]
    fn test_undecodable_bytes_are_a_fatal_error() {
        let run = Arc::new(WorkflowRun::default());
        let file = StubFile {
            name: "binary.xml".to_owned(),
            directory: false,
            content: b"<testsuite>\xff\xfe".to_vec(),
        };

        let result = parse_file(&file, &run, &all_conclusions());
        match result {
            Err(Error::Encoding { ref file, .. }) => assert_eq!(file, "binary.xml"),
            other => panic!("expected an encoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_concatenates_in_input_order() {
        let run = Arc::new(WorkflowRun::default());
        let files = vec![
            StubFile::new(
                "a.xml",
                "<testsuite name=\"first\" tests=\"1\"><testcase name=\"one\"/></testsuite>",
            ),
            StubFile::new("skipped.txt", "irrelevant"),
            StubFile::new(
                "b.xml",
                "<testsuite name=\"second\" tests=\"1\"><testcase name=\"two\"/></testsuite>",
            ),
        ];

        let result = parse_files(&files, &run, &all_conclusions());
        assert!(result.is_ok());
        let (suites, cases) = result.unwrap();
        assert_eq!(suites.len(), 2);
        assert_eq!(suites[0].filename, "a.xml");
        assert_eq!(suites[1].filename, "b.xml");
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].name, "one");
        assert_eq!(cases[1].name, "two");
    }

    #[test]
    fn test_batch_fails_on_the_first_unparsable_file() {
        let run = Arc::new(WorkflowRun::default());
        let files = vec![
            StubFile::new("a.xml", SUITE_BODY),
            StubFile::new("broken.xml", "<report>whatever</report>"),
            StubFile::new("b.xml", SUITE_BODY),
        ];

        let result = parse_files(&files, &run, &all_conclusions());
        match result {
            Err(Error::Shape { ref file, .. }) => assert_eq!(file, "broken.xml"),
            other => panic!("expected a shape error, got {:?}", other),
        }
    }
}
