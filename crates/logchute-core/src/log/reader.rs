use super::parser::LineParser;
use crate::Result;
use crate::analysis::AggregationPipeline;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line accounting for one pass over a log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub total_lines: u64,
    pub matched: u64,
    pub skipped: u64,
}

pub struct LogReader;

impl LogReader {
    /// Stream a log file through the parser and into the pipeline
    pub fn from_file(
        path: &Path,
        parser: &LineParser,
        pipeline: &mut AggregationPipeline,
    ) -> Result<ScanSummary> {
        tracing::debug!("Reading log file from: {}", path.display());

        let file = File::open(path)?;
        let summary = Self::from_reader(BufReader::new(file), parser, pipeline)?;

        tracing::info!(
            "Scanned {}: {} matching lines, {} skipped",
            path.display(),
            summary.matched,
            summary.skipped
        );

        Ok(summary)
    }

    /// Stream any buffered source through the parser and into the pipeline.
    ///
    /// Lines that do not fit the grammar are counted and dropped. Invalid
    /// UTF-8 is decoded lossily, which leaves such lines to the grammar.
    pub fn from_reader<R: BufRead>(
        mut reader: R,
        parser: &LineParser,
        pipeline: &mut AggregationPipeline,
    ) -> Result<ScanSummary> {
        let mut summary = ScanSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }

            summary.total_lines += 1;
            let line = String::from_utf8_lossy(&buf);

            match parser.parse(&line) {
                Some(record) => {
                    summary.matched += 1;
                    pipeline.feed(&record);
                }
                None => {
                    summary.skipped += 1;
                    tracing::debug!(
                        "Skipping line {}: does not match grammar",
                        summary.total_lines
                    );
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::analysis::Statistic;
    use crate::log::GrammarMode;
    use std::io::{Cursor, Write};

    const LINES: &str = concat!(
        r#"127.0.0.1 - - [10/Oct/2020:13:55:36 -0700] "GET /index.html HTTP/1.1" 200 2326 "-" "Mozilla/5.0" 1500"#,
        "\n",
        "this is not a log line\n",
        "\n",
        r#"10.0.0.2 - - [10/Oct/2020:13:56:36 -0700] "GET /about HTTP/1.1" 404 10 "-" "curl" 500"#,
        "\n",
    );

    #[test]
    fn test_counts_matched_and_skipped_lines() {
        let mut pipeline = AggregationPipeline::standard();
        let summary =
            LogReader::from_reader(Cursor::new(LINES), &LineParser::default(), &mut pipeline)
                .unwrap();

        assert_eq!(
            summary,
            ScanSummary {
                total_lines: 4,
                matched: 2,
                skipped: 2,
            }
        );

        let outcomes = pipeline.finalize();
        assert_eq!(outcomes[0].result.as_ref().unwrap(), &Statistic::Count(2));
    }

    #[test]
    fn test_last_line_without_newline() {
        let input = LINES.trim_end_matches('\n');
        let mut pipeline = AggregationPipeline::standard();
        let summary =
            LogReader::from_reader(Cursor::new(input), &LineParser::default(), &mut pipeline)
                .unwrap();

        assert_eq!(summary.total_lines, 4);
        assert_eq!(summary.matched, 2);
    }

    #[test]
    fn test_crlf_lines_depend_on_mode() {
        let input = LINES.replace('\n', "\r\n");

        let mut lenient = AggregationPipeline::standard();
        let summary =
            LogReader::from_reader(Cursor::new(&input), &LineParser::default(), &mut lenient)
                .unwrap();
        assert_eq!(summary.matched, 2);

        let mut strict = AggregationPipeline::standard();
        let summary = LogReader::from_reader(
            Cursor::new(&input),
            &LineParser::new(GrammarMode::Strict),
            &mut strict,
        )
        .unwrap();
        assert_eq!(summary.matched, 2);
    }

    #[test]
    fn test_invalid_utf8_is_skipped() {
        let mut input = b"\xff\xfe not utf8\n".to_vec();
        input.extend_from_slice(LINES.as_bytes());

        let mut pipeline = AggregationPipeline::standard();
        let summary =
            LogReader::from_reader(Cursor::new(input), &LineParser::default(), &mut pipeline)
                .unwrap();

        assert_eq!(summary.total_lines, 5);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.skipped, 3);
    }

    #[test]
    fn test_non_ascii_status_is_skipped_not_failed() {
        let input = concat!(
            r#"10.0.0.1 - - [10/Oct/2020:13:55:36 -0700] "GET / HTTP/1.1" "#,
            "\u{662}\u{660}\u{660}",
            r#" 5 "-" "ua" 15"#,
            "\n",
            r#"10.0.0.2 - - [10/Oct/2020:13:55:37 -0700] "GET / HTTP/1.1" 500 5 "-" "ua" 15"#,
            "\n",
        );

        let mut pipeline = AggregationPipeline::standard();
        let summary =
            LogReader::from_reader(Cursor::new(input), &LineParser::default(), &mut pipeline)
                .unwrap();
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.skipped, 1);

        let outcomes = pipeline.finalize();
        assert!(outcomes.iter().all(|o| !o.is_failure()));
        let errors = outcomes
            .iter()
            .find(|o| o.key == "number_of_errors")
            .unwrap();
        assert_eq!(errors.result.as_ref().unwrap(), &Statistic::Count(1));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LINES.as_bytes()).unwrap();

        let mut pipeline = AggregationPipeline::standard();
        let summary =
            LogReader::from_file(file.path(), &LineParser::default(), &mut pipeline).unwrap();
        assert_eq!(summary.matched, 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut pipeline = AggregationPipeline::standard();
        let result = LogReader::from_file(
            &dir.path().join("missing.log"),
            &LineParser::default(),
            &mut pipeline,
        );

        assert!(matches!(result, Err(Error::Io(_))));
    }
}
