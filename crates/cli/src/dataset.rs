//! Labelled URL datasets
//!
//! Input CSVs carry `URL` and `Label` columns. `bad` marks phishing (1),
//! `good` marks legitimate (0); rows with any other label are skipped.

use anyhow::{Context, Result};
use phishguard_features::{extract_features, FEATURE_NAMES};
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::warn;

pub const PHISHING_LABEL: &str = "bad";
pub const LEGITIMATE_LABEL: &str = "good";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledUrl {
    pub url: String,
    /// 1 for phishing, 0 for legitimate
    pub label: u8,
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "URL", alias = "url")]
    url: String,
    #[serde(rename = "Label", alias = "label")]
    label: String,
}

/// Rows read from a dataset plus the number of rows skipped
#[derive(Debug, Default)]
pub struct Dataset {
    pub rows: Vec<LabeledUrl>,
    pub skipped: usize,
}

pub fn parse_label(label: &str) -> Option<u8> {
    let label = label.trim();
    if label.eq_ignore_ascii_case(PHISHING_LABEL) {
        Some(1)
    } else if label.eq_ignore_ascii_case(LEGITIMATE_LABEL) {
        Some(0)
    } else {
        None
    }
}

impl Dataset {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let mut dataset = Dataset::default();

        for (idx, record) in csv_reader.deserialize::<Row>().enumerate() {
            // +2: header line and 1-based numbering
            let line = idx + 2;
            let row = record.with_context(|| format!("Line {line}: malformed row"))?;
            match parse_label(&row.label) {
                Some(label) => dataset.rows.push(LabeledUrl {
                    url: row.url,
                    label,
                }),
                None => {
                    warn!("Line {}: skipping unknown label '{}'", line, row.label);
                    dataset.skipped += 1;
                }
            }
        }

        Ok(dataset)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset {}", path.display()))?;
        Self::from_reader(file)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Write one row of named features plus `label` per URL. Returns rows written.
pub fn write_feature_table<W: Write>(rows: &[LabeledUrl], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = FEATURE_NAMES.to_vec();
    header.push("label");
    csv_writer.write_record(&header)?;

    for row in rows {
        let features = extract_features(&row.url);
        let mut record: Vec<String> = features.as_slice().iter().map(f64::to_string).collect();
        record.push(row.label.to_string());
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush().context("Failed to flush feature table")?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(parse_label("bad"), Some(1));
        assert_eq!(parse_label(" good "), Some(0));
        assert_eq!(parse_label("BAD"), Some(1));
        assert_eq!(parse_label("unknown"), None);
        assert_eq!(parse_label(""), None);
    }

    #[test]
    fn reads_and_skips_unknown_labels() {
        let csv = "URL,Label\nhttp://a.tk/login,bad\nhttps://example.com,good\nhttp://x.com,maybe\n\"http://q.com/?a=1,2\",good\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.skipped, 1);
        assert_eq!(dataset.rows[0].label, 1);
        assert_eq!(dataset.rows[2].url, "http://q.com/?a=1,2");
    }

    #[test]
    fn missing_columns_fail() {
        assert!(Dataset::from_reader("Address,Kind\nx,bad\n".as_bytes()).is_err());
    }

    #[test]
    fn feature_table_layout() {
        let rows = vec![LabeledUrl {
            url: "http://login-bank-verify.tk/account?id=123456789012".to_string(),
            label: 1,
        }];
        let mut out = Vec::new();
        assert_eq!(write_feature_table(&rows, &mut out).unwrap(), 1);

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("url_length,num_hyphens,"));
        assert!(header.ends_with(",url_path_depth,label"));

        let values: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(values.len(), 34);
        assert_eq!(values[0], "51");
        assert_eq!(values[33], "1");
    }
}
