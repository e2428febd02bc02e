//! Dataset merging: phishing CSV plus top-ranked legitimate hosts
//!
//! The ranking file is headerless `rank,domain`. Each of the first `top`
//! hosts becomes an `https://` URL labelled `good`.

use crate::dataset::LEGITIMATE_LABEL;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{Read, Write};
use tracing::info;

#[derive(Debug, Deserialize)]
struct LabeledRow {
    #[serde(rename = "URL", alias = "url")]
    url: String,
    #[serde(rename = "Label", alias = "label")]
    label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub labeled_rows: usize,
    pub legitimate_rows: usize,
}

/// Hosts from the second column of the first `top` rows
pub fn read_ranked_hosts<R: Read>(reader: R, top: usize) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut hosts = Vec::with_capacity(top);
    for (idx, record) in csv_reader.records().take(top).enumerate() {
        let record = record.with_context(|| format!("Ranking line {}: malformed row", idx + 1))?;
        let host = record
            .get(1)
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .with_context(|| format!("Ranking line {}: missing domain column", idx + 1))?;
        hosts.push(host.to_string());
    }
    Ok(hosts)
}

pub fn merge_datasets<A: Read, B: Read, W: Write>(
    labeled: A,
    ranking: B,
    top: usize,
    output: W,
) -> Result<MergeSummary> {
    let hosts = read_ranked_hosts(ranking, top)?;

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(labeled);
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(["URL", "Label"])?;

    let mut summary = MergeSummary::default();
    for (idx, row) in reader.deserialize::<LabeledRow>().enumerate() {
        let row = row.with_context(|| format!("Line {}: malformed row", idx + 2))?;
        writer.write_record([row.url.as_str(), row.label.as_str()])?;
        summary.labeled_rows += 1;
    }

    for host in &hosts {
        writer.write_record([format!("https://{host}").as_str(), LEGITIMATE_LABEL])?;
        summary.legitimate_rows += 1;
    }

    writer.flush().context("Failed to flush merged dataset")?;
    info!(
        "Merged {} labelled rows with {} legitimate hosts",
        summary.labeled_rows, summary.legitimate_rows
    );
    Ok(summary)
}
