use phishguard_classifier::{Model, ModelArtifact, Node, PhishingModel, StandardScaler, Tree};
use phishguard_cli::{evaluate, merge_datasets, write_feature_table, Dataset};
use phishguard_features::{Feature, FEATURE_COUNT};
use std::fs::{self, File};
use tempfile::TempDir;

/// Flags suspicious TLDs and nothing else
fn tld_model() -> PhishingModel {
    let tree = Tree::new(vec![
        Node::internal(Feature::IsSuspiciousTld.index() as i32, 0.5, 1, 2),
        Node::leaf(-1.0),
        Node::leaf(2.0),
    ]);
    let ensemble = Model::new(FEATURE_COUNT, 1.0, -0.25, vec![tree]);
    let scaler = StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]);
    PhishingModel::new(ModelArtifact::new(ensemble, None), scaler).unwrap()
}

fn merged_dataset(dir: &TempDir) -> std::path::PathBuf {
    let phishing = dir.path().join("phishing.csv");
    let ranking = dir.path().join("top-1m.csv");
    let merged = dir.path().join("merged.csv");

    fs::write(
        &phishing,
        "URL,Label\n\
         http://login-bank-verify.tk/account,bad\n\
         http://secure-update.ml/signin,bad\n\
         http://paypal-verify.com/login,bad\n\
         http://unlabelled.example.com/,maybe\n",
    )
    .unwrap();
    fs::write(&ranking, "1,google.com\n2,wikipedia.org\n3,example.net\n").unwrap();

    let summary = merge_datasets(
        File::open(&phishing).unwrap(),
        File::open(&ranking).unwrap(),
        2,
        File::create(&merged).unwrap(),
    )
    .unwrap();
    assert_eq!(summary.labeled_rows, 4);
    assert_eq!(summary.legitimate_rows, 2);
    merged
}

#[test]
fn merged_dataset_loads_with_labels() {
    let dir = TempDir::new().unwrap();
    let dataset = Dataset::from_path(merged_dataset(&dir)).unwrap();

    assert_eq!(dataset.len(), 5);
    assert_eq!(dataset.skipped, 1);
    assert_eq!(dataset.rows[3].url, "https://google.com");
    assert_eq!(dataset.rows[3].label, 0);
    assert_eq!(dataset.rows[0].label, 1);
}

#[test]
fn feature_table_has_header_and_one_row_per_url() {
    let dir = TempDir::new().unwrap();
    let dataset = Dataset::from_path(merged_dataset(&dir)).unwrap();

    let mut out = Vec::new();
    let written = write_feature_table(&dataset.rows, &mut out).unwrap();
    assert_eq!(written, 5);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("url_length,"));
    assert!(lines[0].ends_with(",label"));
    assert_eq!(lines[1].split(',').count(), FEATURE_COUNT + 1);
    assert!(lines[1].ends_with(",1"));
    assert!(lines[5].ends_with(",0"));
}

#[test]
fn evaluation_counts_each_decision() {
    let dir = TempDir::new().unwrap();
    let dataset = Dataset::from_path(merged_dataset(&dir)).unwrap();

    let matrix = evaluate(&dataset.rows, &tld_model()).unwrap();
    // paypal-verify.com is phishing on a common TLD.
    assert_eq!(matrix.true_positive, 2);
    assert_eq!(matrix.false_negative, 1);
    assert_eq!(matrix.true_negative, 2);
    assert_eq!(matrix.false_positive, 0);

    let report = matrix.report();
    assert_eq!(report.samples, 5);
    assert_eq!(report.accuracy_percent, 80.0);
    assert_eq!(report.precision, 1.0);
}
