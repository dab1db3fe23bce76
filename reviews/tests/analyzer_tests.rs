use common::config::AnalyzerConfig;
use common::test_helpers::product_review_csv;
use processing::{
    executable_utils::run_analyzer,
    export::{ExportView, RowFilter},
    processor::ReviewProcessor,
    scorers::HeuristicScorer,
};
use std::fs;

fn config_in(dir: &std::path::Path) -> AnalyzerConfig {
    AnalyzerConfig {
        log_level: "info".to_string(),
        output_dir: dir.join("out").to_string_lossy().into_owned(),
        fake_reviews_file_name: "flagged.csv".to_string(),
    }
}

#[test]
fn test_analyzer_writes_fake_reviews_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reviews.csv");
    fs::write(&input, product_review_csv()).unwrap();
    let config = config_in(dir.path());
    let processor = ReviewProcessor::new(HeuristicScorer::new());

    let run = run_analyzer(&config, &processor, &input, ExportView::Display, RowFilter::Fake).unwrap();

    assert_eq!(run.rows_written, 2);
    assert!(run.output_path.ends_with("flagged.csv"));
    let written = fs::read_to_string(&run.output_path).unwrap();
    assert_eq!(written.lines().count(), 3);
    assert_eq!(run.analysis.summary.fake_reviews, 2);
}

#[test]
fn test_analyzer_exports_all_rows_in_full_view() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reviews.csv");
    fs::write(&input, product_review_csv()).unwrap();
    let config = config_in(dir.path());
    let processor = ReviewProcessor::new(HeuristicScorer::new());

    let run = run_analyzer(&config, &processor, &input, ExportView::Full, RowFilter::All).unwrap();

    assert_eq!(run.rows_written, 4);
    assert!(run.output_path.ends_with("reviews.csv"));
    let written = fs::read_to_string(&run.output_path).unwrap();
    assert!(written.lines().next().unwrap().ends_with(",score,mostly_fake"));
}

#[test]
fn test_analyzer_reports_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let processor = ReviewProcessor::new(HeuristicScorer::new());

    let err = run_analyzer(
        &config,
        &processor,
        &dir.path().join("missing.csv"),
        ExportView::Display,
        RowFilter::Fake,
    )
    .unwrap_err();

    assert!(err.to_string().contains("Failed to open"));
}

#[test]
fn test_analyzer_reports_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reviews.csv");
    fs::write(&input, "user_id,text\nU1,hello\n").unwrap();
    let config = config_in(dir.path());
    let processor = ReviewProcessor::new(HeuristicScorer::new());

    let err = run_analyzer(&config, &processor, &input, ExportView::Display, RowFilter::Fake).unwrap_err();

    assert_eq!(
        err.to_string(),
        "The required column 'review_content' was not found in the uploaded file."
    );
}
