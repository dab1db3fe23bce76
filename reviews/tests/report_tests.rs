use common::test_helpers::product_review_csv;
use processing::{
    processor::{Analysis, ReviewProcessor},
    scorers::HeuristicScorer,
    summary::DistributionBucket,
};
use reviews::report::{BAR_WIDTH, render_bar_chart, render_fake_reviews, render_report, write_report};

fn analyze(csv: &str) -> Analysis {
    ReviewProcessor::new(HeuristicScorer::new())
        .analyze(csv.as_bytes())
        .unwrap()
}

fn bucket(label: &str, count: usize) -> DistributionBucket {
    DistributionBucket {
        label: label.to_string(),
        count,
    }
}

#[test]
fn test_bar_chart_scales_to_largest_bucket() {
    let chart = render_bar_chart("Scores", &[bucket("0", 4), bucket("10", 2)]);
    let lines: Vec<&str> = chart.lines().collect();

    assert_eq!(lines[0], "Scores");
    assert_eq!(lines[1], format!("   0 | {} 4", "#".repeat(BAR_WIDTH)));
    assert_eq!(lines[2], format!("  10 | {} 2", "#".repeat(BAR_WIDTH / 2)));
}

#[test]
fn test_bar_chart_without_data() {
    assert_eq!(render_bar_chart("Ratings", &[]), "Ratings\n  (no data)\n");
}

#[test]
fn test_report_contains_summary_statistics() {
    let report = render_report(&analyze(&product_review_csv()), 10);

    assert!(report.contains("2 rows were removed during cleaning."));
    assert!(report.contains("Total Reviews:   4"));
    assert!(report.contains("Fake Reviews:    2"));
    assert!(report.contains("Fake %:          50.00%"));
    assert!(report.contains("Avg. Fake Score: 1.00"));
    assert!(report.contains("Rating Distribution"));
    assert!(report.contains("Fake Score Distribution"));
}

#[test]
fn test_fake_review_preview_is_truncated() {
    let rows: Vec<(String, String)> = (0..5)
        .map(|i| (format!("U{}", i), format!("best amazing fantastic thing {}", i)))
        .collect();
    let refs: Vec<(&str, &str)> = rows.iter().map(|(u, c)| (u.as_str(), c.as_str())).collect();
    let analysis = analyze(&common::test_helpers::review_csv(&refs));

    let preview = render_fake_reviews(&analysis, 2);

    assert!(preview.starts_with("Fake Reviews (5)"));
    assert_eq!(preview.matches("[score 2]").count(), 2);
    assert!(preview.contains("... 3 more"));
}

#[test]
fn test_long_review_text_is_shortened_to_one_line() {
    let content = format!("best amazing fantastic\n{}", "x".repeat(100));
    let analysis = analyze(&common::test_helpers::review_csv(&[("U1", content.as_str())]));

    let preview = render_fake_reviews(&analysis, 5);
    let line = preview.lines().nth(1).unwrap();

    assert!(line.ends_with("..."));
    assert_eq!(preview.lines().count(), 2);
}

#[test]
fn test_write_report_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("report.txt");

    write_report(&path, &analyze(&product_review_csv()), 3).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("Fake Review Detection Report"));
}
