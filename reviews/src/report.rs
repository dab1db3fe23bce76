use anyhow::Context;
use std::{fmt::Write as _, fs, path::Path};

use processing::{
    export::{self, ExportView, RowFilter},
    processor::Analysis,
    summary::DistributionBucket,
};

pub const BAR_WIDTH: usize = 40;

/// Renders one horizontal bar per bucket, scaled to the largest count.
pub fn render_bar_chart(title: &str, buckets: &[DistributionBucket]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);

    if buckets.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }

    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    let label_width = buckets.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);

    for bucket in buckets {
        let len = (bucket.count * BAR_WIDTH).div_ceil(max);
        let _ = writeln!(
            out,
            "  {:>width$} | {} {}",
            bucket.label,
            "#".repeat(len),
            bucket.count,
            width = label_width
        );
    }
    out
}

/// Fake reviews as an aligned table, truncated to `limit` rows.
pub fn render_fake_reviews(analysis: &Analysis, limit: usize) -> String {
    let rows = export::to_json_rows(&analysis.dataset, ExportView::Display, RowFilter::Fake);
    let mut out = String::new();
    let _ = writeln!(out, "Fake Reviews ({})", rows.len());

    for row in rows.iter().take(limit) {
        let field = |name: &str| match row.get(name) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let _ = writeln!(
            out,
            "  [score {}] user {} ({} reviews): {}",
            field("score"),
            field("user_id"),
            field("user_review_count"),
            truncate(&field("review_content"), 60)
        );
    }
    if rows.len() > limit {
        let _ = writeln!(out, "  ... {} more", rows.len() - limit);
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let cut: String = single_line.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

/// Full text report: cleaning outcome, summary metrics and both charts.
pub fn render_report(analysis: &Analysis, fake_preview: usize) -> String {
    let summary = &analysis.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Fake Review Detection Report");
    let _ = writeln!(out, "Analyzed at {}", analysis.analyzed_at.to_rfc3339());
    let _ = writeln!(out, "{}", analysis.cleaning.message());
    let _ = writeln!(out);
    let _ = writeln!(out, "Summary Statistics");
    let _ = writeln!(out, "  Total Reviews:   {}", summary.total_reviews);
    let _ = writeln!(out, "  Fake Reviews:    {}", summary.fake_reviews);
    let _ = writeln!(out, "  Fake %:          {}", summary.fake_percentage_display());
    let _ = writeln!(out, "  Avg. Fake Score: {}", summary.average_score_display());
    let _ = writeln!(out);
    out.push_str(&render_bar_chart("Rating Distribution", &summary.rating_distribution));
    let _ = writeln!(out);
    out.push_str(&render_bar_chart("Fake Score Distribution", &summary.score_distribution));
    let _ = writeln!(out);
    out.push_str(&render_fake_reviews(analysis, fake_preview));
    out
}

pub fn write_report(path: &Path, analysis: &Analysis, fake_preview: usize) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }
    fs::write(path, render_report(analysis, fake_preview))
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    tracing::info!("Wrote report to {}", path.display());
    Ok(())
}
