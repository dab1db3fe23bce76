use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use processing::{
    executable_utils::{
        DEFAULT_CONFIG_PATH, ExecutableArgs, initialize_executable, initialize_tracing,
        run_analyzer,
    },
    export::{ExportView, RowFilter},
    processor::ReviewProcessor,
    scorers::HeuristicScorer,
};
use reviews::report::{render_report, write_report};

#[derive(Parser, Debug)]
#[command(author, version, about = "Flag likely fake reviews in a CSV file", long_about = None)]
struct AnalyzerArgs {
    /// Path to config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// CSV file with at least `review_content` and `user_id` columns
    #[arg(short, long)]
    input: PathBuf,

    /// Overrides `analyzer.output_dir` from the config
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Export every review instead of only the flagged ones
    #[arg(long)]
    all: bool,

    /// Column set of the exported file: display or full
    #[arg(long, default_value_t = ExportView::Display)]
    view: ExportView,

    /// Also write the text report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Number of fake reviews listed in the report
    #[arg(long, default_value_t = 10)]
    preview: usize,
}

impl ExecutableArgs for AnalyzerArgs {
    fn config_path(&self) -> &str {
        &self.config
    }
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("Starting analyzer...");
    dotenvy::dotenv().ok();
    let (args, mut config) = initialize_executable::<AnalyzerArgs>()?;
    initialize_tracing(&config.analyzer.log_level);

    if let Some(output_dir) = &args.output_dir {
        config.analyzer.output_dir = output_dir.clone();
    }
    let filter = if args.all { RowFilter::All } else { RowFilter::Fake };

    let processor = ReviewProcessor::new(HeuristicScorer::new());
    let run = run_analyzer(&config.analyzer, &processor, &args.input, args.view, filter)?;

    println!("{}", render_report(&run.analysis, args.preview));
    println!("Wrote {} rows to {}", run.rows_written, run.output_path.display());

    if let Some(path) = &args.report {
        write_report(path, &run.analysis, args.preview)?;
    }

    Ok(())
}
