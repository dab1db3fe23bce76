use std::error::Error;
use std::sync::Arc;

use processing::{
    executable_utils::{Args, initialize_executable, initialize_tracing, run_backend},
    processor::ReviewProcessor,
    scorers::HeuristicScorer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("Starting backend...");
    dotenvy::dotenv().ok();
    let (_, config) = initialize_executable::<Args>()?;
    initialize_tracing(&config.backend.log_level);

    let processor = Arc::new(ReviewProcessor::new(HeuristicScorer::new()));
    run_backend(config.backend, processor).await
}
