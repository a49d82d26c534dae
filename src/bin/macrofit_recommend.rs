// ABOUTME: Command-line recommender printing goal-aligned foods as JSON on stdout
// ABOUTME: Reads the user's plan and the food catalog from the backend SQLite database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food recommendation CLI.
//!
//! Usage:
//! ```bash
//! # Latest user's plan, database from DATABASE_URL or ./backend/database.db
//! cargo run --bin macrofit-recommend
//!
//! # Specific user and goal
//! cargo run --bin macrofit-recommend -- --user-id 3 --goal recomposition
//!
//! # Full response with cluster summary and user context
//! cargo run --bin macrofit-recommend -- --with-context -v
//! ```
//!
//! On failure a JSON error object is written to stderr and the process exits
//! with a non-zero status; stdout stays empty.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use macrofit::config::DatabaseConfig;
use macrofit::errors::AppError;
use macrofit::logging::LoggingConfig;
use macrofit::recommendations::RecommendationService;
use tracing::{debug, error};

#[derive(Parser)]
#[command(
    name = "macrofit-recommend",
    about = "Goal-aligned food recommendations",
    long_about = "Cluster the food catalog by calories and protein and print the top foods for the user's goal"
)]
struct RecommendArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// User whose settings are used (defaults to the latest settings row)
    #[arg(long)]
    user_id: Option<i64>,

    /// Goal to use instead of the stored plan
    #[arg(long)]
    goal: Option<String>,

    /// Number of k-means clusters
    #[arg(long)]
    clusters: Option<usize>,

    /// K-means initialization seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the full response instead of the bare list
    #[arg(long)]
    with_context: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = RecommendArgs::parse();

    let logging = LoggingConfig::from_env();
    let logging = if args.verbose {
        logging.verbose()
    } else {
        logging
    };
    logging.init()?;

    match run(&args).await {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{output}")?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(code = err.code().as_str(), "Recommendation failed: {err}");
            writeln!(io::stderr().lock(), "{}", err.to_json())?;
            Ok(ExitCode::from(err.code().exit_code()))
        }
    }
}

async fn run(args: &RecommendArgs) -> Result<String, AppError> {
    let database = DatabaseConfig::resolve(args.database_url.as_deref())?;

    let service = RecommendationService::from_env()?;
    let mut config = *service.config();
    if let Some(clusters) = args.clusters {
        config.clustering.n_clusters = clusters;
    }
    if let Some(seed) = args.seed {
        config.clustering.seed = seed;
    }
    config.validate()?;
    let service = service.with_config(config);

    debug!(database = %database.url, ?config, "Resolved configuration");

    let response = service
        .recommend_from_database(&database, args.user_id, args.goal.as_deref())
        .await?;
    response.render(args.with_context)
}
