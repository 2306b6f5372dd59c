mod comparison;
mod config;
mod errors;
mod fewshot;
mod llm_client;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::fewshot::runner::{run_experiment, RunPaths};
use crate::llm_client::{LlmClient, ModelClient};

#[derive(Debug, Parser)]
#[command(name = "policy-fewshot")]
#[command(about = "Few-shot ACORD form to policy JSON experiment", long_about = None)]
struct Cli {
    #[arg(
        long,
        default_value = "data",
        help = "Directory holding acord_form_N.txt and policy_N.json"
    )]
    data_dir: PathBuf,

    #[arg(
        long,
        default_value = ".",
        help = "Directory for the generated policy and comparison results"
    )]
    output_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let rule = "=".repeat(80);

    println!("{rule}\nFEW-SHOT LEARNING EXPERIMENT: ACORD FORM TO POLICY JSON\n{rule}\n");

    // Credential check comes before any file or network activity
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            eprintln!("Please set your API key to run this experiment.");
            eprintln!("\nTo set the key, run:");
            eprintln!("export ANTHROPIC_API_KEY='your-api-key-here'");
            return Ok(ExitCode::FAILURE);
        }
    };

    // Logs go to stderr so they never interleave with the report on stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting policy-fewshot v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm.model());

    let paths = RunPaths {
        data_dir: cli.data_dir,
        output_dir: cli.output_dir,
    };

    match run_experiment(&paths, &llm).await {
        Ok(result) => {
            info!(
                run_id = %result.run.run_id,
                accuracy = result.outcome.metrics.accuracy,
                "Experiment complete"
            );
            println!("{rule}\nEXPERIMENT COMPLETE\n{rule}\n");
            println!("Files created:");
            println!(
                "  • {} - The AI-generated policy",
                result.outputs.generated_record.display()
            );
            println!(
                "  • {} - Detailed comparison metrics",
                result.outputs.comparison_results.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_generation_failure() => {
            error!("Run aborted: {e}");
            println!("✗ Error generating policy: {e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
