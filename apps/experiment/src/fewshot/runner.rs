//! Experiment run — sequences load → compose → generate → extract → compare → report.
//!
//! Each step runs exactly once. Output files are written only after the
//! comparison exists, so an aborted run leaves nothing behind.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{error, info};

use crate::comparison::flatten::Record;
use crate::comparison::{compare_records, ComparisonOutcome};
use crate::errors::ExperimentError;
use crate::fewshot::composer::compose_prompt;
use crate::fewshot::extractor::extract_record;
use crate::fewshot::fixtures::{load_held_out, load_training_examples};
use crate::llm_client::ModelClient;
use crate::report::{
    render_sample_mismatches, render_summary, write_outputs, OutputPaths, RunMetadata,
    SAMPLE_MISMATCH_LIMIT,
};

#[derive(Debug, Clone)]
pub struct RunPaths {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub run: RunMetadata,
    pub outcome: ComparisonOutcome,
    pub outputs: OutputPaths,
}

pub async fn run_experiment(
    paths: &RunPaths,
    model: &dyn ModelClient,
) -> Result<RunResult, ExperimentError> {
    let started_at = Utc::now();

    println!("Step 1: Loading training examples (5 ACORD forms + policies)...");
    let training = load_training_examples(&paths.data_dir)?;
    println!("✓ Loaded {} training examples\n", training.len());

    println!("Step 2: Loading test case (6th ACORD form)...");
    let held_out = load_held_out(&paths.data_dir)?;
    println!("✓ Test case loaded\n");

    println!("Step 3: Creating few-shot prompt...");
    let prompt = compose_prompt(&training, &held_out.form);
    let run = RunMetadata::new(started_at, model.model(), &prompt);
    println!("✓ Prompt created ({} characters)\n", run.prompt_chars);
    info!(run_id = %run.run_id, model = %run.model, "Prompt composed");

    println!("Step 4: Generating policy JSON with {}...", run.model);
    let generated = match generate_record(model, &prompt).await {
        Ok(record) => record,
        Err(e) => {
            error!(run_id = %run.run_id, "Policy generation failed: {e}");
            return Err(e);
        }
    };
    println!("✓ Policy JSON generated successfully\n");

    println!("Step 5: Comparing generated policy with ground truth...");
    let outcome = compare_records(&generated, &held_out.reference);
    let outputs = write_outputs(&paths.output_dir, &generated, &outcome, &run)?;
    println!("✓ Generated policy saved to: {}", outputs.generated_record.display());
    println!("✓ Detailed comparison saved to: {}\n", outputs.comparison_results.display());

    print_results(&outcome);

    Ok(RunResult {
        run,
        outcome,
        outputs,
    })
}

async fn generate_record(
    model: &dyn ModelClient,
    prompt: &str,
) -> Result<Record, ExperimentError> {
    let text = model.generate(prompt).await?;
    Ok(extract_record(&text)?)
}

fn print_results(outcome: &ComparisonOutcome) {
    let rule = "=".repeat(80);
    println!("{rule}\nRESULTS\n{rule}\n");
    println!("{}", render_summary(&outcome.metrics));

    let samples = render_sample_mismatches(&outcome.details, SAMPLE_MISMATCH_LIMIT);
    if !samples.is_empty() {
        println!("{samples}");
    }
}
