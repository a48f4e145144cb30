use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vitalscan_lib::config;
use vitalscan_lib::pipeline::{write_results, DocumentOutcome, DocumentProcessor};

#[derive(Parser, Debug)]
#[command(
    name = "vitalscan",
    version = config::APP_VERSION,
    about = "Extract vital signs from recognized medical report text and assess risk."
)]
struct Args {
    /// Text file or directory of text files.
    input_path: PathBuf,

    /// Where to write the JSON results.
    #[arg(short, long, default_value = "output.json")]
    output: PathBuf,

    /// Print per-document details.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    vitalscan_lib::init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let processor = DocumentProcessor::default();
    let results = processor
        .process_path(&args.input_path)
        .with_context(|| format!("Cannot process {}", args.input_path.display()))?;

    write_results(&results, &args.output)
        .with_context(|| format!("Cannot write results to {}", args.output.display()))?;
    println!("Results saved to: {}", args.output.display());

    let processed = results.iter().filter(|r| r.is_processed()).count();
    println!("Processed: {processed}/{} files successfully", results.len());

    if args.verbose {
        for result in &results {
            println!("\n{}", result.file_path());
            match result {
                DocumentOutcome::Processed(report) => println!(
                    "  Parameters extracted: {}/{}",
                    report.extraction_info.extracted_parameters,
                    report.extraction_info.total_parameters
                ),
                DocumentOutcome::Failed(failed) => println!("  Error: {}", failed.error),
            }
        }
    }

    Ok(())
}
