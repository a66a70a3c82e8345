use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use labelstruct::csvrec;
use labelstruct::ocr::{self, OcrBridge};
use labelstruct::pipeline::{run_label, PipelineConfig};
use labelstruct::refine::{CommandRefiner, Refiner};
use labelstruct::FieldRecord;

#[derive(Parser, Debug)]
#[command(name = "labelstruct")]
#[command(version, about = "Product label field extraction from noisy OCR output", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract label fields from one OCR result
    Extract {
        /// OCR token JSON file, or an image when --ocr-cmd is given
        input: PathBuf,

        /// Authoritative CSV record overlaid onto the extracted fields
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Output directory (default: ./<input_name>_output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// External OCR command writing token JSON to stdout
        #[arg(long)]
        ocr_cmd: Option<String>,

        /// External refinement command reading a prompt on stdin
        #[arg(long)]
        refine_cmd: Option<String>,

        /// Disable progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Extract label fields from multiple OCR results
    Batch {
        /// OCR token JSON files (or images with --ocr-cmd)
        inputs: Vec<PathBuf>,

        /// Output directory for all results
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// External OCR command writing token JSON to stdout
        #[arg(long)]
        ocr_cmd: Option<String>,
    },

    /// Print the target field names
    Fields,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract {
            input,
            csv,
            output,
            ocr_cmd,
            refine_cmd,
            quiet,
        } => extract_single(input, csv, output, ocr_cmd, refine_cmd, quiet),
        Commands::Batch {
            inputs,
            output,
            ocr_cmd,
        } => extract_batch(inputs, output, ocr_cmd),
        Commands::Fields => {
            for name in FieldRecord::FIELD_NAMES {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn extract_single(
    input: PathBuf,
    csv: Option<PathBuf>,
    output: Option<PathBuf>,
    ocr_cmd: Option<String>,
    refine_cmd: Option<String>,
    quiet: bool,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if !input.is_file() {
        anyhow::bail!("Input is not a file: {}", input.display());
    }

    let output_dir = output.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "label".to_string());
        PathBuf::from(format!("{stem}_output"))
    });

    if !quiet {
        println!("[*] Processing: {}", input.display());
        println!("[*] Output: {}", output_dir.display());
    }

    let tokens = match &ocr_cmd {
        Some(cmd) => OcrBridge::new(cmd).run(&input)?,
        None => ocr::read_tokens(&input)?,
    };

    let external = csv
        .map(|path| {
            csvrec::load_record(&path)
                .with_context(|| format!("failed to load CSV record from {}", path.display()))
        })
        .transpose()?;

    let refiner = refine_cmd.map(CommandRefiner::new);

    if !quiet {
        println!("\n[+] Extracting fields from {} tokens...", tokens.len());
    }

    let config = PipelineConfig::new(input.clone(), output_dir.clone());
    let result = run_label(
        &config,
        &tokens,
        external.as_ref(),
        refiner.as_ref().map(|r| r as &dyn Refiner),
    )
    .with_context(|| format!("failed to process {}", input.display()))?;

    if !quiet {
        let populated = FieldRecord::FIELD_NAMES
            .iter()
            .filter(|name| result.merged.get(name).is_some())
            .count();
        println!(
            "[+] {populated} of {} fields populated",
            FieldRecord::FIELD_NAMES.len()
        );
        println!("\n[✓] Done! Results saved to: {}", output_dir.display());
    }

    Ok(())
}

fn extract_batch(
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    ocr_cmd: Option<String>,
) -> Result<()> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }

    let base_output = output.unwrap_or_else(|| PathBuf::from("batch_output"));

    println!("[*] Batch processing {} file(s)", inputs.len());
    println!("[*] Base output: {}\n", base_output.display());

    let mut success = 0;
    let mut failed = 0;

    for (i, input) in inputs.iter().enumerate() {
        println!("[{}/{}] Processing: {}", i + 1, inputs.len(), input.display());

        if !input.exists() {
            eprintln!("  [!] Skipped: file does not exist");
            failed += 1;
            continue;
        }

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "label".to_string());
        let output_dir = base_output.join(&stem);

        match extract_single(
            input.clone(),
            None,
            Some(output_dir),
            ocr_cmd.clone(),
            None,
            true,
        ) {
            Ok(_) => {
                println!("  [✓] Success");
                success += 1;
            }
            Err(e) => {
                eprintln!("  [✗] Failed: {e}");
                failed += 1;
            }
        }
        println!();
    }

    println!("\n[*] Summary: {success} succeeded, {failed} failed");

    if failed > 0 {
        anyhow::bail!("{failed} file(s) failed to process");
    }

    Ok(())
}
