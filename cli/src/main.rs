//! lettersheet CLI - correspondence register extraction tool
//!
//! Reads an XLSX register of letters and writes its data rows to a JSON
//! document under a `rows` key.

use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use lettersheet::extract::extract_register;
use lettersheet::render::{self, JsonFormat};
use lettersheet::workbook::{SheetSelector, WorkbookParser};
use std::fs;
use std::path::{Path, PathBuf};

/// Default output filename, written next to the executable when no output
/// path is given.
const DEFAULT_OUTPUT_NAME: &str = "letters_from_xlsx_1404.json";

/// Extract correspondence register rows from an XLSX workbook to JSON
#[derive(Parser)]
#[command(
    name = "lettersheet",
    version,
    about = "Extract correspondence register rows from an XLSX workbook to JSON",
    long_about = "lettersheet - correspondence register extraction tool.\n\n\
                  Reads the active worksheet of an XLSX register, skips the header row,\n\
                  normalizes the 15 register columns of each data row to strings, and\n\
                  writes the non-blank rows to a JSON file under a \"rows\" key."
)]
struct Cli {
    /// Input workbook (.xlsx)
    input: PathBuf,

    /// Output JSON path (default: a fixed filename next to the executable)
    output: Option<PathBuf>,

    /// Read a named worksheet instead of the active one
    #[arg(long)]
    sheet: Option<String>,

    /// Write compact JSON (no indentation)
    #[arg(long)]
    compact: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Usage problems exit 1; --help and --version exit 0.
            let code = match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = std::path::absolute(&cli.input)?;
    if !input.exists() {
        return Err(format!("input file not found: {}", input.display()).into());
    }

    let output = match cli.output {
        Some(path) => std::path::absolute(path)?,
        None => default_output_path(),
    };

    let selector = match cli.sheet {
        Some(name) => SheetSelector::Name(name),
        None => SheetSelector::Active,
    };

    let pb = create_spinner("Reading workbook...");

    let parser = WorkbookParser::open(&input)?;
    pb.set_message("Extracting rows...");

    let sheet = parser.parse_sheet(&selector)?;
    let register = extract_register(&sheet);

    pb.finish_and_clear();

    let format = if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::to_json(&register, format)?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, json)?;

    println!("{}: {}", "Input".bold(), input.display());
    println!("{}: {}", "Output".bold(), output.display());
    println!("{}: {}", "Rows".bold(), register.len());

    Ok(())
}

/// The fixed sibling default output path, next to the executable.
fn default_output_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_OUTPUT_NAME)
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
