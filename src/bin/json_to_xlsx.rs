//! Convert an analytics payload into an XLSX workbook.
//!
//! ```sh
//! json_to_xlsx room.json live_data/
//! json_to_xlsx room.json live_data/ --output-name 2024-05-01.xlsx
//! ```

use clap::Parser;
use livesheet::live::{ConvertOptions, LabelTable, convert_file};
use livesheet::logging;
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert data.data_string JSON payload into an XLSX file
#[derive(Parser, Debug)]
#[command(name = "json_to_xlsx", version)]
struct Args {
    /// Path to the source JSON file
    #[arg(value_name = "JSON_PATH")]
    json_path: PathBuf,

    /// Directory where the XLSX file should be written
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// XLSX file name. Defaults to <json stem>.xlsx
    #[arg(long, value_name = "NAME")]
    output_name: Option<String>,

    /// JSON object of field -> label used for the second header row
    #[arg(long, value_name = "FILE")]
    labels: Option<PathBuf>,

    /// Worksheet name
    #[arg(long, value_name = "NAME", default_value = "data")]
    sheet_name: String,
}

fn run(args: &Args) -> livesheet::Result<PathBuf> {
    let labels = match &args.labels {
        Some(path) => LabelTable::from_json_file(path)?,
        None => LabelTable::analytics(),
    };
    let options = ConvertOptions::new()
        .sheet_name(&args.sheet_name)?
        .labels(labels);

    convert_file(
        &args.json_path,
        &args.output_dir,
        args.output_name.as_deref(),
        &options,
    )
}

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    match run(&args) {
        Ok(path) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("error[{}]: {}", err.kind(), err);
            ExitCode::FAILURE
        },
    }
}
