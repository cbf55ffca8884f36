//! Write `index.json` listing the workbooks in a directory.

use clap::Parser;
use livesheet::index::{DEFAULT_DIR, write_index};
use livesheet::logging;
use std::path::PathBuf;
use std::process::ExitCode;

/// List the XLSX files of a directory into its index.json
#[derive(Parser, Debug)]
#[command(name = "live_data_index", version)]
struct Args {
    /// Directory holding the produced workbooks
    #[arg(value_name = "DIR", default_value = DEFAULT_DIR)]
    dir: PathBuf,
}

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    if !args.dir.is_dir() {
        eprintln!("{} 目录不存在", args.dir.display());
        return ExitCode::FAILURE;
    }

    match write_index(&args.dir) {
        Ok((index, path)) => {
            println!("写入 {}，共 {} 个文件", path.display(), index.len());
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("error[{}]: {}", err.kind(), err);
            ExitCode::FAILURE
        },
    }
}
