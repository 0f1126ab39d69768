mod cli;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Args, FileType};
use ensvalid::validate;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // Help/version displays are a successful invocation; anything
            // else is an argument-validation failure.
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    if !args.file_path.is_file() {
        error!("Input file not found: {}", args.file_path.display());
        return ExitCode::from(1);
    }
    if !args.out_dir.is_dir() {
        error!("Output directory not found: {}", args.out_dir.display());
        return ExitCode::from(1);
    }

    info!("Validating {}", args.file_path.display());

    let result = match args.file_type {
        FileType::EnsemblGenomeGff3 => {
            validate::validate_gff3_path(&args.file_path, &args.out_dir)
        }
        FileType::TssParquet => validate::validate_tss_table_path(&args.file_path, &args.out_dir),
        FileType::TssBed => validate::validate_tss_bed_path(&args.file_path, &args.out_dir),
        FileType::CdsCountsBed => {
            validate::validate_cds_counts_path(&args.file_path, &args.out_dir)
        }
    };

    match result {
        // Row-level findings were already reported via the report file.
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(1)
        }
    }
}
