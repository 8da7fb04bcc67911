use clap::Parser;
use dicomsort_core::cli::{Cli, OutputFormat};
use dicomsort_core::{
    DicomFileReader, ReorganizeConfig, ReorganizeReport, Reorganizer, TextReport,
};
use log::{error, info};
use std::io::{self, Write};
use std::process;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log.to_filter())
        .init();

    let config = ReorganizeConfig::default().dry_run(cli.dry_run);
    let reorganizer = Reorganizer::new(DicomFileReader, config);

    match &cli.output_dir {
        Some(dir) => info!(
            "Moving files from {} to {}",
            cli.source.display(),
            dir.display()
        ),
        None => info!("Reorganizing {} in place", cli.source.display()),
    }

    let result = reorganizer.run(&cli.source, cli.output_dir.as_deref(), print_progress);

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            println!();
            error!("Reorganization failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    println!();

    output_report(&report, cli.format);
}

fn print_progress(moved: usize) {
    print!("\r Number of files moved: {}", moved);
    let _ = io::stdout().flush();
}

fn output_report(report: &ReorganizeReport, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("{}", TextReport::new(report));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                let _ = report;
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
