use clap::Parser;
use dicomsort_core::{find_leaves, summarize_leaves, write_csv_file, DicomFileReader};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::PathBuf;
use std::process;

/// CLI tool summarizing the CT and MR series of an organized tree
#[derive(Parser, Debug)]
#[command(name = "dicomsummary")]
#[command(about = "Write one CSV row per CT or MR series found under a directory")]
#[command(version)]
struct Cli {
    /// Root of the tree to summarize
    #[arg(value_name = "ROOT")]
    root: PathBuf,

    /// CSV file to write
    #[arg(
        short,
        long,
        alias = "output_file",
        value_name = "PATH",
        default_value = "summary.csv"
    )]
    output_file: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.root.is_dir() {
        eprintln!("Error: {} is not a directory", cli.root.display());
        process::exit(1);
    }

    println!("Analyzing file structure");
    info!("Processing directory: {}", cli.root.display());
    let leaves = find_leaves(&cli.root);
    info!("Found {} leaf directories", leaves.len());

    println!("Analyzing volumes");
    let pb = leaf_progress_bar(leaves.len());
    let summaries = summarize_leaves(&DicomFileReader, &leaves, |_| pb.inc(1));
    pb.finish();
    info!("Summarized {} series", summaries.len());

    if let Err(e) = write_csv_file(&summaries, &cli.output_file) {
        error!("Failed to write {}: {}", cli.output_file.display(), e);
        eprintln!("Error: Failed to write {}: {}", cli.output_file.display(), e);
        process::exit(1);
    }

    println!(
        "Wrote {} series to {}",
        summaries.len(),
        cli.output_file.display()
    );
}

fn leaf_progress_bar(leaves: usize) -> ProgressBar {
    let pb = ProgressBar::new(leaves as u64);
    let style = ProgressStyle::with_template("{percent:>3}%|{bar:40}| {pos}/{len} [{elapsed}<{eta}]")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
