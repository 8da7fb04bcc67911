pub mod report;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for dicomsort
#[derive(Parser, Debug)]
#[command(name = "dicomsort")]
#[command(about = "Reorganize DICOM files into a patient/study/series hierarchy")]
#[command(version)]
pub struct Cli {
    /// Directory tree to reorganize
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Move files into this directory instead of reorganizing in place
    #[arg(short, long, alias = "output_dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, value_enum, ignore_case = true, default_value = "warning")]
    pub log: LogLevel,

    /// Report what would be moved without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Output format of the final report
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Log level names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Maps to a `log` filter; CRITICAL has no finer level than ERROR
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => log::LevelFilter::Error,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}
