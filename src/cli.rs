use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// 🧑‍💻 Per-author contribution extractor
#[derive(Debug, Parser)]
#[command(
    name = "gitcontrib",
    version,
    about = "✨ Clone grouped repos and export each author's diffs since a cutoff date",
    long_about = None
)]
pub struct Cli {
    /// 🔊 Log verbosity, e.g. INFO, DEBUG, ...
    #[arg(
        short = 'l',
        long = "log",
        value_enum,
        ignore_case = true,
        default_value_t = LogLevel::Info
    )]
    pub log: LogLevel,

    /// 📄 Config file mapping group names to repo URLs
    #[arg(short, long, default_value = "config.yml")]
    pub config: PathBuf,

    /// 🗓 Only include commits on or after this date (YYYY-MM-DD)
    #[arg(short, long, default_value = "2024-09-10")]
    pub since: NaiveDate,

    /// 📁 Directory holding the local clones
    #[arg(long, default_value = "repos")]
    pub repos_dir: PathBuf,

    /// 📁 Directory the per-author diff files are written to
    #[arg(long, default_value = "code_by_author")]
    pub out_dir: PathBuf,
}

/// Severity names accepted by `--log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            // tracing has no CRITICAL level; ERROR is the closest severity
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}
