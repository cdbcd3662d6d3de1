use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-sniff",
    about = "Classify informal license declarations into normalized identifiers",
    version
)]
pub struct Cli {
    /// Declared license strings to classify; stdin is read when no input is given
    #[arg(value_name = "TEXT")]
    pub texts: Vec<String>,

    /// Classify the whole contents of a file (repeatable)
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Classify the `license` field of a package.json-style descriptor (repeatable)
    #[arg(long = "package", value_name = "PATH")]
    pub packages: Vec<PathBuf>,

    /// Policy config file [default: ./.license-sniff/config.toml, fallback ~/.config/license-sniff/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Show passing declarations too, and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// `true` when nothing was passed and stdin should be read.
    pub fn wants_stdin(&self) -> bool {
        self.texts.is_empty() && self.files.is_empty() && self.packages.is_empty()
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
