use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::ports::outbound::ReportFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json' or 'markdown'",
                s
            )),
        }
    }
}

impl OutputFormat {
    /// Creates a formatter instance for the specified output format
    pub fn create_formatter(&self) -> Box<dyn ReportFormatter> {
        match self {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }
}

/// Track vulnerability trends across successive dependency scans
#[derive(Parser, Debug)]
#[command(name = "vuln-trend")]
#[command(version)]
#[command(
    about = "Track vulnerability trends across successive dependency scans",
    long_about = None
)]
pub struct Args {
    /// Scan result JSON files, recorded in the order given
    #[arg(
        value_name = "SCAN_FILE",
        required_unless_present_any = ["project", "list_projects"]
    )]
    pub scan_files: Vec<PathBuf>,

    /// Report the trend of a project (group:artifact) without recording
    #[arg(long, value_name = "GROUP:ARTIFACT", conflicts_with = "list_projects")]
    pub project: Option<String>,

    /// List projects with retained history
    #[arg(long)]
    pub list_projects: bool,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to vuln-trend.config.yml in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// State file holding history between runs (in-memory only if omitted)
    #[arg(short, long)]
    pub state: Option<PathBuf>,

    /// Maximum number of tracked projects
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_projects: Option<u64>,

    /// Maximum number of retained scans per project
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_sessions: Option<u64>,

    /// Hours a scan is retained
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub ttl_hours: Option<u32>,

    /// Evaluate retention as of this RFC 3339 instant instead of now
    #[arg(long, value_name = "TIMESTAMP")]
    pub as_of: Option<DateTime<Utc>>,

    /// Exit with code 1 if any recorded scan introduced new vulnerabilities
    #[arg(long)]
    pub fail_on_new: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
