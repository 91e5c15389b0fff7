use chrono::Utc;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vuln_trend::adapters::outbound::clock::ManualClock;
use vuln_trend::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, JsonHistoryFile, StdoutPresenter,
};
use vuln_trend::adapters::outbound::memory::InMemoryProjectRegistry;
use vuln_trend::application::dto::{TrendRequest, TrendResponse};
use vuln_trend::application::use_cases::TrackTrendUseCase;
use vuln_trend::cli::{Args, OutputFormat};
use vuln_trend::config::{self, ConfigFile};
use vuln_trend::ports::inbound::TrendTrackingPort;
use vuln_trend::ports::outbound::{HistoryPersistence, OutputPresenter, ScanResultReader};
use vuln_trend::shared::{ExitCode, Result};
use vuln_trend::trend_tracking::domain::ProjectKey;
use vuln_trend::trend_tracking::policies::RetentionPolicy;

/// Environment variable holding the log filter directive
const LOG_ENV: &str = "VULN_TREND_LOG";

fn main() {
    init_tracing();

    // clap exits with InvalidArguments (2) on usage errors
    let args = Args::parse_args();

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr) // Log to stderr, reports to stdout
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let policy = resolve_policy(&args, &config)?;
    let format = resolve_format(&args, &config)?;
    let fail_on_new = args.fail_on_new || config.fail_on_new.unwrap_or(false);
    let state_path = args.state.clone().or_else(|| config.state_file.clone());

    // Create adapters (Dependency Injection)
    let clock = ManualClock::new(args.as_of.unwrap_or_else(Utc::now));
    let registry = InMemoryProjectRegistry::new(policy, clock)?;
    let persistence = state_path.map(JsonHistoryFile::new);
    if let Some(persistence) = &persistence {
        let histories = persistence.load()?;
        info!(
            projects = histories.len(),
            path = %persistence.path().display(),
            "loaded history state"
        );
        registry.import_histories(histories)?;
    }

    let use_case = TrackTrendUseCase::new(registry);

    let responses = if args.list_projects {
        use_case
            .list_projects()
            .iter()
            .map(|summary| use_case.query(&summary.project_key))
            .collect()
    } else if let Some(project) = &args.project {
        vec![use_case.query(&ProjectKey::new(project)?)]
    } else {
        let responses = record_scans(&use_case, &args.scan_files)?;
        if let Some(persistence) = &persistence {
            persistence.save(&use_case.repository().export_histories())?;
        }
        responses
    };

    // Render and present output
    let formatted_output = format.create_formatter().format(&responses)?;
    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(output_path) => Box::new(FileSystemWriter::new(output_path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&formatted_output)?;

    if fail_on_new && responses.iter().any(TrendResponse::has_new_vulnerabilities) {
        return Ok(ExitCode::NewVulnerabilitiesDetected);
    }
    Ok(ExitCode::Success)
}

fn record_scans<P: TrendTrackingPort>(
    use_case: &P,
    scan_files: &[PathBuf],
) -> Result<Vec<TrendResponse>> {
    let reader = FileSystemReader::new();
    scan_files
        .iter()
        .map(|path| {
            let scan = reader.read_scan_result(path)?;
            Ok(use_case.record_scan(TrendRequest::new(scan)))
        })
        .collect()
}

fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => config::load_config_from_path(path),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(config::discover_config(&cwd)?.unwrap_or_default())
        }
    }
}

/// Defaults, then the config file, then command-line flags.
fn resolve_policy(args: &Args, config: &ConfigFile) -> Result<RetentionPolicy> {
    let mut policy = config.apply_retention(RetentionPolicy::default());
    if let Some(max_projects) = args.max_projects {
        policy = policy.with_max_projects(usize::try_from(max_projects)?);
    }
    if let Some(max_sessions) = args.max_sessions {
        policy = policy.with_max_sessions_per_project(usize::try_from(max_sessions)?);
    }
    if let Some(ttl_hours) = args.ttl_hours {
        policy = policy.with_ttl_hours(ttl_hours);
    }
    policy.validate()?;
    Ok(policy)
}

fn resolve_format(args: &Args, config: &ConfigFile) -> Result<OutputFormat> {
    if let Some(format) = args.format {
        return Ok(format);
    }
    match &config.format {
        Some(format) => format.parse().map_err(anyhow::Error::msg),
        None => Ok(OutputFormat::Json),
    }
}
