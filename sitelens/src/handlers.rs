use clap::ArgMatches;
use colored::Colorize;
use sitelens_core::audit::{execute_audit, AuditOptions};
use sitelens_core::display::ScoreBand;
use sitelens_core::report::{render_report, save_report, ReportFormat};
use sitelens_scanner::{validate, AuditReport, Category, MockAuditor, DEFAULT_LATENCY};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Settings for one `audit` invocation, pulled out of the parsed arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditArgs {
    pub url: String,
    pub latency: Duration,
    pub seed: Option<u64>,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
    pub show_progress: bool,
}

impl AuditArgs {
    pub fn from_matches(sub_matches: &ArgMatches) -> Result<Self, String> {
        let url = sub_matches
            .get_one::<String>("URL")
            .cloned()
            .ok_or_else(|| "A URL to audit is required".to_string())?;

        let format_name = sub_matches
            .get_one::<String>("format")
            .map(String::as_str)
            .unwrap_or("text");
        let format = ReportFormat::from_str(format_name)
            .ok_or_else(|| format!("Unknown report format '{}'", format_name))?;

        let output = sub_matches
            .get_one::<String>("output")
            .map(|path| resolve_output_path(path, format));

        Ok(Self {
            url,
            latency: latency_from_matches(sub_matches),
            seed: sub_matches.get_one::<u64>("seed").copied(),
            format,
            output,
            show_progress: !sub_matches.get_flag("no-progress"),
        })
    }

    /// JSON or Markdown headed for stdout must not be mixed with the banner
    /// or the summary.
    pub fn needs_clean_stdout(&self) -> bool {
        self.output.is_none() && self.format != ReportFormat::Text
    }
}

fn latency_from_matches(sub_matches: &ArgMatches) -> Duration {
    sub_matches
        .get_one::<u64>("delay-ms")
        .map(|ms| Duration::from_millis(*ms))
        .unwrap_or(DEFAULT_LATENCY)
}

/// Expand a leading `~` in a user supplied path and give it the format's
/// extension when it has none.
pub fn resolve_output_path(path: &str, format: ReportFormat) -> PathBuf {
    let mut resolved = PathBuf::from(shellexpand::tilde(path).as_ref());
    if resolved.extension().is_none() {
        resolved.set_extension(format.extension());
    }
    resolved
}

pub fn build_auditor(latency: Duration, seed: Option<u64>) -> MockAuditor {
    let auditor = MockAuditor::new().with_latency(latency);
    match seed {
        Some(seed) => auditor.with_seed(seed),
        None => auditor,
    }
}

/// Validate the URL and run the audit. Errors come back as display-ready
/// messages.
pub async fn run_audit(args: &AuditArgs) -> Result<AuditReport, String> {
    let url = validate(&args.url).map_err(|e| e.to_string())?;

    let mut options = AuditOptions::new(url);
    options.latency = args.latency;
    options.seed = args.seed;
    options.show_progress = args.show_progress;

    execute_audit(options, None)
        .await
        .map_err(|e| format!("Audit failed: {}", e))
}

/// Render the report and either save it or hand it back for printing.
/// Returns the rendered text when no output path was given.
pub fn deliver_report(
    report: &AuditReport,
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<Option<String>, String> {
    let content = render_report(report, format)
        .map_err(|e| format!("Failed to render report: {}", e))?;

    match output {
        Some(path) => {
            save_report(&content, path)
                .map_err(|e| format!("Failed to save report to {}: {}", path.display(), e))?;
            info!("Report written to {}", path.display());
            Ok(None)
        }
        None => Ok(Some(content)),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when called more than once
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn colorize_score(score: u8) -> colored::ColoredString {
    let text = score.to_string();
    match ScoreBand::from_score(score) {
        ScoreBand::Good => text.green().bold(),
        ScoreBand::Fair => text.yellow().bold(),
        ScoreBand::Poor => text.red().bold(),
    }
}

// Status output goes to stderr so stdout carries only the report.
fn print_summary(report: &AuditReport) {
    eprintln!(
        "\n{} Audit complete for {}",
        "✓".green().bold(),
        report.url.as_str().bright_white()
    );
    eprintln!(
        "  Overall {} (grade {}), {} issue(s) found",
        colorize_score(report.overall.score),
        report.overall.grade.as_str().bright_white().bold(),
        report.total_issues()
    );
    for category in Category::ALL {
        eprintln!(
            "  {} {:<14} {}",
            category.icon(),
            category.label(),
            colorize_score(report.score(category))
        );
    }
    eprintln!();
}

pub async fn handle_audit(sub_matches: &ArgMatches, quiet: bool) {
    init_logging();

    let args = match AuditArgs::from_matches(sub_matches) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    if !quiet {
        eprintln!("{} Auditing {}\n", "→".blue(), args.url.bright_white());
    }

    let report = match run_audit(&args).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    if !quiet {
        print_summary(&report);
    }

    match deliver_report(&report, args.format, args.output.as_deref()) {
        Ok(Some(content)) => print!("{}", content),
        Ok(None) => {
            if let Some(path) = &args.output {
                println!(
                    "{} Report saved to {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

pub async fn handle_ui(sub_matches: &ArgMatches) {
    let auditor = build_auditor(
        latency_from_matches(sub_matches),
        sub_matches.get_one::<u64>("seed").copied(),
    );
    let runtime = tokio::runtime::Handle::current();

    let outcome = tokio::task::spawn_blocking(move || sitelens_tui::run(auditor, runtime)).await;
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            eprintln!("✗ Error running TUI: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("✗ TUI thread failed: {}", e);
            std::process::exit(1);
        }
    }
}
