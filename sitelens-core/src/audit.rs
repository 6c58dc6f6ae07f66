use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use sitelens_scanner::error::Result;
use sitelens_scanner::{AuditReport, MockAuditor, NormalizedUrl, DEFAULT_LATENCY};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Progress lines shown while an audit is running. They advance on a timer
/// and say nothing about what the generator is actually doing.
pub const LOADING_STEPS: [&str; 6] = [
    "Connecting to website...",
    "Analyzing performance metrics...",
    "Checking security headers...",
    "Scanning SEO elements...",
    "Testing accessibility...",
    "Compiling results...",
];

/// Options for configuring an audit run
pub struct AuditOptions {
    pub url: NormalizedUrl,
    pub latency: Duration,
    pub seed: Option<u64>,
    pub show_progress: bool,
}

impl AuditOptions {
    pub fn new(url: NormalizedUrl) -> Self {
        Self {
            url,
            latency: DEFAULT_LATENCY,
            seed: None,
            show_progress: false,
        }
    }

    pub fn auditor(&self) -> MockAuditor {
        let auditor = MockAuditor::new().with_latency(self.latency);
        match self.seed {
            Some(seed) => auditor.with_seed(seed),
            None => auditor,
        }
    }
}

/// Callback for reporting audit progress
pub type AuditProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Run one audit to completion, ticking through [`LOADING_STEPS`] while the
/// simulated latency elapses.
pub async fn execute_audit(
    options: AuditOptions,
    progress_callback: Option<AuditProgressCallback>,
) -> Result<AuditReport> {
    let auditor = options.auditor();

    let progress_bar = if options.show_progress {
        let pb = ProgressBar::new_spinner();
        match ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            Ok(style) => pb.set_style(style),
            Err(e) => warn!("Falling back to default spinner style: {}", e),
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(LOADING_STEPS[0]);
        Some(pb)
    } else {
        None
    };

    let pending = auditor.start(options.url, Utc::now());
    let token = pending.token();
    info!("Started audit {}", token);

    let step_interval = (options.latency / LOADING_STEPS.len() as u32).max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval(step_interval);
    let mut step = 0;

    let run = pending.run();
    tokio::pin!(run);

    let result = loop {
        tokio::select! {
            result = &mut run => break result,
            _ = ticker.tick(), if step < LOADING_STEPS.len() => {
                let message = LOADING_STEPS[step];
                if let Some(ref pb) = progress_bar {
                    pb.set_message(message);
                }
                if let Some(ref callback) = progress_callback {
                    callback(message.to_string());
                }
                step += 1;
            }
        }
    };

    if let Some(pb) = progress_bar {
        match &result {
            Ok(report) => pb.finish_with_message(format!(
                "Audit complete! Score {} (grade {})",
                report.overall.score, report.overall.grade
            )),
            Err(e) => pb.abandon_with_message(format!("Audit stopped: {}", e)),
        }
    }

    result
}
