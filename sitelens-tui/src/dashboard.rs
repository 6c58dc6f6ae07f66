use chrono::{DateTime, Utc};
use sitelens_core::report::{generate_text_report, save_report};
use sitelens_scanner::error::{Result as ScanResult, ScanError};
use sitelens_scanner::{
    validate, AuditHandle, AuditReport, Category, MockAuditor, NormalizedUrl, PendingAudit,
    ValidationError,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// What the body of the dashboard is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Empty,
    Loading,
    Results,
}

/// State owned by the terminal dashboard.
///
/// Every transition goes through a method on this type; the views only read
/// it. An audit is started by [`Dashboard::submit`] or [`Dashboard::reaudit`],
/// which hand the caller a [`PendingAudit`] to drive, and its outcome comes
/// back through [`Dashboard::finish`].
pub struct Dashboard {
    auditor: MockAuditor,
    input: String,
    error: Option<ValidationError>,
    in_flight: Option<AuditHandle>,
    report: Option<AuditReport>,
    active_tab: Category,
    last_url: Option<NormalizedUrl>,
    status: Option<String>,
    should_quit: bool,
}

impl Dashboard {
    pub fn new(auditor: MockAuditor) -> Self {
        Self {
            auditor,
            input: String::new(),
            error: None,
            in_flight: None,
            report: None,
            active_tab: Category::Performance,
            last_url: None,
            status: None,
            should_quit: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight_token(&self) -> Option<Uuid> {
        self.in_flight.as_ref().map(AuditHandle::token)
    }

    pub fn report(&self) -> Option<&AuditReport> {
        self.report.as_ref()
    }

    pub fn active_tab(&self) -> Category {
        self.active_tab
    }

    pub fn last_url(&self) -> Option<&NormalizedUrl> {
        self.last_url.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn screen(&self) -> Screen {
        if self.is_loading() {
            Screen::Loading
        } else if self.report.is_some() {
            Screen::Results
        } else {
            Screen::Empty
        }
    }

    // Input is locked while an audit runs.
    pub fn push_char(&mut self, c: char) {
        if self.is_loading() {
            return;
        }
        self.input.push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if self.is_loading() {
            return;
        }
        self.input.pop();
        self.error = None;
    }

    /// Validate the input box and start an audit for it.
    ///
    /// Returns `None` when an audit is already running or the input is
    /// rejected; in the latter case the error is kept for display.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Option<PendingAudit> {
        if self.is_loading() {
            debug!("Ignoring submit while audit {:?} is running", self.in_flight_token());
            return None;
        }

        match validate(&self.input) {
            Ok(url) => {
                self.error = None;
                Some(self.begin(url, now))
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    /// Run the most recently submitted URL again.
    pub fn reaudit(&mut self, now: DateTime<Utc>) -> Option<PendingAudit> {
        if self.is_loading() {
            return None;
        }
        let url = self.last_url.clone()?;
        Some(self.begin(url, now))
    }

    fn begin(&mut self, url: NormalizedUrl, now: DateTime<Utc>) -> PendingAudit {
        let pending = self.auditor.start(url.clone(), now);
        info!("Audit {} started for {}", pending.token(), url);

        self.in_flight = Some(pending.handle());
        self.last_url = Some(url);
        self.report = None;
        self.status = None;
        pending
    }

    /// Apply the outcome of an audit. Outcomes for anything other than the
    /// audit currently in flight are dropped. Returns whether the outcome
    /// was applied.
    pub fn finish(&mut self, token: Uuid, result: ScanResult<AuditReport>) -> bool {
        if self.in_flight_token() != Some(token) {
            debug!("Dropping stale result for audit {}", token);
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(report) => {
                info!(
                    "Audit {} finished: score {} ({})",
                    token, report.overall.score, report.overall.grade
                );
                self.report = Some(report);
                self.active_tab = Category::Performance;
            }
            Err(ScanError::Cancelled(_)) => {
                info!("Audit {} cancelled", token);
            }
            Err(e) => {
                self.status = Some(format!("Audit failed: {}", e));
            }
        }
        true
    }

    pub fn select_tab(&mut self, category: Category) {
        self.active_tab = category;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.active_tab = self.active_tab.previous();
    }

    /// Write the current report as text into `dir`.
    pub fn export(&mut self, dir: &Path) -> Option<PathBuf> {
        let report = self.report.as_ref()?;
        let path = dir.join(export_file_name(report));

        match save_report(&generate_text_report(report), &path) {
            Ok(()) => {
                self.status = Some(format!("Report saved to {}", path.display()));
                Some(path)
            }
            Err(e) => {
                self.status = Some(format!("Export failed: {}", e));
                None
            }
        }
    }

    /// Stop the dashboard, cancelling any running audit.
    pub fn quit(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.cancel();
        }
        self.should_quit = true;
    }
}

pub fn export_file_name(report: &AuditReport) -> String {
    format!(
        "sitelens-{}-{}.txt",
        report.url.host().replace(['.', ':'], "_"),
        report.timestamp.format("%Y%m%d-%H%M%S")
    )
}
