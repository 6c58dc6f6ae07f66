use sitelens::handlers::*;
use sitelens::ReportFormat;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

fn quick_args(url: &str, format: ReportFormat) -> AuditArgs {
    AuditArgs {
        url: url.to_string(),
        latency: Duration::ZERO,
        seed: Some(99),
        format,
        output: None,
        show_progress: false,
    }
}

#[test]
fn test_resolve_output_path_plain() {
    assert_eq!(
        resolve_output_path("reports/audit.json", ReportFormat::Json),
        PathBuf::from("reports/audit.json")
    );
}

#[test]
fn test_resolve_output_path_adds_format_extension() {
    assert_eq!(
        resolve_output_path("reports/audit", ReportFormat::Markdown),
        PathBuf::from("reports/audit.md")
    );
    assert_eq!(
        resolve_output_path("audit", ReportFormat::Text),
        PathBuf::from("audit.txt")
    );
}

#[test]
fn test_resolve_output_path_keeps_existing_extension() {
    assert_eq!(
        resolve_output_path("audit.log", ReportFormat::Json),
        PathBuf::from("audit.log")
    );
}

#[test]
fn test_resolve_output_path_expands_tilde() {
    let resolved = resolve_output_path("~/audit.txt", ReportFormat::Text);
    assert!(!resolved.to_string_lossy().starts_with('~'));
    assert!(resolved.ends_with("audit.txt"));
}

#[test]
fn test_structured_stdout_needs_clean_stream() {
    assert!(quick_args("example.com", ReportFormat::Json).needs_clean_stdout());
    assert!(quick_args("example.com", ReportFormat::Markdown).needs_clean_stdout());
    assert!(!quick_args("example.com", ReportFormat::Text).needs_clean_stdout());

    let mut to_file = quick_args("example.com", ReportFormat::Json);
    to_file.output = Some(PathBuf::from("audit.json"));
    assert!(!to_file.needs_clean_stdout());
}

#[test]
fn test_build_auditor_applies_settings() {
    let auditor = build_auditor(Duration::from_millis(250), Some(5));
    assert_eq!(auditor.latency(), Duration::from_millis(250));
    assert_eq!(auditor.seed(), Some(5));

    let unseeded = build_auditor(Duration::ZERO, None);
    assert!(unseeded.seed().is_none());
}

#[tokio::test]
async fn test_run_audit_normalizes_url() {
    let report = run_audit(&quick_args("example.com", ReportFormat::Text))
        .await
        .unwrap();
    assert_eq!(report.url.as_str(), "https://example.com");
    assert!((70..=99).contains(&report.overall.score));
}

#[tokio::test]
async fn test_run_audit_rejects_empty_url() {
    let err = run_audit(&quick_args("   ", ReportFormat::Text))
        .await
        .unwrap_err();
    assert_eq!(err, "Please enter a website URL");
}

#[tokio::test]
async fn test_run_audit_rejects_invalid_url() {
    let err = run_audit(&quick_args("ht!tp://bad url", ReportFormat::Text))
        .await
        .unwrap_err();
    assert_eq!(err, "Please enter a valid website URL");
}

#[tokio::test]
async fn test_deliver_report_to_stdout() {
    let args = quick_args("https://httpbin.org", ReportFormat::Json);
    let report = run_audit(&args).await.unwrap();

    let content = deliver_report(&report, args.format, None).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["audit"]["url"], "https://httpbin.org");
}

#[tokio::test]
async fn test_deliver_report_to_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("audit.md");

    let args = quick_args("example.com", ReportFormat::Markdown);
    let report = run_audit(&args).await?;

    let printed = deliver_report(&report, args.format, Some(&path))?;
    assert!(printed.is_none());

    let content = fs::read_to_string(&path)?;
    assert!(content.starts_with("# Website Audit Report"));
    assert!(content.contains("https://example.com"));
    Ok(())
}

#[tokio::test]
async fn test_deliver_report_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope").join("audit.txt");

    let args = quick_args("example.com", ReportFormat::Text);
    let report = run_audit(&args).await.unwrap();

    let err = deliver_report(&report, args.format, Some(&path)).unwrap_err();
    assert!(err.starts_with("Failed to save report to"));
}
