// Report rendering and export

use crate::display::{
    check_mark, format_timestamp, rating_label, security_header_rows, seo_meta_rows,
    seo_structure_rows, MetricKind, RECOMMENDATIONS_TIP,
};
use serde::{Deserialize, Serialize};
use sitelens_scanner::{AuditReport, Category};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HEAVY_RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const LIGHT_RULE: &str = "────────────────────────────────────────────────────────────────────────────────";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
        }
    }
}

pub fn render_report(report: &AuditReport, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(report)),
        ReportFormat::Json => generate_json_report(report),
        ReportFormat::Markdown => Ok(generate_markdown_report(report)),
    }
}

pub fn generate_text_report(report: &AuditReport) -> String {
    let mut out = String::new();

    // Header
    out.push_str(&format!("{}\n", HEAVY_RULE));
    out.push_str("                          SITELENS WEBSITE AUDIT REPORT\n");
    out.push_str(&format!("{}\n\n", HEAVY_RULE));

    out.push_str(&format!("URL:          {}\n", report.url));
    out.push_str(&format!("Audit Date:   {}\n", format_timestamp(&report.timestamp)));
    out.push_str(&format!(
        "Overall:      {} (Grade {})\n",
        report.overall.score, report.overall.grade
    ));
    out.push_str(&format!("Issues Found: {}\n\n", report.total_issues()));

    // Score summary
    out.push_str(&format!("{}\n", HEAVY_RULE));
    out.push_str("SCORES\n");
    out.push_str(&format!("{}\n\n", HEAVY_RULE));
    for category in Category::ALL {
        out.push_str(&format!(
            "  {} {:<14} {:>3}\n",
            category.icon(),
            category.label(),
            report.score(category)
        ));
    }
    out.push('\n');

    for category in Category::ALL {
        out.push_str(&format!("{}\n", HEAVY_RULE));
        out.push_str(&format!(
            "{} ({})\n",
            category.label().to_uppercase(),
            report.score(category)
        ));
        out.push_str(&format!("{}\n\n", HEAVY_RULE));

        push_text_details(&mut out, report, category);

        let issues = report.issues(category);
        if !issues.is_empty() {
            out.push_str("Issues:\n");
            for issue in issues {
                out.push_str(&format!("  ✗ {}\n", issue));
            }
            out.push('\n');
        }

        out.push_str("Recommendations:\n");
        for (idx, recommendation) in report.recommendations(category).iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", idx + 1, recommendation));
        }
        out.push('\n');
        out.push_str(&wrap_text(RECOMMENDATIONS_TIP, 80, "  "));
        out.push('\n');
        out.push_str(&format!("{}\n\n", LIGHT_RULE));
    }

    // Footer
    out.push_str(&format!("{}\n", HEAVY_RULE));
    out.push_str("                                  End of Report\n");
    out.push_str(&format!("{}\n", HEAVY_RULE));
    out.push_str("\nGenerated by Sitelens - simulated results, the target site was not contacted.\n\n");

    out
}

fn push_text_details(out: &mut String, report: &AuditReport, category: Category) {
    match category {
        Category::Performance => {
            for kind in MetricKind::ALL {
                let metric = kind.pick(&report.performance.metrics);
                out.push_str(&format!(
                    "  {:<26} {:>8}  [{}]\n",
                    kind.label(),
                    kind.format_value(metric.value),
                    rating_label(metric.rating)
                ));
            }
        }
        Category::Security => {
            out.push_str(&format!(
                "  SSL Certificate: {} (Grade {})\n",
                report.security.ssl.status, report.security.ssl.grade
            ));
            out.push_str("  Security Headers:\n");
            for (label, present) in security_header_rows(&report.security.headers) {
                out.push_str(&format!("    {} {}\n", check_mark(present), label));
            }
        }
        Category::Seo => {
            out.push_str("  Meta Elements:\n");
            for (label, present) in seo_meta_rows(&report.seo.meta) {
                out.push_str(&format!("    {} {}\n", check_mark(present), label));
            }
            out.push_str("  Page Structure:\n");
            for (label, present) in seo_structure_rows(&report.seo.structure) {
                out.push_str(&format!("    {} {}\n", check_mark(present), label));
            }
        }
        Category::Accessibility => {
            out.push_str(&format!(
                "  WCAG Level:       {}\n",
                report.accessibility.wcag.level
            ));
            out.push_str(&format!(
                "  Compliance Score: {}%\n",
                report.accessibility.wcag.compliance
            ));
        }
    }
    out.push('\n');
}

pub fn generate_json_report(report: &AuditReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "metadata": {
            "generator": "Sitelens",
            "version": env!("CARGO_PKG_VERSION"),
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "format": "json",
            "disclaimer": "Simulated results; the target site was not contacted"
        },
        "audit": report
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_markdown_report(report: &AuditReport) -> String {
    let mut out = String::new();

    out.push_str("# Website Audit Report\n\n");
    out.push_str(&format!("- **URL:** {}\n", report.url));
    out.push_str(&format!("- **Date:** {}\n", format_timestamp(&report.timestamp)));
    out.push_str(&format!(
        "- **Overall score:** {} (Grade {})\n\n",
        report.overall.score, report.overall.grade
    ));

    out.push_str("| Category | Score |\n|---|---|\n");
    for category in Category::ALL {
        out.push_str(&format!(
            "| {} {} | {} |\n",
            category.icon(),
            category.label(),
            report.score(category)
        ));
    }
    out.push('\n');

    for category in Category::ALL {
        out.push_str(&format!("## {} {}\n\n", category.icon(), category.label()));

        match category {
            Category::Performance => {
                out.push_str("| Metric | Value | Rating |\n|---|---|---|\n");
                for kind in MetricKind::ALL {
                    let metric = kind.pick(&report.performance.metrics);
                    out.push_str(&format!(
                        "| {} | {} | {} |\n",
                        kind.label(),
                        kind.format_value(metric.value),
                        metric.rating
                    ));
                }
                out.push('\n');
            }
            Category::Security => {
                out.push_str(&format!(
                    "**SSL:** {} (Grade {})\n\n",
                    report.security.ssl.status, report.security.ssl.grade
                ));
                for (label, present) in security_header_rows(&report.security.headers) {
                    out.push_str(&format!("- {} {}\n", check_mark(present), label));
                }
                out.push('\n');
            }
            Category::Seo => {
                for (label, present) in seo_meta_rows(&report.seo.meta)
                    .into_iter()
                    .chain(seo_structure_rows(&report.seo.structure))
                {
                    out.push_str(&format!("- {} {}\n", check_mark(present), label));
                }
                out.push('\n');
            }
            Category::Accessibility => {
                out.push_str(&format!(
                    "**WCAG {}** compliance: {}%\n\n",
                    report.accessibility.wcag.level, report.accessibility.wcag.compliance
                ));
            }
        }

        let issues = report.issues(category);
        if !issues.is_empty() {
            out.push_str("### Issues\n\n");
            for issue in issues {
                out.push_str(&format!("- {}\n", issue));
            }
            out.push('\n');
        }

        out.push_str("### Recommendations\n\n");
        for (idx, recommendation) in report.recommendations(category).iter().enumerate() {
            out.push_str(&format!("{}. {}\n", idx + 1, recommendation));
        }
        out.push('\n');
    }

    out
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.len() + word.len() + 1 > width - indent.len() && !current_line.is_empty() {
            result.push_str(indent);
            result.push_str(&current_line);
            result.push('\n');
            current_line.clear();
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        result.push_str(indent);
        result.push_str(&current_line);
        result.push('\n');
    }

    result
}
