// Formatting helpers shared by the text report and the terminal dashboard

use chrono::{DateTime, Utc};
use sitelens_scanner::result::{Metric, PerformanceMetrics, SecurityHeaders, SeoMeta, SeoStructure};
use sitelens_scanner::Rating;

/// Colour bucket for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 90 {
            ScoreBand::Good
        } else if score >= 80 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Fcp,
    Lcp,
    Cls,
    Fid,
    Ttfb,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Fcp,
        MetricKind::Lcp,
        MetricKind::Cls,
        MetricKind::Fid,
        MetricKind::Ttfb,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Fcp => "First Contentful Paint",
            MetricKind::Lcp => "Largest Contentful Paint",
            MetricKind::Cls => "Cumulative Layout Shift",
            MetricKind::Fid => "First Input Delay",
            MetricKind::Ttfb => "Time to First Byte",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MetricKind::Fcp => "Time until first content appears",
            MetricKind::Lcp => "Time until largest content loads",
            MetricKind::Cls => "Visual stability metric",
            MetricKind::Fid => "Time to first interaction",
            MetricKind::Ttfb => "Server response time",
        }
    }

    /// Paint times in seconds, layout shift unitless, delays in milliseconds.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            MetricKind::Fcp | MetricKind::Lcp => format!("{:.1}s", value),
            MetricKind::Cls => format!("{:.3}", value),
            MetricKind::Fid | MetricKind::Ttfb => format!("{}ms", value.round() as i64),
        }
    }

    pub fn pick<'a>(&self, metrics: &'a PerformanceMetrics) -> &'a Metric {
        match self {
            MetricKind::Fcp => &metrics.fcp,
            MetricKind::Lcp => &metrics.lcp,
            MetricKind::Cls => &metrics.cls,
            MetricKind::Fid => &metrics.fid,
            MetricKind::Ttfb => &metrics.ttfb,
        }
    }
}

pub fn rating_label(rating: Rating) -> &'static str {
    match rating {
        Rating::Good => "GOOD",
        Rating::NeedsImprovement => "NEEDS IMPROVEMENT",
        Rating::Poor => "POOR",
    }
}

pub fn rating_icon(rating: Rating) -> &'static str {
    match rating {
        Rating::Good => "✅",
        Rating::NeedsImprovement => "⚠️",
        Rating::Poor => "❌",
    }
}

pub fn check_mark(present: bool) -> &'static str {
    if present { "✓" } else { "✗" }
}

/// e.g. `Oct 16, 2026, 08:10 PM`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y, %I:%M %p").to_string()
}

pub fn security_header_rows(headers: &SecurityHeaders) -> [(&'static str, bool); 4] {
    [
        ("HSTS", headers.hsts),
        ("CSP", headers.csp),
        ("X-Frame-Options", headers.xframe),
        ("XSS Protection", headers.xss),
    ]
}

pub fn seo_meta_rows(meta: &SeoMeta) -> [(&'static str, bool); 4] {
    [
        ("Title", meta.title),
        ("Description", meta.description),
        ("Keywords", meta.keywords),
        ("Canonical", meta.canonical),
    ]
}

pub fn seo_structure_rows(structure: &SeoStructure) -> [(&'static str, bool); 4] {
    [
        ("Headings", structure.headings),
        ("Sitemap", structure.sitemap),
        ("Robots", structure.robots),
        ("Schema", structure.schema),
    ]
}

pub const RECOMMENDATIONS_TIP: &str = "Implementing these recommendations can significantly improve \
    your website's performance and user experience. Start with the highest-impact changes first.";
