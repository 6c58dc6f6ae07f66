use crate::target::NormalizedUrl;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade attached to an overall score (and to the SSL certificate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
}

impl Grade {
    /// Step function over the overall score.
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Grade::APlus,
            85..=89 => Grade::A,
            80..=84 => Grade::BPlus,
            75..=79 => Grade::B,
            70..=74 => Grade::CPlus,
            _ => Grade::C,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Performance,
    Security,
    Seo,
    Accessibility,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Performance,
        Category::Security,
        Category::Seo,
        Category::Accessibility,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Performance => "Performance",
            Category::Security => "Security",
            Category::Seo => "SEO",
            Category::Accessibility => "Accessibility",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Performance => "⚡",
            Category::Security => "🔒",
            Category::Seo => "🔍",
            Category::Accessibility => "♿",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Category::Performance => 0,
            Category::Security => 1,
            Category::Seo => 2,
            Category::Accessibility => 3,
        }
    }

    /// Wraps around after accessibility.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    Good,
    NeedsImprovement,
    Poor,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::NeedsImprovement => "needs-improvement",
            Rating::Poor => "poor",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overall {
    pub score: u8,
    pub grade: Grade,
}

impl Overall {
    pub fn from_score(score: u8) -> Self {
        Self {
            score,
            grade: Grade::from_score(score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub value: f64,
    pub rating: Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub fcp: Metric,
    pub lcp: Metric,
    pub cls: Metric,
    pub fid: Metric,
    pub ttfb: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceResult {
    pub score: u8,
    pub metrics: PerformanceMetrics,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SslStatus {
    Valid,
    #[serde(rename = "Issues Found")]
    IssuesFound,
}

impl SslStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SslStatus::Valid => "Valid",
            SslStatus::IssuesFound => "Issues Found",
        }
    }
}

impl fmt::Display for SslStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslInfo {
    pub status: SslStatus,
    pub grade: Grade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityHeaders {
    pub hsts: bool,
    pub csp: bool,
    pub xframe: bool,
    pub xss: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityResult {
    pub score: u8,
    pub ssl: SslInfo,
    pub headers: SecurityHeaders,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMeta {
    pub title: bool,
    pub description: bool,
    pub keywords: bool,
    pub canonical: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoStructure {
    pub headings: bool,
    pub sitemap: bool,
    pub robots: bool,
    pub schema: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoResult {
    pub score: u8,
    pub meta: SeoMeta,
    pub structure: SeoStructure,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Conformance level the audit checks against. Audits only target AA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WcagLevel {
    AA,
}

impl WcagLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            WcagLevel::AA => "AA",
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WcagInfo {
    pub level: WcagLevel,
    pub compliance: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityResult {
    pub score: u8,
    pub wcag: WcagInfo,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// A complete audit. Built once by the generator and never changed after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub url: NormalizedUrl,
    pub timestamp: DateTime<Utc>,
    pub overall: Overall,
    pub performance: PerformanceResult,
    pub security: SecurityResult,
    pub seo: SeoResult,
    pub accessibility: AccessibilityResult,
}

impl AuditReport {
    pub fn score(&self, category: Category) -> u8 {
        match category {
            Category::Performance => self.performance.score,
            Category::Security => self.security.score,
            Category::Seo => self.seo.score,
            Category::Accessibility => self.accessibility.score,
        }
    }

    pub fn issues(&self, category: Category) -> &[String] {
        match category {
            Category::Performance => &self.performance.issues,
            Category::Security => &self.security.issues,
            Category::Seo => &self.seo.issues,
            Category::Accessibility => &self.accessibility.issues,
        }
    }

    pub fn recommendations(&self, category: Category) -> &[String] {
        match category {
            Category::Performance => &self.performance.recommendations,
            Category::Security => &self.security.recommendations,
            Category::Seo => &self.seo.recommendations,
            Category::Accessibility => &self.accessibility.recommendations,
        }
    }

    pub fn total_issues(&self) -> usize {
        Category::ALL.iter().map(|c| self.issues(*c).len()).sum()
    }
}
