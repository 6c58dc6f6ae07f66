use crate::error::{Result, ScanError};
use crate::result::{
    AccessibilityResult, AuditReport, Category, Grade, Metric, Overall, PerformanceMetrics,
    PerformanceResult, Rating, SecurityHeaders, SecurityResult, SeoMeta, SeoResult, SeoStructure,
    SslInfo, SslStatus, WcagInfo, WcagLevel,
};
use crate::target::NormalizedUrl;
use chrono::{DateTime, Utc};
use futures::future::{AbortHandle, Abortable, Aborted, BoxFuture, FutureExt};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Stand-in for the time a real audit would spend on the network.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(3000);

const SSL_GRADES: [Grade; 4] = [Grade::APlus, Grade::A, Grade::BPlus, Grade::B];

/// Produces synthetic audit reports after a fixed artificial delay.
#[derive(Debug, Clone)]
pub struct MockAuditor {
    latency: Duration,
    seed: Option<u64>,
}

impl MockAuditor {
    pub fn new() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            seed: None,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Every report generated by a seeded auditor carries the same values.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        }
    }

    /// Wait out the simulated latency, then build the report.
    pub async fn generate(&self, url: NormalizedUrl, now: DateTime<Utc>) -> AuditReport {
        info!("Auditing {} ({}ms simulated latency)", url, self.latency.as_millis());
        tokio::time::sleep(self.latency).await;
        let report = build_report(url, now, &mut self.rng());
        debug!(
            "Audit of {} finished: score {} grade {}",
            report.url, report.overall.score, report.overall.grade
        );
        report
    }

    /// Wrap [`generate`](Self::generate) in a future that can be cancelled
    /// through the returned request's handle.
    pub fn start(&self, url: NormalizedUrl, now: DateTime<Utc>) -> PendingAudit {
        let token = Uuid::new_v4();
        let (abort, registration) = AbortHandle::new_pair();
        let auditor = self.clone();
        let future = async move { auditor.generate(url, now).await }.boxed();

        debug!("Prepared audit request {}", token);

        PendingAudit {
            handle: AuditHandle { token, abort },
            future: Abortable::new(future, registration),
        }
    }
}

impl Default for MockAuditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancels one in-flight audit.
#[derive(Debug, Clone)]
pub struct AuditHandle {
    token: Uuid,
    abort: AbortHandle,
}

impl AuditHandle {
    pub fn token(&self) -> Uuid {
        self.token
    }

    pub fn cancel(&self) {
        info!("Cancelling audit {}", self.token);
        self.abort.abort();
    }
}

/// An audit bound to a request token that has not been driven yet.
pub struct PendingAudit {
    handle: AuditHandle,
    future: Abortable<BoxFuture<'static, AuditReport>>,
}

impl PendingAudit {
    pub fn token(&self) -> Uuid {
        self.handle.token
    }

    pub fn handle(&self) -> AuditHandle {
        self.handle.clone()
    }

    pub async fn run(self) -> Result<AuditReport> {
        let token = self.handle.token;
        match self.future.await {
            Ok(report) => Ok(report),
            Err(Aborted) => Err(ScanError::Cancelled(token)),
        }
    }
}

/// Build a report from the given randomness source. No waiting happens here.
pub fn build_report<R: Rng + ?Sized>(
    url: NormalizedUrl,
    now: DateTime<Utc>,
    rng: &mut R,
) -> AuditReport {
    let overall = Overall::from_score(rng.gen_range(70..100));

    AuditReport {
        url,
        timestamp: now,
        overall,
        performance: build_performance(rng),
        security: build_security(rng),
        seo: build_seo(rng),
        accessibility: build_accessibility(rng),
    }
}

/// Uniform draw strictly above `threshold`.
fn coin<R: Rng + ?Sized>(rng: &mut R, threshold: f64) -> bool {
    rng.r#gen::<f64>() > threshold
}

// Ratings come from their own coin flip and ignore the metric value.
fn metric<R: Rng + ?Sized>(
    rng: &mut R,
    base: f64,
    spread: f64,
    good_above: f64,
    otherwise: Rating,
) -> Metric {
    let value = rng.r#gen::<f64>() * spread + base;
    let rating = if coin(rng, good_above) {
        Rating::Good
    } else {
        otherwise
    };
    Metric { value, rating }
}

fn build_performance<R: Rng + ?Sized>(rng: &mut R) -> PerformanceResult {
    let score = rng.gen_range(75..100);
    let metrics = PerformanceMetrics {
        fcp: metric(rng, 1.0, 2.0, 0.5, Rating::NeedsImprovement),
        lcp: metric(rng, 1.5, 3.0, 0.3, Rating::Poor),
        cls: metric(rng, 0.0, 0.25, 0.4, Rating::NeedsImprovement),
        fid: metric(rng, 50.0, 150.0, 0.6, Rating::NeedsImprovement),
        ttfb: metric(rng, 200.0, 400.0, 0.5, Rating::NeedsImprovement),
    };
    let category = Category::Performance;

    PerformanceResult {
        score,
        metrics,
        issues: category.issue_policy().select(category.candidate_issues(), rng),
        recommendations: category.recommendations(),
    }
}

fn build_security<R: Rng + ?Sized>(rng: &mut R) -> SecurityResult {
    let score = rng.gen_range(80..100);
    let status = if coin(rng, 0.2) {
        SslStatus::Valid
    } else {
        SslStatus::IssuesFound
    };
    let grade = *SSL_GRADES.choose(rng).unwrap_or(&Grade::B);
    let headers = SecurityHeaders {
        hsts: coin(rng, 0.3),
        csp: coin(rng, 0.5),
        xframe: coin(rng, 0.2),
        xss: coin(rng, 0.1),
    };
    let category = Category::Security;

    SecurityResult {
        score,
        ssl: SslInfo { status, grade },
        headers,
        issues: category.issue_policy().select(category.candidate_issues(), rng),
        recommendations: category.recommendations(),
    }
}

fn build_seo<R: Rng + ?Sized>(rng: &mut R) -> SeoResult {
    let score = rng.gen_range(75..100);
    let meta = SeoMeta {
        title: coin(rng, 0.1),
        description: coin(rng, 0.2),
        keywords: coin(rng, 0.7),
        canonical: coin(rng, 0.4),
    };
    let structure = SeoStructure {
        headings: coin(rng, 0.3),
        sitemap: coin(rng, 0.4),
        robots: coin(rng, 0.2),
        schema: coin(rng, 0.6),
    };
    let category = Category::Seo;

    SeoResult {
        score,
        meta,
        structure,
        issues: category.issue_policy().select(category.candidate_issues(), rng),
        recommendations: category.recommendations(),
    }
}

fn build_accessibility<R: Rng + ?Sized>(rng: &mut R) -> AccessibilityResult {
    let score = rng.gen_range(70..100);
    let wcag = WcagInfo {
        level: WcagLevel::AA,
        compliance: rng.gen_range(80..100),
    };
    let category = Category::Accessibility;

    AccessibilityResult {
        score,
        wcag,
        issues: category.issue_policy().select(category.candidate_issues(), rng),
        recommendations: category.recommendations(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PERFORMANCE_ISSUES, SECURITY_RECOMMENDATIONS};
    use crate::target::validate;

    fn example_url() -> NormalizedUrl {
        validate("example.com").unwrap()
    }

    fn assert_subsequence(issues: &[String], candidates: &[&str]) {
        let mut remaining = candidates.iter();
        for issue in issues {
            assert!(
                remaining.any(|c| c == issue),
                "issue {:?} not an in-order member of {:?}",
                issue,
                candidates
            );
        }
    }

    #[test]
    fn test_report_invariants_hold_across_many_seeds() {
        for seed in 0..500 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let report = build_report(example_url(), Utc::now(), &mut rng);

            assert!((70..=99).contains(&report.overall.score));
            assert_eq!(report.overall.grade, Grade::from_score(report.overall.score));
            assert!((75..=99).contains(&report.performance.score));
            assert!((80..=99).contains(&report.security.score));
            assert!((75..=99).contains(&report.seo.score));
            assert!((70..=99).contains(&report.accessibility.score));
            assert!((80..=99).contains(&report.accessibility.wcag.compliance));
            assert_eq!(report.accessibility.wcag.level, WcagLevel::AA);

            for category in Category::ALL {
                assert_subsequence(report.issues(category), category.candidate_issues());
                assert_eq!(
                    report.recommendations(category),
                    category.recommendations().as_slice()
                );
            }
            assert!(!report.performance.issues.is_empty());
            assert!(SSL_GRADES.contains(&report.security.ssl.grade));
        }
    }

    #[test]
    fn test_metric_values_stay_in_range() {
        for seed in 0..500 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let m = build_report(example_url(), Utc::now(), &mut rng)
                .performance
                .metrics;

            assert!((1.0..3.0).contains(&m.fcp.value));
            assert!((1.5..4.5).contains(&m.lcp.value));
            assert!((0.0..0.25).contains(&m.cls.value));
            assert!((50.0..200.0).contains(&m.fid.value));
            assert!((200.0..600.0).contains(&m.ttfb.value));

            assert_ne!(m.fcp.rating, Rating::Poor);
            assert_ne!(m.lcp.rating, Rating::NeedsImprovement);
            assert_ne!(m.cls.rating, Rating::Poor);
        }
    }

    #[test]
    fn test_rating_independent_of_value() {
        // A slow first paint can still be rated good
        let mut good_and_slow = false;
        for seed in 0..2000 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let fcp = build_report(example_url(), Utc::now(), &mut rng)
                .performance
                .metrics
                .fcp;
            if fcp.value > 2.5 && fcp.rating == Rating::Good {
                good_and_slow = true;
                break;
            }
        }
        assert!(good_and_slow);
    }

    #[test]
    fn test_seeded_reports_are_identical() {
        let now = Utc::now();
        let mut a = ChaCha20Rng::seed_from_u64(42);
        let mut b = ChaCha20Rng::seed_from_u64(42);
        assert_eq!(
            build_report(example_url(), now, &mut a),
            build_report(example_url(), now, &mut b)
        );
    }

    #[test]
    fn test_static_lists_match_catalog() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let report = build_report(example_url(), Utc::now(), &mut rng);
        assert_eq!(report.security.recommendations, SECURITY_RECOMMENDATIONS.to_vec());
        assert_eq!(report.performance.issues[0], PERFORMANCE_ISSUES[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_waits_for_latency() {
        let auditor = MockAuditor::new().with_seed(9);
        let start = tokio::time::Instant::now();

        let report = auditor.generate(example_url(), Utc::now()).await;

        assert!(start.elapsed() >= DEFAULT_LATENCY);
        assert_eq!(report.url.as_str(), "https://example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_latency() {
        let auditor = MockAuditor::new().with_latency(Duration::from_millis(250));
        let start = tokio::time::Instant::now();

        auditor.generate(example_url(), Utc::now()).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(250));
        assert!(elapsed < DEFAULT_LATENCY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_runs_to_completion() {
        let auditor = MockAuditor::new().with_seed(3);
        let pending = auditor.start(example_url(), Utc::now());
        let token = pending.token();

        let report = pending.run().await.unwrap();

        assert_eq!(report.url.as_str(), "https://example.com");
        assert!(!token.is_nil());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_audit_reports_token() {
        let auditor = MockAuditor::new();
        let pending = auditor.start(example_url(), Utc::now());
        let handle = pending.handle();
        let token = handle.token();

        let task = tokio::spawn(pending.run());
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.cancel();

        match task.await.unwrap() {
            Err(ScanError::Cancelled(t)) => assert_eq!(t, token),
            other => panic!("expected cancellation, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_start_gets_a_fresh_token() {
        let auditor = MockAuditor::new();
        let first = auditor.start(example_url(), Utc::now());
        let second = auditor.start(example_url(), Utc::now());
        assert_ne!(first.token(), second.token());
    }
}
