// Fixed issue candidates and recommendations per category

use crate::result::Category;
use rand::Rng;

pub const PERFORMANCE_ISSUES: [&str; 3] = [
    "Large images not optimized",
    "Unused JavaScript detected",
    "Render-blocking resources found",
];

pub const PERFORMANCE_RECOMMENDATIONS: [&str; 4] = [
    "Optimize images and use next-gen formats",
    "Remove unused code and dependencies",
    "Implement lazy loading for images",
    "Use a CDN for static assets",
];

pub const SECURITY_ISSUES: [&str; 3] = [
    "Missing HSTS header",
    "Content Security Policy not configured",
    "X-Frame-Options header missing",
];

pub const SECURITY_RECOMMENDATIONS: [&str; 4] = [
    "Implement HSTS with long max-age",
    "Configure Content Security Policy",
    "Add security headers to prevent clickjacking",
    "Regular security updates and patches",
];

pub const SEO_ISSUES: [&str; 3] = [
    "Missing meta description",
    "Duplicate H1 tags found",
    "No structured data detected",
];

pub const SEO_RECOMMENDATIONS: [&str; 4] = [
    "Add unique meta descriptions for all pages",
    "Implement proper heading hierarchy",
    "Add structured data markup",
    "Optimize page titles for search engines",
];

pub const ACCESSIBILITY_ISSUES: [&str; 3] = [
    "Images missing alt text",
    "Low color contrast detected",
    "Focus indicators missing",
];

pub const ACCESSIBILITY_RECOMMENDATIONS: [&str; 4] = [
    "Add descriptive alt text to all images",
    "Improve color contrast ratios",
    "Ensure keyboard navigation support",
    "Use semantic HTML elements",
];

/// How a category picks its issues out of the candidate list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IssuePolicy {
    /// Keep a random-length prefix of at least one candidate.
    Truncate,
    /// Keep each candidate on its own when a uniform draw exceeds `keep_above`.
    Independent { keep_above: f64 },
}

impl IssuePolicy {
    pub fn select<R: Rng + ?Sized>(&self, candidates: &[&str], rng: &mut R) -> Vec<String> {
        match *self {
            IssuePolicy::Truncate => {
                if candidates.is_empty() {
                    return Vec::new();
                }
                let len = rng.gen_range(1..=candidates.len());
                candidates[..len].iter().map(|s| s.to_string()).collect()
            }
            IssuePolicy::Independent { keep_above } => candidates
                .iter()
                .filter(|_| rng.r#gen::<f64>() > keep_above)
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Category {
    pub fn candidate_issues(&self) -> &'static [&'static str] {
        match self {
            Category::Performance => &PERFORMANCE_ISSUES,
            Category::Security => &SECURITY_ISSUES,
            Category::Seo => &SEO_ISSUES,
            Category::Accessibility => &ACCESSIBILITY_ISSUES,
        }
    }

    pub fn fixed_recommendations(&self) -> &'static [&'static str] {
        match self {
            Category::Performance => &PERFORMANCE_RECOMMENDATIONS,
            Category::Security => &SECURITY_RECOMMENDATIONS,
            Category::Seo => &SEO_RECOMMENDATIONS,
            Category::Accessibility => &ACCESSIBILITY_RECOMMENDATIONS,
        }
    }

    pub fn issue_policy(&self) -> IssuePolicy {
        match self {
            Category::Performance => IssuePolicy::Truncate,
            Category::Security => IssuePolicy::Independent { keep_above: 0.6 },
            Category::Seo => IssuePolicy::Independent { keep_above: 0.5 },
            Category::Accessibility => IssuePolicy::Independent { keep_above: 0.6 },
        }
    }

    pub fn recommendations(&self) -> Vec<String> {
        self.fixed_recommendations()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_truncate_keeps_non_empty_prefix() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..200 {
            let issues = IssuePolicy::Truncate.select(&PERFORMANCE_ISSUES, &mut rng);
            assert!(!issues.is_empty());
            assert!(issues.len() <= PERFORMANCE_ISSUES.len());
            for (i, issue) in issues.iter().enumerate() {
                assert_eq!(issue, PERFORMANCE_ISSUES[i]);
            }
        }
    }

    #[test]
    fn test_truncate_reaches_every_length() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut seen = [false; 3];
        for _ in 0..500 {
            let len = IssuePolicy::Truncate.select(&PERFORMANCE_ISSUES, &mut rng).len();
            seen[len - 1] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_independent_preserves_order() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let policy = IssuePolicy::Independent { keep_above: 0.5 };
        for _ in 0..200 {
            let issues = policy.select(&SEO_ISSUES, &mut rng);
            let positions: Vec<usize> = issues
                .iter()
                .map(|issue| SEO_ISSUES.iter().position(|c| c == issue).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_independent_can_be_empty() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let never = IssuePolicy::Independent { keep_above: 1.0 };
        assert!(never.select(&SECURITY_ISSUES, &mut rng).is_empty());
    }

    #[test]
    fn test_policies_per_category() {
        assert_eq!(Category::Performance.issue_policy(), IssuePolicy::Truncate);
        assert!(matches!(
            Category::Security.issue_policy(),
            IssuePolicy::Independent { .. }
        ));
        assert!(matches!(
            Category::Seo.issue_policy(),
            IssuePolicy::Independent { keep_above } if keep_above == 0.5
        ));
    }

    #[test]
    fn test_recommendations_are_fixed() {
        assert_eq!(
            Category::Accessibility.recommendations(),
            ACCESSIBILITY_RECOMMENDATIONS.to_vec()
        );
        assert_eq!(Category::Performance.recommendations().len(), 4);
    }
}
