use std::fmt;

/// Domain-name matcher, compiled once at configuration time.
///
/// A pattern containing `*` or `?` becomes a wildcard matcher, anything
/// else matches by case-insensitive equality. Trailing root dots are
/// ignored on both sides so `mail.example.com.` matches `mail.example.com`.
#[derive(Debug, Clone)]
pub enum DomainMatcher {
    Exact(String),
    Wildcard(String),
}

impl DomainMatcher {
    pub fn compile(pattern: &str) -> Self {
        let normalized = normalize(pattern);
        if normalized.contains('*') || normalized.contains('?') {
            DomainMatcher::Wildcard(normalized)
        } else {
            DomainMatcher::Exact(normalized)
        }
    }

    /// Equality matcher even when the pattern contains glob metacharacters
    /// (a zone may legitimately own a `*.` wildcard record name).
    pub fn exact(pattern: &str) -> Self {
        DomainMatcher::Exact(normalize(pattern))
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = normalize(name);
        match self {
            DomainMatcher::Exact(pattern) => pattern == &name,
            DomainMatcher::Wildcard(pattern) => wildcard_match(pattern, &name),
        }
    }
}

impl fmt::Display for DomainMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainMatcher::Exact(p) | DomainMatcher::Wildcard(p) => write!(f, "{}", p),
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// Glob match with `*` (any run, including across label dots) and `?`
/// (any single character).
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();

    // Iterative glob with single-star backtracking.
    let (mut pi, mut ni) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;

    while ni < n.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ni));
            pi += 1;
        } else if let Some((star_pi, star_ni)) = star {
            pi = star_pi + 1;
            ni = star_ni + 1;
            star = Some((star_pi, star_ni + 1));
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

/// Query names exempted from MX interception. Evaluated before any cache
/// or network activity.
#[derive(Debug, Clone, Default)]
pub struct SkipList {
    matchers: Vec<DomainMatcher>,
}

impl SkipList {
    pub fn compile(patterns: &[String]) -> Self {
        Self {
            matchers: patterns
                .iter()
                .map(|pattern| DomainMatcher::compile(pattern))
                .collect(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.matchers.iter().any(|matcher| matcher.matches(name))
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
