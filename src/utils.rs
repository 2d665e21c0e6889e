// src/utils.rs
use std::collections::HashSet;
use url::Host;

/// Check if a string is a valid domain
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 {
        return false;
    }

    let parts: Vec<&str> = domain.split('.').collect();
    if parts.len() < 2 {
        return false;
    }

    for part in parts {
        if part.is_empty() || part.len() > 63 {
            return false;
        }

        if !part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return false;
        }

        if part.starts_with('-') || part.ends_with('-') {
            return false;
        }
    }

    true
}

/// Turn a user supplied domain into its lower-case ASCII form.
///
/// Unicode labels are converted to punycode, which is how crt.sh stores them.
/// IP addresses and malformed names give `None`.
pub fn normalize_domain(input: &str) -> Option<String> {
    let trimmed = input.trim().trim_end_matches('.');

    match Host::parse(trimmed) {
        Ok(Host::Domain(ascii)) if is_valid_domain(&ascii) => Some(ascii),
        _ => None,
    }
}

/// Normalise one certificate name into a probeable hostname under `domain`.
///
/// Wildcards, e-mail addresses and anything containing whitespace are
/// rejected, since none of them can be requested over HTTP. Names that are
/// neither `domain` itself nor end in `.domain` belong to someone else.
pub fn clean_hostname(name: &str, domain: &str) -> Option<String> {
    let cleaned = name.trim().trim_end_matches('.').to_lowercase();

    if cleaned.is_empty()
        || cleaned.contains('*')
        || cleaned.contains('@')
        || cleaned.chars().any(char::is_whitespace)
    {
        return None;
    }

    let in_scope = cleaned == domain
        || cleaned
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'));

    in_scope.then_some(cleaned)
}

/// Sort the discovered set and keep at most `limit` hosts.
pub fn select_candidates(candidates: HashSet<String>, limit: Option<usize>) -> Vec<String> {
    let mut selected: Vec<String> = candidates.into_iter().collect();
    selected.sort();

    if let Some(limit) = limit {
        selected.truncate(limit);
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(hosts: &[&str]) -> HashSet<String> {
        hosts.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn test_is_valid_domain() {
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("sub.example.com"));
        assert!(!is_valid_domain("example"));
        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain("-example.com"));
        assert!(!is_valid_domain("example-.com"));
        assert!(!is_valid_domain("exa mple.com"));
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("Example.COM."), Some("example.com".to_string()));
        assert_eq!(normalize_domain("bücher.de"), Some("xn--bcher-kva.de".to_string()));
        assert_eq!(normalize_domain("not a domain"), None);
        assert_eq!(normalize_domain("localhost"), None);
        assert_eq!(normalize_domain("127.0.0.1"), None);
    }

    #[test]
    fn test_clean_hostname() {
        let domain = "example.com";
        assert_eq!(clean_hostname(" WWW.Example.com. ", domain), Some("www.example.com".to_string()));
        assert_eq!(clean_hostname("example.com", domain), Some("example.com".to_string()));
        assert_eq!(clean_hostname("*.example.com", domain), None);
        assert_eq!(clean_hostname("admin@example.com", domain), None);
        assert_eq!(clean_hostname("", domain), None);
    }

    #[test]
    fn test_clean_hostname_stays_under_domain() {
        let domain = "example.com";
        assert_eq!(clean_hostname("shop.otherbrand.net", domain), None);
        assert_eq!(clean_hostname("example.com.evil.org", domain), None);
        assert_eq!(clean_hostname("notexample.com", domain), None);
        assert_eq!(clean_hostname("a.b.example.com", domain), Some("a.b.example.com".to_string()));
    }

    #[test]
    fn test_select_candidates_truncates_after_sorting() {
        let candidates = set(&["c.example.com", "a.example.com", "b.example.com"]);
        assert_eq!(
            select_candidates(candidates, Some(2)),
            vec!["a.example.com".to_string(), "b.example.com".to_string()]
        );
    }

    #[test]
    fn test_select_candidates_limit_larger_than_set() {
        let candidates = set(&["b.example.com", "a.example.com"]);
        assert_eq!(select_candidates(candidates.clone(), Some(10)).len(), 2);
        assert_eq!(select_candidates(candidates, None).len(), 2);
    }
}
