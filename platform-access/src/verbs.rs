//! Verb expansion.

use std::collections::BTreeSet;

use platform_rbac::{Verb, VERB_ALL};

/// Expand a rule's verbs into the set reported for a subject.
///
/// A list containing the `"*"` sentinel becomes exactly the canonical
/// vocabulary of [`Verb::all`]; other verbs listed next to it are dropped.
/// Otherwise the verbs are returned deduplicated, including verbs outside
/// the canonical vocabulary.
///
/// # Example
///
/// ```
/// use platform_access::verbs::expand;
///
/// let verbs = expand(&["get".to_string(), "get".to_string(), "escalate".to_string()]);
/// assert_eq!(verbs.len(), 2);
///
/// let all = expand(&["*".to_string()]);
/// assert_eq!(all.len(), 8);
/// ```
pub fn expand(verbs: &[String]) -> BTreeSet<String> {
    if verbs.iter().any(|v| v == VERB_ALL) {
        return canonical_verbs();
    }
    verbs.iter().cloned().collect()
}

/// The canonical vocabulary as strings.
pub fn canonical_verbs() -> BTreeSet<String> {
    Verb::all().iter().map(|v| v.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_verbs_are_deduplicated() {
        let verbs = expand(&strings(&["list", "get", "list"]));
        assert_eq!(verbs, BTreeSet::from(["get".to_string(), "list".to_string()]));
    }

    #[test]
    fn test_sentinel_expands_to_vocabulary() {
        let verbs = expand(&strings(&["*"]));
        assert_eq!(verbs, canonical_verbs());
        assert!(verbs.contains("deletecollection"));
        assert!(!verbs.contains("*"));
    }

    #[test]
    fn test_sentinel_ignores_neighbours() {
        let verbs = expand(&strings(&["impersonate", "*", "get"]));
        assert_eq!(verbs, canonical_verbs());
        assert!(!verbs.contains("impersonate"));
    }

    #[test]
    fn test_empty_input() {
        assert!(expand(&[]).is_empty());
    }
}
