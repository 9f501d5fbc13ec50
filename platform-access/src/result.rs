//! # Subject Access
//!
//! The outcome of an access query: who holds which verbs on the target.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::{BTreeMap, BTreeSet};

use platform_rbac::{Subject, TargetResource};

/// Verbs each subject holds on a target resource.
///
/// Built once by the aggregator and read-only afterwards. A subject present
/// in the mapping always holds at least one verb.
///
/// Serializes as
/// `{"target": {...}, "subjects": [{"kind", "name", "verbs": [...]}]}`,
/// subjects and verbs in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAccess {
    target: TargetResource,
    verbs: BTreeMap<Subject, BTreeSet<String>>,
}

impl SubjectAccess {
    pub(crate) fn new(target: TargetResource, mut verbs: BTreeMap<Subject, BTreeSet<String>>) -> Self {
        verbs.retain(|_, set| !set.is_empty());
        Self { target, verbs }
    }

    /// The resource this result was computed for.
    pub fn target(&self) -> &TargetResource {
        &self.target
    }

    /// The full subject → verbs mapping.
    pub fn get(&self) -> &BTreeMap<Subject, BTreeSet<String>> {
        &self.verbs
    }

    /// Verbs held by a subject, `None` if it holds none.
    pub fn verbs_for(&self, subject: &Subject) -> Option<&BTreeSet<String>> {
        self.verbs.get(subject)
    }

    /// Check if a subject holds a verb.
    pub fn has_verb(&self, subject: &Subject, verb: &str) -> bool {
        self.verbs_for(subject).is_some_and(|verbs| verbs.contains(verb))
    }

    /// Subjects holding any verb, in sorted order.
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.verbs.keys()
    }

    /// Iterate over `(subject, verbs)` in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&Subject, &BTreeSet<String>)> {
        self.verbs.iter()
    }

    /// Number of subjects holding any verb.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Check if nobody holds any verb.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Consume the result, returning the mapping.
    pub fn into_inner(self) -> BTreeMap<Subject, BTreeSet<String>> {
        self.verbs
    }
}

#[derive(serde::Serialize)]
struct SubjectEntry<'a> {
    kind: &'a str,
    name: &'a str,
    verbs: &'a BTreeSet<String>,
}

impl Serialize for SubjectAccess {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let subjects: Vec<SubjectEntry<'_>> = self
            .verbs
            .iter()
            .map(|(subject, verbs)| SubjectEntry {
                kind: &subject.kind,
                name: &subject.name,
                verbs,
            })
            .collect();

        let mut state = serializer.serialize_struct("SubjectAccess", 2)?;
        state.serialize_field("target", &self.target)?;
        state.serialize_field("subjects", &subjects)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verbs(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_verb_sets_are_dropped() {
        let mut map = BTreeMap::new();
        map.insert(Subject::user("a"), verbs(&["get"]));
        map.insert(Subject::user("b"), BTreeSet::new());

        let access = SubjectAccess::new(TargetResource::core("pods"), map);
        assert_eq!(access.len(), 1);
        assert!(access.verbs_for(&Subject::user("b")).is_none());
    }

    #[test]
    fn test_accessors() {
        let mut map = BTreeMap::new();
        map.insert(Subject::user("a"), verbs(&["get", "list"]));
        map.insert(Subject::group("g"), verbs(&["watch"]));

        let access = SubjectAccess::new(TargetResource::core("pods"), map);
        assert_eq!(access.target(), &TargetResource::core("pods"));
        assert!(access.has_verb(&Subject::user("a"), "list"));
        assert!(!access.has_verb(&Subject::user("a"), "watch"));
        assert!(!access.has_verb(&Subject::user("missing"), "get"));

        let kinds: Vec<&str> = access.subjects().map(|s| s.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Group", "User"]);
        assert_eq!(access.iter().count(), 2);
    }

    #[test]
    fn test_serialize() {
        let mut map = BTreeMap::new();
        map.insert(Subject::user("alice"), verbs(&["list", "create"]));

        let access = SubjectAccess::new(TargetResource::new("apps", "deployments"), map);
        let json = serde_json::to_value(&access).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "target": {"group": "apps", "resource": "deployments"},
                "subjects": [
                    {"kind": "User", "name": "alice", "verbs": ["create", "list"]}
                ]
            })
        );
    }
}
