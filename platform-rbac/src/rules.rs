//! # Policy Rules
//!
//! A rule is the unit of grant inside a role: the API groups, resources and
//! verbs it covers. Each dimension is a list of strings in which
//! [`WILDCARD`] matches anything.

use serde::{Deserialize, Serialize};

/// Matches every value of a rule dimension.
pub const WILDCARD: &str = "*";

/// A permission rule declared by a role or cluster role.
///
/// # Example
///
/// ```
/// use platform_rbac::rules::PolicyRule;
///
/// let rule = PolicyRule::new(["apps"], ["deployments"], ["get", "list"]);
/// assert!(rule.covers_group("apps"));
/// assert!(!rule.covers_group(""));
/// assert!(rule.covers_resource("deployments"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    /// API groups the rule applies to (`""` is the core group).
    #[serde(default)]
    pub api_groups: Vec<String>,
    /// Resource types the rule applies to.
    #[serde(default)]
    pub resources: Vec<String>,
    /// Verbs granted; may contain the `"*"` sentinel.
    #[serde(default)]
    pub verbs: Vec<String>,
    /// Optional allow-list of object names. Empty means every object.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_names: Vec<String>,
}

impl PolicyRule {
    /// Create a rule over every object of the given groups and resources.
    pub fn new<G, R, V>(api_groups: G, resources: R, verbs: V) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            api_groups: api_groups.into_iter().map(Into::into).collect(),
            resources: resources.into_iter().map(Into::into).collect(),
            verbs: verbs.into_iter().map(Into::into).collect(),
            resource_names: Vec::new(),
        }
    }

    /// Restrict the rule to the named objects.
    pub fn with_resource_names<N>(mut self, names: N) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
    {
        self.resource_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Check if the rule applies to an API group.
    pub fn covers_group(&self, group: &str) -> bool {
        contains_or_wildcard(&self.api_groups, group)
    }

    /// Check if the rule applies to a resource type.
    pub fn covers_resource(&self, resource: &str) -> bool {
        contains_or_wildcard(&self.resources, resource)
    }

    /// Check if the rule applies to a named object.
    ///
    /// A rule without a name allow-list covers every object.
    pub fn covers_resource_name(&self, name: &str) -> bool {
        self.resource_names.is_empty() || self.resource_names.iter().any(|n| n == name)
    }
}

fn contains_or_wildcard(values: &[String], needle: &str) -> bool {
    values.iter().any(|v| v == WILDCARD || v == needle)
}
