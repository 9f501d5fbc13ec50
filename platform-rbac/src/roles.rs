//! Roles and cluster roles
//!
//! Named containers of policy rules. A [`Role`] lives in one namespace and is
//! identified by `(namespace, name)`; a [`ClusterRole`] is identified by name
//! alone and is visible from every namespace.

use serde::{Deserialize, Serialize};

use crate::rules::PolicyRule;

/// A namespace-scoped collection of rules.
///
/// # Examples
///
/// ```
/// use platform_rbac::{PolicyRule, Role};
///
/// let role = Role::new("team-a", "deployer")
///     .with_rule(PolicyRule::new(["apps"], ["deployments"], ["create", "update"]));
/// assert_eq!(role.rules.len(), 1);
/// assert_eq!(role.key(), ("team-a", "deployer"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Role name, unique within its namespace
    pub name: String,

    /// Namespace the role is declared in
    pub namespace: String,

    /// Rules granted by the role
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

impl Role {
    /// Creates a role without rules.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: PolicyRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Identity of the role: `(namespace, name)`.
    pub fn key(&self) -> (&str, &str) {
        (&self.namespace, &self.name)
    }
}

/// A cluster-scoped collection of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRole {
    /// Cluster role name, unique across the cluster
    pub name: String,

    /// Rules granted by the cluster role
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

impl ClusterRole {
    /// Creates a cluster role without rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: PolicyRule) -> Self {
        self.rules.push(rule);
        self
    }
}
