//! Snapshot of the rights graph
//!
//! The four materialized lists an access query is answered from.

use serde::{Deserialize, Serialize};

use crate::bindings::{ClusterRoleBinding, RoleBinding};
use crate::roles::{ClusterRole, Role};

/// Roles, cluster roles and their bindings, as read from a backend at one
/// point in time.
///
/// Entities cross-reference each other by name, so the snapshot carries no
/// ordering or linking requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RbacSnapshot {
    /// Cluster-scoped roles
    #[serde(default)]
    pub cluster_roles: Vec<ClusterRole>,

    /// Cluster-scoped bindings
    #[serde(default)]
    pub cluster_role_bindings: Vec<ClusterRoleBinding>,

    /// Namespace-scoped roles of every namespace
    #[serde(default)]
    pub roles: Vec<Role>,

    /// Namespace-scoped bindings of every namespace
    #[serde(default)]
    pub role_bindings: Vec<RoleBinding>,
}

impl RbacSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cluster role.
    pub fn with_cluster_role(mut self, role: ClusterRole) -> Self {
        self.cluster_roles.push(role);
        self
    }

    /// Add a cluster role binding.
    pub fn with_cluster_role_binding(mut self, binding: ClusterRoleBinding) -> Self {
        self.cluster_role_bindings.push(binding);
        self
    }

    /// Add a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Add a role binding.
    pub fn with_role_binding(mut self, binding: RoleBinding) -> Self {
        self.role_bindings.push(binding);
        self
    }

    /// Roles declared in a namespace, or all roles for `None`.
    pub fn roles_in(&self, namespace: Option<&str>) -> Vec<Role> {
        self.roles
            .iter()
            .filter(|r| namespace.map_or(true, |ns| r.namespace == ns))
            .cloned()
            .collect()
    }

    /// Role bindings declared in a namespace, or all of them for `None`.
    pub fn role_bindings_in(&self, namespace: Option<&str>) -> Vec<RoleBinding> {
        self.role_bindings
            .iter()
            .filter(|b| namespace.map_or(true, |ns| b.namespace == ns))
            .cloned()
            .collect()
    }

    /// Check if the snapshot holds nothing at all.
    pub fn is_empty(&self) -> bool {
        self.cluster_roles.is_empty()
            && self.cluster_role_bindings.is_empty()
            && self.roles.is_empty()
            && self.role_bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::RoleRef;

    #[test]
    fn test_namespace_filters() {
        let snapshot = RbacSnapshot::new()
            .with_role(Role::new("a", "r1"))
            .with_role(Role::new("b", "r2"))
            .with_role_binding(RoleBinding::new("a", "b1", RoleRef::role("r1")))
            .with_role_binding(RoleBinding::new("b", "b2", RoleRef::role("r2")));

        assert_eq!(snapshot.roles_in(Some("a")).len(), 1);
        assert_eq!(snapshot.roles_in(None).len(), 2);
        assert_eq!(snapshot.role_bindings_in(Some("b"))[0].name, "b2");
        assert!(snapshot.role_bindings_in(Some("c")).is_empty());
    }

    #[test]
    fn test_deserialize_partial_snapshot() {
        let snapshot: RbacSnapshot =
            serde_json::from_str(r#"{"clusterRoles": [{"name": "view"}]}"#).unwrap();
        assert_eq!(snapshot.cluster_roles.len(), 1);
        assert!(snapshot.roles.is_empty());
        assert!(!snapshot.is_empty());
        assert!(RbacSnapshot::new().is_empty());
    }
}
