//! Binding resolution
//!
//! Follows a binding's role reference into the role or cluster role catalog
//! and yields the rules it confers.

use std::collections::HashMap;

use platform_rbac::{Binding, BindingScope, ClusterRole, PolicyRule, Role, RoleRefKind};

use crate::error::{AccessError, AccessResult};

/// Roles indexed by `(namespace, name)`.
///
/// When the input lists the same identity twice, the later entry wins.
#[derive(Debug, Default)]
pub struct RoleCatalog<'a> {
    by_namespace: HashMap<&'a str, HashMap<&'a str, &'a Role>>,
}

impl<'a> RoleCatalog<'a> {
    /// Index a list of roles.
    pub fn new(roles: &'a [Role]) -> Self {
        let mut by_namespace: HashMap<&'a str, HashMap<&'a str, &'a Role>> = HashMap::new();
        for role in roles {
            by_namespace
                .entry(role.namespace.as_str())
                .or_default()
                .insert(role.name.as_str(), role);
        }
        Self { by_namespace }
    }

    /// Look up a role by identity.
    pub fn get(&self, namespace: &str, name: &str) -> Option<&'a Role> {
        self.by_namespace
            .get(namespace)
            .and_then(|roles| roles.get(name))
            .copied()
    }

    /// Number of indexed roles.
    pub fn len(&self) -> usize {
        self.by_namespace.values().map(HashMap::len).sum()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cluster roles indexed by name.
#[derive(Debug, Default)]
pub struct ClusterRoleCatalog<'a> {
    by_name: HashMap<&'a str, &'a ClusterRole>,
}

impl<'a> ClusterRoleCatalog<'a> {
    /// Index a list of cluster roles.
    pub fn new(cluster_roles: &'a [ClusterRole]) -> Self {
        Self {
            by_name: cluster_roles.iter().map(|r| (r.name.as_str(), r)).collect(),
        }
    }

    /// Look up a cluster role by name.
    pub fn get(&self, name: &str) -> Option<&'a ClusterRole> {
        self.by_name.get(name).copied()
    }

    /// Number of indexed cluster roles.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Resolve a binding to the rules of the role it references.
///
/// - `ClusterRole` references are looked up by name, from either binding type.
/// - `Role` references are looked up in the binding's own namespace. A
///   cluster role binding may not reference a `Role`.
/// - Any other kind is rejected.
///
/// # Errors
///
/// [`AccessError::ReferenceNotFound`] if the referent is missing,
/// [`AccessError::UnsupportedReferenceKind`] for an unrecognised kind or a
/// cluster-scoped `Role` reference.
pub fn resolve<'a, B>(
    binding: &B,
    roles: &RoleCatalog<'a>,
    cluster_roles: &ClusterRoleCatalog<'a>,
) -> AccessResult<&'a [PolicyRule]>
where
    B: Binding + ?Sized,
{
    let role_ref = binding.role_ref();

    match (role_ref.parsed_kind(), binding.scope()) {
        (Some(RoleRefKind::ClusterRole), _) => cluster_roles
            .get(&role_ref.name)
            .map(|role| role.rules.as_slice())
            .ok_or_else(|| AccessError::ReferenceNotFound {
                kind: role_ref.kind.clone(),
                name: role_ref.name.clone(),
                namespace: None,
            }),
        (Some(RoleRefKind::Role), BindingScope::Namespace(namespace)) => roles
            .get(namespace, &role_ref.name)
            .map(|role| role.rules.as_slice())
            .ok_or_else(|| AccessError::ReferenceNotFound {
                kind: role_ref.kind.clone(),
                name: role_ref.name.clone(),
                namespace: Some(namespace.to_string()),
            }),
        (Some(RoleRefKind::Role), BindingScope::Cluster) | (None, _) => {
            Err(AccessError::UnsupportedReferenceKind {
                kind: role_ref.kind.clone(),
                binding: binding.name().to_string(),
            })
        }
    }
}
