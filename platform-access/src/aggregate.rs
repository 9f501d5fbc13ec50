//! Access aggregation
//!
//! Reduces the rights graph to the verbs each subject holds on one target:
//! every binding in scope is resolved to its rules, the rules are filtered
//! against the target, their verbs expanded, and the result unioned into
//! the entry of every subject the binding lists.
//!
//! Cluster role bindings always apply. Role bindings apply only when a
//! namespace is given, and only those declared in it. There is no
//! precedence between binding types: grants only ever accumulate.

use std::collections::{BTreeMap, BTreeSet};

use platform_rbac::{
    Binding, ClusterRole, ClusterRoleBinding, RbacSnapshot, Role, RoleBinding, Subject, TargetResource,
};
use tracing::debug;

use crate::error::AccessResult;
use crate::matcher::matches;
use crate::resolver::{resolve, ClusterRoleCatalog, RoleCatalog};
use crate::result::SubjectAccess;
use crate::verbs::expand;

/// Compute the subjects holding verbs on `target`.
///
/// An empty `namespace` is the global scope: role bindings are skipped
/// entirely. Otherwise the role bindings of that namespace are applied on
/// top of the cluster role bindings.
///
/// # Errors
///
/// The first binding that fails to resolve aborts the call; no partial
/// result is returned.
///
/// # Example
///
/// ```
/// use platform_access::aggregate;
/// use platform_rbac::{
///     ClusterRole, ClusterRoleBinding, PolicyRule, Role, RoleBinding, RoleRef, Subject, TargetResource,
/// };
///
/// let cluster_roles = vec![ClusterRole::new("creator")
///     .with_rule(PolicyRule::new(["apps"], ["deployments"], ["create"]))];
/// let cluster_role_bindings = vec![ClusterRoleBinding::new("creators", RoleRef::cluster_role("creator"))
///     .with_subject(Subject::user("u"))];
/// let roles = vec![Role::new("ns-a", "lister")
///     .with_rule(PolicyRule::new(["apps"], ["deployments"], ["list"]))];
/// let role_bindings = vec![RoleBinding::new("ns-a", "listers", RoleRef::role("lister"))
///     .with_subject(Subject::user("u"))];
///
/// let target = TargetResource::new("apps", "deployments");
/// let access = aggregate(&target, "ns-a", &cluster_roles, &cluster_role_bindings, &roles, &role_bindings)?;
/// assert!(access.has_verb(&Subject::user("u"), "create"));
/// assert!(access.has_verb(&Subject::user("u"), "list"));
///
/// let global = aggregate(&target, "", &cluster_roles, &cluster_role_bindings, &roles, &role_bindings)?;
/// assert!(!global.has_verb(&Subject::user("u"), "list"));
/// # Ok::<(), platform_access::AccessError>(())
/// ```
pub fn aggregate(
    target: &TargetResource,
    namespace: &str,
    cluster_roles: &[ClusterRole],
    cluster_role_bindings: &[ClusterRoleBinding],
    roles: &[Role],
    role_bindings: &[RoleBinding],
) -> AccessResult<SubjectAccess> {
    let mut aggregator = Aggregator::new(target, roles, cluster_roles);

    for binding in cluster_role_bindings {
        aggregator.apply(binding)?;
    }

    if !namespace.is_empty() {
        for binding in role_bindings.iter().filter(|b| b.namespace == namespace) {
            aggregator.apply(binding)?;
        }
    }

    debug!(
        resource = %target,
        namespace = namespace,
        bindings = aggregator.applied,
        subjects = aggregator.granted.len(),
        "aggregated subject access"
    );

    Ok(SubjectAccess::new(target.clone(), aggregator.granted))
}

/// [`aggregate`] over the lists of a snapshot.
pub fn aggregate_snapshot(
    target: &TargetResource,
    namespace: &str,
    snapshot: &RbacSnapshot,
) -> AccessResult<SubjectAccess> {
    aggregate(
        target,
        namespace,
        &snapshot.cluster_roles,
        &snapshot.cluster_role_bindings,
        &snapshot.roles,
        &snapshot.role_bindings,
    )
}

/// Per-call accumulator. Lives only for the duration of one [`aggregate`].
struct Aggregator<'a> {
    target: &'a TargetResource,
    roles: RoleCatalog<'a>,
    cluster_roles: ClusterRoleCatalog<'a>,
    granted: BTreeMap<Subject, BTreeSet<String>>,
    applied: usize,
}

impl<'a> Aggregator<'a> {
    fn new(target: &'a TargetResource, roles: &'a [Role], cluster_roles: &'a [ClusterRole]) -> Self {
        Self {
            target,
            roles: RoleCatalog::new(roles),
            cluster_roles: ClusterRoleCatalog::new(cluster_roles),
            granted: BTreeMap::new(),
            applied: 0,
        }
    }

    fn apply<B: Binding>(&mut self, binding: &B) -> AccessResult<()> {
        let rules = resolve(binding, &self.roles, &self.cluster_roles)?;
        self.applied += 1;

        let verbs: BTreeSet<String> = rules
            .iter()
            .filter(|rule| matches(rule, self.target))
            .flat_map(|rule| expand(&rule.verbs))
            .collect();
        if verbs.is_empty() {
            return Ok(());
        }

        for subject in binding.subjects() {
            self.granted
                .entry(subject.clone())
                .or_default()
                .extend(verbs.iter().cloned());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccessError;
    use crate::verbs::canonical_verbs;
    use platform_rbac::{PolicyRule, RoleRef};

    fn verbs(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn deployments() -> TargetResource {
        TargetResource::new("apps", "deployments")
    }

    #[test]
    fn test_duplicate_subject_is_idempotent() {
        let cluster_roles =
            vec![ClusterRole::new("cr").with_rule(PolicyRule::new(["apps"], ["deployments"], ["get"]))];
        let bindings = vec![ClusterRoleBinding::new("b", RoleRef::cluster_role("cr"))
            .with_subject(Subject::user("u"))
            .with_subject(Subject::user("u"))];

        let access = aggregate(&deployments(), "", &cluster_roles, &bindings, &[], &[]).unwrap();
        assert_eq!(access.len(), 1);
        assert_eq!(access.verbs_for(&Subject::user("u")), Some(&verbs(&["get"])));
    }

    #[test]
    fn test_same_binding_twice_equals_once() {
        let cluster_roles =
            vec![ClusterRole::new("cr").with_rule(PolicyRule::new(["apps"], ["deployments"], ["get", "list"]))];
        let binding =
            ClusterRoleBinding::new("b", RoleRef::cluster_role("cr")).with_subject(Subject::group("devs"));

        let once = aggregate(&deployments(), "", &cluster_roles, &[binding.clone()], &[], &[]).unwrap();
        let twice = aggregate(&deployments(), "", &cluster_roles, &[binding.clone(), binding], &[], &[]).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_binding_order_does_not_matter() {
        let cluster_roles = vec![
            ClusterRole::new("getter").with_rule(PolicyRule::new(["apps"], ["deployments"], ["get"])),
            ClusterRole::new("all").with_rule(PolicyRule::new(["*"], ["*"], ["*"])),
        ];
        let a = ClusterRoleBinding::new("a", RoleRef::cluster_role("getter")).with_subject(Subject::user("u"));
        let b = ClusterRoleBinding::new("b", RoleRef::cluster_role("all"))
            .with_subject(Subject::user("u"))
            .with_subject(Subject::user("v"));

        let forward = aggregate(&deployments(), "", &cluster_roles, &[a.clone(), b.clone()], &[], &[]).unwrap();
        let backward = aggregate(&deployments(), "", &cluster_roles, &[b, a], &[], &[]).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.verbs_for(&Subject::user("u")), Some(&canonical_verbs()));
    }

    #[test]
    fn test_multiple_matching_rules_union() {
        let cluster_roles = vec![ClusterRole::new("cr")
            .with_rule(PolicyRule::new(["apps"], ["deployments"], ["get"]))
            .with_rule(PolicyRule::new(["*"], ["deployments"], ["patch"]))
            .with_rule(PolicyRule::new([""], ["pods"], ["delete"]))];
        let bindings =
            vec![ClusterRoleBinding::new("b", RoleRef::cluster_role("cr")).with_subject(Subject::user("u"))];

        let access = aggregate(&deployments(), "", &cluster_roles, &bindings, &[], &[]).unwrap();
        assert_eq!(access.verbs_for(&Subject::user("u")), Some(&verbs(&["get", "patch"])));
    }

    #[test]
    fn test_rule_without_verbs_grants_nothing() {
        let cluster_roles = vec![ClusterRole::new("cr").with_rule(PolicyRule::new(
            ["apps"],
            ["deployments"],
            Vec::<String>::new(),
        ))];
        let bindings =
            vec![ClusterRoleBinding::new("b", RoleRef::cluster_role("cr")).with_subject(Subject::user("u"))];

        let access = aggregate(&deployments(), "", &cluster_roles, &bindings, &[], &[]).unwrap();
        assert!(access.is_empty());
    }

    #[test]
    fn test_role_bindings_outside_scope_are_not_resolved() {
        // The dangling reference lives in another namespace and must not fail the query.
        let role_bindings = vec![RoleBinding::new("ns-b", "dangling", RoleRef::role("missing"))
            .with_subject(Subject::user("u"))];

        let access = aggregate(&deployments(), "ns-a", &[], &[], &[], &role_bindings).unwrap();
        assert!(access.is_empty());

        let global = aggregate(&deployments(), "", &[], &[], &[], &role_bindings).unwrap();
        assert!(global.is_empty());
    }

    #[test]
    fn test_unmatched_binding_still_fails_on_bad_reference() {
        let bindings = vec![ClusterRoleBinding::new("b", RoleRef::cluster_role("missing"))];
        let err = aggregate(&deployments(), "", &[], &bindings, &[], &[]).unwrap_err();
        assert!(matches!(err, AccessError::ReferenceNotFound { .. }));
    }

    #[test]
    fn test_named_target_honours_resource_names() {
        let cluster_roles = vec![ClusterRole::new("cr")
            .with_rule(PolicyRule::new(["apps"], ["deployments"], ["get"]).with_resource_names(["web"]))
            .with_rule(PolicyRule::new(["apps"], ["deployments"], ["list"]))];
        let bindings =
            vec![ClusterRoleBinding::new("b", RoleRef::cluster_role("cr")).with_subject(Subject::user("u"))];

        let web = deployments().with_resource_name("web");
        let access = aggregate(&web, "", &cluster_roles, &bindings, &[], &[]).unwrap();
        assert_eq!(access.verbs_for(&Subject::user("u")), Some(&verbs(&["get", "list"])));

        let api = deployments().with_resource_name("api");
        let access = aggregate(&api, "", &cluster_roles, &bindings, &[], &[]).unwrap();
        assert_eq!(access.verbs_for(&Subject::user("u")), Some(&verbs(&["list"])));
    }

    #[test]
    fn test_aggregate_snapshot_delegates() {
        let snapshot = RbacSnapshot::new()
            .with_role(Role::new("ns", "r").with_rule(PolicyRule::new(["apps"], ["deployments"], ["watch"])))
            .with_role_binding(RoleBinding::new("ns", "b", RoleRef::role("r")).with_subject(Subject::user("u")));

        let access = aggregate_snapshot(&deployments(), "ns", &snapshot).unwrap();
        assert!(access.has_verb(&Subject::user("u"), "watch"));
        assert_eq!(access.target(), &deployments());
    }
}
