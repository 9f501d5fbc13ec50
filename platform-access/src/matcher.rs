//! Rule matching against a target resource.

use platform_rbac::{PolicyRule, TargetResource};

/// Check whether a rule grants anything on the target.
///
/// Group and resource must both be covered, either verbatim or through
/// `"*"`. The core group `""` is an ordinary value and only matches itself.
/// When the target names a single object, the rule's `resourceNames`
/// allow-list must admit it as well.
///
/// Verbs are not inspected: every verb of a matching rule is a candidate.
///
/// # Example
///
/// ```
/// use platform_access::matcher::matches;
/// use platform_rbac::{PolicyRule, TargetResource};
///
/// let rule = PolicyRule::new(["*"], ["deployments"], ["get"]);
/// assert!(matches(&rule, &TargetResource::new("apps", "deployments")));
///
/// let core_only = PolicyRule::new([""], ["deployments"], ["get"]);
/// assert!(!matches(&core_only, &TargetResource::new("apps", "deployments")));
/// ```
pub fn matches(rule: &PolicyRule, target: &TargetResource) -> bool {
    if !rule.covers_group(&target.group) || !rule.covers_resource(&target.resource) {
        return false;
    }

    match target.resource_name {
        Some(ref name) => rule.covers_resource_name(name),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let rule = PolicyRule::new(["apps"], ["deployments"], ["list"]);
        assert!(matches(&rule, &TargetResource::new("apps", "deployments")));
        assert!(!matches(&rule, &TargetResource::new("apps", "statefulsets")));
        assert!(!matches(&rule, &TargetResource::new("batch", "deployments")));
    }

    #[test]
    fn test_group_wildcard_vs_core_group() {
        let any_group = PolicyRule::new(["*"], ["configmaps"], ["get"]);
        let core_group = PolicyRule::new([""], ["configmaps"], ["get"]);

        let apps = TargetResource::new("apps", "configmaps");
        let core = TargetResource::core("configmaps");

        assert!(matches(&any_group, &apps));
        assert!(matches(&any_group, &core));
        assert!(!matches(&core_group, &apps));
        assert!(matches(&core_group, &core));
    }

    #[test]
    fn test_resource_wildcard() {
        let rule = PolicyRule::new(["apps"], ["*"], ["get"]);
        assert!(matches(&rule, &TargetResource::new("apps", "daemonsets")));
        assert!(!matches(&rule, &TargetResource::core("pods")));
    }

    #[test]
    fn test_empty_dimensions_match_nothing() {
        let rule = PolicyRule::new(Vec::<String>::new(), ["pods"], ["get"]);
        assert!(!matches(&rule, &TargetResource::core("pods")));
    }

    #[test]
    fn test_verbs_are_not_consulted() {
        let rule = PolicyRule::new([""], ["pods"], Vec::<String>::new());
        assert!(matches(&rule, &TargetResource::core("pods")));
    }

    #[test]
    fn test_resource_names_only_apply_to_named_targets() {
        let rule = PolicyRule::new([""], ["configmaps"], ["get"]).with_resource_names(["settings"]);

        assert!(matches(&rule, &TargetResource::core("configmaps")));
        assert!(matches(
            &rule,
            &TargetResource::core("configmaps").with_resource_name("settings")
        ));
        assert!(!matches(
            &rule,
            &TargetResource::core("configmaps").with_resource_name("other")
        ));
    }
}
