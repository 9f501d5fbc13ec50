//! # Target Resource
//!
//! The (API group, resource) pair an access query is asked about.

use serde::{Deserialize, Serialize};
use std::fmt;

/// API group of the core resources (`configmaps`, `pods`, ...).
pub const CORE_GROUP: &str = "";

/// The resource whose grants are being aggregated.
///
/// The empty group is the core API group and is matched literally; it never
/// means "unspecified".
///
/// # Example
///
/// ```
/// use platform_rbac::target::TargetResource;
///
/// let target = TargetResource::parse("deployments.apps");
/// assert_eq!(target.group, "apps");
/// assert_eq!(target.resource, "deployments");
/// assert_eq!(target.to_string(), "deployments.apps");
///
/// let core = TargetResource::parse("configmaps");
/// assert_eq!(core.group, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetResource {
    /// API group, `""` for the core group.
    pub group: String,
    /// Plural resource type (e.g., "deployments").
    pub resource: String,
    /// Optional: a single named object of the resource type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
}

impl TargetResource {
    /// Create a target for every object of a resource type.
    pub fn new(group: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            resource: resource.into(),
            resource_name: None,
        }
    }

    /// Create a target in the core API group.
    pub fn core(resource: impl Into<String>) -> Self {
        Self::new(CORE_GROUP, resource)
    }

    /// Narrow the target to a single named object.
    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = Some(name.into());
        self
    }

    /// Parse the `resource.group` shorthand.
    ///
    /// Everything after the first `.` is the group, so
    /// `ingresses.networking.k8s.io` is resource `ingresses` in group
    /// `networking.k8s.io`. A name without a dot is in the core group.
    pub fn parse(s: &str) -> Self {
        match s.split_once('.') {
            Some((resource, group)) => Self::new(group, resource),
            None => Self::core(s),
        }
    }

    /// Check if the target is in the core API group.
    pub fn is_core(&self) -> bool {
        self.group == CORE_GROUP
    }
}

impl fmt::Display for TargetResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_core() {
            write!(f, "{}", self.resource)?;
        } else {
            write!(f, "{}.{}", self.resource, self.group)?;
        }
        if let Some(ref name) = self.resource_name {
            write!(f, "/{}", name)?;
        }
        Ok(())
    }
}
