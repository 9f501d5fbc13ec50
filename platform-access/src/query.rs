//! Access queries against a provider
//!
//! Fetches the input lists from an [`RbacProvider`] and aggregates them.
//! The deadline bounds the fetch only; aggregation itself never suspends.

use std::time::Duration;

use platform_rbac::{RbacSnapshot, TargetResource};
use tracing::debug;

use crate::aggregate::aggregate_snapshot;
use crate::config::AccessConfig;
use crate::error::{AccessError, AccessResult};
use crate::provider::RbacProvider;
use crate::result::SubjectAccess;

/// A "who can act on this resource" question.
///
/// # Example
///
/// ```rust,no_run
/// use platform_access::{MemoryRbacProvider, SubjectAccessQuery};
/// use platform_rbac::{RbacSnapshot, TargetResource};
/// use std::time::Duration;
///
/// async fn example() -> Result<(), platform_access::AccessError> {
///     let provider = MemoryRbacProvider::new(RbacSnapshot::new());
///     let access = SubjectAccessQuery::new(TargetResource::parse("deployments.apps"))
///         .with_namespace("team-a")
///         .run(&provider, Duration::from_secs(5))
///         .await?;
///
///     for (subject, verbs) in access.iter() {
///         println!("{}: {:?}", subject, verbs);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAccessQuery {
    target: TargetResource,
    namespace: String,
}

impl SubjectAccessQuery {
    /// Create a query at global scope.
    pub fn new(target: TargetResource) -> Self {
        Self {
            target,
            namespace: String::new(),
        }
    }

    /// Create a query scoped as configured.
    pub fn from_config(target: TargetResource, config: &AccessConfig) -> Self {
        Self::new(target).with_namespace(config.namespace.clone())
    }

    /// Scope the query to a namespace. Empty means global scope.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// The queried resource.
    pub fn target(&self) -> &TargetResource {
        &self.target
    }

    /// The namespace scope, empty for global.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Fetch the input from `provider` and aggregate it.
    ///
    /// # Errors
    ///
    /// [`AccessError::Timeout`] if fetching exceeds `deadline`, any error the
    /// provider reports, or a resolution error from aggregation.
    pub async fn run<P>(&self, provider: &P, deadline: Duration) -> AccessResult<SubjectAccess>
    where
        P: RbacProvider + ?Sized,
    {
        let snapshot = tokio::time::timeout(deadline, self.fetch(provider))
            .await
            .map_err(|_| AccessError::Timeout(deadline))??;

        aggregate_snapshot(&self.target, &self.namespace, &snapshot)
    }

    /// Fetch the lists this query needs, concurrently.
    ///
    /// Roles and role bindings are only fetched for a namespaced query, and
    /// only from that namespace.
    async fn fetch<P>(&self, provider: &P) -> AccessResult<RbacSnapshot>
    where
        P: RbacProvider + ?Sized,
    {
        if self.namespace.is_empty() {
            debug!(resource = %self.target, "fetching cluster roles and bindings");
            let (cluster_roles, cluster_role_bindings) =
                tokio::try_join!(provider.list_cluster_roles(), provider.list_cluster_role_bindings())?;

            return Ok(RbacSnapshot {
                cluster_roles,
                cluster_role_bindings,
                ..RbacSnapshot::default()
            });
        }

        let namespace = Some(self.namespace.as_str());
        debug!(
            resource = %self.target,
            namespace = %self.namespace,
            "fetching cluster and namespace roles and bindings"
        );
        let (cluster_roles, cluster_role_bindings, roles, role_bindings) = tokio::try_join!(
            provider.list_cluster_roles(),
            provider.list_cluster_role_bindings(),
            provider.list_roles(namespace),
            provider.list_role_bindings(namespace),
        )?;

        debug!(
            cluster_roles = cluster_roles.len(),
            cluster_role_bindings = cluster_role_bindings.len(),
            roles = roles.len(),
            role_bindings = role_bindings.len(),
            "fetched rbac snapshot"
        );

        Ok(RbacSnapshot {
            cluster_roles,
            cluster_role_bindings,
            roles,
            role_bindings,
        })
    }
}
