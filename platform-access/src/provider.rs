//! Authorization-state provider
//!
//! This module provides the read interface access queries fetch their input
//! through, and an in-memory implementation of it.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use platform_rbac::{ClusterRole, ClusterRoleBinding, RbacSnapshot, Role, RoleBinding};

use crate::error::{AccessError, AccessResult};

/// Read access to the roles and bindings of a backend.
///
/// Implementations own connection handling, caching and pagination. Each
/// call returns a fully materialized list.
#[async_trait]
pub trait RbacProvider: Send + Sync {
    /// List every cluster role.
    async fn list_cluster_roles(&self) -> AccessResult<Vec<ClusterRole>>;

    /// List every cluster role binding.
    async fn list_cluster_role_bindings(&self) -> AccessResult<Vec<ClusterRoleBinding>>;

    /// List roles, of one namespace or of all namespaces for `None`.
    async fn list_roles(&self, namespace: Option<&str>) -> AccessResult<Vec<Role>>;

    /// List role bindings, of one namespace or of all namespaces for `None`.
    async fn list_role_bindings(&self, namespace: Option<&str>) -> AccessResult<Vec<RoleBinding>>;
}

/// Count of list calls served.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderStats {
    /// Cluster role lists served
    pub cluster_role_lists: u64,
    /// Cluster role binding lists served
    pub cluster_role_binding_lists: u64,
    /// Role lists served
    pub role_lists: u64,
    /// Role binding lists served
    pub role_binding_lists: u64,
}

/// In-memory provider over a replaceable snapshot.
///
/// Suitable for tests and for embedding a snapshot exported elsewhere.
#[derive(Clone, Default)]
pub struct MemoryRbacProvider {
    snapshot: Arc<RwLock<RbacSnapshot>>,
    stats: Arc<RwLock<ProviderStats>>,
}

impl std::fmt::Debug for MemoryRbacProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRbacProvider").finish_non_exhaustive()
    }
}

impl MemoryRbacProvider {
    /// Create a provider serving a snapshot.
    pub fn new(snapshot: RbacSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
            stats: Arc::new(RwLock::new(ProviderStats::default())),
        }
    }

    /// Create a provider from a JSON-encoded snapshot.
    ///
    /// The document uses the field names of [`RbacSnapshot`]:
    /// `clusterRoles`, `clusterRoleBindings`, `roles`, `roleBindings`.
    pub fn from_json(json: &str) -> AccessResult<Self> {
        let snapshot: RbacSnapshot = serde_json::from_str(json)
            .map_err(|e| AccessError::Provider(format!("invalid snapshot: {}", e)))?;
        Ok(Self::new(snapshot))
    }

    /// Replace the served snapshot.
    pub async fn replace(&self, snapshot: RbacSnapshot) {
        *self.snapshot.write().await = snapshot;
    }

    /// Get list call statistics.
    pub async fn stats(&self) -> ProviderStats {
        self.stats.read().await.clone()
    }
}

#[async_trait]
impl RbacProvider for MemoryRbacProvider {
    async fn list_cluster_roles(&self) -> AccessResult<Vec<ClusterRole>> {
        self.stats.write().await.cluster_role_lists += 1;
        Ok(self.snapshot.read().await.cluster_roles.clone())
    }

    async fn list_cluster_role_bindings(&self) -> AccessResult<Vec<ClusterRoleBinding>> {
        self.stats.write().await.cluster_role_binding_lists += 1;
        Ok(self.snapshot.read().await.cluster_role_bindings.clone())
    }

    async fn list_roles(&self, namespace: Option<&str>) -> AccessResult<Vec<Role>> {
        self.stats.write().await.role_lists += 1;
        Ok(self.snapshot.read().await.roles_in(namespace))
    }

    async fn list_role_bindings(&self, namespace: Option<&str>) -> AccessResult<Vec<RoleBinding>> {
        self.stats.write().await.role_binding_lists += 1;
        Ok(self.snapshot.read().await.role_bindings_in(namespace))
    }
}
