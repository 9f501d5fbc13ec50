//! # Platform RBAC
//!
//! This crate provides the rights-graph model used by access analysis:
//! the roles, cluster roles and bindings read from an authorization backend.
//!
//! ## Overview
//!
//! The platform-rbac crate handles:
//! - **Rules**: API groups + resources + verbs, with `"*"` wildcards
//! - **Roles**: Namespace-scoped (`Role`) and cluster-scoped (`ClusterRole`) rule sets
//! - **Bindings**: `RoleBinding` / `ClusterRoleBinding` granting a role to subjects
//! - **Subjects**: Users, groups and service accounts, identified by kind + name
//! - **Verbs**: The canonical verb vocabulary
//! - **Targets**: The (group, resource) pair a query is asked about
//!
//! ## Architecture
//!
//! ```text
//! ClusterRoleBinding ──roleRef──→ ClusterRole ──→ [PolicyRule]
//!        └─ subjects (cluster-wide)
//!
//! RoleBinding (namespace) ──roleRef──→ Role (same namespace) ──→ [PolicyRule]
//!        │                    └──────→ ClusterRole
//!        └─ subjects (that namespace only)
//! ```
//!
//! References are by name, never by pointer. Resolving them is the job of
//! `platform-access`.
//!
//! ## Usage
//!
//! ```rust
//! use platform_rbac::{ClusterRole, ClusterRoleBinding, PolicyRule, RbacSnapshot, RoleRef, Subject};
//!
//! let snapshot = RbacSnapshot::new()
//!     .with_cluster_role(
//!         ClusterRole::new("deployer")
//!             .with_rule(PolicyRule::new(["apps"], ["deployments"], ["create"])),
//!     )
//!     .with_cluster_role_binding(
//!         ClusterRoleBinding::new("deployers", RoleRef::cluster_role("deployer"))
//!             .with_subject(Subject::user("alice")),
//!     );
//! assert_eq!(snapshot.cluster_role_bindings.len(), 1);
//! ```

pub mod bindings;
pub mod roles;
pub mod rules;
pub mod snapshot;
pub mod target;
pub mod verbs;

// Re-export main types for convenience
pub use bindings::{Binding, BindingScope, ClusterRoleBinding, RoleBinding, RoleRef, RoleRefKind, Subject};
pub use roles::{ClusterRole, Role};
pub use rules::{PolicyRule, WILDCARD};
pub use snapshot::RbacSnapshot;
pub use target::TargetResource;
pub use verbs::{Verb, VERB_ALL};
