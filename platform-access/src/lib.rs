//! # Platform Access
//!
//! This crate answers "who can act on this resource, and how" over the
//! rights graph modelled by `platform-rbac`.
//!
//! ## Overview
//!
//! The platform-access crate handles:
//! - **Rule matching**: Does a rule cover the target group/resource (`matcher`)
//! - **Verb expansion**: `"*"` becomes the canonical verb vocabulary (`verbs`)
//! - **Binding resolution**: Following a binding's role reference (`resolver`)
//! - **Aggregation**: Merging verbs per subject across bindings (`aggregate`)
//! - **Providers**: The four-list read interface to a backend (`provider`)
//! - **Queries**: Fetch-then-aggregate with a deadline (`query`)
//!
//! ## Architecture
//!
//! ```text
//! RbacProvider ──4 lists──→ aggregate(target, namespace, ...)
//!                               │ for each binding in scope:
//!                               │   resolve → [PolicyRule]
//!                               │   matches(rule, target)
//!                               │   expand(rule.verbs)
//!                               │   union into each subject
//!                               ▼
//!                          SubjectAccess { target, Subject → {verbs} }
//! ```
//!
//! ## Scope
//!
//! - Cluster role bindings always contribute.
//! - Role bindings contribute only to a namespaced query, and only those in
//!   the queried namespace.
//! - An empty namespace is the global scope.
//!
//! ## Usage
//!
//! ```rust
//! use platform_access::aggregate_snapshot;
//! use platform_rbac::{ClusterRole, ClusterRoleBinding, PolicyRule, RbacSnapshot, RoleRef, Subject, TargetResource};
//!
//! let snapshot = RbacSnapshot::new()
//!     .with_cluster_role(ClusterRole::new("admin").with_rule(PolicyRule::new(["*"], ["*"], ["*"])))
//!     .with_cluster_role_binding(
//!         ClusterRoleBinding::new("admins", RoleRef::cluster_role("admin"))
//!             .with_subject(Subject::group("ops")),
//!     );
//!
//! let access = aggregate_snapshot(&TargetResource::core("secrets"), "", &snapshot)?;
//! assert_eq!(access.verbs_for(&Subject::group("ops")).map(|v| v.len()), Some(8));
//! # Ok::<(), platform_access::AccessError>(())
//! ```
//!
//! The core does not log errors; every failure is returned to the caller and
//! voids the whole result.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod matcher;
pub mod provider;
pub mod query;
pub mod resolver;
pub mod result;
pub mod verbs;

// Re-export main types for convenience
pub use aggregate::{aggregate, aggregate_snapshot};
pub use config::{AccessConfig, ConfigError};
pub use error::{AccessError, AccessResult};
pub use provider::{MemoryRbacProvider, ProviderStats, RbacProvider};
pub use query::SubjectAccessQuery;
pub use result::SubjectAccess;
