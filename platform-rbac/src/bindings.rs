//! Bindings
//!
//! Bindings associate a role or cluster role with the subjects that hold it.
//! A [`RoleBinding`] grants inside its own namespace; a
//! [`ClusterRoleBinding`] grants cluster-wide. Both refer to their role by
//! name through a [`RoleRef`], never by pointer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds a [`RoleRef`] may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleRefKind {
    /// A namespace-scoped [`Role`](crate::Role).
    Role,
    /// A cluster-scoped [`ClusterRole`](crate::ClusterRole).
    ClusterRole,
}

impl RoleRefKind {
    /// Get the string representation used in role references.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleRefKind::Role => "Role",
            RoleRefKind::ClusterRole => "ClusterRole",
        }
    }

    /// Parse a role reference kind. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Role" => Some(RoleRefKind::Role),
            "ClusterRole" => Some(RoleRefKind::ClusterRole),
            _ => None,
        }
    }
}

/// Reference from a binding to the role it grants.
///
/// The kind is kept as the raw string so that unrecognised kinds survive
/// deserialization and can be rejected where the binding is resolved.
/// There is no namespace: a referenced `Role` lives in the binding's own
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleRef {
    /// Referenced kind, `"Role"` or `"ClusterRole"`
    pub kind: String,
    /// Referenced role name
    pub name: String,
}

impl RoleRef {
    /// Reference a role in the binding's namespace.
    pub fn role(name: impl Into<String>) -> Self {
        Self {
            kind: RoleRefKind::Role.as_str().to_string(),
            name: name.into(),
        }
    }

    /// Reference a cluster role.
    pub fn cluster_role(name: impl Into<String>) -> Self {
        Self {
            kind: RoleRefKind::ClusterRole.as_str().to_string(),
            name: name.into(),
        }
    }

    /// The parsed kind, `None` if unrecognised.
    pub fn parsed_kind(&self) -> Option<RoleRefKind> {
        RoleRefKind::parse(&self.kind)
    }
}

/// An actor that can be granted rights.
///
/// Two subjects are the same actor iff kind and name both match.
///
/// # Examples
///
/// ```
/// use platform_rbac::Subject;
///
/// let user = Subject::user("alice");
/// assert_eq!(user.kind, "User");
/// assert_ne!(user, Subject::group("alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Subject {
    /// Subject category, typically `User`, `Group` or `ServiceAccount`
    pub kind: String,
    /// Subject name
    pub name: String,
}

impl Subject {
    /// Creates a subject of an arbitrary kind.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// A `User` subject.
    pub fn user(name: impl Into<String>) -> Self {
        Self::new("User", name)
    }

    /// A `Group` subject.
    pub fn group(name: impl Into<String>) -> Self {
        Self::new("Group", name)
    }

    /// A `ServiceAccount` subject.
    pub fn service_account(name: impl Into<String>) -> Self {
        Self::new("ServiceAccount", name)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Where a binding's grants apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingScope<'a> {
    /// Inside a single namespace.
    Namespace(&'a str),
    /// Every namespace and the cluster scope.
    Cluster,
}

/// Common view over both binding types.
pub trait Binding {
    /// Binding name, used to identify the binding in errors.
    fn name(&self) -> &str;

    /// The role or cluster role this binding grants.
    fn role_ref(&self) -> &RoleRef;

    /// Subjects receiving the grant, in declaration order.
    fn subjects(&self) -> &[Subject];

    /// Scope of the grant.
    fn scope(&self) -> BindingScope<'_>;
}

/// Namespace-scoped binding.
///
/// # Examples
///
/// ```
/// use platform_rbac::{Binding, BindingScope, RoleBinding, RoleRef, Subject};
///
/// let binding = RoleBinding::new("team-a", "deployers", RoleRef::role("deployer"))
///     .with_subject(Subject::user("alice"));
/// assert_eq!(binding.scope(), BindingScope::Namespace("team-a"));
/// assert_eq!(binding.subjects().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBinding {
    /// Binding name
    pub name: String,

    /// Namespace the binding grants in
    pub namespace: String,

    /// Referenced role or cluster role
    pub role_ref: RoleRef,

    /// Subjects receiving the grant
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl RoleBinding {
    /// Creates a binding without subjects.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, role_ref: RoleRef) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            role_ref,
            subjects: Vec::new(),
        }
    }

    /// Append a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }
}

impl Binding for RoleBinding {
    fn name(&self) -> &str {
        &self.name
    }

    fn role_ref(&self) -> &RoleRef {
        &self.role_ref
    }

    fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    fn scope(&self) -> BindingScope<'_> {
        BindingScope::Namespace(&self.namespace)
    }
}

/// Cluster-scoped binding. Must reference a cluster role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRoleBinding {
    /// Binding name
    pub name: String,

    /// Referenced cluster role
    pub role_ref: RoleRef,

    /// Subjects receiving the grant
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl ClusterRoleBinding {
    /// Creates a binding without subjects.
    pub fn new(name: impl Into<String>, role_ref: RoleRef) -> Self {
        Self {
            name: name.into(),
            role_ref,
            subjects: Vec::new(),
        }
    }

    /// Append a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }
}

impl Binding for ClusterRoleBinding {
    fn name(&self) -> &str {
        &self.name
    }

    fn role_ref(&self) -> &RoleRef {
        &self.role_ref
    }

    fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    fn scope(&self) -> BindingScope<'_> {
        BindingScope::Cluster
    }
}
