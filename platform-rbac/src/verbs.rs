//! # Verbs
//!
//! The canonical verb vocabulary rule verbs are drawn from.
//! Rules store verbs as plain strings; this enum is the fixed list used when
//! a rule grants every verb through the [`VERB_ALL`] sentinel.

use serde::{Deserialize, Serialize};

/// Sentinel a rule lists in its verbs to grant every verb.
pub const VERB_ALL: &str = "*";

/// Operations a subject can be granted on a resource.
///
/// The membership of this list is versioned together with the backend the
/// rules come from. It is never discovered at runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    /// Create new objects.
    Create,
    /// Read a single object.
    Get,
    /// Read a collection of objects.
    List,
    /// Stream changes to objects.
    Watch,
    /// Replace an existing object.
    Update,
    /// Partially modify an existing object.
    Patch,
    /// Remove a single object.
    Delete,
    /// Remove a collection of objects.
    DeleteCollection,
}

impl Verb {
    /// Get the string representation of the verb, as it appears in rules.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Get => "get",
            Verb::List => "list",
            Verb::Watch => "watch",
            Verb::Update => "update",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
            Verb::DeleteCollection => "deletecollection",
        }
    }

    /// Parse a verb from its rule representation.
    ///
    /// Matching is exact: rule verbs are lowercase on the wire and anything
    /// else is a verb outside the canonical vocabulary.
    ///
    /// # Example
    ///
    /// ```
    /// use platform_rbac::verbs::Verb;
    ///
    /// assert_eq!(Verb::parse("list"), Some(Verb::List));
    /// assert_eq!(Verb::parse("deletecollection"), Some(Verb::DeleteCollection));
    /// assert_eq!(Verb::parse("impersonate"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "create" => Some(Verb::Create),
            "get" => Some(Verb::Get),
            "list" => Some(Verb::List),
            "watch" => Some(Verb::Watch),
            "update" => Some(Verb::Update),
            "patch" => Some(Verb::Patch),
            "delete" => Some(Verb::Delete),
            "deletecollection" => Some(Verb::DeleteCollection),
            _ => None,
        }
    }

    /// Get all verbs of the canonical vocabulary.
    pub fn all() -> Vec<Self> {
        vec![
            Verb::Create,
            Verb::Get,
            Verb::List,
            Verb::Watch,
            Verb::Update,
            Verb::Patch,
            Verb::Delete,
            Verb::DeleteCollection,
        ]
    }

    /// Check if this verb only reads state.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Verb::Get | Verb::List | Verb::Watch)
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
