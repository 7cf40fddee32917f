//! Feed policy switches
//!
//! The policy decides the shape of newly created documents and items, and how
//! the mutation operations treat ordering and existing files.

use crate::document::Namespace;
use serde::{Deserialize, Serialize};

/// Prefix of the Atom namespace declared on new feeds
pub const ATOM_NAMESPACE_PREFIX: &str = "atom";

/// Atom namespace URI
pub const ATOM_NAMESPACE_URI: &str = "http://www.w3.org/2005/Atom";

/// Behaviour switches for feed creation and mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedPolicy {
    /// Re-sort all items by publication date after every add
    pub sort_on_add: bool,

    /// Declare the Atom namespace on new documents
    pub include_namespace: bool,

    /// Give new items a guid copied from their link
    pub include_guid: bool,

    /// Allow initialization to replace an existing feed
    pub overwrite_on_init: bool,
}

impl Default for FeedPolicy {
    fn default() -> Self {
        Self {
            sort_on_add: true,
            include_namespace: true,
            include_guid: true,
            overwrite_on_init: false,
        }
    }
}

impl FeedPolicy {
    /// Namespace declarations for a new document
    pub fn namespaces(&self) -> Vec<Namespace> {
        if self.include_namespace {
            vec![Namespace::new(ATOM_NAMESPACE_PREFIX, ATOM_NAMESPACE_URI)]
        } else {
            Vec::new()
        }
    }

    /// Returns a copy that allows initialization to overwrite
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite_on_init = overwrite;
        self
    }
}
