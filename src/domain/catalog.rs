//! Categories and branches: the small reference records the order flow reads.

use serde::{Deserialize, Serialize};

/// A product category, used by the builder's category filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}

/// A physical retail location ("store") orders are attributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
}

impl Branch {
    /// True when `key` is either this branch's id or its name.
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.name == key
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchCreate {
    pub name: String,
    #[serde(default)]
    pub address: String,
}
