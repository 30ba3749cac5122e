//! WikiProject directory taxonomy
//!
//! Types for the machine-readable WikiProject directory and the parser
//! that builds it from the on-wiki directory pages. Top-level categories
//! nest mid-level categories, which nest further categories or leaf
//! project entries.

mod parser;

pub use parser::{DirectoryParser, DIRECTORY_PAGE};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The full directory: top-level category name → category.
pub type Taxonomy = BTreeMap<String, Category>;

/// A directory category or sub-category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Heading text.
    pub name: String,
    /// Page the category's section was parsed from.
    pub root_url: String,
    /// Section index on that page.
    pub index: String,
    /// Dedicated directory sub-page, when the category has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub topics: BTreeMap<String, Entry>,
}

/// A leaf WikiProject listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Full project page name, e.g. `Wikipedia:WikiProject Architecture`.
    pub name: String,
    pub shortname: String,
    pub active: bool,
}

/// Either a nested category or a leaf project.
///
/// Untagged: a project is identified by its `shortname` field, which
/// categories never carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Project(Project),
    Category(Category),
}

impl Entry {
    pub fn as_project(&self) -> Option<&Project> {
        match self {
            Entry::Project(p) => Some(p),
            Entry::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&Category> {
        match self {
            Entry::Category(c) => Some(c),
            Entry::Project(_) => None,
        }
    }
}
