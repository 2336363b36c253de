//! Category taxonomy
//!
//! Static configuration describing, per movement kind, which categories
//! exist, which types each category offers and which details (if any) each
//! type offers. The taxonomy is loaded once at start and passed to whatever
//! needs it; entry validation rejects anything it does not list.
//!
//! Two shapes coexist: *flat* categories whose types carry no details, and
//! *nested* categories where some types carry a detail list. A classified
//! movement always stores the type in `detail` and the optional third level
//! in `subdetail`.

mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::config::paths::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, MovementKind, NONE_SENTINEL};
use crate::storage::JsonFile;

/// A type under a category, with its ordered details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    pub name: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// A category and its ordered types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub category: Category,
    pub types: Vec<TypeNode>,
}

/// Whether a category uses the third level at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryShape {
    /// No type has details
    Flat,
    /// At least one type has details
    Nested,
}

/// The stored (detail, subdetail) pair for a validated classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub detail: Option<String>,
    pub subdetail: Option<String>,
}

/// Income and expense category trees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    income: Vec<CategoryNode>,
    expense: Vec<CategoryNode>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        builtin::builtin()
    }
}

impl Taxonomy {
    /// The built-in household taxonomy
    pub fn builtin() -> Self {
        builtin::builtin()
    }

    /// Build a taxonomy from explicit trees, validating them
    pub fn from_trees(
        income: Vec<CategoryNode>,
        expense: Vec<CategoryNode>,
    ) -> LedgerResult<Self> {
        let taxonomy = Self { income, expense };
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Load the override file if present, otherwise use the built-in tables
    pub fn load_or_builtin(paths: &LedgerPaths) -> LedgerResult<Self> {
        let path = paths.taxonomy_file();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::builtin())
        }
    }

    /// Load and validate a taxonomy file
    pub fn load(path: &Path) -> LedgerResult<Self> {
        let taxonomy = JsonFile::<Taxonomy>::new(path).load_existing().map_err(|e| {
            LedgerError::Config(format!("Failed to load taxonomy {}: {}", path.display(), e))
        })?;
        taxonomy.validate()?;
        tracing::info!(path = %path.display(), "loaded taxonomy override");
        Ok(taxonomy)
    }

    /// Check structural invariants
    pub fn validate(&self) -> LedgerResult<()> {
        for kind in MovementKind::ALL {
            let tree = self.tree(kind);
            if tree.is_empty() {
                return Err(LedgerError::Taxonomy(format!("{} tree is empty", kind)));
            }

            let mut seen = HashSet::new();
            for node in tree {
                if !seen.insert(node.category) {
                    return Err(LedgerError::Taxonomy(format!(
                        "{} category '{}' listed twice",
                        kind, node.category
                    )));
                }
                if node.types.is_empty() {
                    return Err(LedgerError::Taxonomy(format!(
                        "{} category '{}' has no types",
                        kind, node.category
                    )));
                }
                let mut type_names = HashSet::new();
                for type_node in &node.types {
                    let name = type_node.name.trim();
                    if name.is_empty() || name == NONE_SENTINEL {
                        return Err(LedgerError::Taxonomy(format!(
                            "{} category '{}' has an invalid type name '{}'",
                            kind, node.category, type_node.name
                        )));
                    }
                    if !type_names.insert(name) {
                        return Err(LedgerError::Taxonomy(format!(
                            "{} category '{}' lists type '{}' twice",
                            kind, node.category, name
                        )));
                    }
                }
            }
        }

        if self.node(MovementKind::Expense, Category::Savings).is_none() {
            return Err(LedgerError::Taxonomy(
                "expense tree must contain the savings category".into(),
            ));
        }

        Ok(())
    }

    fn tree(&self, kind: MovementKind) -> &[CategoryNode] {
        match kind {
            MovementKind::Income => &self.income,
            MovementKind::Expense => &self.expense,
        }
    }

    fn node(&self, kind: MovementKind, category: Category) -> Option<&CategoryNode> {
        self.tree(kind).iter().find(|n| n.category == category)
    }

    fn require_node(&self, kind: MovementKind, category: Category) -> LedgerResult<&CategoryNode> {
        self.node(kind, category).ok_or_else(|| {
            LedgerError::Taxonomy(format!("'{}' is not a {} category", category, kind))
        })
    }

    fn require_type(
        &self,
        kind: MovementKind,
        category: Category,
        type_name: &str,
    ) -> LedgerResult<&TypeNode> {
        let node = self.require_node(kind, category)?;
        node.types
            .iter()
            .find(|t| t.name == type_name.trim())
            .ok_or_else(|| {
                LedgerError::Taxonomy(format!(
                    "'{}' is not a type of {} category '{}'",
                    type_name, kind, category
                ))
            })
    }

    /// The category tree of a kind
    pub fn nodes(&self, kind: MovementKind) -> &[CategoryNode] {
        self.tree(kind)
    }

    /// Categories available for a kind, in taxonomy order
    pub fn categories(&self, kind: MovementKind) -> Vec<Category> {
        self.tree(kind).iter().map(|n| n.category).collect()
    }

    /// Types of a category, in taxonomy order
    pub fn types(&self, kind: MovementKind, category: Category) -> LedgerResult<Vec<&str>> {
        Ok(self
            .require_node(kind, category)?
            .types
            .iter()
            .map(|t| t.name.as_str())
            .collect())
    }

    /// Details of a type (possibly empty)
    pub fn details(
        &self,
        kind: MovementKind,
        category: Category,
        type_name: &str,
    ) -> LedgerResult<&[String]> {
        Ok(&self.require_type(kind, category, type_name)?.details)
    }

    /// Details offered to a selector: the details, or the single placeholder
    /// when the type has none
    pub fn detail_choices(
        &self,
        kind: MovementKind,
        category: Category,
        type_name: &str,
    ) -> LedgerResult<Vec<&str>> {
        let details = self.details(kind, category, type_name)?;
        if details.is_empty() {
            Ok(vec![NONE_SENTINEL])
        } else {
            Ok(details.iter().map(String::as_str).collect())
        }
    }

    pub fn shape(&self, kind: MovementKind, category: Category) -> LedgerResult<CategoryShape> {
        let node = self.require_node(kind, category)?;
        if node.types.iter().any(|t| !t.details.is_empty()) {
            Ok(CategoryShape::Nested)
        } else {
            Ok(CategoryShape::Flat)
        }
    }

    /// Validate an entry and produce its stored (detail, subdetail) pair
    ///
    /// `detail` must name one of the type's details when it has any, and must
    /// be absent (or the placeholder) when it has none.
    pub fn classify(
        &self,
        kind: MovementKind,
        category: Category,
        type_name: &str,
        detail: Option<&str>,
    ) -> LedgerResult<Classification> {
        let type_node = self.require_type(kind, category, type_name)?;
        let detail = detail
            .map(str::trim)
            .filter(|d| !d.is_empty() && *d != NONE_SENTINEL);

        let subdetail = match (type_node.details.is_empty(), detail) {
            (true, None) => None,
            (true, Some(d)) => {
                return Err(LedgerError::Taxonomy(format!(
                    "'{}' takes no detail, got '{}'",
                    type_node.name, d
                )))
            }
            (false, None) => {
                return Err(LedgerError::Taxonomy(format!(
                    "'{}' requires a detail: one of {}",
                    type_node.name,
                    type_node.details.join(", ")
                )))
            }
            (false, Some(d)) => {
                let found = type_node.details.iter().find(|x| x.as_str() == d).ok_or_else(|| {
                    LedgerError::Taxonomy(format!(
                        "'{}' is not a detail of '{}'",
                        d, type_node.name
                    ))
                })?;
                Some(found.clone())
            }
        };

        Ok(Classification {
            detail: Some(type_node.name.clone()),
            subdetail,
        })
    }
}
