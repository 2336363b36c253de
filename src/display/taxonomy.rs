//! Taxonomy display formatting
//!
//! Formats a kind's category tree for terminal output.

use crate::models::MovementKind;
use crate::taxonomy::Taxonomy;

/// Format the category → type → detail tree of one kind
pub fn format_taxonomy_tree(taxonomy: &Taxonomy, kind: MovementKind) -> String {
    let nodes = taxonomy.nodes(kind);
    let mut output = format!("{} categories\n", kind);

    for node in nodes {
        output.push_str(&format!("\n{}\n", node.category));

        for (j, type_node) in node.types.iter().enumerate() {
            let is_last = j == node.types.len() - 1;
            let prefix = if is_last { "└── " } else { "├── " };
            output.push_str(&format!("  {}{}\n", prefix, type_node.name));

            let indent = if is_last { "    " } else { "│   " };
            for (k, detail) in type_node.details.iter().enumerate() {
                let branch = if k == type_node.details.len() - 1 {
                    "└── "
                } else {
                    "├── "
                };
                output.push_str(&format!("  {}{}{}\n", indent, branch, detail));
            }
        }
    }

    output
}
