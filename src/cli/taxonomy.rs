//! Taxonomy CLI command

use clap::Args;

use crate::display::format_taxonomy_tree;
use crate::error::LedgerResult;
use crate::models::MovementKind;
use crate::taxonomy::Taxonomy;

use super::parse_kind;

/// Show the category taxonomy
#[derive(Args, Debug)]
pub struct TaxonomyArgs {
    /// Only show one kind (income or expense)
    #[arg(short, long)]
    pub kind: Option<String>,
}

pub fn handle_taxonomy_command(taxonomy: &Taxonomy, args: TaxonomyArgs) -> LedgerResult<()> {
    let kinds = match args.kind {
        Some(kind) => vec![parse_kind(&kind)?],
        None => MovementKind::ALL.to_vec(),
    };

    for (i, kind) in kinds.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", format_taxonomy_tree(taxonomy, kind));
    }

    Ok(())
}
