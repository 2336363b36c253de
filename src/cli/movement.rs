//! Movement CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_movement_details, format_movement_register};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Movement, MovementCollection};
use crate::reports::MovementFilter;
use crate::services::{MovementInput, MovementService};
use crate::storage::Storage;
use crate::taxonomy::Taxonomy;

use super::auth::open_session;
use super::{
    parse_amount, parse_category, parse_date, parse_kind, parse_kind_selection, parse_payment,
    parse_period,
};

/// Movement subcommands
#[derive(Subcommand, Debug)]
pub enum MovementCommands {
    /// Record a new movement
    Add {
        /// Movement kind (income or expense)
        kind: String,

        /// Category label or code (e.g., "Alimentos" or "food")
        category: String,

        /// Type under the category (e.g., "Carne")
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Amount (e.g., "125.50")
        amount: String,

        /// Payment method (INTERBANK, BCP, YAPE, PLIN, CASH, BBVA)
        #[arg(short, long)]
        payment: String,

        /// Detail under the type, for types that have one
        #[arg(short, long)]
        detail: Option<String>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Free-text comment
        #[arg(short, long, default_value = "")]
        comment: String,
    },

    /// List movements, most recent first
    #[command(alias = "ls")]
    List {
        /// Only movements in this period (YYYY-MM), repeatable
        #[arg(short, long)]
        period: Vec<String>,

        /// Only this kind (income, expense, savings), repeatable
        #[arg(short, long)]
        kind: Vec<String>,

        /// Only this category
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum number of movements to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show movement details
    Show {
        /// Movement ID or unique ID prefix
        id: String,
    },

    /// Edit a movement; omitted fields keep their current value
    Edit {
        /// Movement ID or unique ID prefix
        id: String,

        #[arg(long)]
        kind: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long = "type", value_name = "TYPE")]
        type_name: Option<String>,

        /// New detail ("none" clears it)
        #[arg(long)]
        detail: Option<String>,

        #[arg(long)]
        amount: Option<String>,

        #[arg(long)]
        payment: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        comment: Option<String>,
    },

    /// Delete a movement
    #[command(alias = "rm")]
    Delete {
        /// Movement ID or unique ID prefix
        id: String,
    },
}

fn find_movement(collection: &MovementCollection, identifier: &str) -> LedgerResult<Movement> {
    collection
        .find(identifier)
        .cloned()
        .ok_or_else(|| LedgerError::movement_not_found(identifier))
}

/// Handle a movement command
pub fn handle_movement_command(
    storage: &Storage,
    settings: &Settings,
    taxonomy: &Taxonomy,
    user: Option<&str>,
    cmd: MovementCommands,
) -> LedgerResult<()> {
    let service = MovementService::new(&storage.movements, taxonomy, settings.effective_date);
    let mut collection = service.load()?;
    let currency = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        MovementCommands::Add {
            kind,
            category,
            type_name,
            amount,
            payment,
            detail,
            date,
            comment,
        } => {
            let session = open_session(storage, user)?;
            let nominal_date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let input = MovementInput {
                nominal_date,
                kind: parse_kind(&kind)?,
                category: parse_category(&category)?,
                type_name,
                detail,
                payment_method: parse_payment(&payment)?,
                amount: parse_amount(&amount)?,
                comment,
            };

            let movement = service.record(&mut collection, &session, input)?;
            println!("Recorded movement: {}", movement);
            if movement.effective_date != movement.nominal_date {
                if let Some(effective) = movement.effective_date {
                    println!("  Counted in: {}", effective.format(date_format));
                }
            }
            if let Some(id) = &movement.id {
                println!("  ID: {}", id);
            }
        }

        MovementCommands::List {
            period,
            kind,
            category,
            limit,
        } => {
            let mut filter = MovementFilter::new();
            if !period.is_empty() {
                let periods = period
                    .iter()
                    .map(|p| parse_period(p))
                    .collect::<LedgerResult<Vec<_>>>()?;
                filter = filter.periods(periods);
            }
            if !kind.is_empty() {
                let kinds = kind
                    .iter()
                    .map(|k| parse_kind_selection(k))
                    .collect::<LedgerResult<Vec<_>>>()?;
                filter = filter.kinds(kinds);
            }
            if let Some(c) = category {
                filter = filter.category(parse_category(&c)?);
            }

            let shown: Vec<&Movement> = collection
                .recent_first()
                .into_iter()
                .filter(|m| filter.matches(m))
                .take(limit)
                .collect();

            print!("{}", format_movement_register(&shown, currency, date_format));
        }

        MovementCommands::Show { id } => {
            let movement = find_movement(&collection, &id)?;
            print!("{}", format_movement_details(&movement, currency, date_format));
        }

        MovementCommands::Edit {
            id,
            kind,
            category,
            type_name,
            detail,
            amount,
            payment,
            date,
            comment,
        } => {
            let session = open_session(storage, user)?;
            let target = find_movement(&collection, &id)?;

            let nominal_date = match date {
                Some(d) => parse_date(&d)?,
                None => target.nominal_date.ok_or_else(|| {
                    LedgerError::Validation(
                        "Movement has no valid date; pass --date".into(),
                    )
                })?,
            };
            let amount = match amount {
                Some(a) => parse_amount(&a)?,
                None => target.amount.ok_or_else(|| {
                    LedgerError::Validation(
                        "Movement has no valid amount; pass --amount".into(),
                    )
                })?,
            };
            let type_name = type_name
                .or_else(|| target.detail.clone())
                .ok_or_else(|| LedgerError::Validation("Movement has no type; pass --type".into()))?;

            let input = MovementInput {
                nominal_date,
                kind: kind.as_deref().map(parse_kind).transpose()?.unwrap_or(target.kind),
                category: category
                    .as_deref()
                    .map(parse_category)
                    .transpose()?
                    .unwrap_or(target.category),
                type_name,
                detail: detail.or_else(|| target.subdetail.clone()),
                payment_method: payment
                    .as_deref()
                    .map(parse_payment)
                    .transpose()?
                    .unwrap_or(target.payment_method),
                amount,
                comment: comment.unwrap_or_else(|| target.comment.clone()),
            };

            service.edit(&mut collection, &session, &target, input)?;
            let id = target.id.as_ref().map(|i| i.short()).unwrap_or_default();
            println!("Updated movement: {}", id);
        }

        MovementCommands::Delete { id } => {
            open_session(storage, user)?;
            let target = find_movement(&collection, &id)?;
            service.delete(&mut collection, &target)?;
            println!("Deleted movement: {}", target);
        }
    }

    Ok(())
}
