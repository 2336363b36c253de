//! Movement display formatting
//!
//! Register view for listing movements and a detail view for one movement.

use chrono::{NaiveDate, NaiveDateTime};
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Movement;

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Detail")]
    detail: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn format_date(date: Option<NaiveDate>, date_format: &str) -> String {
    date.map(|d| d.format(date_format).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_timestamp(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_amount(movement: &Movement, currency: &str) -> String {
    movement
        .amount
        .map(|a| a.format_with_symbol(currency))
        .unwrap_or_else(|| "n/a".to_string())
}

fn format_classification(movement: &Movement) -> String {
    match (&movement.detail, &movement.subdetail) {
        (Some(d), Some(s)) => format!("{} / {}", d, s),
        (Some(d), None) => d.clone(),
        (None, _) => String::new(),
    }
}

/// Format movements as a register table
pub fn format_movement_register(movements: &[&Movement], currency: &str, date_format: &str) -> String {
    if movements.is_empty() {
        return "No movements found.\n".to_string();
    }

    let rows: Vec<RegisterRow> = movements
        .iter()
        .map(|m| RegisterRow {
            id: m
                .id
                .as_ref()
                .map(|id| id.short().to_string())
                .unwrap_or_default(),
            date: format_date(m.effective_date, date_format),
            kind: m.kind.to_string(),
            category: m.category.to_string(),
            detail: format_classification(m),
            payment: m.payment_method.to_string(),
            amount: format_amount(m, currency),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::last(), Alignment::right());
    format!("{}\n", table)
}

/// Format one movement with every field
pub fn format_movement_details(movement: &Movement, currency: &str, date_format: &str) -> String {
    let mut output = String::new();

    let id = movement
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "(unsaved)".to_string());
    output.push_str(&format!("Movement:   {}\n", id));
    output.push_str(&format!("Kind:       {}\n", movement.kind));
    output.push_str(&format!("Category:   {}\n", movement.category));
    output.push_str(&format!("Detail:     {}\n", movement.detail_or_sentinel()));
    output.push_str(&format!("Subdetail:  {}\n", movement.subdetail_or_sentinel()));
    output.push_str(&format!("Amount:     {}\n", format_amount(movement, currency)));
    output.push_str(&format!("Payment:    {}\n", movement.payment_method));
    output.push_str(&format!(
        "Date:       {}\n",
        format_date(movement.nominal_date, date_format)
    ));
    output.push_str(&format!(
        "Effective:  {}\n",
        format_date(movement.effective_date, date_format)
    ));
    output.push_str(&format!(
        "Registered: {}\n",
        format_timestamp(movement.registered_at)
    ));
    if movement.updated_at.is_some() {
        output.push_str(&format!(
            "Updated:    {}\n",
            format_timestamp(movement.updated_at)
        ));
    }
    output.push_str(&format!("Owner:      {}\n", movement.owner));
    if !movement.comment.is_empty() {
        output.push_str(&format!("Comment:    {}\n", movement.comment));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movement::fixtures::{date, movement};
    use crate::models::{Category, MovementKind};

    #[test]
    fn test_empty_register() {
        assert_eq!(
            format_movement_register(&[], "S/", "%Y-%m-%d"),
            "No movements found.\n"
        );
    }

    #[test]
    fn test_register_rows() {
        let mut m = movement(MovementKind::Expense, Category::Services, date(2025, 3, 4), 4_550);
        m.detail = Some("Educación".into());
        m.subdetail = Some("Libros".into());
        let mut undated = movement(MovementKind::Income, Category::Other, date(2025, 3, 4), 1);
        undated.effective_date = None;
        undated.amount = None;

        let output = format_movement_register(&[&m, &undated], "S/", "%d/%m/%Y");
        assert!(output.contains("04/03/2025"));
        assert!(output.contains("Educación / Libros"));
        assert!(output.contains("S/ 45.50"));
        assert!(output.contains("n/a"));
    }

    #[test]
    fn test_details_view() {
        let mut m = movement(MovementKind::Income, Category::Housing, date(2025, 1, 2), 100);
        m.comment = "rent share".into();
        let output = format_movement_details(&m, "S/", "%Y-%m-%d");
        assert!(output.contains("Kind:       Income"));
        assert!(output.contains("Detail:     none"));
        assert!(output.contains("Comment:    rent share"));
        assert!(!output.contains("Updated:"));
    }
}
