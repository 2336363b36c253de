//! CSV export
//!
//! Spreadsheet-friendly listing of every movement, using the stored field
//! names as headers.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Movement;
use crate::storage::codec;

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Export movements to CSV
pub fn export_movements_csv<W: Write>(movements: &[Movement], writer: W) -> LedgerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

    wtr.write_record([
        "id",
        codec::NOMINAL_DATE,
        codec::REGISTERED_AT,
        codec::EFFECTIVE_DATE,
        codec::UPDATED_AT,
        codec::KIND,
        codec::CATEGORY,
        codec::DETAIL,
        codec::SUBDETAIL,
        codec::PAYMENT_METHOD,
        codec::AMOUNT,
        codec::COMMENT,
        codec::OWNER,
    ])
    .map_err(export_err)?;

    for m in movements {
        wtr.write_record([
            optional(m.id.as_ref()).as_str(),
            optional(m.nominal_date).as_str(),
            optional(m.registered_at).as_str(),
            optional(m.effective_date).as_str(),
            optional(m.updated_at).as_str(),
            m.kind.as_str(),
            m.category.label(),
            m.detail_or_sentinel(),
            m.subdetail_or_sentinel(),
            m.payment_method.as_str(),
            optional(m.amount).as_str(),
            m.comment.as_str(),
            m.owner.as_str(),
        ])
        .map_err(export_err)?;
    }

    wtr.flush().map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movement::fixtures::{date, movement};
    use crate::models::{Category, MovementKind};

    #[test]
    fn test_export_movements_csv() {
        let mut m = movement(MovementKind::Expense, Category::Other, date(2025, 1, 5), 1_250);
        m.comment = "gift, wrapped".into();
        let mut unreadable = movement(MovementKind::Income, Category::Other, date(2025, 1, 6), 0);
        unreadable.amount = None;

        let mut output = Vec::new();
        export_movements_csv(&[m, unreadable], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,nominal_date,registered_at,effective_date"));
        assert!(lines[1].contains(",Expense,Otros,none,none,BCP,12.50,\"gift, wrapped\",ana"));
        assert!(lines[2].contains(",Income,Otros,none,none,BCP,,,ana"));
    }
}
