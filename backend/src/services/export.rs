//! Plain-text exports of journal data
//!
//! CSV for spreadsheet import and a fixed-width text receipt for printing.
//! These are pure functions over already-loaded data.

use shared::ledger::GeneralLedger;
use shared::models::JournalEntry;

use crate::error::{AppError, AppResult};

fn csv_to_string(writer: csv::Writer<Vec<u8>>) -> AppResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("csv flush failed: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("csv output was not utf-8: {}", e)))
}

/// Render journal entries as CSV, one row per posting
pub fn journal_csv(entries: &[JournalEntry]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "id",
            "date",
            "description",
            "debit_account",
            "credit_account",
            "amount",
            "kind",
            "created_by",
        ])
        .map_err(|e| AppError::Internal(anyhow::anyhow!("csv write failed: {}", e)))?;

    for entry in entries {
        writer
            .write_record([
                entry.id.to_string().as_str(),
                entry.date.to_string().as_str(),
                entry.description.as_str(),
                entry.debit_account.as_str(),
                entry.credit_account.as_str(),
                entry.amount.to_string().as_str(),
                entry.kind.as_str(),
                entry.created_by.as_str(),
            ])
            .map_err(|e| AppError::Internal(anyhow::anyhow!("csv write failed: {}", e)))?;
    }

    csv_to_string(writer)
}

/// Render one account's general ledger as CSV, with a trailer row for the
/// totals and ending balance
pub fn general_ledger_csv(ledger: &GeneralLedger) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["entry_id", "date", "description", "debit", "credit", "balance"])
        .map_err(|e| AppError::Internal(anyhow::anyhow!("csv write failed: {}", e)))?;

    for row in &ledger.rows {
        writer
            .write_record([
                row.entry_id.to_string().as_str(),
                row.date.to_string().as_str(),
                row.description.as_str(),
                row.debit.to_string().as_str(),
                row.credit.to_string().as_str(),
                row.balance.to_string().as_str(),
            ])
            .map_err(|e| AppError::Internal(anyhow::anyhow!("csv write failed: {}", e)))?;
    }

    writer
        .write_record([
            "",
            "",
            "TOTAL",
            ledger.total_debit.to_string().as_str(),
            ledger.total_credit.to_string().as_str(),
            ledger.ending_balance.to_string().as_str(),
        ])
        .map_err(|e| AppError::Internal(anyhow::anyhow!("csv write failed: {}", e)))?;

    csv_to_string(writer)
}

/// A printable plain-text receipt for one journal entry
pub fn receipt_text(entry: &JournalEntry) -> String {
    let mut out = String::new();
    out.push_str("========================================\n");
    out.push_str("            POSTING RECEIPT\n");
    out.push_str("========================================\n");
    out.push_str(&format!("Entry no.   : {}\n", entry.id));
    out.push_str(&format!("Date        : {}\n", entry.date));
    out.push_str(&format!("Description : {}\n", entry.description));
    out.push_str("----------------------------------------\n");
    out.push_str(&format!("Debit       : {}\n", entry.debit_account));
    out.push_str(&format!("Credit      : {}\n", entry.credit_account));
    out.push_str(&format!("Amount      : {}\n", entry.amount));
    out.push_str("----------------------------------------\n");
    out.push_str(&format!("Recorded by : {}\n", entry.created_by));
    out.push_str("========================================\n");
    out
}
