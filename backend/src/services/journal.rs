//! Journal store service
//!
//! The single source of truth for all monetary history. Postings are
//! immutable once recorded; the only mutation is an explicit delete
//! (reversal) by the operator.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use shared::models::{EntryKind, JournalEntry, JournalFilter};
use shared::validation;

use crate::error::{AppError, AppResult};
use crate::services::parse_stored;

/// Journal store service
#[derive(Clone)]
pub struct JournalService {
    db: PgPool,
}

/// Journal entry row as stored
#[derive(Debug, FromRow)]
pub(crate) struct EntryRow {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: Decimal,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl EntryRow {
    pub(crate) fn into_model(self) -> AppResult<JournalEntry> {
        let kind: EntryKind = parse_stored(&self.kind)?;
        Ok(JournalEntry {
            id: self.id,
            date: self.date,
            description: self.description,
            debit_account: self.debit_account,
            credit_account: self.credit_account,
            amount: self.amount,
            kind,
            created_at: self.created_at,
            created_by: self.created_by,
        })
    }
}

/// Input for posting a journal entry
#[derive(Debug, Deserialize)]
pub struct PostEntryInput {
    pub date: NaiveDate,
    pub description: String,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: Decimal,
    #[serde(default = "default_entry_kind")]
    pub kind: EntryKind,
}

fn default_entry_kind() -> EntryKind {
    EntryKind::General
}

/// Insert one entry within an open transaction. Used by the composite
/// posting operations so the journal and inventory writes commit together.
/// Every insert path goes through here, so the distinct-legs rule holds
/// no matter how the legs were chosen.
pub(crate) async fn insert_entry(
    tx: &mut Transaction<'_, Postgres>,
    date: NaiveDate,
    description: &str,
    debit_account: &str,
    credit_account: &str,
    amount: Decimal,
    kind: EntryKind,
    created_by: &str,
) -> AppResult<EntryRow> {
    validation::validate_distinct_legs(debit_account, credit_account)
        .map_err(|msg| AppError::validation("entry", msg))?;

    let row = sqlx::query_as::<_, EntryRow>(
        r#"
        INSERT INTO journal_entries (date, description, debit_account, credit_account, amount, kind, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, date, description, debit_account, credit_account, amount, kind, created_at, created_by
        "#,
    )
    .bind(date)
    .bind(description)
    .bind(debit_account)
    .bind(credit_account)
    .bind(amount)
    .bind(kind.as_str())
    .bind(created_by)
    .fetch_one(&mut **tx)
    .await?;

    Ok(row)
}

/// Both legs of a posting must exist in the chart of accounts
pub(crate) async fn ensure_legs_exist(
    tx: &mut Transaction<'_, Postgres>,
    debit: &str,
    credit: &str,
) -> AppResult<()> {
    for leg in [debit, credit] {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE name = $1)")
                .bind(leg)
                .fetch_one(&mut **tx)
                .await?;
        if !exists {
            return Err(AppError::validation(
                "account",
                format!("Account '{}' does not exist", leg),
            ));
        }
    }
    Ok(())
}

impl JournalService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a double-entry posting
    pub async fn post(&self, created_by: &str, input: PostEntryInput) -> AppResult<JournalEntry> {
        validation::validate_posting(
            &input.description,
            &input.debit_account,
            &input.credit_account,
            input.amount,
        )
        .map_err(|msg| AppError::validation("entry", msg))?;

        let mut tx = self.db.begin().await?;
        ensure_legs_exist(&mut tx, &input.debit_account, &input.credit_account).await?;
        let row = insert_entry(
            &mut tx,
            input.date,
            input.description.trim(),
            &input.debit_account,
            &input.credit_account,
            input.amount,
            input.kind,
            created_by,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            entry_id = row.id,
            debit = %row.debit_account,
            credit = %row.credit_account,
            amount = %row.amount,
            "journal entry posted"
        );

        row.into_model()
    }

    /// Fetch one entry by id
    pub async fn get(&self, id: i64) -> AppResult<JournalEntry> {
        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT id, date, description, debit_account, credit_account, amount, kind, created_at, created_by
            FROM journal_entries WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Journal entry".to_string()))?;

        row.into_model()
    }

    /// Delete an entry by id. Does not cascade to any paired stock
    /// movement; the composite reversal flow handles that explicitly.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Journal entry".to_string()));
        }

        tracing::info!(entry_id = id, "journal entry deleted");
        Ok(())
    }

    /// Entries touching an account, in (date, id) ascending order — the
    /// input for running-balance computation
    pub async fn entries_for_account(&self, account: &str) -> AppResult<Vec<JournalEntry>> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT id, date, description, debit_account, credit_account, amount, kind, created_at, created_by
            FROM journal_entries
            WHERE debit_account = $1 OR credit_account = $1
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(account)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(EntryRow::into_model).collect()
    }

    /// Filtered listing in display order (date, id descending)
    pub async fn list(&self, filter: &JournalFilter, limit: i64) -> AppResult<Vec<JournalEntry>> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT id, date, description, debit_account, credit_account, amount, kind, created_at, created_by
            FROM journal_entries
            WHERE ($1::date IS NULL OR date >= $1)
              AND ($2::date IS NULL OR date <= $2)
              AND ($3::text IS NULL OR kind = $3)
            ORDER BY date DESC, id DESC
            LIMIT $4
            "#,
        )
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(filter.kind.map(|k| k.as_str()))
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(EntryRow::into_model).collect()
    }

    /// The full posting history in chronological order, for the reporting
    /// engine
    pub async fn all_entries(&self) -> AppResult<Vec<JournalEntry>> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT id, date, description, debit_account, credit_account, amount, kind, created_at, created_by
            FROM journal_entries
            ORDER BY date ASC, id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(EntryRow::into_model).collect()
    }
}
