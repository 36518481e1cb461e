//! Reporting service
//!
//! Loads the chart of accounts and the full posting history, then hands
//! the numbers to the pure statement functions in the shared crate.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use shared::ledger::{
    balance_sheet, general_ledger, income_statement, trial_balance, BalanceSheet, GeneralLedger,
    IncomeStatement, TrialBalance,
};

use crate::error::AppResult;
use crate::services::{AccountService, InventoryService, JournalService};

/// Read-only reporting facade over the journal and chart of accounts
#[derive(Clone)]
pub struct ReportingService {
    accounts: AccountService,
    journal: JournalService,
    inventory: InventoryService,
}

/// Headline numbers for the dashboard
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_revenue: Decimal,
    pub total_expense: Decimal,
    pub net_income: Decimal,
    pub total_assets: Decimal,
    pub low_stock_count: usize,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self {
            accounts: AccountService::new(db.clone()),
            journal: JournalService::new(db.clone()),
            inventory: InventoryService::new(db),
        }
    }

    pub async fn trial_balance(&self) -> AppResult<TrialBalance> {
        let accounts = self.accounts.list().await?;
        let entries = self.journal.all_entries().await?;
        Ok(trial_balance(&accounts, &entries))
    }

    pub async fn income_statement(&self) -> AppResult<IncomeStatement> {
        let accounts = self.accounts.list().await?;
        let entries = self.journal.all_entries().await?;
        Ok(income_statement(&accounts, &entries))
    }

    pub async fn balance_sheet(&self) -> AppResult<BalanceSheet> {
        let accounts = self.accounts.list().await?;
        let entries = self.journal.all_entries().await?;
        Ok(balance_sheet(&accounts, &entries))
    }

    /// General ledger for one account, looked up by display name
    pub async fn general_ledger(&self, account_name: &str) -> AppResult<GeneralLedger> {
        let account = self.accounts.get_by_name(account_name).await?;
        let entries = self.journal.entries_for_account(account_name).await?;
        Ok(general_ledger(&account, &entries))
    }

    pub async fn dashboard(&self) -> AppResult<DashboardSummary> {
        let accounts = self.accounts.list().await?;
        let entries = self.journal.all_entries().await?;
        let low_stock = self.inventory.low_stock().await?;

        let income = income_statement(&accounts, &entries);
        let sheet = balance_sheet(&accounts, &entries);

        Ok(DashboardSummary {
            total_revenue: income.total_revenue,
            total_expense: income.total_expense,
            net_income: income.net_income,
            total_assets: sheet.total_assets,
            low_stock_count: low_stock.len(),
        })
    }
}
