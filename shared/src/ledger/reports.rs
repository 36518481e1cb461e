//! Financial statement derivations over the journal and chart of accounts
//!
//! Every statement is a pure function of `(&[Account], &[JournalEntry])`.
//! The core consistency check of the whole system is the trial balance
//! trailer: total debits must equal total credits for any posting history.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Account, AccountType, CostCategory, JournalEntry};

/// Per-account gross debit and credit totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AccountTotals {
    pub debit_total: Decimal,
    pub credit_total: Decimal,
}

/// Sum every entry's legs into per-account totals in one pass
fn totals_by_account(entries: &[JournalEntry]) -> HashMap<&str, AccountTotals> {
    let mut totals: HashMap<&str, AccountTotals> = HashMap::new();
    for entry in entries {
        totals
            .entry(entry.debit_account.as_str())
            .or_default()
            .debit_total += entry.amount;
        totals
            .entry(entry.credit_account.as_str())
            .or_default()
            .credit_total += entry.amount;
    }
    totals
}

/// Gross debit/credit totals for a single account
pub fn account_totals(entries: &[JournalEntry], account: &str) -> AccountTotals {
    let mut totals = AccountTotals::default();
    for entry in entries {
        if entry.debit_account == account {
            totals.debit_total += entry.amount;
        }
        if entry.credit_account == account {
            totals.credit_total += entry.amount;
        }
    }
    totals
}

/// One row of the trial balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialBalanceRow {
    pub code: String,
    pub name: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

/// Trial balance: every account's net balance in its display column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
}

impl TrialBalance {
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}

/// Compute the trial balance. Accounts are listed in code order; rows where
/// both display columns are zero are suppressed. A positive balance lands in
/// the account's normal column, a negative one (absolute) in the opposite.
pub fn trial_balance(accounts: &[Account], entries: &[JournalEntry]) -> TrialBalance {
    let totals = totals_by_account(entries);
    let mut ordered: Vec<&Account> = accounts.iter().collect();
    ordered.sort_by(|a, b| a.code.cmp(&b.code));

    let mut rows = Vec::new();
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for account in ordered {
        let t = totals
            .get(account.name.as_str())
            .copied()
            .unwrap_or_default();
        let balance = if account.is_debit_normal() {
            t.debit_total - t.credit_total
        } else {
            t.credit_total - t.debit_total
        };

        let (debit, credit) = match (account.is_debit_normal(), balance >= Decimal::ZERO) {
            (true, true) => (balance, Decimal::ZERO),
            (true, false) => (Decimal::ZERO, balance.abs()),
            (false, true) => (Decimal::ZERO, balance),
            (false, false) => (balance.abs(), Decimal::ZERO),
        };

        if debit.is_zero() && credit.is_zero() {
            continue;
        }

        total_debit += debit;
        total_credit += credit;
        rows.push(TrialBalanceRow {
            code: account.code.clone(),
            name: account.name.clone(),
            debit,
            credit,
        });
    }

    TrialBalance {
        rows,
        total_debit,
        total_credit,
    }
}

/// One named amount line on a statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub name: String,
    pub amount: Decimal,
}

/// Income statement: revenue net of contra-revenue, expenses split by
/// cost category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeStatement {
    pub revenue: Vec<ReportLine>,
    pub total_revenue: Decimal,
    pub cost_of_production: Vec<ReportLine>,
    pub general_admin: Vec<ReportLine>,
    pub total_expense: Decimal,
    pub net_income: Decimal,
}

pub fn income_statement(accounts: &[Account], entries: &[JournalEntry]) -> IncomeStatement {
    let totals = totals_by_account(entries);
    let mut ordered: Vec<&Account> = accounts.iter().collect();
    ordered.sort_by(|a, b| a.code.cmp(&b.code));

    let mut revenue = Vec::new();
    let mut total_revenue = Decimal::ZERO;
    let mut cost_of_production = Vec::new();
    let mut general_admin = Vec::new();
    let mut total_expense = Decimal::ZERO;

    for account in ordered {
        let t = totals
            .get(account.name.as_str())
            .copied()
            .unwrap_or_default();
        match account.account_type {
            AccountType::Revenue => {
                // Contra-revenue (sales returns) carries a debit balance and
                // nets against gross revenue here.
                let amount = t.credit_total - t.debit_total;
                if !amount.is_zero() {
                    total_revenue += amount;
                    revenue.push(ReportLine {
                        name: account.name.clone(),
                        amount,
                    });
                }
            }
            AccountType::Expense => {
                let amount = t.debit_total - t.credit_total;
                if !amount.is_zero() {
                    total_expense += amount;
                    let line = ReportLine {
                        name: account.name.clone(),
                        amount,
                    };
                    match account.cost_category {
                        Some(CostCategory::CostOfProduction) => cost_of_production.push(line),
                        _ => general_admin.push(line),
                    }
                }
            }
            _ => {}
        }
    }

    IncomeStatement {
        revenue,
        total_revenue,
        cost_of_production,
        general_admin,
        total_expense,
        net_income: total_revenue - total_expense,
    }
}

/// Balance sheet at the current point of the posting history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheet {
    pub assets: Vec<ReportLine>,
    pub total_assets: Decimal,
    pub liabilities: Vec<ReportLine>,
    pub total_liabilities: Decimal,
    pub equity: Vec<ReportLine>,
    /// Net income of the current period, folded into equity as an
    /// unposted line
    pub current_earnings: Decimal,
    pub total_equity: Decimal,
}

impl BalanceSheet {
    /// Assets = Liabilities + Equity
    pub fn is_balanced(&self) -> bool {
        self.total_assets == self.total_liabilities + self.total_equity
    }
}

pub fn balance_sheet(accounts: &[Account], entries: &[JournalEntry]) -> BalanceSheet {
    let totals = totals_by_account(entries);
    let mut ordered: Vec<&Account> = accounts.iter().collect();
    ordered.sort_by(|a, b| a.code.cmp(&b.code));

    let mut assets = Vec::new();
    let mut total_assets = Decimal::ZERO;
    let mut liabilities = Vec::new();
    let mut total_liabilities = Decimal::ZERO;
    let mut equity = Vec::new();
    let mut equity_posted = Decimal::ZERO;

    for account in ordered {
        let t = totals
            .get(account.name.as_str())
            .copied()
            .unwrap_or_default();
        match account.account_type {
            AccountType::Asset => {
                // Contra-assets (accumulated depreciation) reduce the total.
                let amount = if account.is_contra {
                    -(t.credit_total - t.debit_total)
                } else {
                    t.debit_total - t.credit_total
                };
                if !amount.is_zero() {
                    total_assets += amount;
                    assets.push(ReportLine {
                        name: account.name.clone(),
                        amount,
                    });
                }
            }
            AccountType::Liability => {
                let amount = t.credit_total - t.debit_total;
                if !amount.is_zero() {
                    total_liabilities += amount;
                    liabilities.push(ReportLine {
                        name: account.name.clone(),
                        amount,
                    });
                }
            }
            AccountType::Equity => {
                let amount = t.credit_total - t.debit_total;
                if !amount.is_zero() {
                    equity_posted += amount;
                    equity.push(ReportLine {
                        name: account.name.clone(),
                        amount,
                    });
                }
            }
            _ => {}
        }
    }

    let current_earnings = income_statement(accounts, entries).net_income;

    BalanceSheet {
        assets,
        total_assets,
        liabilities,
        total_liabilities,
        equity,
        current_earnings,
        total_equity: equity_posted + current_earnings,
    }
}

/// One row of an account's general ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralLedgerRow {
    pub entry_id: i64,
    pub date: chrono::NaiveDate,
    pub description: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub balance: Decimal,
}

/// Materialized general ledger for one account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralLedger {
    pub account: String,
    pub rows: Vec<GeneralLedgerRow>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub ending_balance: Decimal,
}

/// Running balance per account at the account's normal polarity, in
/// chronological (date, id) order.
pub fn general_ledger(account: &Account, entries: &[JournalEntry]) -> GeneralLedger {
    let mut touching: Vec<&JournalEntry> =
        entries.iter().filter(|e| e.touches(&account.name)).collect();
    touching.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    let mut rows = Vec::with_capacity(touching.len());
    let mut balance = Decimal::ZERO;
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for entry in touching {
        let (debit, credit) = if entry.debit_account == account.name {
            (entry.amount, Decimal::ZERO)
        } else {
            (Decimal::ZERO, entry.amount)
        };
        if account.is_debit_normal() {
            balance += debit - credit;
        } else {
            balance += credit - debit;
        }
        total_debit += debit;
        total_credit += credit;
        rows.push(GeneralLedgerRow {
            entry_id: entry.id,
            date: entry.date,
            description: entry.description.clone(),
            debit,
            credit,
            balance,
        });
    }

    GeneralLedger {
        account: account.name.clone(),
        rows,
        total_debit,
        total_credit,
        ending_balance: balance,
    }
}
