//! Dashboard aggregator
//!
//! Builds the per-period money snapshot: starting money from salary, extra
//! income, and the period's savings deposit, then what's left after
//! salary-funded expenses, projected fixed payments, and outstanding plain
//! loans. Read-only; store errors propagate as hard failures.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::QuincenaResult;
use crate::models::{Category, CategoryId, Expense, Money, Period, PeriodMode};
use crate::storage::Storage;

use super::fixed_payment::{FixedOccurrence, FixedPaymentService};
use super::period::PeriodService;
use super::salary::SalaryService;

/// How many recent expense rows feed the activity list
const RECENT_EXPENSE_WINDOW: usize = 12;

/// Hard cap on the merged activity feed
const RECENT_FEED_CAP: usize = 20;

/// Spend attributed to one category within the period
#[derive(Debug, Clone)]
pub struct CategorySpend {
    pub category: Category,
    pub total: Money,
    pub count: usize,
}

/// One entry in the recent activity feed
#[derive(Debug, Clone)]
pub enum FeedEntry {
    Expense(Expense),
    Fixed(FixedOccurrence),
}

impl FeedEntry {
    /// The date the feed sorts on
    pub fn date(&self) -> NaiveDate {
        match self {
            FeedEntry::Expense(e) => e.date,
            FeedEntry::Fixed(o) => o.due,
        }
    }
}

/// The full money picture for one period
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub period: Period,
    pub mode: PeriodMode,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub salary: Money,
    pub extra_income: Money,
    pub period_savings: Money,
    pub starting_money: Money,
    pub salary_funded: Money,
    pub savings_funded: Money,
    pub total_expenses: Money,
    pub total_fixed: Money,
    pub total_loans: Money,
    pub available_money: Money,
    pub total_savings: Money,
    pub average_daily_spend: Money,
    pub categories: Vec<CategorySpend>,
    pub recent: Vec<FeedEntry>,
}

/// Service that assembles dashboard snapshots
pub struct DashboardService<'a> {
    storage: &'a Storage,
}

impl<'a> DashboardService<'a> {
    /// Create a new dashboard service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Snapshot for the period `today` falls into
    pub fn current(&self, today: NaiveDate) -> QuincenaResult<DashboardSnapshot> {
        let periods = PeriodService::new(self.storage);
        let period = periods.current_period(today)?;
        self.snapshot(period, today)
    }

    /// Build the snapshot for a specific period
    pub fn snapshot(&self, period: Period, today: NaiveDate) -> QuincenaResult<DashboardSnapshot> {
        let periods = PeriodService::new(self.storage);
        let mode = periods.mode()?;
        let (start, end) = periods.resolve_range(period)?;
        debug!(period = %period, %start, %end, "building dashboard snapshot");

        let expenses = self.storage.expenses.get_in_range(start, end)?;
        let (salary_funded, savings_funded) = split_by_funding(&expenses);
        let total_expenses = salary_funded + savings_funded;

        let fixed = FixedPaymentService::new(self.storage);
        let occurrences = fixed.occurrences_in_range(start, end)?;
        let total_fixed: Money = occurrences.iter().map(|o| o.payment.amount).sum();

        let total_loans = self.storage.loans.total_affecting_budget()?;

        let salary = SalaryService::new(self.storage).effective(period, mode)?;
        let extra_income = self.storage.income.total_in_range(start, end)?;
        let period_savings = self
            .storage
            .savings
            .record_for(period)?
            .map(|r| r.deposited)
            .unwrap_or_default();

        let starting_money = salary + extra_income - period_savings;
        // Savings-funded expenses come out of the pool, not out of the period
        let available_money = starting_money - salary_funded - total_fixed - total_loans;

        let total_savings = self.storage.savings.total()?;
        let average_daily_spend = average_daily(&expenses, total_expenses);
        let categories = self.category_breakdown(&expenses)?;
        let recent = recent_feed(&expenses, &occurrences, today);

        Ok(DashboardSnapshot {
            period,
            mode,
            start,
            end,
            salary,
            extra_income,
            period_savings,
            starting_money,
            salary_funded,
            savings_funded,
            total_expenses,
            total_fixed,
            total_loans,
            available_money,
            total_savings,
            average_daily_spend,
            categories,
            recent,
        })
    }

    /// Attribute each expense's full amount to every category it carries
    fn category_breakdown(&self, expenses: &[Expense]) -> QuincenaResult<Vec<CategorySpend>> {
        let mut totals: HashMap<CategoryId, (Money, usize)> = HashMap::new();
        for expense in expenses {
            for &cat_id in &expense.category_ids {
                let entry = totals.entry(cat_id).or_insert((Money::zero(), 0));
                entry.0 += expense.amount;
                entry.1 += 1;
            }
        }

        let mut breakdown = Vec::with_capacity(totals.len());
        for (cat_id, (total, count)) in totals {
            // Expenses can outlive a renamed ledger file; skip rows whose
            // category no longer resolves rather than failing the snapshot
            if let Some(category) = self.storage.categories.get(cat_id)? {
                breakdown.push(CategorySpend {
                    category,
                    total,
                    count,
                });
            }
        }
        breakdown.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.name.cmp(&b.category.name))
        });
        Ok(breakdown)
    }
}

fn split_by_funding(expenses: &[Expense]) -> (Money, Money) {
    let mut salary_funded = Money::zero();
    let mut savings_funded = Money::zero();
    for expense in expenses {
        if expense.funding == crate::models::FundingSource::Savings {
            savings_funded += expense.amount;
        } else {
            salary_funded += expense.amount;
        }
    }
    (salary_funded, savings_funded)
}

/// Total spend divided by the number of distinct days that have expenses
fn average_daily(expenses: &[Expense], total: Money) -> Money {
    let mut days: Vec<NaiveDate> = expenses.iter().map(|e| e.date).collect();
    days.sort();
    days.dedup();
    if days.is_empty() {
        Money::zero()
    } else {
        Money::from_cents(total.cents() / days.len() as i64)
    }
}

/// Newest expenses plus fixed occurrences already due, merged newest-first
fn recent_feed(
    expenses: &[Expense],
    occurrences: &[FixedOccurrence],
    today: NaiveDate,
) -> Vec<FeedEntry> {
    let mut feed: Vec<FeedEntry> = expenses
        .iter()
        .rev()
        .take(RECENT_EXPENSE_WINDOW)
        .cloned()
        .map(FeedEntry::Expense)
        .collect();
    feed.extend(
        occurrences
            .iter()
            .filter(|o| o.due <= today)
            .cloned()
            .map(FeedEntry::Fixed),
    );

    feed.sort_by(|a, b| b.date().cmp(&a.date()));
    feed.truncate(RECENT_FEED_CAP);
    feed
}
