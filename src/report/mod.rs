//! Monthly aggregation over the authoritative collection: available months,
//! income/expense totals, per-category expense breakdowns, and the sorted
//! entry view that presentation layers render.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;
use crate::ledger::{Book, Entry, EntryKind};

/// A calendar date truncated to reporting granularity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Month> {
        (1..=12).contains(&month).then_some(Month { year, month })
    }

    pub fn of(date: NaiveDate) -> Month {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = LedgerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::Validation(format!("invalid month `{raw}`, expected YYYY-MM"));
        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Month::new(year, month).ok_or_else(invalid)
    }
}

/// Income and expense sums for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expense: f64,
}

impl MonthlyTotals {
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

/// One category's slice of the month's expenses; `share` is its fraction of
/// the month's expense total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: String,
    pub total: f64,
    pub share: f64,
}

/// Per-category expense breakdown driving proportion-of-whole views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub slices: Vec<CategorySlice>,
}

impl CategoryBreakdown {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Everything a presentation layer needs to render one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub month: Month,
    pub totals: MonthlyTotals,
    pub breakdown: CategoryBreakdown,
    pub entries: Vec<Entry>,
}

/// Distinct months present across all entries, most recent first.
pub fn available_months(book: &Book) -> Vec<Month> {
    let mut months: Vec<Month> = book.entries().iter().map(|e| Month::of(e.date)).collect();
    months.sort_unstable();
    months.dedup();
    months.reverse();
    months
}

/// Sums the month's amounts per kind; an empty month yields zero totals.
pub fn monthly_totals(book: &Book, month: Month) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();
    for entry in book.entries().iter().filter(|e| month.contains(e.date)) {
        match entry.kind {
            EntryKind::Income => totals.income += entry.amount,
            EntryKind::Expense => totals.expense += entry.amount,
        }
    }
    totals
}

/// Groups the month's expenses by category. Categories without expenses are
/// omitted rather than reported as zero.
pub fn expense_by_category(book: &Book, month: Month) -> BTreeMap<String, f64> {
    let mut sums = BTreeMap::new();
    for entry in book.entries().iter().filter(|e| month.contains(e.date)) {
        if entry.kind == EntryKind::Expense {
            *sums.entry(entry.category.clone()).or_insert(0.0) += entry.amount;
        }
    }
    sums
}

/// Breakdown with each category's share of the month's expense total.
pub fn category_breakdown(book: &Book, month: Month) -> CategoryBreakdown {
    let sums = expense_by_category(book, month);
    let total: f64 = sums.values().sum();
    let slices = sums
        .into_iter()
        .map(|(category, sum)| CategorySlice {
            category,
            total: sum,
            share: if total > 0.0 { sum / total } else { 0.0 },
        })
        .collect();
    CategoryBreakdown { slices }
}

/// The rendered table for one month: newest date first, re-indexed from zero.
/// Stable sort keeps same-date entries in collection order so row resolution
/// stays deterministic.
pub fn month_view(book: &Book, month: Month) -> Vec<Entry> {
    let mut view: Vec<Entry> = book
        .entries()
        .iter()
        .filter(|e| month.contains(e.date))
        .cloned()
        .collect();
    view.sort_by(|a, b| b.date.cmp(&a.date));
    view
}

/// Assembles totals, breakdown, and the sorted entry list for one month.
pub fn monthly_report(book: &Book, month: Month) -> MonthlyReport {
    MonthlyReport {
        month,
        totals: monthly_totals(book, month),
        breakdown: category_breakdown(book, month),
        entries: month_view(book, month),
    }
}
