//! Financial summaries and chart series

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::month_label;
use crate::models::{Farm, Transaction, TransactionType};
use crate::types::RecordId;

/// Number of month buckets a chart shows
pub const MAX_CHART_MONTHS: usize = 6;

/// Income, expenses and their difference.
///
/// `expenses` is the positive magnitude of the negative amounts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Split signed amounts into income and expense totals
pub fn totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Totals {
    let (income, expenses) = transactions.into_iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expenses), t| {
            if t.amount > Decimal::ZERO {
                (income + t.amount, expenses)
            } else {
                (income, expenses + t.amount.abs())
            }
        },
    );

    Totals {
        income,
        expenses,
        net: income - expenses,
    }
}

/// Aligned bar-chart series, oldest month first
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub categories: Vec<String>,
    pub income: Vec<Decimal>,
    pub expenses: Vec<Decimal>,
}

/// Bucket transactions by month and keep the most recent months present.
///
/// The window is the last [`MAX_CHART_MONTHS`] months that have data, not the
/// last months of the calendar.
pub fn monthly_chart_series(transactions: &[Transaction]) -> ChartSeries {
    let mut buckets: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();

    for t in transactions {
        let entry = buckets
            .entry((t.date.year(), t.date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if t.amount > Decimal::ZERO {
            entry.0 += t.amount;
        } else {
            entry.1 += t.amount.abs();
        }
    }

    let skip = buckets.len().saturating_sub(MAX_CHART_MONTHS);
    let mut series = ChartSeries::default();
    for ((year, month), (income, expenses)) in buckets.into_iter().skip(skip) {
        series.categories.push(month_label(year, month));
        series.income.push(income);
        series.expenses.push(expenses);
    }
    series
}

/// Filters offered on the finances page
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    pub farm_id: Option<RecordId>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let farm_match = self.farm_id.map_or(true, |id| transaction.farm_id == id);
        let kind_match = self.kind.map_or(true, |kind| transaction.kind == kind);
        farm_match && kind_match
    }
}

/// A transaction row with its resolved farm name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub farm_name: String,
}

/// Everything the finances page renders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinanceOverview {
    /// All-time totals, unaffected by the list filter
    pub totals: Totals,
    pub chart: ChartSeries,
    pub transactions: Vec<TransactionRow>,
}

pub fn finance_overview(
    farms: &[Farm],
    transactions: &[Transaction],
    filter: TransactionFilter,
) -> FinanceOverview {
    let rows = transactions
        .iter()
        .filter(|t| filter.matches(t))
        .map(|t| TransactionRow {
            transaction: t.clone(),
            farm_name: crate::dashboard::farm_name(farms, t.farm_id).to_string(),
        })
        .collect();

    FinanceOverview {
        totals: totals(transactions),
        chart: monthly_chart_series(transactions),
        transactions: rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn transaction(id: RecordId, farm_id: RecordId, amount: i64, y: i32, m: u32) -> Transaction {
        Transaction {
            id,
            farm_id,
            kind: if amount > 0 {
                TransactionType::Income
            } else {
                TransactionType::Expense
            },
            category: "Other".to_string(),
            amount: Decimal::from(amount),
            date: NaiveDate::from_ymd_opt(y, m, 15).unwrap(),
            description: None,
        }
    }

    #[test]
    fn test_totals_split_by_sign() {
        let txs = vec![
            transaction(1, 1, 250, 2024, 1),
            transaction(2, 1, -75, 2024, 1),
            transaction(3, 2, -25, 2024, 2),
        ];
        let t = totals(&txs);
        assert_eq!(t.income, Decimal::from(250));
        assert_eq!(t.expenses, Decimal::from(100));
        assert_eq!(t.net, Decimal::from(150));
    }

    #[test]
    fn test_totals_keep_exact_cents() {
        let mut a = transaction(1, 1, 0, 2024, 1);
        a.amount = Decimal::new(10, 2);
        let mut b = transaction(2, 1, 0, 2024, 1);
        b.amount = Decimal::new(20, 2);
        let t = totals(&[a, b]);
        assert_eq!(t.income, Decimal::new(30, 2));
    }

    #[test]
    fn test_chart_keeps_last_six_months_present() {
        let txs: Vec<_> = (1..=8u32)
            .map(|m| transaction(m as RecordId, 1, 100 * m as i64, 2023, m))
            .chain(std::iter::once(transaction(99, 1, -50, 2024, 2)))
            .collect();

        let chart = monthly_chart_series(&txs);
        assert_eq!(
            chart.categories,
            vec!["Apr 2023", "May 2023", "Jun 2023", "Jul 2023", "Aug 2023", "Feb 2024"]
        );
        assert_eq!(chart.income[0], Decimal::from(400));
        assert_eq!(chart.expenses[5], Decimal::from(50));
        assert_eq!(chart.income[5], Decimal::ZERO);
    }

    #[test]
    fn test_chart_empty_input() {
        let chart = monthly_chart_series(&[]);
        assert!(chart.categories.is_empty());
        assert!(chart.income.is_empty());
    }

    #[test]
    fn test_overview_filters_rows_but_not_totals() {
        let txs = vec![
            transaction(1, 1, 500, 2024, 3),
            transaction(2, 2, -120, 2024, 3),
        ];
        let filter = TransactionFilter {
            farm_id: Some(2),
            kind: None,
        };
        let overview = finance_overview(&[], &txs, filter);
        assert_eq!(overview.transactions.len(), 1);
        assert_eq!(overview.transactions[0].farm_name, crate::types::UNKNOWN_FARM);
        assert_eq!(overview.totals.net, Decimal::from(380));
    }
}
