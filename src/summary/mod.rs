//! Aggregations over a list of transactions.
//!
//! Everything here is a pure function of its input: there is no cached state,
//! so callers rerun the aggregations whenever the record set changes.

mod categories;
mod charts;
mod grouping;
mod totals;

pub use categories::{CategorySlice, GOLDEN_ANGLE_DEGREES, Hue, category_slices};
pub use charts::category_chart;
pub use grouping::{OwnerSummary, PeriodGroup, PeriodGroups, group_by_owner, group_by_period};
pub use totals::Totals;

use serde::Serialize;

use crate::Period;

/// Everything shown on the summary page for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary<'a> {
    /// The selected period.
    pub period: Period,
    /// The expense and income totals of the period.
    pub totals: Totals,
    /// The category breakdown of the period.
    pub categories: Vec<CategorySlice>,
    /// The totals of each user in the period.
    pub owners: Vec<OwnerSummary<'a>>,
}

impl<'a> PeriodSummary<'a> {
    /// Summarises the transactions that `groups` holds for `period`.
    ///
    /// A period without transactions gives zero totals and empty breakdowns.
    pub fn new(period: Period, groups: &PeriodGroups<'a>) -> Self {
        let transactions = groups.transactions(period);

        Self {
            period,
            totals: Totals::from_transactions(transactions.iter().copied()),
            categories: category_slices(transactions.iter().copied()),
            owners: group_by_owner(transactions.iter().copied()),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::datetime};

    use crate::{Owner, Period, Transaction, TransactionId, TransactionKind};

    use super::{PeriodSummary, Totals, group_by_period};

    #[test]
    fn summarises_a_month_of_transactions() {
        let owner = Owner::new("u1", "Ana", "ana@example.com");
        let transactions = vec![
            Transaction::build(100.0, datetime!(2024-01-15 00:00 UTC), "Groceries")
                .category("Food")
                .owner(owner.clone())
                .finalise(TransactionId::new("a")),
            Transaction::build(50.0, datetime!(2024-01-20 00:00 UTC), "Pay")
                .kind(TransactionKind::Income)
                .category("Salary")
                .owner(owner.clone())
                .finalise(TransactionId::new("b")),
        ];

        let groups = group_by_period(&transactions);
        let summary = PeriodSummary::new(Period::new(2024, Month::January), &groups);

        assert_eq!(groups.len(), 1);
        assert_eq!(summary.period.key(), "January_2024");
        assert_eq!(summary.totals, Totals { expense: 100.0, income: 50.0 });
        assert_eq!(summary.totals.net(), -50.0);

        assert_eq!(summary.owners.len(), 1);
        assert_eq!(summary.owners[0].owner.id, "u1");
        assert_eq!(summary.owners[0].totals, Totals { expense: 100.0, income: 50.0 });

        assert_eq!(summary.categories.len(), 2);
        assert_eq!(summary.categories[0].title, "Expense Food");
        assert_eq!(summary.categories[0].total, 100.0);
        assert_eq!(summary.categories[0].percentage, 66.7);
        assert_eq!(summary.categories[1].title, "Income Salary");
        assert_eq!(summary.categories[1].total, 50.0);
        assert_eq!(summary.categories[1].percentage, 33.3);
    }

    #[test]
    fn empty_period_gives_empty_summary() {
        let transactions: Vec<Transaction> = Vec::new();
        let groups = group_by_period(&transactions);

        let summary = PeriodSummary::new(Period::new(2024, Month::January), &groups);

        assert_eq!(summary.totals, Totals::default());
        assert!(summary.categories.is_empty());
        assert!(summary.owners.is_empty());
    }
}
