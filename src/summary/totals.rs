//! Expense and income totals.

use serde::Serialize;

use crate::{Transaction, TransactionKind};

/// The sum of expense amounts and the sum of income amounts over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    /// The total amount spent.
    pub expense: f64,
    /// The total amount earned.
    pub income: f64,
}

impl Totals {
    /// Sums the amounts of `transactions` by kind.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals = Self::default();

        for transaction in transactions {
            totals.add(transaction);
        }

        totals
    }

    /// Adds the amount of `transaction` to the total for its kind.
    pub fn add(&mut self, transaction: &Transaction) {
        match transaction.kind() {
            TransactionKind::Expense => self.expense += transaction.amount(),
            TransactionKind::Income => self.income += transaction.amount(),
        }
    }

    /// Income minus expenses.
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{Transaction, TransactionId, TransactionKind};

    use super::Totals;

    fn create_test_transaction(amount: f64, kind: TransactionKind) -> Transaction {
        Transaction::build(amount, datetime!(2024-01-15 12:00 UTC), "test")
            .kind(kind)
            .finalise(TransactionId::new("t"))
    }

    #[test]
    fn sums_amounts_by_kind() {
        let transactions = vec![
            create_test_transaction(100.0, TransactionKind::Expense),
            create_test_transaction(20.0, TransactionKind::Expense),
            create_test_transaction(50.0, TransactionKind::Income),
        ];

        let totals = Totals::from_transactions(&transactions);

        assert_eq!(
            totals,
            Totals {
                expense: 120.0,
                income: 50.0
            }
        );
        assert_eq!(totals.net(), -70.0);
    }

    #[test]
    fn empty_input_gives_zero_totals() {
        let transactions: Vec<Transaction> = Vec::new();

        let totals = Totals::from_transactions(&transactions);

        assert_eq!(totals, Totals::default());
        assert_eq!(totals.net(), 0.0);
    }
}
