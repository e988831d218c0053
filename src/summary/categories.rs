//! Category breakdowns for the doughnut chart on the summary page.

use std::collections::HashMap;

use serde::Serialize;

use crate::{Transaction, TransactionKind};

/// The angle in degrees between the hues of consecutive slices.
///
/// Stepping around the colour wheel by the golden angle never lands on the
/// same hue twice, so neighbouring slices stay distinguishable however many
/// categories there are.
pub const GOLDEN_ANGLE_DEGREES: f64 = 137.508;

/// A hue angle in degrees, in the range `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Hue(f64);

impl Hue {
    /// The hue of the slice at zero-based position `index`.
    pub fn nth(index: usize) -> Self {
        Self(((index + 1) as f64 * GOLDEN_ANGLE_DEGREES) % 360.0)
    }

    /// The angle in degrees.
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// The translucent fill colour as a CSS `hsla()` value.
    pub fn background(self) -> String {
        format!("hsla({:.3}, 70%, 50%, 0.2)", self.0)
    }

    /// The opaque stroke colour as a CSS `hsla()` value.
    pub fn border(self) -> String {
        format!("hsla({:.3}, 80%, 50%, 1)", self.0)
    }
}

/// The transactions of one kind and category, e.g. all "Food" expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    /// The label shown in the chart legend, e.g. "Expense Food".
    pub title: String,
    /// Whether the slice holds expenses or income.
    pub kind: TransactionKind,
    /// The category shared by the transactions in the slice.
    pub category: String,
    /// The number of transactions in the slice.
    pub count: usize,
    /// The sum of the amounts in the slice.
    pub total: f64,
    /// The share of the slice in the sum of all amounts, as a percentage
    /// rounded to one decimal place.
    pub percentage: f64,
    /// The colour of the slice.
    pub hue: Hue,
}

/// Builds one slice per distinct kind and category.
///
/// Slices are ordered by the first appearance of their kind and category in
/// `transactions`, and coloured in that order.
///
/// The percentage of every slice is relative to the sum of **all** amounts,
/// expenses and income pooled together, so an "Expense Food" slice and an
/// "Income Salary" slice share the same denominator. If that sum is zero every
/// percentage is zero.
pub fn category_slices<'a, I>(transactions: I) -> Vec<CategorySlice>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut slices: Vec<CategorySlice> = Vec::new();
    let mut index_by_key: HashMap<(TransactionKind, &'a str), usize> = HashMap::new();
    let mut grand_total = 0.0;

    for transaction in transactions {
        grand_total += transaction.amount();

        let key = (transaction.kind(), transaction.category());

        match index_by_key.get(&key) {
            Some(&index) => {
                let slice = &mut slices[index];
                slice.count += 1;
                slice.total += transaction.amount();
            }
            None => {
                index_by_key.insert(key, slices.len());
                slices.push(CategorySlice {
                    title: format!("{} {}", transaction.kind().label(), transaction.category()),
                    kind: transaction.kind(),
                    category: transaction.category().to_owned(),
                    count: 1,
                    total: transaction.amount(),
                    percentage: 0.0,
                    hue: Hue::nth(slices.len()),
                });
            }
        }
    }

    for slice in &mut slices {
        slice.percentage = percent_of(slice.total, grand_total);
    }

    slices
}

fn percent_of(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        (value / total * 1000.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{Transaction, TransactionId, TransactionKind};

    use super::{GOLDEN_ANGLE_DEGREES, Hue, category_slices, percent_of};

    fn create_test_transaction(amount: f64, kind: TransactionKind, category: &str) -> Transaction {
        Transaction::build(amount, datetime!(2024-01-15 12:00 UTC), "test")
            .kind(kind)
            .category(category)
            .finalise(TransactionId::new("t"))
    }

    fn expense(amount: f64, category: &str) -> Transaction {
        create_test_transaction(amount, TransactionKind::Expense, category)
    }

    fn income(amount: f64, category: &str) -> Transaction {
        create_test_transaction(amount, TransactionKind::Income, category)
    }

    #[test]
    fn pools_expense_and_income_for_percentages() {
        let transactions = vec![expense(100.0, "Food"), income(50.0, "Salary")];

        let slices = category_slices(&transactions);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].title, "Expense Food");
        assert_eq!(slices[0].total, 100.0);
        assert_eq!(slices[0].percentage, 66.7);
        assert_eq!(slices[1].title, "Income Salary");
        assert_eq!(slices[1].total, 50.0);
        assert_eq!(slices[1].percentage, 33.3);
    }

    #[test]
    fn separates_same_category_by_kind() {
        let transactions = vec![
            expense(10.0, "Gifts"),
            income(30.0, "Gifts"),
            expense(20.0, "Gifts"),
        ];

        let slices = category_slices(&transactions);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].kind, TransactionKind::Expense);
        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[0].total, 30.0);
        assert_eq!(slices[1].kind, TransactionKind::Income);
        assert_eq!(slices[1].count, 1);
        assert_eq!(slices[1].total, 30.0);
    }

    #[test]
    fn orders_slices_by_first_appearance() {
        let transactions = vec![
            expense(1.0, "Transport"),
            expense(1.0, "Food"),
            expense(1.0, "Transport"),
            income(1.0, "Salary"),
        ];

        let slices = category_slices(&transactions);

        let titles: Vec<&str> = slices.iter().map(|slice| slice.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Expense Transport", "Expense Food", "Income Salary"]
        );
    }

    #[test]
    fn assigns_hues_by_golden_angle() {
        let transactions = vec![
            expense(1.0, "A"),
            expense(1.0, "B"),
            expense(1.0, "C"),
        ];

        let slices = category_slices(&transactions);

        assert_eq!(slices[0].hue, Hue::nth(0));
        assert!((slices[0].hue.degrees() - GOLDEN_ANGLE_DEGREES).abs() < 1e-9);
        assert!((slices[1].hue.degrees() - 275.016).abs() < 1e-9);
        assert!((slices[2].hue.degrees() - 52.524).abs() < 1e-9);
    }

    #[test]
    fn hues_stay_within_a_turn() {
        for index in 0..500 {
            let degrees = Hue::nth(index).degrees();
            assert!((0.0..360.0).contains(&degrees), "hue {index} was {degrees}");
        }
    }

    #[test]
    fn hue_formats_as_css_colours() {
        let hue = Hue::nth(0);

        assert_eq!(hue.background(), "hsla(137.508, 70%, 50%, 0.2)");
        assert_eq!(hue.border(), "hsla(137.508, 80%, 50%, 1)");
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let transactions = vec![
            expense(33.0, "Food"),
            expense(17.5, "Transport"),
            income(120.0, "Salary"),
            expense(0.99, "Shopping"),
            income(7.0, "Gifts"),
        ];

        let slices = category_slices(&transactions);

        let sum: f64 = slices.iter().map(|slice| slice.percentage).sum();
        let tolerance = 0.1 * slices.len() as f64;
        assert!((sum - 100.0).abs() <= tolerance, "percentages summed to {sum}");
    }

    #[test]
    fn all_zero_amounts_give_zero_percentages() {
        let transactions = vec![
            expense(0.0, "Food"),
            income(0.0, "Salary"),
            expense(0.0, "Food"),
        ];

        let slices = category_slices(&transactions);

        assert_eq!(slices.len(), 2);
        for slice in &slices {
            assert_eq!(slice.percentage, 0.0);
            assert!(!slice.percentage.is_nan());
        }
    }

    #[test]
    fn empty_input_gives_no_slices() {
        let transactions: Vec<Transaction> = Vec::new();

        assert!(category_slices(&transactions).is_empty());
    }

    #[test]
    fn is_idempotent() {
        let transactions = vec![expense(12.0, "Food"), income(3.0, "Salary")];

        assert_eq!(category_slices(&transactions), category_slices(&transactions));
    }

    #[test]
    fn percent_of_rounds_to_one_decimal() {
        assert_eq!(percent_of(1.0, 3.0), 33.3);
        assert_eq!(percent_of(2.0, 3.0), 66.7);
        assert_eq!(percent_of(5.0, 5.0), 100.0);
        assert_eq!(percent_of(5.0, 0.0), 0.0);
    }
}
