//! The categories offered when creating or editing a transaction.
//!
//! Categories are free text, these are only suggestions.

use crate::Transaction;

/// The categories suggested before the user has created any of their own.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Food",
    "Transportation",
    "Housing",
    "Entertainment",
    "Utilities",
    "Healthcare",
    "Shopping",
];

/// Lists the categories to suggest to the user.
///
/// The categories used by `transactions` come first in order of first
/// appearance, followed by any [DEFAULT_CATEGORIES] not already listed. Empty
/// categories are skipped.
pub fn known_categories(transactions: &[Transaction]) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();

    let used = transactions.iter().map(Transaction::category);

    for category in used.chain(DEFAULT_CATEGORIES) {
        if !category.is_empty() && !categories.contains(&category) {
            categories.push(category);
        }
    }

    categories
}
