//! Grouping of transactions by calendar month and by owner.
//!
//! Both groupings are stable: groups appear in the order their first
//! transaction appears in the input, and transactions keep their relative
//! order within a group.

use std::collections::HashMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{Owner, Period, Transaction, summary::Totals};

/// The transactions that occurred in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodGroup<'a> {
    /// The month the transactions occurred in.
    pub period: Period,
    /// The transactions in input order.
    pub transactions: Vec<&'a Transaction>,
}

impl PeriodGroup<'_> {
    /// The expense and income totals of the group.
    pub fn totals(&self) -> Totals {
        Totals::from_transactions(self.transactions.iter().copied())
    }
}

/// A mapping from period to the transactions that occurred in it.
///
/// Only periods with at least one transaction are present. Serializes as a map
/// from period key (e.g. `January_2024`) to transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodGroups<'a> {
    groups: Vec<PeriodGroup<'a>>,
}

impl<'a> PeriodGroups<'a> {
    /// The group for `period`, if any transaction occurred in it.
    pub fn get(&self, period: Period) -> Option<&PeriodGroup<'a>> {
        self.groups.iter().find(|group| group.period == period)
    }

    /// The group for a period key such as `January_2024`.
    ///
    /// Returns `None` if the key is not a valid period or no transaction occurred in it.
    pub fn get_by_key(&self, key: &str) -> Option<&PeriodGroup<'a>> {
        key.parse().ok().and_then(|period| self.get(period))
    }

    /// The transactions for `period`, empty if none occurred in it.
    pub fn transactions(&self, period: Period) -> &[&'a Transaction] {
        self.get(period)
            .map(|group| group.transactions.as_slice())
            .unwrap_or_default()
    }

    /// Iterates over the groups in order of first appearance.
    pub fn iter(&self) -> std::slice::Iter<'_, PeriodGroup<'a>> {
        self.groups.iter()
    }

    /// The number of periods with transactions.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a, 'b> IntoIterator for &'b PeriodGroups<'a> {
    type Item = &'b PeriodGroup<'a>;
    type IntoIter = std::slice::Iter<'b, PeriodGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl Serialize for PeriodGroups<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;

        for group in &self.groups {
            map.serialize_entry(&group.period.key(), &group.transactions)?;
        }

        map.end()
    }
}

/// Groups transactions by the calendar month they occurred in.
///
/// The month is taken from the date of each transaction's occurred time in
/// the UTC offset it was recorded with.
pub fn group_by_period<'a, I>(transactions: I) -> PeriodGroups<'a>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: Vec<PeriodGroup<'a>> = Vec::new();
    let mut index_by_period: HashMap<Period, usize> = HashMap::new();

    for transaction in transactions {
        let period = Period::of(transaction.occurred_at().date());

        let index = *index_by_period.entry(period).or_insert_with(|| {
            groups.push(PeriodGroup {
                period,
                transactions: Vec::new(),
            });
            groups.len() - 1
        });

        groups[index].transactions.push(transaction);
    }

    tracing::debug!("Grouped transactions into {} periods", groups.len());

    PeriodGroups { groups }
}

/// The transactions of one user and their totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerSummary<'a> {
    /// The owner as recorded on their first transaction in the input.
    pub owner: Owner,
    /// The sums of the owner's expense and income amounts.
    pub totals: Totals,
    /// The owner's transactions in input order.
    pub transactions: Vec<&'a Transaction>,
}

/// Groups transactions by the ID of the user who created them and totals each group.
///
/// Summaries are ordered by the first appearance of each owner ID. The name,
/// email and avatar of each owner are taken from their first transaction,
/// later transactions with different details do not change them.
pub fn group_by_owner<'a, I>(transactions: I) -> Vec<OwnerSummary<'a>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut summaries: Vec<OwnerSummary<'a>> = Vec::new();
    let mut index_by_owner: HashMap<&'a str, usize> = HashMap::new();

    for transaction in transactions {
        let owner = transaction.owner();

        let index = *index_by_owner.entry(owner.id.as_str()).or_insert_with(|| {
            summaries.push(OwnerSummary {
                owner: owner.clone(),
                totals: Totals::default(),
                transactions: Vec::new(),
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[index];
        summary.totals.add(transaction);
        summary.transactions.push(transaction);
    }

    tracing::debug!("Grouped transactions by {} owners", summaries.len());

    summaries
}
